// SPDX-License-Identifier: MIT
//
// Folding instructions into the current rendering style.
//
// A decoded stream says *what changed*; a loader building a canvas needs
// *what is in effect* for each text run. `Style` is that running state and
// `styled` walks a document pairing every text run with it.

use std::iter::FusedIterator;

use tp_color::{ColorPair, ColorValue};

use crate::decode::{Decoded, Token, decode};
use crate::instruction::{Attribute, ColorRole, Instruction};

bitflags::bitflags! {
    /// Set of active text attributes.
    ///
    /// ```
    /// use tp_ansi::Attributes;
    ///
    /// let attrs = Attributes::BOLD | Attributes::REVERSE;
    /// assert!(attrs.contains(Attributes::BOLD));
    /// assert!(!attrs.contains(Attributes::DIM));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attributes: u16 {
        const BOLD          = 1 << 0;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const SLOW_BLINK    = 1 << 4;
        const RAPID_BLINK   = 1 << 5;
        const REVERSE       = 1 << 6;
        const CONCEAL       = 1 << 7;
        const STRIKETHROUGH = 1 << 8;
    }
}

impl Attribute {
    /// The flag this attribute occupies in an [`Attributes`] set.
    #[must_use]
    pub const fn flag(self) -> Attributes {
        match self {
            Self::Bold => Attributes::BOLD,
            Self::Dim => Attributes::DIM,
            Self::Italic => Attributes::ITALIC,
            Self::Underline => Attributes::UNDERLINE,
            Self::SlowBlink => Attributes::SLOW_BLINK,
            Self::RapidBlink => Attributes::RAPID_BLINK,
            Self::Reverse => Attributes::REVERSE,
            Self::Conceal => Attributes::CONCEAL,
            Self::Strikethrough => Attributes::STRIKETHROUGH,
        }
    }
}

impl Attributes {
    /// The individual attributes in the set, in SGR code order.
    pub fn attributes(self) -> impl Iterator<Item = Attribute> {
        Attribute::ALL.into_iter().filter(move |a| self.contains(a.flag()))
    }
}

// ─── Style ───────────────────────────────────────────────────────────────────

/// The rendering state in effect at some point of a document.
///
/// `None` colors mean "whatever the terminal default is".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    pub foreground: Option<ColorValue>,
    pub background: Option<ColorValue>,
    pub attributes: Attributes,
}

impl Style {
    /// Normal attributes, default colors.
    pub const DEFAULT: Self = Self {
        foreground: None,
        background: None,
        attributes: Attributes::empty(),
    };

    /// The style after `instruction` takes effect.
    #[must_use]
    pub fn apply(self, instruction: &Instruction) -> Self {
        match *instruction {
            Instruction::Reset => Self::DEFAULT,
            Instruction::SetAttribute(attribute) => Self {
                attributes: self.attributes | attribute.flag(),
                ..self
            },
            Instruction::SetColor(ColorRole::Foreground, color) => Self {
                foreground: Some(color),
                ..self
            },
            Instruction::SetColor(ColorRole::Background, color) => Self {
                background: Some(color),
                ..self
            },
        }
    }

    /// Whether this is the default style.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }

    /// The colors actually painted, given the document's default colors.
    ///
    /// Unset colors take the defaults; `Reverse` swaps the result.
    #[must_use]
    pub fn resolve(&self, defaults: &ColorPair) -> ColorPair {
        let pair = ColorPair::new(
            self.foreground.unwrap_or(defaults.foreground),
            self.background.unwrap_or(defaults.background),
        );
        if self.attributes.contains(Attributes::REVERSE) {
            pair.swap()
        } else {
            pair
        }
    }

    /// The instructions that reach this style from [`Style::DEFAULT`].
    #[must_use]
    pub fn instructions(&self) -> Vec<Instruction> {
        let mut out: Vec<Instruction> = self
            .attributes
            .attributes()
            .map(Instruction::SetAttribute)
            .collect();
        if let Some(color) = self.foreground {
            out.push(Instruction::SetColor(ColorRole::Foreground, color));
        }
        if let Some(color) = self.background {
            out.push(Instruction::SetColor(ColorRole::Background, color));
        }
        out
    }
}

// ─── Styled runs ─────────────────────────────────────────────────────────────

/// Iterator over `(style, text)` runs of a document. Created by [`styled`].
#[derive(Debug, Clone)]
pub struct Styled<'a> {
    tokens: Decoded<'a>,
    style: Style,
}

impl Styled<'_> {
    /// The style in effect at the current position.
    #[must_use]
    pub const fn style(&self) -> Style {
        self.style
    }
}

impl<'a> Iterator for Styled<'a> {
    type Item = (Style, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.tokens.next()? {
                Token::Text(text) => return Some((self.style, text)),
                Token::Instruction(instruction) => self.style = self.style.apply(&instruction),
            }
        }
    }
}

impl FusedIterator for Styled<'_> {}

/// Walk `input`, pairing every text run with the style in effect.
///
/// Escapes that pass through undecoded come out as text runs of their own.
#[must_use]
pub fn styled(input: &str) -> Styled<'_> {
    Styled {
        tokens: decode(input),
        style: Style::DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tp_color::Rgb;

    use super::*;

    fn fg(idx: u8) -> Instruction {
        Instruction::SetColor(ColorRole::Foreground, ColorValue::Ansi256(idx))
    }

    #[test]
    fn apply_accumulates() {
        let style = Style::DEFAULT
            .apply(&Instruction::SetAttribute(Attribute::Bold))
            .apply(&fg(1))
            .apply(&Instruction::SetAttribute(Attribute::Italic));
        assert_eq!(style.attributes, Attributes::BOLD | Attributes::ITALIC);
        assert_eq!(style.foreground, Some(ColorValue::Ansi256(1)));
        assert_eq!(style.background, None);
    }

    #[test]
    fn reset_clears_everything() {
        let style = Style::DEFAULT
            .apply(&Instruction::SetAttribute(Attribute::Underline))
            .apply(&fg(4))
            .apply(&Instruction::Reset);
        assert!(style.is_default());
    }

    #[test]
    fn later_color_wins() {
        let style = Style::DEFAULT.apply(&fg(1)).apply(&fg(2));
        assert_eq!(style.foreground, Some(ColorValue::Ansi256(2)));
    }

    #[test]
    fn resolve_substitutes_defaults() {
        let defaults = ColorPair::default();
        let style = Style::DEFAULT.apply(&Instruction::SetColor(
            ColorRole::Background,
            ColorValue::Rgb(Rgb::from_rgb8(0, 0, 255)),
        ));
        let pair = style.resolve(&defaults);
        assert_eq!(pair.foreground, defaults.foreground);
        assert_eq!(pair.background, ColorValue::Rgb(Rgb::from_rgb8(0, 0, 255)));
    }

    #[test]
    fn resolve_honours_reverse() {
        let defaults = ColorPair::default();
        let style = Style::DEFAULT
            .apply(&fg(1))
            .apply(&Instruction::SetAttribute(Attribute::Reverse));
        let pair = style.resolve(&defaults);
        assert_eq!(pair.foreground, defaults.background);
        assert_eq!(pair.background, ColorValue::Ansi256(1));
    }

    #[test]
    fn instructions_rebuild_the_style() {
        let style = Style::DEFAULT
            .apply(&Instruction::SetAttribute(Attribute::Strikethrough))
            .apply(&Instruction::SetAttribute(Attribute::Dim))
            .apply(&fg(200));
        let rebuilt = style
            .instructions()
            .iter()
            .fold(Style::DEFAULT, |s, i| s.apply(i));
        assert_eq!(rebuilt, style);
        assert_eq!(
            style.instructions(),
            vec![
                Instruction::SetAttribute(Attribute::Dim),
                Instruction::SetAttribute(Attribute::Strikethrough),
                fg(200),
            ]
        );
    }

    #[test]
    fn styled_runs() {
        let runs: Vec<_> = styled("plain\x1b[1;31mHello\x1b[m, world!").collect();
        let bold_red = Style {
            foreground: Some(ColorValue::Ansi256(1)),
            background: None,
            attributes: Attributes::BOLD,
        };
        assert_eq!(
            runs,
            vec![
                (Style::DEFAULT, "plain"),
                (bold_red, "Hello"),
                (Style::DEFAULT, ", world!"),
            ]
        );
    }

    #[test]
    fn trailing_instructions_update_state() {
        let mut runs = styled("x\x1b[7m");
        assert_eq!(runs.next(), Some((Style::DEFAULT, "x")));
        assert_eq!(runs.next(), None);
        assert_eq!(runs.style().attributes, Attributes::REVERSE);
    }
}
