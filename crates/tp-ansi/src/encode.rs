// SPDX-License-Identifier: MIT
//
// SGR encoding — the inverse of the decoder.
//
// Palette indices 0–15 use the compact codes (30–37, 90–97 and their
// background twins), other indices use `38;5;N`, and every other color
// representation is sent as 24-bit `38;2;R;G;B`. Whatever is written here
// decodes back to an equal instruction.
//
// All writers return `io::Result` propagated from the underlying writer.

use std::fmt::{self, Write as _};
use std::io::{self, Write};

use tp_color::ColorValue;

use crate::instruction::{ColorRole, Instruction};
use crate::style::Style;

// ─── Parameters ──────────────────────────────────────────────────────────────

fn write_color_params(f: &mut impl fmt::Write, role: ColorRole, color: ColorValue) -> fmt::Result {
    let (base, bright, extended) = match role {
        ColorRole::Foreground => (30, 90, 38),
        ColorRole::Background => (40, 100, 48),
    };
    match color {
        ColorValue::Ansi256(idx) if idx < 8 => write!(f, "{}", base + u16::from(idx)),
        ColorValue::Ansi256(idx) if idx < 16 => write!(f, "{}", bright + u16::from(idx) - 8),
        ColorValue::Ansi256(idx) => write!(f, "{extended};5;{idx}"),
        other => {
            let (r, g, b) = other.to_rgb_clamped().to_rgb8();
            write!(f, "{extended};2;{r};{g};{b}")
        }
    }
}

impl Instruction {
    /// Write this instruction's SGR parameters, without `ESC [` or `m`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn write_params(&self, f: &mut impl fmt::Write) -> fmt::Result {
        match *self {
            Self::Reset => f.write_char('0'),
            Self::SetAttribute(attribute) => write!(f, "{}", attribute.sgr()),
            Self::SetColor(role, color) => write_color_params(f, role, color),
        }
    }
}

/// The canonical escape, e.g. `ESC[38;5;208m`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\x1b[")?;
        self.write_params(f)?;
        f.write_char('m')
    }
}

// ─── Writers ─────────────────────────────────────────────────────────────────

/// Write the canonical escape for one instruction.
///
/// # Errors
///
/// Propagates errors from the underlying writer.
#[inline]
pub fn write_instruction(w: &mut impl Write, instruction: &Instruction) -> io::Result<()> {
    write!(w, "{instruction}")
}

/// Several instructions displayed as a single SGR escape:
/// `ESC[1;3;38;5;9m`. Displays nothing for an empty slice.
#[derive(Debug, Clone, Copy)]
pub struct Sgr<'a>(pub &'a [Instruction]);

impl fmt::Display for Sgr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.0.split_first() else {
            return Ok(());
        };
        f.write_str("\x1b[")?;
        first.write_params(f)?;
        for instruction in rest {
            f.write_char(';')?;
            instruction.write_params(f)?;
        }
        f.write_char('m')
    }
}

/// Write several instructions as a single SGR escape.
///
/// Does nothing for an empty slice.
///
/// # Errors
///
/// Propagates errors from the underlying writer.
pub fn write_sgr(w: &mut impl Write, instructions: &[Instruction]) -> io::Result<()> {
    write!(w, "{}", Sgr(instructions))
}

/// The instructions that move the terminal from style `from` to style `to`.
///
/// Attributes can only be switched on and colors never return to default
/// without a reset, so either of those makes the change start with
/// [`Instruction::Reset`] and rebuild `to` from scratch.
#[must_use]
pub fn style_change(from: &Style, to: &Style) -> Vec<Instruction> {
    if from == to {
        return Vec::new();
    }

    let needs_reset = !to.attributes.contains(from.attributes)
        || (from.foreground.is_some() && to.foreground.is_none())
        || (from.background.is_some() && to.background.is_none());

    if needs_reset {
        let mut out = vec![Instruction::Reset];
        out.extend(to.instructions());
        return out;
    }

    let mut out: Vec<Instruction> = (to.attributes - from.attributes)
        .attributes()
        .map(Instruction::SetAttribute)
        .collect();
    if to.foreground != from.foreground {
        if let Some(color) = to.foreground {
            out.push(Instruction::SetColor(ColorRole::Foreground, color));
        }
    }
    if to.background != from.background {
        if let Some(color) = to.background {
            out.push(Instruction::SetColor(ColorRole::Background, color));
        }
    }
    out
}

/// Write the minimal SGR escape that moves from style `from` to `to`.
///
/// # Errors
///
/// Propagates errors from the underlying writer.
pub fn write_style_change(w: &mut impl Write, from: &Style, to: &Style) -> io::Result<()> {
    write_sgr(w, &style_change(from, to))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use tp_color::{Hcl, Hex, Rgb, WebColor};

    use super::*;
    use crate::decode::decode_sgr_params;
    use crate::instruction::Attribute;
    use crate::style::Attributes;

    fn fg(color: ColorValue) -> Instruction {
        Instruction::SetColor(ColorRole::Foreground, color)
    }

    fn bg(color: ColorValue) -> Instruction {
        Instruction::SetColor(ColorRole::Background, color)
    }

    fn encoded(instruction: &Instruction) -> String {
        let mut out = Vec::new();
        write_instruction(&mut out, instruction).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test_case(Instruction::Reset, "\x1b[0m" ; "reset")]
    #[test_case(Instruction::SetAttribute(Attribute::Bold), "\x1b[1m" ; "bold")]
    #[test_case(Instruction::SetAttribute(Attribute::Strikethrough), "\x1b[9m" ; "strikethrough")]
    #[test_case(fg(ColorValue::Ansi256(1)), "\x1b[31m" ; "standard foreground")]
    #[test_case(fg(ColorValue::Ansi256(9)), "\x1b[91m" ; "bright foreground")]
    #[test_case(bg(ColorValue::Ansi256(0)), "\x1b[40m" ; "standard background")]
    #[test_case(bg(ColorValue::Ansi256(15)), "\x1b[107m" ; "bright background")]
    #[test_case(fg(ColorValue::Ansi256(208)), "\x1b[38;5;208m" ; "palette foreground")]
    #[test_case(bg(ColorValue::Ansi256(16)), "\x1b[48;5;16m" ; "palette background")]
    #[test_case(fg(ColorValue::Rgb(Rgb::from_rgb8(1, 2, 3))), "\x1b[38;2;1;2;3m" ; "rgb foreground")]
    #[test_case(bg(ColorValue::Hex(Hex::from((255, 128, 0)))), "\x1b[48;2;255;128;0m" ; "hex background")]
    fn canonical_encoding(instruction: Instruction, expected: &str) {
        assert_eq!(encoded(&instruction), expected);
        assert_eq!(instruction.to_string(), expected);
    }

    #[test]
    fn named_colors_encode_as_truecolor() {
        let navy = WebColor::lookup("navy").unwrap();
        assert_eq!(encoded(&fg(ColorValue::WebColor(navy))), "\x1b[38;2;0;0;128m");
    }

    #[test]
    fn every_instruction_kind_roundtrips() {
        let mut instructions = vec![Instruction::Reset];
        instructions.extend(Attribute::ALL.map(Instruction::SetAttribute));
        for idx in [0u8, 7, 8, 15, 16, 231, 232, 255] {
            instructions.push(fg(ColorValue::Ansi256(idx)));
            instructions.push(bg(ColorValue::Ansi256(idx)));
        }
        instructions.push(fg(ColorValue::Rgb(Rgb::from_rgb8(12, 34, 56))));
        instructions.push(bg(ColorValue::Hex(Hex::from((200, 100, 0)))));
        instructions.push(fg(ColorValue::Hcl(Hcl::from_rgb(Rgb::from_rgb8(40, 160, 90)))));

        for instruction in instructions {
            let mut params = String::new();
            instruction.write_params(&mut params).unwrap();
            assert_eq!(
                decode_sgr_params(&params),
                Some(vec![instruction]),
                "params {params:?}"
            );
        }
    }

    #[test]
    fn sgr_joins_parameters() {
        let mut out = Vec::new();
        write_sgr(
            &mut out,
            &[
                Instruction::SetAttribute(Attribute::Bold),
                fg(ColorValue::Ansi256(196)),
            ],
        )
        .unwrap();
        assert_eq!(out, b"\x1b[1;38;5;196m");

        out.clear();
        write_sgr(&mut out, &[]).unwrap();
        assert!(out.is_empty());
        assert_eq!(Sgr(&[]).to_string(), "");
        assert_eq!(
            Sgr(&[Instruction::Reset, Instruction::SetAttribute(Attribute::Dim)]).to_string(),
            "\x1b[0;2m"
        );
    }

    // ── Style changes ──

    fn style(attributes: Attributes, foreground: Option<u8>) -> Style {
        Style {
            foreground: foreground.map(ColorValue::Ansi256),
            background: None,
            attributes,
        }
    }

    #[test]
    fn identical_styles_need_nothing() {
        let s = style(Attributes::BOLD, Some(3));
        assert_eq!(style_change(&s, &s), vec![]);
    }

    #[test]
    fn adding_is_incremental() {
        let from = style(Attributes::BOLD, None);
        let to = style(Attributes::BOLD | Attributes::ITALIC, Some(2));
        assert_eq!(
            style_change(&from, &to),
            vec![
                Instruction::SetAttribute(Attribute::Italic),
                fg(ColorValue::Ansi256(2)),
            ]
        );
    }

    #[test]
    fn removing_an_attribute_resets() {
        let from = style(Attributes::BOLD | Attributes::ITALIC, Some(2));
        let to = style(Attributes::ITALIC, Some(2));
        assert_eq!(
            style_change(&from, &to),
            vec![
                Instruction::Reset,
                Instruction::SetAttribute(Attribute::Italic),
                fg(ColorValue::Ansi256(2)),
            ]
        );
    }

    #[test]
    fn dropping_a_color_resets() {
        let from = style(Attributes::empty(), Some(2));
        assert_eq!(style_change(&from, &Style::DEFAULT), vec![Instruction::Reset]);
    }

    #[test]
    fn written_change_reaches_target_style() {
        let from = style(Attributes::UNDERLINE, Some(1));
        let to = style(Attributes::BOLD, Some(4));
        let mut out = Vec::new();
        write_style_change(&mut out, &from, &to).unwrap();
        let text = String::from_utf8(out).unwrap();
        let params = text
            .strip_prefix("\x1b[")
            .and_then(|s| s.strip_suffix('m'))
            .unwrap();
        let reached = decode_sgr_params(params)
            .unwrap()
            .iter()
            .fold(from, |s, i| s.apply(i));
        assert_eq!(reached, to);
    }
}
