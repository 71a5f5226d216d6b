// SPDX-License-Identifier: MIT
//
// Rendering instructions decoded from SGR escapes.
//
// SGR 0 (and the empty parameter list) is `Instruction::Reset`: normal
// attributes and default colors in one step. `Attribute` therefore only
// lists the attributes that can be switched on.

use tp_color::ColorValue;

/// A text attribute that an SGR parameter switches on.
///
/// The discriminant is the SGR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Attribute {
    /// SGR 1 — increased intensity.
    Bold = 1,
    /// SGR 2 — decreased intensity (faint).
    Dim = 2,
    /// SGR 3 — italic.
    Italic = 3,
    /// SGR 4 — single underline.
    Underline = 4,
    /// SGR 5 — slow blink.
    SlowBlink = 5,
    /// SGR 6 — rapid blink.
    RapidBlink = 6,
    /// SGR 7 — swap foreground and background.
    Reverse = 7,
    /// SGR 8 — invisible text.
    Conceal = 8,
    /// SGR 9 — crossed-out text.
    Strikethrough = 9,
}

impl Attribute {
    /// Every attribute, in SGR code order.
    pub const ALL: [Self; 9] = [
        Self::Bold,
        Self::Dim,
        Self::Italic,
        Self::Underline,
        Self::SlowBlink,
        Self::RapidBlink,
        Self::Reverse,
        Self::Conceal,
        Self::Strikethrough,
    ];

    /// Look up the attribute an SGR code switches on.
    #[must_use]
    pub const fn from_sgr(code: u32) -> Option<Self> {
        Some(match code {
            1 => Self::Bold,
            2 => Self::Dim,
            3 => Self::Italic,
            4 => Self::Underline,
            5 => Self::SlowBlink,
            6 => Self::RapidBlink,
            7 => Self::Reverse,
            8 => Self::Conceal,
            9 => Self::Strikethrough,
            _ => return None,
        })
    }

    /// The SGR code.
    #[inline]
    #[must_use]
    pub const fn sgr(self) -> u8 {
        self as u8
    }
}

/// Which side of a cell a color applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Foreground,
    Background,
}

/// One rendering instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    /// Switch an attribute on.
    SetAttribute(Attribute),
    /// Set the foreground or background color.
    SetColor(ColorRole, ColorValue),
    /// Back to normal attributes and default colors.
    Reset,
}

impl From<Attribute> for Instruction {
    fn from(attribute: Attribute) -> Self {
        Self::SetAttribute(attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sgr_codes_roundtrip() {
        for attribute in Attribute::ALL {
            assert_eq!(Attribute::from_sgr(u32::from(attribute.sgr())), Some(attribute));
        }
    }

    #[test]
    fn codes_outside_one_to_nine_are_not_attributes() {
        assert_eq!(Attribute::from_sgr(0), None);
        assert_eq!(Attribute::from_sgr(10), None);
        assert_eq!(Attribute::from_sgr(22), None);
    }
}
