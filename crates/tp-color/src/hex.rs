// SPDX-License-Identifier: MIT
//
// 24-bit hex colors.
//
// The canonical form is the packed integer `0xRRGGBB`. Strings are accepted
// at the boundary as exactly six hex digits, with or without a leading `#`.

use std::fmt;
use std::str::FromStr;

use crate::error::{ColorError, RangeKind, Result};
use crate::rgb::Rgb;

/// Largest valid packed color.
pub const MAX_HEX: u32 = 0x00FF_FFFF;

/// A packed 24-bit color, `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hex(u32);

impl Hex {
    /// Wrap a packed integer.
    ///
    /// # Errors
    ///
    /// [`ColorError::OutOfRange`] if `value` exceeds `0xFFFFFF`.
    pub fn new(value: u32) -> Result<Self> {
        if value > MAX_HEX {
            return Err(ColorError::OutOfRange {
                kind: RangeKind::Hex,
                value: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Parse `RRGGBB` or `#RRGGBB` (either case).
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidColorFormat`] for the wrong length or non-hex digits.
    pub fn parse(s: &str) -> Result<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidColorFormat(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| ColorError::InvalidColorFormat(s.to_string()))
    }

    /// The packed integer.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Split into `(r, g, b)` bytes.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn to_rgb8(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }

    /// Unpack into a normalized [`Rgb`].
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let (r, g, b) = self.to_rgb8();
        Rgb::from_rgb8(r, g, b)
    }
}

impl From<Rgb> for Hex {
    fn from(rgb: Rgb) -> Self {
        Self(rgb.to_hex())
    }
}

impl From<(u8, u8, u8)> for Hex {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self((u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b))
    }
}

impl FromStr for Hex {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

// ─── Hex-like inputs ─────────────────────────────────────────────────────────

/// Anything that can be read as a hex color: a packed integer, a [`Hex`],
/// or a hex string.
pub trait HexLike {
    /// Normalize to a validated [`Hex`].
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidColorFormat`] for unparsable strings,
    /// [`ColorError::OutOfRange`] for integers above `0xFFFFFF`.
    fn to_hex(&self) -> Result<Hex>;
}

impl HexLike for Hex {
    fn to_hex(&self) -> Result<Hex> {
        Ok(*self)
    }
}

impl HexLike for u32 {
    fn to_hex(&self) -> Result<Hex> {
        Hex::new(*self)
    }
}

impl HexLike for str {
    fn to_hex(&self) -> Result<Hex> {
        Hex::parse(self)
    }
}

impl HexLike for String {
    fn to_hex(&self) -> Result<Hex> {
        Hex::parse(self)
    }
}

impl<T: HexLike + ?Sized> HexLike for &T {
    fn to_hex(&self) -> Result<Hex> {
        (**self).to_hex()
    }
}

// ─── Conversions ─────────────────────────────────────────────────────────────

/// Pack normalized channels into `0xRRGGBB`, rounding half away from zero.
///
/// # Errors
///
/// [`ColorError::OutOfGamut`] if a channel is outside `[0, 1]`.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> Result<u32> {
    Ok(Rgb::new(r, g, b)?.to_hex())
}

/// Unpack a hex-like input into normalized channels.
///
/// ```
/// use tp_color::hex_to_rgb;
///
/// assert_eq!(hex_to_rgb("#ff0000").unwrap().to_rgb8(), (255, 0, 0));
/// assert_eq!(hex_to_rgb(0x00_80_ff).unwrap().to_rgb8(), (0, 128, 255));
/// assert!(hex_to_rgb("zzzzzz").is_err());
/// ```
///
/// # Errors
///
/// See [`HexLike::to_hex`].
pub fn hex_to_rgb(hex: impl HexLike) -> Result<Rgb> {
    Ok(hex.to_hex()?.to_rgb())
}

/// Normalize a hex-like input to the canonical packed integer.
///
/// # Errors
///
/// See [`HexLike::to_hex`].
pub fn hex_to_hex(hex: impl HexLike) -> Result<u32> {
    Ok(hex.to_hex()?.value())
}
