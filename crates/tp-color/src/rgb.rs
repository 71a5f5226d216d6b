// SPDX-License-Identifier: MIT
//
// Validated sRGB triple.
//
// `Rgb` is the hub every other representation converts through. Its
// channels always lie in [0, 1]: the checked constructor rejects anything
// else, the clamping constructor is the explicit opt-in for lossy input,
// and the 8-bit constructors cover the integer boundary.

use std::fmt;

use crate::error::{ColorError, RangeKind, Result};

/// Slack allowed on conversion outputs before they count as out of gamut.
///
/// A round trip through XYZ or LUV can land a hair outside [0, 1] (white
/// comes back as 1.000000000002). Such values are snapped to the boundary.
pub const GAMUT_SLACK: f64 = 1e-7;

/// A color in sRGB with each channel in `[0, 1]`.
///
/// # Examples
///
/// ```
/// use tp_color::Rgb;
///
/// let teal = Rgb::new(0.0, 0.5, 0.5).unwrap();
/// assert_eq!(teal.to_rgb8(), (0, 128, 128));
///
/// assert!(Rgb::new(1.2, 0.0, 0.0).is_err());
/// assert_eq!(Rgb::clamped(1.2, 0.0, 0.0), Rgb::new(1.0, 0.0, 0.0).unwrap());
/// ```
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    r: f64,
    g: f64,
    b: f64,
}

fn check_channel(v: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(ColorError::OutOfGamut { value: v })
    }
}

fn snap_channel(v: f64) -> Result<f64> {
    if (-GAMUT_SLACK..=1.0 + GAMUT_SLACK).contains(&v) {
        Ok(v.clamp(0.0, 1.0))
    } else {
        Err(ColorError::OutOfGamut { value: v })
    }
}

fn check_rgb8(v: i64) -> Result<u8> {
    u8::try_from(v).map_err(|_| ColorError::OutOfRange {
        kind: RangeKind::Rgb8Channel,
        value: v,
    })
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };

    /// Pure white.
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Create a color from normalized channels.
    ///
    /// # Errors
    ///
    /// [`ColorError::OutOfGamut`] if any channel is outside `[0, 1]` or NaN.
    pub fn new(r: f64, g: f64, b: f64) -> Result<Self> {
        Ok(Self {
            r: check_channel(r)?,
            g: check_channel(g)?,
            b: check_channel(b)?,
        })
    }

    /// Create a color from normalized channels, clamping each into `[0, 1]`.
    /// NaN becomes 0.
    #[must_use]
    pub fn clamped(r: f64, g: f64, b: f64) -> Self {
        let clamp = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self {
            r: clamp(r),
            g: clamp(g),
            b: clamp(b),
        }
    }

    /// Accept the output of a color-space conversion, tolerating
    /// [`GAMUT_SLACK`] of floating-point drift past either boundary.
    ///
    /// # Errors
    ///
    /// [`ColorError::OutOfGamut`] if a channel is further outside.
    pub fn from_conversion((r, g, b): (f64, f64, f64)) -> Result<Self> {
        Ok(Self {
            r: snap_channel(r)?,
            g: snap_channel(g)?,
            b: snap_channel(b)?,
        })
    }

    /// Create a color from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    /// Create a color from integer channels that should lie in 0–255.
    ///
    /// # Errors
    ///
    /// [`ColorError::OutOfRange`] if any channel is outside 0–255.
    pub fn from_ints(r: i64, g: i64, b: i64) -> Result<Self> {
        Ok(Self::from_rgb8(check_rgb8(r)?, check_rgb8(g)?, check_rgb8(b)?))
    }

    #[inline]
    #[must_use]
    pub const fn r(self) -> f64 {
        self.r
    }

    #[inline]
    #[must_use]
    pub const fn g(self) -> f64 {
        self.g
    }

    #[inline]
    #[must_use]
    pub const fn b(self) -> f64 {
        self.b
    }

    /// The channels as a plain tuple.
    #[inline]
    #[must_use]
    pub const fn to_tuple(self) -> (f64, f64, f64) {
        (self.r, self.g, self.b)
    }

    /// Convert to 8-bit channels, rounding half away from zero.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Pack into a 24-bit `0xRRGGBB` integer.
    #[must_use]
    pub fn to_hex(self) -> u32 {
        let (r, g, b) = self.to_rgb8();
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }

    /// Largest per-channel absolute difference to `other`.
    #[must_use]
    pub fn max_channel_diff(self, other: Self) -> f64 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }
}

/// Convert a channel in [0, 1] to 0–255, rounding half away from zero.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: the clamp keeps the value within 0.0..=255.0 before truncation.
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb({:.4}, {:.4}, {:.4})", self.r, self.g, self.b)
    }
}

impl TryFrom<(f64, f64, f64)> for Rgb {
    type Error = ColorError;

    fn try_from((r, g, b): (f64, f64, f64)) -> Result<Self> {
        Self::new(r, g, b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::from_rgb8(r, g, b)
    }
}

impl From<Rgb> for (f64, f64, f64) {
    fn from(rgb: Rgb) -> Self {
        rgb.to_tuple()
    }
}
