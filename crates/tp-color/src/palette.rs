// SPDX-License-Identifier: MIT
//
// The 256-color terminal palette.
//
// The palette consists of:
// - Colors 0–7: Standard colors (black, red, green, yellow, blue, magenta, cyan, white)
// - Colors 8–15: Bright variants of the standard colors
// - Colors 16–231: A 6×6×6 RGB color cube
// - Colors 232–255: A 24-step grayscale ramp
//
// Only the first sixteen entries are a literal table. The cube and the ramp
// are computed from their construction rule, so index → RGB is reproducible
// without restating 240 entries.

use crate::error::{ColorError, RangeKind, Result};
use crate::hex::Hex;
use crate::rgb::Rgb;
use crate::space::{luv_distance_sq, rgb_to_luv};

/// The standard ANSI-16 palette as RGB values (VGA / xterm defaults).
///
/// Individual terminals may override these, but for conversions and
/// nearest-match calculations these are the reference.
pub const ANSI16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),       // 0: Black
    (128, 0, 0),     // 1: Red
    (0, 128, 0),     // 2: Green
    (128, 128, 0),   // 3: Yellow
    (0, 0, 128),     // 4: Blue
    (128, 0, 128),   // 5: Magenta
    (0, 128, 128),   // 6: Cyan
    (192, 192, 192), // 7: White
    (128, 128, 128), // 8: Bright Black
    (255, 0, 0),     // 9: Bright Red
    (0, 255, 0),     // 10: Bright Green
    (255, 255, 0),   // 11: Bright Yellow
    (0, 0, 255),     // 12: Bright Blue
    (255, 0, 255),   // 13: Bright Magenta
    (0, 255, 255),   // 14: Bright Cyan
    (255, 255, 255), // 15: Bright White
];

/// Channel levels of the 6×6×6 cube: 0, 95, 135, 175, 215, 255.
#[inline]
#[must_use]
pub const fn cube_level(i: u8) -> u8 {
    if i == 0 { 0 } else { 55 + 40 * i }
}

/// Convert a palette index to 8-bit RGB. Total over `u8`.
#[must_use]
pub const fn ansi256_rgb8(idx: u8) -> (u8, u8, u8) {
    match idx {
        // Standard + bright colors
        0..=15 => ANSI16_RGB[idx as usize],

        // 6×6×6 color cube (indices 16–231)
        16..=231 => {
            let idx = idx - 16;
            (
                cube_level(idx / 36),
                cube_level((idx % 36) / 6),
                cube_level(idx % 6),
            )
        }

        // Grayscale ramp (indices 232–255)
        232..=255 => {
            let v = 8 + 10 * (idx - 232);
            (v, v, v)
        }
    }
}

fn check_index(idx: u32) -> Result<u8> {
    u8::try_from(idx).map_err(|_| ColorError::OutOfRange {
        kind: RangeKind::Ansi256Index,
        value: i64::from(idx),
    })
}

/// Convert a palette index to normalized RGB.
///
/// ```
/// use tp_color::ansi256_to_rgb;
///
/// assert_eq!(ansi256_to_rgb(15).unwrap().to_tuple(), (1.0, 1.0, 1.0));
/// assert!(ansi256_to_rgb(256).is_err());
/// ```
///
/// # Errors
///
/// [`ColorError::OutOfRange`] if `idx` exceeds 255.
pub fn ansi256_to_rgb(idx: u32) -> Result<Rgb> {
    let (r, g, b) = ansi256_rgb8(check_index(idx)?);
    Ok(Rgb::from_rgb8(r, g, b))
}

/// Convert a palette index to a packed `0xRRGGBB`.
///
/// # Errors
///
/// [`ColorError::OutOfRange`] if `idx` exceeds 255.
pub fn ansi256_to_hex(idx: u32) -> Result<u32> {
    Ok(Hex::from(ansi256_rgb8(check_index(idx)?)).value())
}

// ─── Nearest match ───────────────────────────────────────────────────────────
//
// Downsampling arbitrary RGB to the palette uses Euclidean distance in
// CIE LUV, the same perceptual space the HCL sliders live in. Ties go to
// the lowest index, so exact palette colors map back to their canonical
// (lowest) index.

fn nearest_in(target: (f64, f64, f64), candidates: impl Iterator<Item = u8>) -> u8 {
    let mut best_idx: u8 = 0;
    let mut best_dist = f64::MAX;

    for idx in candidates {
        let (r, g, b) = Rgb::from(ansi256_rgb8(idx)).to_tuple();
        let dist = luv_distance_sq(target, rgb_to_luv(r, g, b));
        if dist < best_dist {
            best_dist = dist;
            best_idx = idx;
        }
    }

    best_idx
}

/// Find the nearest ANSI-256 color by CIE LUV distance.
#[must_use]
pub fn nearest_ansi256(rgb: Rgb) -> u8 {
    let (r, g, b) = rgb.to_tuple();
    nearest_in(rgb_to_luv(r, g, b), 0u8..=255)
}

/// Find the nearest ANSI-256 color to a LUV coordinate.
///
/// Works for coordinates outside the sRGB gamut too, which is how
/// out-of-gamut HCL colors are downsampled.
#[must_use]
pub fn nearest_ansi256_luv(luv: (f64, f64, f64)) -> u8 {
    nearest_in(luv, 0u8..=255)
}

/// Find the nearest of the sixteen standard colors by CIE LUV distance.
#[must_use]
pub fn nearest_ansi16(rgb: Rgb) -> u8 {
    let (r, g, b) = rgb.to_tuple();
    nearest_in(rgb_to_luv(r, g, b), 0u8..16)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
