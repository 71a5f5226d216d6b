// SPDX-License-Identifier: MIT
//
// Errors raised by the color conversion library.
//
// Every conversion here is a deterministic pure function, so errors are
// surfaced straight to the caller. There is nothing to retry.

use thiserror::Error;

/// Which integer domain an [`ColorError::OutOfRange`] value escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    /// An ANSI-256 palette index (valid: 0–255).
    Ansi256Index,
    /// An 8-bit RGB channel (valid: 0–255).
    Rgb8Channel,
    /// A packed 24-bit hex color (valid: `0x000000`–`0xFFFFFF`).
    Hex,
}

impl std::fmt::Display for RangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Ansi256Index => "ANSI-256 index",
            Self::Rgb8Channel => "8-bit RGB channel",
            Self::Hex => "24-bit hex color",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    /// A hex-like input that is not exactly six hex digits (with an
    /// optional leading `#`), or a color string in no known form.
    #[error("invalid color format: {0:?}")]
    InvalidColorFormat(String),

    /// A web color name that is not in the named-color table.
    #[error("unknown color name: {0:?}")]
    UnknownColorName(String),

    /// An integer outside its domain.
    #[error("{kind} out of range: {value}")]
    OutOfRange { kind: RangeKind, value: i64 },

    /// A normalized channel outside `[0, 1]` (or NaN) where no clamping
    /// was requested.
    #[error("channel value {value} is outside the sRGB gamut [0, 1]")]
    OutOfGamut { value: f64 },
}

pub type Result<T> = std::result::Result<T, ColorError>;
