// SPDX-License-Identifier: MIT
//
// tp-color — color conversions for tpaint.
//
// The palette editor, the tolerant fill comparison, the ANSI loader and
// the nearest-color downsampler all speak different color dialects. This
// crate translates among them:
//
//   RGB ↔ XYZ ↔ LUV ↔ HCL        (space)
//   RGB ↔ 24-bit hex             (hex)
//   ANSI-256 index → RGB         (palette)
//   web color name → RGB         (web)
//
// and wraps them in `ColorValue`, a sum type over every representation
// with on-demand conversion. Everything is a pure function over immutable
// values; errors are plain `ColorError`s returned to the caller.
//
// The color-space functions live in `space` only. Nothing from `std` is
// re-exported; import what you need from each side explicitly.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Hue/chroma/lightness variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod error;
pub mod hex;
pub mod palette;
pub mod rgb;
pub mod space;
pub mod value;
pub mod web;

pub use error::{ColorError, RangeKind, Result};
pub use hex::{Hex, HexLike, hex_to_hex, hex_to_rgb, rgb_to_hex};
pub use palette::{ansi256_to_hex, ansi256_to_rgb, nearest_ansi16, nearest_ansi256};
pub use rgb::Rgb;
pub use value::{ColorPair, ColorValue, Hcl};
pub use web::{WebColor, hex_to_web_color, web_color_to_hex, web_color_to_rgb};
