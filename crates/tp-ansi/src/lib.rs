// SPDX-License-Identifier: MIT
//
// tp-ansi — lossless ANSI disassembly for tpaint.
//
// Two layers over the same borrowed input:
//
//   scan     text runs and raw CSI escape tokens; concatenating the pieces
//            gives back the input byte for byte
//   decode   SGR escapes expanded into `Instruction`s; anything that can't
//            be decoded is handed back as text, unchanged
//
// On top of those, `style` folds instructions into the running rendering
// state and `encode` writes instructions and style changes back out as
// canonical escapes.
//
// Nothing here fails. Malformed or unsupported input degrades to text.

pub mod decode;
pub mod encode;
pub mod instruction;
pub mod scan;
pub mod style;

pub use decode::{Decoded, Token, decode, decode_sgr_params};
pub use encode::{Sgr, style_change, write_instruction, write_sgr, write_style_change};
pub use instruction::{Attribute, ColorRole, Instruction};
pub use scan::{EscapeToken, Piece, Pieces, contains_escape, scan, strip_escapes};
pub use style::{Attributes, Style, Styled, styled};
