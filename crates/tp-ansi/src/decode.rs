// SPDX-License-Identifier: MIT
//
// SGR decoder — turns scanner pieces into rendering instructions.
//
// Only SGR escapes (final byte `m`) are decoded. A token is decoded
// atomically: if any of its parameters is unsupported the whole token is
// handed back verbatim as text, so no rendering state is half-applied and
// the output still reproduces the input when written back out.
//
// Supported parameters:
//
//   0 / empty           Reset
//   1–9                 SetAttribute
//   30–37, 90–97        foreground, palette 0–7 / 8–15
//   40–47, 100–107      background, palette 0–7 / 8–15
//   38;5;N  48;5;N      palette index N
//   38;2;R;G;B  48;…    24-bit color

use std::iter::FusedIterator;

use tp_color::{ColorValue, Rgb};
use tracing::trace;

use crate::instruction::{Attribute, ColorRole, Instruction};
use crate::scan::{EscapeToken, Piece, Pieces, scan};

/// One item of the decoded stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    /// Literal text, including escapes passed through undecoded.
    Text(&'a str),
    /// A decoded instruction.
    Instruction(Instruction),
}

/// Iterator over decoded tokens. Created by [`decode`].
#[derive(Debug, Clone)]
pub struct Decoded<'a> {
    pieces: Pieces<'a>,
    // Remaining instructions of the escape token being expanded.
    pending: std::vec::IntoIter<Instruction>,
}

impl<'a> Iterator for Decoded<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(instruction) = self.pending.next() {
            return Some(Token::Instruction(instruction));
        }

        match self.pieces.next()? {
            Piece::Text(text) => Some(Token::Text(text)),
            Piece::Escape(token) => Some(self.expand(token)),
        }
    }
}

impl<'a> Decoded<'a> {
    fn expand(&mut self, token: EscapeToken<'a>) -> Token<'a> {
        if token.is_sgr() {
            if let Some(instructions) = decode_sgr_params(token.params()) {
                self.pending = instructions.into_iter();
                if let Some(first) = self.pending.next() {
                    return Token::Instruction(first);
                }
            }
        }
        trace!(token = ?token.as_str(), "passing escape through as text");
        Token::Text(token.as_str())
    }
}

impl FusedIterator for Decoded<'_> {}

/// Decode `input` into text and instructions.
///
/// ```
/// use tp_ansi::{decode, Attribute, ColorRole, Instruction, Token};
/// use tp_color::ColorValue;
///
/// let tokens: Vec<_> = decode("\x1b[1;31mHi").collect();
/// assert_eq!(
///     tokens,
///     [
///         Token::Instruction(Instruction::SetAttribute(Attribute::Bold)),
///         Token::Instruction(Instruction::SetColor(
///             ColorRole::Foreground,
///             ColorValue::Ansi256(1),
///         )),
///         Token::Text("Hi"),
///     ]
/// );
/// ```
#[must_use]
pub fn decode(input: &str) -> Decoded<'_> {
    Decoded {
        pieces: scan(input),
        pending: Vec::new().into_iter(),
    }
}

// ─── Parameters ──────────────────────────────────────────────────────────────

/// Decode the parameter text of one SGR escape (`"1;31"` for `ESC[1;31m`).
///
/// Returns `None` if any parameter is unsupported, malformed, or out of
/// range. A successful result is never empty.
#[must_use]
pub fn decode_sgr_params(params: &str) -> Option<Vec<Instruction>> {
    let fields = params
        .split(';')
        .map(|field| if field.is_empty() { Some(0) } else { field.parse::<u32>().ok() })
        .collect::<Option<Vec<u32>>>()?;

    let mut out = Vec::with_capacity(fields.len());
    let mut fields = fields.into_iter();

    while let Some(code) = fields.next() {
        let instruction = match code {
            0 => Instruction::Reset,
            1..=9 => Instruction::SetAttribute(Attribute::from_sgr(code)?),
            30..=37 => palette(ColorRole::Foreground, code - 30)?,
            90..=97 => palette(ColorRole::Foreground, code - 90 + 8)?,
            40..=47 => palette(ColorRole::Background, code - 40)?,
            100..=107 => palette(ColorRole::Background, code - 100 + 8)?,
            38 => extended(ColorRole::Foreground, &mut fields)?,
            48 => extended(ColorRole::Background, &mut fields)?,
            _ => return None,
        };
        out.push(instruction);
    }

    Some(out)
}

fn palette(role: ColorRole, idx: u32) -> Option<Instruction> {
    let idx = u8::try_from(idx).ok()?;
    Some(Instruction::SetColor(role, ColorValue::Ansi256(idx)))
}

/// Consume the sub-parameters of `38`/`48`.
fn extended(role: ColorRole, fields: &mut impl Iterator<Item = u32>) -> Option<Instruction> {
    let mut channel = || fields.next().and_then(|v| u8::try_from(v).ok());
    match channel()? {
        5 => Some(Instruction::SetColor(role, ColorValue::Ansi256(channel()?))),
        2 => {
            let rgb = Rgb::from_rgb8(channel()?, channel()?, channel()?);
            Some(Instruction::SetColor(role, ColorValue::Rgb(rgb)))
        }
        _ => None,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    fn fg(idx: u8) -> Instruction {
        Instruction::SetColor(ColorRole::Foreground, ColorValue::Ansi256(idx))
    }

    fn bg(idx: u8) -> Instruction {
        Instruction::SetColor(ColorRole::Background, ColorValue::Ansi256(idx))
    }

    fn tokens(input: &str) -> Vec<Token<'_>> {
        decode(input).collect()
    }

    #[test]
    fn hello_world_scenario() {
        assert_eq!(
            tokens("\x1b[1;31mHello\x1b[m, world!"),
            vec![
                Token::Instruction(Instruction::SetAttribute(Attribute::Bold)),
                Token::Instruction(fg(1)),
                Token::Text("Hello"),
                Token::Instruction(Instruction::Reset),
                Token::Text(", world!"),
            ]
        );
    }

    #[test]
    fn decoding_is_repeatable() {
        let input = "\x1b[0;1;38;5;208mA\x1b[48;2;1;2;3mB\x1b[99mC\x1b[2J";
        assert_eq!(tokens(input), tokens(input));
    }

    // ── Parameter table ──

    #[test_case("", vec![Instruction::Reset] ; "empty is reset")]
    #[test_case("0", vec![Instruction::Reset] ; "zero is reset")]
    #[test_case(";", vec![Instruction::Reset, Instruction::Reset] ; "empty fields")]
    #[test_case("4", vec![Instruction::SetAttribute(Attribute::Underline)] ; "underline")]
    #[test_case("9", vec![Instruction::SetAttribute(Attribute::Strikethrough)] ; "strikethrough")]
    #[test_case("37", vec![fg(7)] ; "standard foreground")]
    #[test_case("90", vec![fg(8)] ; "bright foreground")]
    #[test_case("47", vec![bg(7)] ; "standard background")]
    #[test_case("107", vec![bg(15)] ; "bright background")]
    #[test_case("38;5;208", vec![fg(208)] ; "palette foreground")]
    #[test_case("48;5;0", vec![bg(0)] ; "palette background")]
    #[test_case("1;38;5;21;7", vec![
        Instruction::SetAttribute(Attribute::Bold),
        fg(21),
        Instruction::SetAttribute(Attribute::Reverse),
    ] ; "extended color mid list")]
    fn decodes_parameters(params: &str, expected: Vec<Instruction>) {
        assert_eq!(decode_sgr_params(params), Some(expected));
    }

    #[test]
    fn truecolor_parameters() {
        let decoded = decode_sgr_params("38;2;255;128;0;48;2;0;0;0").unwrap();
        assert_eq!(
            decoded,
            vec![
                Instruction::SetColor(
                    ColorRole::Foreground,
                    ColorValue::Rgb(Rgb::from_rgb8(255, 128, 0))
                ),
                Instruction::SetColor(ColorRole::Background, ColorValue::Rgb(Rgb::BLACK)),
            ]
        );
    }

    #[test_case("22" ; "normal intensity")]
    #[test_case("39" ; "default foreground")]
    #[test_case("49" ; "default background")]
    #[test_case("10" ; "font selection")]
    #[test_case("38" ; "bare extended")]
    #[test_case("38;5" ; "truncated palette")]
    #[test_case("38;5;256" ; "palette out of range")]
    #[test_case("38;2;1;2" ; "truncated truecolor")]
    #[test_case("48;2;1;2;300" ; "channel out of range")]
    #[test_case("38;3;1" ; "unknown color space")]
    #[test_case("1;99999999999" ; "overflowing field")]
    fn rejects_unsupported(params: &str) {
        assert_eq!(decode_sgr_params(params), None);
    }

    // ── Pass-through ──

    #[test]
    fn unsupported_token_passes_through_whole() {
        assert_eq!(
            tokens("a\x1b[1;22mb"),
            vec![Token::Text("a"), Token::Text("\x1b[1;22m"), Token::Text("b")]
        );
    }

    #[test]
    fn non_sgr_escapes_pass_through() {
        assert_eq!(
            tokens("\x1b[2J\x1b[1;1Hx"),
            vec![Token::Text("\x1b[2J"), Token::Text("\x1b[1;1H"), Token::Text("x")]
        );
    }

    #[test]
    fn malformed_escapes_stay_in_text() {
        assert_eq!(tokens("x\x1b[?25hy"), vec![Token::Text("x\x1b[?25hy")]);
    }

    #[test]
    fn abandoned_decode_does_not_leak() {
        let input = "\x1b[1;2;3mtext";
        let mut partial = decode(input);
        let _ = partial.next();
        assert_eq!(tokens(input).len(), 4);
        assert_eq!(partial.count(), 3);
    }
}
