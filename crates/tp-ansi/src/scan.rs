// SPDX-License-Identifier: MIT
//
// Escape scanner — splits text into literal runs and CSI escape tokens.
//
// The grammar is deliberately narrow:
//
//   ESC '[' ( digit | ';' )* final
//   final = 'A'..='Z' | 'a'..='z'
//
// Anything else that starts with ESC — a lone ESC, `ESC [` cut off by the
// end of input, private-mode markers like `ESC [ ?25h`, OSC strings — is
// not a token and stays inside the surrounding text run. The scanner never
// fails: every byte of the input ends up in exactly one piece, so
// concatenating the pieces reproduces the input.
//
// `Pieces` is a plain cursor over the borrowed input. Each call to `scan`
// starts a fresh one; cloning it forks the position.

use std::iter::FusedIterator;
use std::sync::LazyLock;

use regex::Regex;

/// Longest-match pattern for one CSI escape token.
static ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("escape token pattern is valid")
});

/// The SGR (Select Graphic Rendition) final byte.
pub const SGR_FINAL: u8 = b'm';

// ─── Pieces ──────────────────────────────────────────────────────────────────

/// A well-formed CSI escape sequence found in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EscapeToken<'a> {
    text: &'a str,
}

impl<'a> EscapeToken<'a> {
    /// The full token, `ESC [ … final`.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.text
    }

    /// The raw parameter text between `ESC [` and the final byte.
    /// May be empty.
    #[inline]
    #[must_use]
    pub fn params(&self) -> &'a str {
        &self.text[2..self.text.len() - 1]
    }

    /// The final byte selecting the instruction family.
    #[inline]
    #[must_use]
    pub fn final_byte(&self) -> u8 {
        self.text.as_bytes()[self.text.len() - 1]
    }

    /// Whether this is a Select Graphic Rendition (`m`) sequence.
    #[inline]
    #[must_use]
    pub fn is_sgr(&self) -> bool {
        self.final_byte() == SGR_FINAL
    }
}

/// One piece of scanned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece<'a> {
    /// A maximal run of text containing no escape token. Never empty.
    Text(&'a str),
    /// A CSI escape token.
    Escape(EscapeToken<'a>),
}

impl<'a> Piece<'a> {
    /// The exact input slice this piece covers.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        match self {
            Self::Text(text) => text,
            Self::Escape(token) => token.as_str(),
        }
    }
}

/// Iterator over the pieces of an input string. Created by [`scan`].
#[derive(Debug, Clone)]
pub struct Pieces<'a> {
    input: &'a str,
    pos: usize,
    // Escape located by a previous search, not yet yielded.
    pending: Option<(usize, usize)>,
}

impl<'a> Iterator for Pieces<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let found = self
            .pending
            .take()
            .or_else(|| ESCAPE.find_at(self.input, self.pos).map(|m| (m.start(), m.end())));

        match found {
            Some((start, end)) if start == self.pos => {
                self.pos = end;
                Some(Piece::Escape(EscapeToken {
                    text: &self.input[start..end],
                }))
            }
            Some((start, end)) => {
                let text = &self.input[self.pos..start];
                self.pos = start;
                self.pending = Some((start, end));
                Some(Piece::Text(text))
            }
            None => {
                let text = &self.input[self.pos..];
                self.pos = self.input.len();
                Some(Piece::Text(text))
            }
        }
    }
}

impl FusedIterator for Pieces<'_> {}

// ─── Entry points ────────────────────────────────────────────────────────────

/// Scan `input` into text runs and escape tokens.
///
/// ```
/// use tp_ansi::scan::scan;
///
/// let pieces: Vec<_> = scan("\x1b[1mhi").map(|p| p.as_str()).collect();
/// assert_eq!(pieces, ["\x1b[1m", "hi"]);
/// ```
#[must_use]
pub const fn scan(input: &str) -> Pieces<'_> {
    Pieces {
        input,
        pos: 0,
        pending: None,
    }
}

/// Whether `input` contains at least one escape token.
///
/// The loader uses this to choose between plain-text and ANSI parsing.
#[must_use]
pub fn contains_escape(input: &str) -> bool {
    ESCAPE.is_match(input)
}

/// The input with every escape token removed. Malformed escape-looking
/// text is kept, since it was never a token.
#[must_use]
pub fn strip_escapes(input: &str) -> String {
    scan(input)
        .filter_map(|piece| match piece {
            Piece::Text(text) => Some(text),
            Piece::Escape(_) => None,
        })
        .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
