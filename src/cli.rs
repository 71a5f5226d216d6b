// SPDX-License-Identifier: MIT
//
// Command-line surface: argument parsing and the three subcommands.
//
// Every command writes to a caller-supplied `impl Write`, so tests drive
// them with a `Vec<u8>` and `main` hands them a locked stdout.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use thiserror::Error;
use tp_ansi::{Attributes, Piece, Style, Token, decode, scan, strip_escapes};
use tp_color::{ColorPair, ColorValue, Hex, hex_to_web_color, nearest_ansi16};
use tracing::{debug, warn};

pub const USAGE: &str = "\
Usage: tpaint <COMMAND>

Commands:
  disasm [--escapes] [FILE]  List the text runs and instructions of an ANSI file
  strip [FILE]               Print FILE with every escape sequence removed
  convert COLOR              Show COLOR in every representation

COLOR is one of: #rrggbb, rrggbb, rgb(R,G,B), ansi(N), hcl(H,C,L), or a web
color name. FILE defaults to standard input.

Options:
  -h, --help     Print help
  -V, --version  Print version

Environment:
  TPAINT_LOG     Log filter (overrides log_level in the config file)
  TPAINT_CONFIG  Config file path";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Disasm { escapes: bool, file: Option<PathBuf> },
    Strip { file: Option<PathBuf> },
    Convert { color: String },
    Help,
    Version,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("missing command")]
    MissingCommand,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("missing argument {0}")]
    MissingArgument(&'static str),
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<Command, UsageError> {
    let Some((command, rest)) = args.split_first() else {
        return Err(UsageError::MissingCommand);
    };

    match command.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-V" | "--version" => Ok(Command::Version),
        "disasm" => {
            let mut escapes = false;
            let mut file = None;
            for arg in rest {
                match arg.as_str() {
                    "--escapes" | "-e" => escapes = true,
                    "-" => file = None,
                    opt if opt.starts_with('-') => {
                        return Err(UsageError::UnknownOption(opt.to_string()));
                    }
                    path if file.is_none() => file = Some(PathBuf::from(path)),
                    extra => return Err(UsageError::UnexpectedArgument(extra.to_string())),
                }
            }
            Ok(Command::Disasm { escapes, file })
        }
        "strip" => match rest {
            [] => Ok(Command::Strip { file: None }),
            [path] if path == "-" => Ok(Command::Strip { file: None }),
            [opt] if opt.starts_with('-') => Err(UsageError::UnknownOption(opt.clone())),
            [path] => Ok(Command::Strip {
                file: Some(PathBuf::from(path)),
            }),
            [_, extra, ..] => Err(UsageError::UnexpectedArgument(extra.clone())),
        },
        "convert" => match rest {
            [] => Err(UsageError::MissingArgument("COLOR")),
            [color] => Ok(Command::Convert {
                color: color.clone(),
            }),
            [_, extra, ..] => Err(UsageError::UnexpectedArgument(extra.clone())),
        },
        other if other.starts_with('-') => Err(UsageError::UnknownOption(other.to_string())),
        other => Err(UsageError::UnknownCommand(other.to_string())),
    }
}

// ─── disasm ──────────────────────────────────────────────────────────────────

/// List the pieces of `input`.
///
/// With `escapes` set, the raw scanner output: text runs and escape tokens.
/// Otherwise the decoded stream, each instruction followed by the colors
/// and attributes in effect after it.
pub fn disasm(
    out: &mut impl Write,
    input: &str,
    escapes: bool,
    defaults: &ColorPair,
) -> io::Result<()> {
    if escapes {
        for piece in scan(input) {
            match piece {
                Piece::Text(text) => writeln!(out, "text    {text:?}")?,
                Piece::Escape(token) => writeln!(
                    out,
                    "escape  {:?}  params={:?} final={}",
                    token.as_str(),
                    token.params(),
                    char::from(token.final_byte())
                )?,
            }
        }
        return Ok(());
    }

    let mut style = Style::DEFAULT;
    let mut instructions = 0usize;
    for token in decode(input) {
        match token {
            Token::Text(text) => writeln!(out, "text    {text:?}")?,
            Token::Instruction(instruction) => {
                instructions += 1;
                style = style.apply(&instruction);
                writeln!(
                    out,
                    "instr   {instruction:?}  -> {}",
                    describe_style(&style, defaults)
                )?;
            }
        }
    }
    debug!(instructions, "disassembled input");
    Ok(())
}

fn describe_style(style: &Style, defaults: &ColorPair) -> String {
    let pair = style.resolve(defaults);
    let mut desc = format!(
        "fg={} bg={}",
        hex_or_clamped(pair.foreground),
        hex_or_clamped(pair.background)
    );
    if style.attributes != Attributes::empty() {
        let names: Vec<String> = style
            .attributes
            .iter_names()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect();
        desc.push(' ');
        desc.push_str(&names.join(","));
    }
    desc
}

fn hex_or_clamped(color: ColorValue) -> Hex {
    Hex::from(color.to_rgb_clamped())
}

// ─── strip ───────────────────────────────────────────────────────────────────

/// Write `input` with its escape tokens removed.
pub fn strip(out: &mut impl Write, input: &str) -> io::Result<()> {
    out.write_all(strip_escapes(input).as_bytes())
}

// ─── convert ─────────────────────────────────────────────────────────────────

/// Print `color` in every representation.
pub fn convert(out: &mut impl Write, color: &str) -> Result<()> {
    let value = ColorValue::parse(color)?;

    let rgb = match value.to_rgb() {
        Ok(rgb) => rgb,
        Err(err) => {
            warn!(%err, "color is outside the sRGB gamut, clamping");
            writeln!(out, "gamut    outside sRGB, clamped")?;
            value.to_rgb_clamped()
        }
    };
    let (r8, g8, b8) = rgb.to_rgb8();
    let hex = Hex::from(rgb);
    let hcl = value.to_hcl();
    let (l, u, v) = value.to_luv();
    let (x, y, z) = value.to_xyz();
    let ansi = value.to_ansi256();

    writeln!(out, "input    {value}")?;
    writeln!(
        out,
        "rgb      rgb({r8},{g8},{b8})  ({:.4}, {:.4}, {:.4})",
        rgb.r(),
        rgb.g(),
        rgb.b()
    )?;
    writeln!(out, "hex      {hex}")?;
    writeln!(out, "hcl      h={:.2} c={:.2} l={:.2}", hcl.h(), hcl.c(), hcl.l())?;
    writeln!(out, "luv      l={l:.2} u={u:.2} v={v:.2}")?;
    writeln!(out, "xyz      x={x:.4} y={y:.4} z={z:.4}")?;
    writeln!(
        out,
        "ansi256  {ansi} ({})",
        Hex::from(ColorValue::Ansi256(ansi).to_rgb_clamped())
    )?;
    writeln!(out, "ansi16   {}", nearest_ansi16(rgb))?;
    if let Some(name) = hex_to_web_color(hex.value()) {
        writeln!(out, "name     {name}")?;
    }
    Ok(())
}
