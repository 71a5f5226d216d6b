// SPDX-License-Identifier: MIT
//
// tpaint — inspect ANSI art and convert colors.
//
// A thin shell over the two core crates: `tp-ansi` disassembles escape
// sequences, `tp-color` converts between color representations. This file
// wires up configuration and logging, reads input, and maps failures to
// exit codes:
//
//   0  success
//   1  runtime error (unreadable file, invalid color, bad config)
//   2  usage error

mod cli;
mod config;

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Command, USAGE};
use config::Config;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "TPAINT_LOG";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let command = match cli::parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("tpaint: {e}\n\n{USAGE}");
            process::exit(2);
        }
    };

    if let Err(e) = run(command) {
        eprintln!("tpaint: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Command::Version => {
            println!("tpaint {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load()?;
    init_logging(&config);
    debug!(?command, "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Disasm { escapes, file } => {
            let input = read_input(file.as_deref())?;
            cli::disasm(&mut out, &input, escapes, &config.colors.resolve())?;
        }
        Command::Strip { file } => {
            let input = read_input(file.as_deref())?;
            cli::strip(&mut out, &input)?;
        }
        Command::Convert { color } => cli::convert(&mut out, &color)?,
        Command::Help | Command::Version => {}
    }

    out.flush()?;
    Ok(())
}

/// Install the stderr subscriber. `TPAINT_LOG` wins over the config file;
/// an unparsable filter falls back to `warn`.
fn init_logging(config: &Config) {
    let filter = env::var(LOG_ENV)
        .ok()
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| config.log_level.clone());
    let filter = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read the whole input. ANSI art is often not valid UTF-8; invalid bytes
/// become U+FFFD rather than failing the read.
fn read_input(file: Option<&Path>) -> Result<String> {
    let bytes = match file {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read standard input")?;
            buf
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_error_names_the_path() {
        let err = read_input(Some(Path::new("/nonexistent/tpaint/art.ans"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/tpaint/art.ans"));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let path = env::temp_dir().join(format!("tpaint-cp437-{}.ans", process::id()));
        fs::write(&path, b"\x1b[1m\xdb\xdb\x1b[0m").unwrap();
        let input = read_input(Some(&path)).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(input, "\x1b[1m\u{fffd}\u{fffd}\x1b[0m");
    }
}
