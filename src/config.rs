// SPDX-License-Identifier: MIT
//
// Configuration file for the tpaint CLI.
//
// Looked up in order:
//   $TPAINT_CONFIG
//   $XDG_CONFIG_HOME/tpaint/config.toml
//   ~/.config/tpaint/config.toml
//
// A missing file means defaults. A file that exists but does not parse is
// an error carrying the path.
//
// ```toml
// log_level = "debug"
//
// [colors]
// foreground = "#d0d0d0"
// background = "ansi(235)"
// ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tp_color::{ColorPair, ColorValue};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TPAINT_CONFIG";

/// Document colors used when none are configured: light gray on black.
pub const DEFAULT_COLORS: ColorPair =
    ColorPair::new(ColorValue::Ansi256(7), ColorValue::Ansi256(0));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log filter used when `TPAINT_LOG` is not set, e.g. `"debug"` or
    /// `"tp_ansi=trace"`.
    pub log_level: String,
    /// Document colors substituted for "terminal default".
    pub colors: ColorsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            colors: ColorsConfig::default(),
        }
    }
}

/// The `[colors]` table. Either key may be left out.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub foreground: Option<ColorValue>,
    pub background: Option<ColorValue>,
}

impl ColorsConfig {
    /// The configured colors, each falling back to [`DEFAULT_COLORS`].
    #[must_use]
    pub fn resolve(&self) -> ColorPair {
        ColorPair::new(
            self.foreground.unwrap_or(DEFAULT_COLORS.foreground),
            self.background.unwrap_or(DEFAULT_COLORS.background),
        )
    }
}

impl Config {
    /// Load from the first config location that is set.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse config text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    let base = env::var_os("XDG_CONFIG_HOME")
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("tpaint").join("config.toml"))
}
