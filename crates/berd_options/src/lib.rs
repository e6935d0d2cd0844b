//! berd_options: berd.json parsing and run options.
//!
//! A run is configured by an optional `berd.json` next to where `berd` is
//! started (or passed with `--config`). Every field is optional; a missing
//! file means the defaults.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// The file looked up when no explicit config path is given.
pub const CONFIG_FILE_NAME: &str = "berd.json";

/// What a run prints and does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunOptions {
    /// Print the AST as JSON before evaluating.
    pub print_ast: bool,
    /// Write the AST JSON to this file.
    pub ast_output: Option<PathBuf>,
    /// Evaluate the program after parsing it.
    pub evaluate: bool,
    /// Print the token sequence.
    pub print_tokens: bool,
    pub log_level: LogLevel,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            print_ast: false,
            ast_output: None,
            evaluate: true,
            print_tokens: false,
            log_level: LogLevel::Warn,
        }
    }
}

impl RunOptions {
    /// Parse options from JSON text.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Read options from `path`, which must exist.
    pub fn from_file(path: &Path) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let options = Self::from_json(&content).map_err(|source| OptionsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(target: "options", "loaded {}", path.display());
        Ok(options)
    }

    /// Read `berd.json` from `dir`, or the defaults when there is none.
    pub fn discover(dir: &Path) -> Result<Self, OptionsError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::from_file(&path)
        } else {
            debug!(target: "options", "no {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
            Ok(Self::default())
        }
    }

    /// Read the explicit config file if one is given, otherwise discover
    /// `berd.json` in the working directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self, OptionsError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => Self::discover(Path::new(".")),
        }
    }
}

/// Logging verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(OptionsError::InvalidLogLevel(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown log level '{0}' (expected off, error, warn, info, debug or trace)")]
    InvalidLogLevel(String),
}
