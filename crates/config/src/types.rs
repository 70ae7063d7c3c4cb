//! Configuration type definitions.
//!
//! Responsibilities:
//! - Define the validated server settings.
//! - Define the log output format selector.
//!
//! Does NOT handle:
//! - Loading settings (see `loader` module).
//! - Opening the referenced files; paths are passed through unchecked.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Plain,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" | "text" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected plain or json)")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Plain => f.write_str("plain"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Validated settings for the export server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Locale selected from the translation catalog.
    pub locale: String,
    /// Replacement translation catalog; None uses the built-in one.
    pub locale_file: Option<PathBuf>,
    /// JSON datasets served by the in-memory backend.
    pub dataset_file: Option<PathBuf>,
    /// Declare `charset=utf-8` on CSV responses instead of `utf-16le`.
    pub legacy_csv_charset: bool,
    pub log_format: LogFormat,
}
