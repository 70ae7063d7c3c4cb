//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `REPORT_EXPORT_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Building the final ServerConfig (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid boolean or enum values return ConfigError::InvalidValue.

use std::path::PathBuf;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{
    ENV_BIND_ADDR, ENV_DATASET_FILE, ENV_LEGACY_CSV_CHARSET, ENV_LOCALE, ENV_LOCALE_FILE,
    ENV_LOG_FORMAT,
};
use crate::types::LogFormat;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse a boolean flag value (`true`/`false`/`1`/`0`, case-insensitive).
pub(crate) fn parse_flag(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be true or false".to_string(),
        }),
    }
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(addr) = env_var_or_none(ENV_BIND_ADDR) {
        loader.set_bind_addr(Some(addr));
    }
    if let Some(locale) = env_var_or_none(ENV_LOCALE) {
        loader.set_locale(Some(locale));
    }
    if let Some(path) = env_var_or_none(ENV_LOCALE_FILE) {
        loader.set_locale_file(Some(PathBuf::from(path)));
    }
    if let Some(path) = env_var_or_none(ENV_DATASET_FILE) {
        loader.set_dataset_file(Some(PathBuf::from(path)));
    }
    if let Some(flag) = env_var_or_none(ENV_LEGACY_CSV_CHARSET) {
        loader.set_legacy_csv_charset(Some(parse_flag(ENV_LEGACY_CSV_CHARSET, &flag)?));
    }
    if let Some(format) = env_var_or_none(ENV_LOG_FORMAT) {
        let format: LogFormat = format.parse().map_err(|message| ConfigError::InvalidValue {
            var: ENV_LOG_FORMAT.to_string(),
            message,
        })?;
        loader.set_log_format(Some(format));
    }

    Ok(())
}
