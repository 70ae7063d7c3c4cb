//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Build and validate the final `ServerConfig`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Later layers overwrite earlier ones: `.env` < environment < builder calls.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::net::SocketAddr;
use std::path::PathBuf;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{DEFAULT_BIND_ADDR, DEFAULT_LOCALE, ENV_DOTENV_DISABLED, ENV_LOCALE};
use crate::types::{LogFormat, ServerConfig};

/// Configuration loader that builds config from environment variables and overrides.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    bind_addr: Option<String>,
    locale: Option<String>,
    locale_file: Option<PathBuf>,
    dataset_file: Option<PathBuf>,
    legacy_csv_charset: Option<bool>,
    log_format: Option<LogFormat>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(ENV_DOTENV_DISABLED).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the `.env` file exists but has invalid syntax
    /// (`ConfigError::DotenvParse`) or cannot be read (`ConfigError::DotenvIo`).
    /// Missing `.env` files are silently ignored.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the listen address (`host:port`).
    pub fn with_bind_addr(mut self, addr: String) -> Self {
        self.bind_addr = Some(addr);
        self
    }

    /// Set the translation locale.
    pub fn with_locale(mut self, locale: String) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Use a translation catalog file instead of the built-in one.
    pub fn with_locale_file(mut self, path: PathBuf) -> Self {
        self.locale_file = Some(path);
        self
    }

    /// Set the dataset file for the in-memory backend.
    pub fn with_dataset_file(mut self, path: PathBuf) -> Self {
        self.dataset_file = Some(path);
        self
    }

    /// Declare `charset=utf-8` on CSV responses.
    pub fn with_legacy_csv_charset(mut self, enabled: bool) -> Self {
        self.legacy_csv_charset = Some(enabled);
        self
    }

    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = Some(format);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let raw_addr = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).trim();
        let bind_addr: SocketAddr = raw_addr.parse().map_err(|_| ConfigError::InvalidBindAddr {
            value: raw_addr.to_string(),
        })?;

        let locale = self
            .locale
            .map(|l| l.trim().to_string())
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        let well_formed = locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if locale.is_empty() || !well_formed {
            return Err(ConfigError::InvalidValue {
                var: ENV_LOCALE.to_string(),
                message: format!("'{locale}' is not a locale identifier (e.g. en, en-GB)"),
            });
        }

        Ok(ServerConfig {
            bind_addr,
            locale,
            locale_file: self.locale_file,
            dataset_file: self.dataset_file,
            legacy_csv_charset: self.legacy_csv_charset.unwrap_or(false),
            log_format: self.log_format.unwrap_or_default(),
        })
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn set_bind_addr(&mut self, addr: Option<String>) {
        self.bind_addr = addr;
    }

    pub(crate) fn set_locale(&mut self, locale: Option<String>) {
        self.locale = locale;
    }

    pub(crate) fn set_locale_file(&mut self, path: Option<PathBuf>) {
        self.locale_file = path;
    }

    pub(crate) fn set_dataset_file(&mut self, path: Option<PathBuf>) {
        self.dataset_file = path;
    }

    pub(crate) fn set_legacy_csv_charset(&mut self, enabled: Option<bool>) {
        self.legacy_csv_charset = enabled;
    }

    pub(crate) fn set_log_format(&mut self, format: Option<LogFormat>) {
        self.log_format = format;
    }
}
