//! Configuration management for the report export server.
//!
//! This crate provides the settings type and a loader that merges `.env`
//! files, environment variables and command-line overrides.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{LogFormat, ServerConfig};
