//! Centralized constants for the report export workspace.
//!
//! Default values and environment variable names shared by the loader and
//! the server's command-line surface.

// =============================================================================
// Server Defaults
// =============================================================================

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default translation locale; the built-in catalog defines it.
pub const DEFAULT_LOCALE: &str = "en";

// =============================================================================
// Environment Variables
// =============================================================================

pub const ENV_BIND_ADDR: &str = "REPORT_EXPORT_BIND_ADDR";
pub const ENV_LOCALE: &str = "REPORT_EXPORT_LOCALE";
pub const ENV_LOCALE_FILE: &str = "REPORT_EXPORT_LOCALE_FILE";
pub const ENV_DATASET_FILE: &str = "REPORT_EXPORT_DATASET_FILE";
pub const ENV_LEGACY_CSV_CHARSET: &str = "REPORT_EXPORT_LEGACY_CSV_CHARSET";
pub const ENV_LOG_FORMAT: &str = "REPORT_EXPORT_LOG_FORMAT";

/// Set to `1` or `true` to skip `.env` loading.
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";
