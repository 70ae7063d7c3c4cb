//! Error types for the export dispatcher.
//!
//! Responsibilities:
//! - Aggregate descriptor, localization and backend failures into one error.
//! - Carry serializer failures (JSON, CSV) with context.
//!
//! Does NOT handle:
//! - Mapping errors to HTTP status codes (see the server crate).
//!
//! Invariants:
//! - An unsupported export format is NOT an error; it is a regular response.

use thiserror::Error;

use crate::backend::BackendError;
use crate::filter::FilterError;
use crate::locale::LocaleError;

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that abort an export. No payload is produced when one is returned.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The request or session could not be turned into a filter descriptor.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// A required translation is missing.
    #[error(transparent)]
    Locale(#[from] LocaleError),

    /// The filter backend failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A result row does not expose one of the declared fields.
    #[error("Result row {row} does not expose field '{field}'")]
    MissingField { row: usize, field: String },

    /// JSON serialization failed.
    #[error("Failed to serialize JSON export: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing failed.
    #[error("Failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV writer buffer could not be recovered as text.
    #[error("Failed to finalize CSV export: {0}")]
    CsvBuffer(String),
}

impl ExportError {
    /// Check if this error was caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Filter(_))
    }
}
