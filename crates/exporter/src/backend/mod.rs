//! Filter backend abstraction.
//!
//! Responsibilities:
//! - Define the capabilities the dispatcher needs from a query layer:
//!   running the filter, titling columns and producing custom exports.
//! - Provide the JSON-file backed [`InMemoryBackend`].
//!
//! Does NOT handle:
//! - Choosing or rendering an output format (see `dispatch`).
//!
//! Invariants:
//! - `execute` honours the descriptor's `page`/`per_page`.
//! - Implementations are shared across requests and must be `Send + Sync`.

mod memory;

use std::path::PathBuf;
use thiserror::Error;

use crate::filter::FilterDescriptor;
use crate::row::Row;

pub use memory::{Dataset, InMemoryBackend};

/// Errors raised by a filter backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Filter does not name a model")]
    MissingModel,

    #[error("Model '{model}' has no custom format '{format}'")]
    UnsupportedCustomFormat { model: String, format: String },

    #[error("Failed to read dataset file at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Query failed: {0}")]
    Query(String),
}

/// The query layer behind an export.
pub trait FilterBackend: Send + Sync {
    /// Run the filter and return one page of rows.
    fn execute(&self, descriptor: &FilterDescriptor) -> Result<Vec<Row>, BackendError>;

    /// Human-readable column title for `field`.
    fn condition_title_for(
        &self,
        descriptor: &FilterDescriptor,
        field: &str,
    ) -> Result<String, BackendError>;

    /// Custom format names offered for this filter, beyond the literal `custom`.
    fn custom_formats(&self, _descriptor: &FilterDescriptor) -> Vec<String> {
        Vec::new()
    }

    /// Produce the body of a custom export. The backend runs its own query.
    ///
    /// Implementations must honour `descriptor.page` and `descriptor.per_page`
    /// as `execute` does; the dispatcher does not truncate custom output.
    fn process_custom_format(&self, descriptor: &FilterDescriptor) -> Result<String, BackendError>;
}
