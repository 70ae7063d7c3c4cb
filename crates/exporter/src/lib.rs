//! Report export dispatcher.
//!
//! This crate turns a filter descriptor reconstructed from request state into
//! a downloadable XML, JSON, CSV or custom-text payload. Query execution and
//! column metadata are delegated to a [`FilterBackend`] implementation.

pub mod backend;
pub mod constants;
pub mod dispatch;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod form;
pub mod formatters;
pub mod locale;
pub mod naming;
pub mod row;

pub use backend::{BackendError, FilterBackend, InMemoryBackend};
pub use dispatch::{CsvCharset, Dispatcher, ExportRequest, ExportResponse};
pub use error::{ExportError, Result};
pub use filter::{ExportFormat, FilterDescriptor, FilterError, RequestParams, SessionState};
pub use locale::{Catalog, LocaleError};
pub use row::{CellValue, ResultRow, Row};
