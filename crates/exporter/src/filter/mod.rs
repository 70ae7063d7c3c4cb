//! Filter descriptor reconstruction.
//!
//! Responsibilities:
//! - Parse request parameters into a [`FilterDescriptor`].
//! - Overlay session-stored filter state and bind the tenant id.
//! - Classify the requested export format.
//!
//! Does NOT handle:
//! - Executing the filter (see `backend`).
//! - Serializing results (see `formatters`).
//!
//! Invariants:
//! - The index and export paths build descriptors through the same functions.
//! - Field order is the order given in `wf_fields`.

mod descriptor;
mod error;
mod format;
mod params;
mod session;

pub use descriptor::FilterDescriptor;
pub use error::FilterError;
pub use format::ExportFormat;
pub use params::RequestParams;
pub use session::SessionState;
