//! JSON formatter implementation.
//!
//! Responsibilities:
//! - Format projected records as a compact JSON array of objects.
//!
//! Does NOT handle:
//! - Pretty printing (exports are downloads, not terminal output).

use super::{ProjectedRecord, RecordFormatter};
use crate::error::Result;

/// JSON formatter.
pub struct JsonFormatter;

impl RecordFormatter for JsonFormatter {
    fn format_records(&self, records: &[ProjectedRecord]) -> Result<String> {
        Ok(serde_json::to_string(records)?)
    }
}
