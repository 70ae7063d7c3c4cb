//! Output formatters for exports.
//!
//! Responsibilities:
//! - Project result rows onto the declared field list.
//! - Serialize projected records as XML or JSON.
//! - Produce the tab-separated CSV report with its three-row preamble.
//!
//! Does NOT handle:
//! - Choosing a format (see `dispatch`).
//! - Transcoding CSV text for spreadsheets (see `encoding`).
//!
//! Invariants:
//! - Every record has exactly the declared fields, in declared order.
//! - XML/JSON values are the string form of the cell; CSV cells keep the
//!   native value and let the CSV writer render it.
//!
//! ## Empty-State Handling
//!
//! | Format | Empty result | Example |
//! |--------|--------------|---------|
//! | JSON | Empty array | `[]` |
//! | XML | Empty typed container | `<records type="array"></records>` |
//! | CSV | Preamble and column titles only | 3 rows |

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{ExportError, Result};
use crate::row::ResultRow;

mod common;
mod csv;
mod json;
mod xml;

pub use self::csv::{CsvFormatter, CsvReport};
pub use common::escape_xml;
pub use json::JsonFormatter;
pub use xml::XmlFormatter;

/// A result row reduced to the declared fields, each rendered as a string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectedRecord {
    entries: Vec<(String, String)>,
}

impl ProjectedRecord {
    /// Field/value pairs in declared order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v.as_str())
    }
}

impl Serialize for ProjectedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// Formatter for projected record sets.
pub trait RecordFormatter {
    /// Serialize `records` to the formatter's textual representation.
    fn format_records(&self, records: &[ProjectedRecord]) -> Result<String>;
}

/// Project every row onto `fields`, converting each value to its string form.
///
/// Fails with `ExportError::MissingField` if a row does not expose a declared field.
pub fn project_rows<R: ResultRow>(fields: &[String], rows: &[R]) -> Result<Vec<ProjectedRecord>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let entries = fields
                .iter()
                .map(|field| {
                    row.value_of(field)
                        .map(|value| (field.clone(), value.to_string()))
                        .ok_or_else(|| ExportError::MissingField {
                            row: index,
                            field: field.clone(),
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(ProjectedRecord { entries })
        })
        .collect()
}
