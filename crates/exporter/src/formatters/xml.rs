//! XML formatter implementation.
//!
//! Responsibilities:
//! - Format projected records as an XML array document.
//!
//! The layout is `<records>`/`<record>` with field names kept verbatim, not
//! the `<hashes>`/`<hash>` form with dasherized keys.
//!
//! Does NOT handle:
//! - Schema validation.
//! - Element-name sanitizing; field identifiers are validated when the
//!   descriptor is built.

use super::common::escape_xml;
use super::{ProjectedRecord, RecordFormatter};
use crate::error::Result;

/// XML formatter.
///
/// Layout:
/// ```text
/// <?xml version="1.0" encoding="UTF-8"?>
/// <records type="array">
///   <record>
///     <name>Acme</name>
///   </record>
/// </records>
/// ```
pub struct XmlFormatter;

impl RecordFormatter for XmlFormatter {
    fn format_records(&self, records: &[ProjectedRecord]) -> Result<String> {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");

        if records.is_empty() {
            xml.push_str("<records type=\"array\"></records>\n");
            return Ok(xml);
        }

        xml.push_str("<records type=\"array\">\n");
        for record in records {
            xml.push_str("  <record>\n");
            for (field, value) in record.entries() {
                xml.push_str(&format!(
                    "    <{field}>{}</{field}>\n",
                    escape_xml(value)
                ));
            }
            xml.push_str("  </record>\n");
        }
        xml.push_str("</records>\n");
        Ok(xml)
    }
}
