//! CSV report formatter.
//!
//! Responsibilities:
//! - Write the report preamble (generation time, report name).
//! - Write the column-title row and one row per result.
//!
//! Does NOT handle:
//! - UTF-16LE transcoding (see `encoding`).
//! - Resolving labels or titles (the dispatcher passes them in).
//!
//! Invariants:
//! - Tab delimiter, CR+LF terminator, every field quoted.
//! - Exactly three rows precede the data rows.
//! - Rows have different widths (2 preamble cells vs. N columns), so the
//!   writer runs in flexible mode.

use ::csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{ExportError, Result};
use crate::row::ResultRow;

/// Labels and titles framing the CSV data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvReport {
    pub report_time_label: String,
    pub report_time: String,
    pub report_name_label: String,
    pub report_name: String,
    /// One title per declared field, in field order.
    pub column_titles: Vec<String>,
}

/// CSV formatter.
pub struct CsvFormatter;

impl CsvFormatter {
    /// Render the full report as UTF-8 text.
    pub fn format_report<R: ResultRow>(
        &self,
        report: &CsvReport,
        fields: &[String],
        rows: &[R],
    ) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .terminator(Terminator::CRLF)
            .quote_style(QuoteStyle::Always)
            .flexible(true)
            .from_writer(Vec::new());

        writer.write_record([&report.report_time_label, &report.report_time])?;
        writer.write_record([&report.report_name_label, &report.report_name])?;
        writer.write_record(&report.column_titles)?;

        for (index, row) in rows.iter().enumerate() {
            let mut record = Vec::with_capacity(fields.len());
            for field in fields {
                let value = row.value_of(field).ok_or_else(|| ExportError::MissingField {
                    row: index,
                    field: field.clone(),
                })?;
                record.push(value.to_string());
            }
            writer.write_record(&record)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::CsvBuffer(e.error().to_string()))?;
        String::from_utf8(bytes).map_err(|e| ExportError::CsvBuffer(e.to_string()))
    }
}
