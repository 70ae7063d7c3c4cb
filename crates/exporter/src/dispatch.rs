//! Export dispatch.
//!
//! Responsibilities:
//! - Build the request-scoped export input at the boundary.
//! - Pick the output path: custom routine, unsupported-format message, or
//!   one of the XML/JSON/CSV serializers.
//! - Attach MIME type and attachment metadata to the payload.
//!
//! Does NOT handle:
//! - Reading parameters or session entries from a transport.
//! - Query execution (see `backend`).
//!
//! Invariants:
//! - The row cap is applied to the descriptor before the query runs and to
//!   the returned rows after it.
//! - Custom exports never reach the standard serializers or `execute`.
//! - An unrecognized format yields a plain-text body, not an error.
//! - No payload is produced when any step fails.

use chrono::NaiveDateTime;

use crate::backend::FilterBackend;
use crate::constants::{
    CSV_CONTENT_TYPE_LEGACY, CSV_CONTENT_TYPE_UTF16LE, CSV_FILENAME, JSON_CONTENT_TYPE,
    KEY_REPORT_NAME, KEY_REPORT_TIME, MAX_EXPORT_ROWS, TEXT_CONTENT_TYPE, TIMESTAMP_FORMAT,
    XML_CONTENT_TYPE,
};
use crate::encoding::utf16le_with_bom;
use crate::error::Result;
use crate::filter::{ExportFormat, FilterDescriptor, FilterError, RequestParams, SessionState};
use crate::formatters::{
    CsvFormatter, CsvReport, JsonFormatter, RecordFormatter, XmlFormatter, project_rows,
};
use crate::locale::Catalog;
use crate::naming::{file_system_safe, resolve_report_name};
use crate::row::Row;

/// Everything one export needs, built once per request.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub descriptor: FilterDescriptor,
    /// Maximum rows fetched and serialized.
    pub row_cap: u32,
    /// Stamped into the CSV preamble and custom-export filenames.
    pub generated_at: NaiveDateTime,
}

impl ExportRequest {
    /// Reconstruct the descriptor, overlay the session and apply the row cap.
    pub fn from_request(
        params: &RequestParams,
        session: SessionState,
        generated_at: NaiveDateTime,
    ) -> std::result::Result<Self, FilterError> {
        let mut descriptor = FilterDescriptor::from_request(params, session)?;
        descriptor.apply_export_limit(MAX_EXPORT_ROWS);
        Ok(Self {
            descriptor,
            row_cap: MAX_EXPORT_ROWS,
            generated_at,
        })
    }

    /// Timestamp text used in CSV and filenames, e.g. `2024-01-01  3:00:00`.
    pub fn timestamp(&self) -> String {
        self.generated_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Charset declared on CSV responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CsvCharset {
    /// Declare the bytes as they are: UTF-16LE.
    #[default]
    Utf16Le,
    /// Declare `charset=utf-8` over UTF-16LE bytes, for consumers that expect
    /// the historical header.
    LegacyUtf8,
}

impl CsvCharset {
    pub fn content_type(self) -> &'static str {
        match self {
            CsvCharset::Utf16Le => CSV_CONTENT_TYPE_UTF16LE,
            CsvCharset::LegacyUtf8 => CSV_CONTENT_TYPE_LEGACY,
        }
    }
}

/// A finished export payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    pub body: Vec<u8>,
    pub content_type: &'static str,
    /// Whether the payload is a download rather than inline text.
    pub attachment: bool,
    pub filename: Option<String>,
}

impl ExportResponse {
    /// Plain-text response for a format the dispatcher does not recognize.
    pub fn unsupported(format: &str) -> Self {
        Self {
            body: format!("The export format is not supported ({format})").into_bytes(),
            content_type: TEXT_CONTENT_TYPE,
            attachment: false,
            filename: None,
        }
    }

    fn download(body: Vec<u8>, content_type: &'static str, filename: Option<String>) -> Self {
        Self {
            body,
            content_type,
            attachment: true,
            filename,
        }
    }

    /// `Content-Disposition` value, or None for inline responses.
    ///
    /// The filename is reduced to printable ASCII so the value is always a
    /// valid header; quotes and backslashes become `_`.
    pub fn content_disposition(&self) -> Option<String> {
        if !self.attachment {
            return None;
        }
        Some(match &self.filename {
            Some(name) => {
                let safe: String = name
                    .chars()
                    .map(|c| match c {
                        '"' | '\\' => '_',
                        c if c == ' ' || c.is_ascii_graphic() => c,
                        _ => '_',
                    })
                    .collect();
                format!("attachment; filename=\"{safe}\"")
            }
            None => "attachment".to_string(),
        })
    }
}

/// Routes an export request to the matching output path.
pub struct Dispatcher<'a> {
    backend: &'a dyn FilterBackend,
    catalog: &'a Catalog,
    csv_charset: CsvCharset,
}

impl<'a> Dispatcher<'a> {
    pub fn new(backend: &'a dyn FilterBackend, catalog: &'a Catalog) -> Self {
        Self {
            backend,
            catalog,
            csv_charset: CsvCharset::default(),
        }
    }

    pub fn with_csv_charset(mut self, csv_charset: CsvCharset) -> Self {
        self.csv_charset = csv_charset;
        self
    }

    /// Produce the export payload for `request`.
    pub fn export(&self, request: &ExportRequest) -> Result<ExportResponse> {
        let descriptor = &request.descriptor;

        if descriptor.custom_format(&self.backend.custom_formats(descriptor)) {
            return self.export_custom(request);
        }

        let Some(format) = descriptor.export_format() else {
            tracing::info!(format = %descriptor.format, "Unsupported export format requested");
            return Ok(ExportResponse::unsupported(&descriptor.format));
        };

        let response = match format {
            ExportFormat::Xml => self.export_records(request, &XmlFormatter, XML_CONTENT_TYPE)?,
            ExportFormat::Json => self.export_records(request, &JsonFormatter, JSON_CONTENT_TYPE)?,
            ExportFormat::Csv => self.export_csv(request)?,
            // `custom_format` is true for the literal `custom`, so this only
            // keeps the match exhaustive.
            ExportFormat::Custom => return self.export_custom(request),
        };

        tracing::info!(
            format = %format,
            bytes = response.body.len(),
            "Export generated"
        );
        Ok(response)
    }

    fn fetch_rows(&self, request: &ExportRequest) -> Result<Vec<Row>> {
        let mut rows = self.backend.execute(&request.descriptor)?;
        let cap = request.row_cap as usize;
        if rows.len() > cap {
            tracing::warn!(
                returned = rows.len(),
                cap,
                "Backend returned more rows than the export cap; truncating"
            );
            rows.truncate(cap);
        }
        tracing::debug!(rows = rows.len(), "Fetched export rows");
        Ok(rows)
    }

    fn export_records(
        &self,
        request: &ExportRequest,
        formatter: &dyn RecordFormatter,
        content_type: &'static str,
    ) -> Result<ExportResponse> {
        let rows = self.fetch_rows(request)?;
        let records = project_rows(&request.descriptor.fields, &rows)?;
        let text = formatter.format_records(&records)?;
        Ok(ExportResponse::download(text.into_bytes(), content_type, None))
    }

    fn export_csv(&self, request: &ExportRequest) -> Result<ExportResponse> {
        let descriptor = &request.descriptor;
        let rows = self.fetch_rows(request)?;
        let column_titles = descriptor
            .fields
            .iter()
            .map(|field| self.backend.condition_title_for(descriptor, field))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let report = CsvReport {
            report_time_label: self.catalog.translate(KEY_REPORT_TIME)?,
            report_time: request.timestamp(),
            report_name_label: self.catalog.translate(KEY_REPORT_NAME)?,
            report_name: resolve_report_name(descriptor, self.catalog)?,
            column_titles,
        };

        let text = CsvFormatter.format_report(&report, &descriptor.fields, &rows)?;
        Ok(ExportResponse::download(
            utf16le_with_bom(&text),
            self.csv_charset.content_type(),
            Some(CSV_FILENAME.to_string()),
        ))
    }

    fn export_custom(&self, request: &ExportRequest) -> Result<ExportResponse> {
        let descriptor = &request.descriptor;
        let body = self.backend.process_custom_format(descriptor)?;
        let filename = format!(
            "{}_{}.{}",
            file_system_safe(&resolve_report_name(descriptor, self.catalog)?),
            request.timestamp(),
            descriptor.format
        );

        tracing::info!(
            format = %descriptor.format,
            filename = %filename,
            "Custom export generated"
        );
        Ok(ExportResponse::download(
            body.into_bytes(),
            TEXT_CONTENT_TYPE,
            Some(filename),
        ))
    }
}
