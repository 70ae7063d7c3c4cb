//! Centralized constants for the export dispatcher.
//!
//! Parameter names, MIME types and limits shared by the dispatcher, the
//! descriptor parser and the HTTP layer.

// =============================================================================
// Limits
// =============================================================================

/// Maximum number of result rows fetched and exported per request.
///
/// Applied as the per-page size before the query runs and enforced again on
/// the returned rows. Not settable per request.
pub const MAX_EXPORT_ROWS: u32 = 20_000;

// =============================================================================
// Request Parameters
// =============================================================================

/// Requested export format (`xml`, `json`, `csv`, `custom` or a backend-declared custom name).
pub const PARAM_EXPORT_FORMAT: &str = "wf_export_format";

/// Target entity type, possibly namespaced (`Billing::Invoice`).
pub const PARAM_MODEL: &str = "wf_model";

/// Selected default-filter key.
pub const PARAM_KEY: &str = "wf_key";

/// Explicit report name.
pub const PARAM_NAME: &str = "wf_name";

/// Comma-separated field identifiers to project.
pub const PARAM_FIELDS: &str = "wf_fields";

/// Rows per page.
pub const PARAM_PER_PAGE: &str = "wf_per_page";

/// One-based page number.
pub const PARAM_PAGE: &str = "page";

/// Prefix shared by all filter parameters.
pub const FILTER_PARAM_PREFIX: &str = "wf_";

/// `wf_key` value meaning "no default filter selected".
pub const NO_DEFAULT_FILTER_KEY: &str = "-1";

/// Format used when the request does not name one.
pub const DEFAULT_EXPORT_FORMAT: &str = "html";

// =============================================================================
// Output
// =============================================================================

/// Timestamp layout for the CSV preamble and custom-export filenames.
///
/// 12-hour clock with a space-padded hour and no meridiem, e.g. `2024-01-01  3:00:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %l:%M:%S";

/// Byte-order mark for UTF-16 little-endian text.
pub const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];

/// Attachment name for CSV exports.
pub const CSV_FILENAME: &str = "results.csv";

pub const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
pub const CSV_CONTENT_TYPE_UTF16LE: &str = "text/csv; charset=utf-16le; header=present";
pub const CSV_CONTENT_TYPE_LEGACY: &str = "text/csv; charset=utf-8; header=present";

// =============================================================================
// Translation Keys
// =============================================================================

pub const KEY_REPORT_TIME: &str = "operational_reports.labels.report_time";
pub const KEY_REPORT_NAME: &str = "operational_reports.labels.report_name";
pub const KEY_CUSTOM_REPORT: &str = "operational_reports.labels.custom_report";
pub const KEY_EXPORT_SUBMIT: &str = "operational_reports.labels.export";
pub const KEY_DEFAULT_FILTERS: &str = "operational_reports.default_filters";
pub const KEY_REPORT_TITLES: &str = "operational_reports.report_titles";
