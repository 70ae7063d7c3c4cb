//! Filter descriptor.
//!
//! Responsibilities:
//! - Reconstruct the descriptor from request parameters.
//! - Overlay session filter state and bind the tenant id.
//! - Apply the export row ceiling.
//! - Serialize back to parameters for round-tripping through a form.
//!
//! Does NOT handle:
//! - Query execution or condition semantics (see `backend`).
//!
//! Invariants:
//! - `fields` is non-empty and every entry is a valid identifier.
//! - `format` is the requested format as given, recognized or not; it is
//!   matched case-insensitively.
//! - Request parameters take precedence over session state.

use serde_json::Value;
use std::collections::BTreeMap;

use super::error::FilterError;
use super::format::ExportFormat;
use super::params::RequestParams;
use super::session::SessionState;
use crate::constants::{
    DEFAULT_EXPORT_FORMAT, FILTER_PARAM_PREFIX, NO_DEFAULT_FILTER_KEY, PARAM_EXPORT_FORMAT,
    PARAM_FIELDS, PARAM_KEY, PARAM_MODEL, PARAM_NAME, PARAM_PAGE, PARAM_PER_PAGE,
};

/// Rows per page when the request does not say.
const DEFAULT_PER_PAGE: u32 = 30;

/// Parameters with dedicated descriptor fields; never treated as conditions.
const RESERVED_PARAMS: &[&str] = &[
    PARAM_EXPORT_FORMAT,
    PARAM_MODEL,
    PARAM_KEY,
    PARAM_NAME,
    PARAM_FIELDS,
    PARAM_PER_PAGE,
    PARAM_PAGE,
];

/// Describes which fields to export, in what format, under what name.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDescriptor {
    /// Target entity type as sent by the client, e.g. `Billing::Invoice`.
    pub model: Option<String>,
    /// Selected default-filter key.
    pub key: Option<String>,
    /// Explicit report name.
    pub name: Option<String>,
    /// Field identifiers to project, in output order.
    pub fields: Vec<String>,
    /// Requested export format, as given.
    pub format: String,
    pub page: u32,
    pub per_page: u32,
    /// Remaining `wf_*` filter state, interpreted by the backend.
    pub conditions: BTreeMap<String, String>,
    /// Session-stored filter state as parsed.
    pub session_store: serde_json::Map<String, Value>,
    /// Tenant the export is scoped to.
    pub organisation_id: Option<i64>,
}

impl FilterDescriptor {
    /// Reconstruct a descriptor from request parameters.
    pub fn deserialize_from_params(params: &RequestParams) -> Result<Self, FilterError> {
        let fields = parse_fields(
            params
                .get(PARAM_FIELDS)
                .ok_or_else(|| FilterError::MissingParameter(PARAM_FIELDS.to_string()))?,
        )?;

        let format = params
            .get(PARAM_EXPORT_FORMAT)
            .unwrap_or(DEFAULT_EXPORT_FORMAT)
            .to_string();

        let conditions = params
            .iter()
            .filter(|(k, v)| is_condition_param(k) && !v.trim().is_empty())
            .map(|(k, v)| (k.to_string(), v.trim().to_string()))
            .collect();

        Ok(Self {
            model: params.get(PARAM_MODEL).map(str::to_string),
            key: params.get(PARAM_KEY).map(str::to_string),
            name: params.get(PARAM_NAME).map(str::to_string),
            fields,
            format,
            page: parse_positive(params, PARAM_PAGE, 1)?,
            per_page: parse_positive(params, PARAM_PER_PAGE, DEFAULT_PER_PAGE)?,
            conditions,
            session_store: serde_json::Map::new(),
            organisation_id: None,
        })
    }

    /// Reconstruct a descriptor and overlay the session in one step.
    pub fn from_request(
        params: &RequestParams,
        session: SessionState,
    ) -> Result<Self, FilterError> {
        let mut descriptor = Self::deserialize_from_params(params)?;
        descriptor.apply_session(session);
        Ok(descriptor)
    }

    /// Overlay session filter state and bind the tenant id.
    ///
    /// Scalar `wf_*` entries fill conditions the request did not set.
    pub fn apply_session(&mut self, session: SessionState) {
        for (key, value) in &session.store {
            if !is_condition_param(key) || self.conditions.contains_key(key) {
                continue;
            }
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            if !text.trim().is_empty() {
                self.conditions.insert(key.clone(), text);
            }
        }
        self.session_store = session.store;
        self.organisation_id = session.organisation_id;
    }

    /// Force a single page of at most `max_rows` rows.
    pub fn apply_export_limit(&mut self, max_rows: u32) {
        self.page = 1;
        self.per_page = max_rows;
    }

    /// The requested format, if it is one of the recognized kinds.
    pub fn export_format(&self) -> Option<ExportFormat> {
        ExportFormat::from_name(&self.format)
    }

    /// True if the requested format is xml, json, csv or custom.
    pub fn valid_format(&self) -> bool {
        self.export_format().is_some()
    }

    /// True if the request selects a custom export routine.
    ///
    /// `declared` lists the custom format names the backend offers for this filter.
    pub fn custom_format(&self, declared: &[String]) -> bool {
        self.export_format() == Some(ExportFormat::Custom)
            || declared.iter().any(|name| name.eq_ignore_ascii_case(&self.format))
    }

    /// The default-filter key, unless it is the "none selected" sentinel.
    pub fn default_filter_key(&self) -> Option<&str> {
        self.key.as_deref().filter(|key| *key != NO_DEFAULT_FILTER_KEY)
    }

    /// Serialize the filter state back to request parameters.
    ///
    /// Paging and format are left out; the export path sets both.
    pub fn to_params(&self) -> RequestParams {
        let mut params = RequestParams::new();
        if let Some(model) = &self.model {
            params.insert(PARAM_MODEL, model.as_str());
        }
        if let Some(key) = &self.key {
            params.insert(PARAM_KEY, key.as_str());
        }
        if let Some(name) = &self.name {
            params.insert(PARAM_NAME, name.as_str());
        }
        params.insert(PARAM_FIELDS, self.fields.join(","));
        for (key, value) in &self.conditions {
            params.insert(key.as_str(), value.as_str());
        }
        params
    }
}

fn is_condition_param(key: &str) -> bool {
    key.starts_with(FILTER_PARAM_PREFIX) && !RESERVED_PARAMS.contains(&key)
}

fn parse_fields(raw: &str) -> Result<Vec<String>, FilterError> {
    let fields: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();

    if fields.is_empty() {
        return Err(FilterError::MissingParameter(PARAM_FIELDS.to_string()));
    }
    if let Some(bad) = fields.iter().find(|f| !is_valid_field(f)) {
        return Err(FilterError::InvalidField(bad.clone()));
    }
    Ok(fields)
}

/// Field identifiers double as XML element names: a letter or underscore,
/// then letters, digits or underscores.
fn is_valid_field(field: &str) -> bool {
    let mut chars = field.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_positive(params: &RequestParams, name: &str, default: u32) -> Result<u32, FilterError> {
    match params.get(name) {
        None => Ok(default),
        Some(raw) => match raw.parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(FilterError::InvalidParameter {
                name: name.to_string(),
                message: "must be a positive integer".to_string(),
            }),
        },
    }
}
