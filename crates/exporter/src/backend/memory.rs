//! JSON-file backed filter backend.
//!
//! Dataset layout:
//! ```json
//! {
//!   "Billing::Invoice": {
//!     "titles": { "name": "Customer Name" },
//!     "rows": [ { "name": "Acme", "amount": 42 } ],
//!     "custom_formats": { "summary": "{name} owes {amount}" }
//!   }
//! }
//! ```
//!
//! Conditions named `wf_<field>` match rows whose `<field>` renders to the
//! same text; conditions naming no known field are ignored. Custom templates
//! substitute `{field}` placeholders once per row of the requested page, one
//! line each.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::{BackendError, FilterBackend};
use crate::constants::FILTER_PARAM_PREFIX;
use crate::filter::FilterDescriptor;
use crate::naming::humanize;
use crate::row::{ResultRow, Row};

/// Rows and metadata for one model.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub titles: BTreeMap<String, String>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub custom_formats: BTreeMap<String, String>,
}

/// Filter backend serving fixed datasets keyed by model name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    datasets: BTreeMap<String, Dataset>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse datasets from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, BackendError> {
        let datasets: BTreeMap<String, Dataset> = serde_json::from_str(json)?;
        Ok(Self { datasets })
    }

    /// Load datasets from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, BackendError> {
        let json = std::fs::read_to_string(path).map_err(|source| BackendError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let backend = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            models = backend.datasets.len(),
            "Loaded export datasets"
        );
        Ok(backend)
    }

    /// Builder-style registration of a model's dataset.
    pub fn with_dataset(mut self, model: impl Into<String>, dataset: Dataset) -> Self {
        self.datasets.insert(model.into(), dataset);
        self
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    fn dataset(&self, descriptor: &FilterDescriptor) -> Result<&Dataset, BackendError> {
        let model = descriptor.model.as_deref().ok_or(BackendError::MissingModel)?;
        self.datasets
            .get(model)
            .ok_or_else(|| BackendError::UnknownModel(model.to_string()))
    }
}

fn matching_rows<'a>(
    dataset: &'a Dataset,
    descriptor: &'a FilterDescriptor,
) -> impl Iterator<Item = &'a Row> {
    dataset
        .rows
        .iter()
        .filter(move |row| matches_conditions(row, descriptor))
}

/// Matching rows restricted to the descriptor's page.
fn paged_rows<'a>(
    dataset: &'a Dataset,
    descriptor: &'a FilterDescriptor,
) -> impl Iterator<Item = &'a Row> {
    let per_page = descriptor.per_page as usize;
    let skip = (descriptor.page.saturating_sub(1) as usize).saturating_mul(per_page);
    matching_rows(dataset, descriptor).skip(skip).take(per_page)
}

fn matches_conditions(row: &Row, descriptor: &FilterDescriptor) -> bool {
    descriptor.conditions.iter().all(|(key, expected)| {
        let field = key.strip_prefix(FILTER_PARAM_PREFIX).unwrap_or(key);
        match row.value_of(field) {
            Some(value) => value.to_string() == *expected,
            None => true,
        }
    })
}

fn render_template(template: &str, row: &Row) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let field = &after[..close];
                match row.value_of(field) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => {
                        out.push('{');
                        out.push_str(field);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

impl FilterBackend for InMemoryBackend {
    fn execute(&self, descriptor: &FilterDescriptor) -> Result<Vec<Row>, BackendError> {
        let dataset = self.dataset(descriptor)?;
        let rows: Vec<Row> = paged_rows(dataset, descriptor).cloned().collect();

        tracing::debug!(
            model = ?descriptor.model,
            page = descriptor.page,
            per_page = descriptor.per_page,
            returned = rows.len(),
            "Executed filter"
        );
        Ok(rows)
    }

    fn condition_title_for(
        &self,
        descriptor: &FilterDescriptor,
        field: &str,
    ) -> Result<String, BackendError> {
        let dataset = self.dataset(descriptor)?;
        Ok(dataset
            .titles
            .get(field)
            .cloned()
            .unwrap_or_else(|| humanize(field)))
    }

    fn custom_formats(&self, descriptor: &FilterDescriptor) -> Vec<String> {
        self.dataset(descriptor)
            .map(|dataset| dataset.custom_formats.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn process_custom_format(&self, descriptor: &FilterDescriptor) -> Result<String, BackendError> {
        let dataset = self.dataset(descriptor)?;
        let template = dataset
            .custom_formats
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&descriptor.format))
            .map(|(_, template)| template)
            .ok_or_else(|| BackendError::UnsupportedCustomFormat {
                model: descriptor.model.clone().unwrap_or_default(),
                format: descriptor.format.clone(),
            })?;

        let lines: Vec<String> = paged_rows(dataset, descriptor)
            .map(|row| render_template(template, row))
            .collect();
        tracing::debug!(
            model = ?descriptor.model,
            format = %descriptor.format,
            lines = lines.len(),
            "Rendered custom export"
        );
        Ok(lines.join("\n"))
    }
}
