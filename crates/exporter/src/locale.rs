//! Translation catalog.
//!
//! Responsibilities:
//! - Load Rails-style nested YAML locale files (`en: { a: { b: "text" } }`).
//! - Resolve dotted keys for one locale.
//!
//! Does NOT handle:
//! - Pluralization or interpolation.
//! - Locale negotiation from request headers.
//!
//! Invariants:
//! - A missing key is an error; there is no fallback text.
//! - The catalog is immutable once loaded and safe to share across requests.

use serde_yaml::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../locales/en.yml");
const BUILTIN_LOCALE: &str = "en";

/// Errors raised while loading or reading a catalog.
#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("Missing translation for '{locale}.{key}'")]
    MissingTranslation { locale: String, key: String },

    #[error("Locale '{0}' is not defined in the catalog")]
    UnknownLocale(String),

    #[error("Failed to read locale file at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse locale catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Translations for a single locale.
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: String,
    root: Value,
}

impl Catalog {
    /// The English catalog compiled into the crate.
    pub fn builtin() -> Result<Self, LocaleError> {
        Self::from_yaml_str(BUILTIN_CATALOG, BUILTIN_LOCALE)
    }

    /// Parse a catalog from YAML text, selecting `locale`'s subtree.
    pub fn from_yaml_str(yaml: &str, locale: &str) -> Result<Self, LocaleError> {
        let document: Value = serde_yaml::from_str(yaml)?;
        let root = document
            .get(locale)
            .filter(|v| v.is_mapping())
            .cloned()
            .ok_or_else(|| LocaleError::UnknownLocale(locale.to_string()))?;

        Ok(Self {
            locale: locale.to_string(),
            root,
        })
    }

    /// Load a catalog from a YAML file.
    pub fn from_path(path: &Path, locale: &str) -> Result<Self, LocaleError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| LocaleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml, locale)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Translate a dotted key such as `operational_reports.labels.report_name`.
    pub fn translate(&self, key: &str) -> Result<String, LocaleError> {
        let mut node = &self.root;
        for segment in key.split('.') {
            node = node.get(segment).ok_or_else(|| self.missing(key))?;
        }

        match node {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            _ => Err(self.missing(key)),
        }
    }

    fn missing(&self, key: &str) -> LocaleError {
        LocaleError::MissingTranslation {
            locale: self.locale.clone(),
            key: key.to_string(),
        }
    }
}
