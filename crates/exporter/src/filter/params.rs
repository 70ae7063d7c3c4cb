//! Request parameter map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat key/value request parameters (query string or form body).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParams(BTreeMap<String, String>);

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a parameter, returning None if unset, empty, or whitespace-only.
    /// Returned values are trimmed.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for RequestParams {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_filters_blank_values() {
        let params: RequestParams = [("a", "  "), ("b", ""), ("c", " x ")].into_iter().collect();
        assert_eq!(params.get("a"), None);
        assert_eq!(params.get("b"), None);
        assert_eq!(params.get("c"), Some("x"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_deserializes_from_json_object() {
        let params: RequestParams =
            serde_json::from_str(r#"{"wf_model":"Order","page":"2"}"#).unwrap();
        assert_eq!(params.get("wf_model"), Some("Order"));
        assert_eq!(params.get("page"), Some("2"));
    }
}
