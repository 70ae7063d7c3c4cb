//! Session-scoped filter state.
//!
//! Responsibilities:
//! - Parse the JSON-encoded filter session store.
//! - Parse the current organisation (tenant) id.
//!
//! Does NOT handle:
//! - Reading the session from a transport (see the server crate).
//!
//! Invariants:
//! - A missing or malformed store is an error, never silently defaulted.
//! - The store is always a JSON object once parsed.

use serde_json::{Map, Value};

use super::error::FilterError;

/// Filter state carried in the user's session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Prior filter state, keyed by filter parameter name.
    pub store: Map<String, Value>,
    /// Tenant the export is scoped to.
    pub organisation_id: Option<i64>,
}

impl SessionState {
    /// Build session state from the raw session entries.
    ///
    /// `store` is the JSON text stored under the filter session key and is
    /// required. `organisation_id` is optional; blank values count as unset.
    pub fn from_raw(
        store: Option<&str>,
        organisation_id: Option<&str>,
    ) -> Result<Self, FilterError> {
        let raw = store.ok_or(FilterError::MissingSession)?;
        let parsed = serde_json::from_str::<Value>(raw).map_err(FilterError::MalformedSession)?;
        let store = match parsed {
            Value::Object(map) => map,
            _ => return Err(FilterError::SessionNotObject),
        };

        let organisation_id = organisation_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| {
                id.parse::<i64>()
                    .map_err(|_| FilterError::InvalidOrganisationId(id.to_string()))
            })
            .transpose()?;

        Ok(Self {
            store,
            organisation_id,
        })
    }
}
