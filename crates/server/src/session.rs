//! Session extraction.
//!
//! The fronting application forwards the user's session entries as request
//! headers: the filter session store as JSON text and the current
//! organisation id. Both paths (index and export) read them the same way.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use report_exporter::SessionState;

use crate::error::ApiError;

/// JSON-encoded filter session store.
pub const SESSION_STORE_HEADER: &str = "x-wf-session-store";

/// Current tenant id.
pub const ORGANISATION_ID_HEADER: &str = "x-current-organisation-id";

/// Parsed session entries for the current request.
#[derive(Debug, Clone, PartialEq)]
pub struct Session(pub SessionState);

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, ApiError> {
    headers
        .get(name)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| ApiError::bad_request(format!("header {name} is not valid text")))
        })
        .transpose()
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let store = header_text(&parts.headers, SESSION_STORE_HEADER)?;
        let organisation_id = header_text(&parts.headers, ORGANISATION_ID_HEADER)?;
        let state = SessionState::from_raw(store, organisation_id)?;
        Ok(Session(state))
    }
}
