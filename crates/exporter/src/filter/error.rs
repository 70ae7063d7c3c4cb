//! Error types for descriptor reconstruction.

use thiserror::Error;

/// Errors raised while rebuilding a filter descriptor from request state.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid value for {name}: {message}")]
    InvalidParameter { name: String, message: String },

    #[error("Invalid field identifier: '{0}'")]
    InvalidField(String),

    #[error("Missing filter session store")]
    MissingSession,

    #[error("Malformed filter session store: {0}")]
    MalformedSession(#[source] serde_json::Error),

    #[error("Filter session store must be a JSON object")]
    SessionNotObject,

    #[error("Invalid organisation id: '{0}'")]
    InvalidOrganisationId(String),
}
