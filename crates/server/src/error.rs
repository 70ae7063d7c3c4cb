//! HTTP error mapping.
//!
//! Responsibilities:
//! - Wrap export and request failures in a single handler error type.
//! - Map errors to status codes: caller input is 400, everything else 500.
//!
//! Does NOT handle:
//! - Unsupported export formats; those are regular 200 responses.

use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use report_exporter::{ExportError, FilterError};
use thiserror::Error;

/// Errors returned by request handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Export(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Export(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(error: FilterError) -> Self {
        Self::Export(ExportError::Filter(error))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Export request failed");
        } else {
            tracing::warn!(error = %self, "Export request rejected");
        }
        (
            status,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}
