//! HTTP request handlers.
//!
//! Responsibilities:
//! - Turn query strings and form bodies into `RequestParams`.
//! - Run the index (form rendering) and export paths.
//! - Convert `ExportResponse` into an HTTP response.
//!
//! Does NOT handle:
//! - Format dispatch or serialization (see `report_exporter::dispatch`).
//!
//! Invariants:
//! - The generation timestamp is captured once, here, per request.
//! - Exports run on the blocking pool; serializing 20k rows must not stall
//!   the async workers.

use axum::body::Body;
use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{Html, Response};
use chrono::Local;
use report_exporter::form::render_export_form;
use report_exporter::{
    Dispatcher, ExportRequest, ExportResponse, FilterDescriptor, RequestParams, SessionState,
};

use crate::app::{AppState, EXPORT_PATH};
use crate::error::ApiError;
use crate::session::Session;

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}

/// Render the export form for the current filter state.
pub async fn index(
    State(state): State<AppState>,
    Session(session): Session,
    Query(params): Query<RequestParams>,
) -> Result<Html<String>, ApiError> {
    let descriptor = FilterDescriptor::from_request(&params, session)?;
    let html = render_export_form(
        &descriptor,
        state.backend.as_ref(),
        &state.catalog,
        EXPORT_PATH,
    )?;
    Ok(Html(html))
}

/// Export with filter state in the query string.
pub async fn export_query(
    State(state): State<AppState>,
    Session(session): Session,
    Query(params): Query<RequestParams>,
) -> Result<Response, ApiError> {
    export(state, session, params).await
}

/// Export with filter state in a form body.
pub async fn export_form(
    State(state): State<AppState>,
    Session(session): Session,
    Form(params): Form<RequestParams>,
) -> Result<Response, ApiError> {
    export(state, session, params).await
}

async fn export(
    state: AppState,
    session: SessionState,
    params: RequestParams,
) -> Result<Response, ApiError> {
    let generated_at = Local::now().naive_local();
    let request = ExportRequest::from_request(&params, session, generated_at)?;

    tracing::info!(
        format = %request.descriptor.format,
        model = ?request.descriptor.model,
        organisation_id = ?request.descriptor.organisation_id,
        fields = request.descriptor.fields.len(),
        "Export requested"
    );

    let response = tokio::task::spawn_blocking(move || {
        Dispatcher::new(state.backend.as_ref(), &state.catalog)
            .with_csv_charset(state.csv_charset)
            .export(&request)
    })
    .await
    .map_err(|e| ApiError::internal(format!("export task failed: {e}")))??;

    into_http(response)
}

fn into_http(export: ExportResponse) -> Result<Response, ApiError> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, export.content_type);
    if let Some(disposition) = export.content_disposition() {
        builder = builder.header(CONTENT_DISPOSITION, disposition);
    }
    builder
        .body(Body::from(export.body))
        .map_err(|e| ApiError::internal(format!("failed to build response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use report_exporter::{Catalog, InMemoryBackend};
    use std::sync::Arc;

    const DATASET: &str = r#"{
        "Order": {
            "titles": {"name": "Customer"},
            "rows": [
                {"name": "Acme", "amount": 42, "status": "open"},
                {"name": "Globex", "amount": 7, "status": "closed"}
            ],
            "custom_formats": {"summary": "{name}={amount}"}
        }
    }"#;

    fn state() -> AppState {
        AppState::new(
            Arc::new(InMemoryBackend::from_json_str(DATASET).unwrap()),
            Arc::new(Catalog::builtin().unwrap()),
        )
    }

    fn params(format: &str) -> RequestParams {
        RequestParams::new()
            .with("wf_model", "Order")
            .with("wf_fields", "name,amount")
            .with("wf_export_format", format)
    }

    fn session() -> Session {
        Session(SessionState::from_raw(Some(r#"{"wf_status":"open"}"#), Some("3")).unwrap())
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn test_export_json_applies_session_conditions() {
        let response = export_query(State(state()), session(), Query(params("json")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "application/json; charset=utf-8"
        );
        assert_eq!(response.headers()[CONTENT_DISPOSITION], "attachment");
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body, serde_json::json!([{"name": "Acme", "amount": "42"}]));
    }

    #[tokio::test]
    async fn test_export_csv_form_body() {
        let response = export_form(State(state()), session(), Form(params("csv")))
            .await
            .unwrap();

        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "text/csv; charset=utf-16le; header=present"
        );
        assert_eq!(
            response.headers()[CONTENT_DISPOSITION],
            "attachment; filename=\"results.csv\""
        );
        let bytes = body_bytes(response).await;
        assert_eq!(&bytes[..2], &[0xFF, 0xFE]);
        let text = report_exporter::encoding::decode_utf16le_with_bom(&bytes).unwrap();
        assert!(text.contains("\"Report Name\"\t\"Orders Report\"\r\n"));
        assert!(text.contains("\"Customer\"\t\"Amount\"\r\n\"Acme\"\t\"42\"\r\n"));
    }

    #[tokio::test]
    async fn test_export_legacy_csv_charset() {
        let state = AppState {
            csv_charset: report_exporter::CsvCharset::LegacyUtf8,
            ..state()
        };
        let response = export_query(State(state), session(), Query(params("csv")))
            .await
            .unwrap();
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "text/csv; charset=utf-8; header=present"
        );
    }

    #[tokio::test]
    async fn test_export_unsupported_format_is_ok_without_attachment() {
        let response = export_query(State(state()), session(), Query(params("pdf")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(CONTENT_DISPOSITION).is_none());
        assert_eq!(
            body_bytes(response).await,
            b"The export format is not supported (pdf)"
        );
    }

    #[tokio::test]
    async fn test_export_custom_format() {
        let response = export_query(State(state()), session(), Query(params("summary")))
            .await
            .unwrap();

        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain; charset=utf-8");
        let disposition = response.headers()[CONTENT_DISPOSITION].to_str().unwrap().to_string();
        assert!(disposition.starts_with("attachment; filename=\"orders_report_"));
        assert!(disposition.ends_with(".summary\""));
        assert_eq!(body_bytes(response).await, b"Acme=42");
    }

    #[tokio::test]
    async fn test_export_missing_fields_is_bad_request() {
        let params = RequestParams::new().with("wf_export_format", "xml");
        let err = export_query(State(state()), session(), Query(params))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_unknown_model_is_server_error() {
        let params = params("xml").with("wf_model", "Shipment");
        let err = export_query(State(state()), session(), Query(params))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let Html(html) = index(
            State(state()),
            session(),
            Query(params("csv").with("wf_key", "open")),
        )
        .await
        .unwrap();

        assert!(html.contains("action=\"/exporter/export\""));
        assert!(html.contains("<h3>Open Orders</h3>"));
        assert!(html.contains("name=\"wf_status\" value=\"open\""));
        assert!(html.contains("<option value=\"summary\">SUMMARY</option>"));
    }
}
