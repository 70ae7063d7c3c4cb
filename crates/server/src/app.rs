//! Application state and routing.
//!
//! Responsibilities:
//! - Build shared state (backend, catalog, CSV charset) from configuration.
//! - Define the HTTP routes and request tracing.
//!
//! Invariants:
//! - State is read-only after startup and shared by all requests.

use anyhow::{Context, bail};
use axum::Router;
use axum::routing::get;
use report_config::ServerConfig;
use report_exporter::{Catalog, CsvCharset, FilterBackend, InMemoryBackend};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers;

pub const HEALTH_PATH: &str = "/health";
pub const INDEX_PATH: &str = "/exporter";
pub const EXPORT_PATH: &str = "/exporter/export";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn FilterBackend>,
    pub catalog: Arc<Catalog>,
    pub csv_charset: CsvCharset,
}

impl AppState {
    pub fn new(backend: Arc<dyn FilterBackend>, catalog: Arc<Catalog>) -> Self {
        Self {
            backend,
            catalog,
            csv_charset: CsvCharset::default(),
        }
    }

    /// Load the catalog and datasets named by `config`.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let catalog = match &config.locale_file {
            Some(path) => Catalog::from_path(path, &config.locale)
                .with_context(|| format!("Failed to load locale '{}'", config.locale))?,
            None => {
                let catalog = Catalog::builtin().context("Failed to load built-in locale")?;
                if catalog.locale() != config.locale {
                    bail!(
                        "Locale '{}' is not built in; provide it with --locale-file",
                        config.locale
                    );
                }
                catalog
            }
        };

        let backend = match &config.dataset_file {
            Some(path) => InMemoryBackend::from_path(path)
                .with_context(|| format!("Failed to load datasets from {}", path.display()))?,
            None => {
                tracing::warn!(
                    "No dataset file configured; every export will report an unknown model"
                );
                InMemoryBackend::new()
            }
        };

        let csv_charset = if config.legacy_csv_charset {
            CsvCharset::LegacyUtf8
        } else {
            CsvCharset::Utf16Le
        };

        Ok(Self {
            csv_charset,
            ..Self::new(Arc::new(backend), Arc::new(catalog))
        })
    }
}

/// Create the HTTP router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(handlers::health))
        .route(INDEX_PATH, get(handlers::index))
        .route(
            EXPORT_PATH,
            get(handlers::export_query).post(handlers::export_form),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
