//! Report export server entry point.
//!
//! Responsibilities:
//! - Load `.env`, parse CLI flags, and resolve the server configuration.
//! - Initialize logging and serve the export routes until Ctrl+C.
//!
//! Does NOT handle:
//! - Export dispatch (see `report_exporter`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so clap env defaults can read `.env` values.
//! - Configuration errors abort startup before the listener is bound.

mod app;
mod args;
mod error;
mod handlers;
mod session;

use anyhow::Context;
use args::Cli;
use clap::Parser;
use report_config::{ConfigLoader, LogFormat};
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::app::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ConfigLoader::new()
        .load_dotenv()
        .context("Failed to load environment")?;

    let cli = Cli::parse();
    let config = cli
        .apply(ConfigLoader::new().from_env()?)
        .build()
        .context("Invalid configuration")?;

    init_tracing(config.log_format);

    let state = AppState::from_config(&config)?;
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %config.bind_addr,
        locale = %config.locale,
        csv_charset = ?state.csv_charset,
        "Report server listening"
    );

    axum::serve(listener, app::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Report server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Plain => registry.with(fmt::layer()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
