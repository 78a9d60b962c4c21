//! # logdrop
//!
//! Export time-bounded log records from a remote log store into a
//! temporary text file, serve it over HTTP for a short window, then
//! delete it permanently.
//!
//! ## Design Philosophy
//!
//! logdrop is designed to be:
//! - **Self-expiring** - Every exported artifact is deleted on a timer;
//!   nothing served is durable
//! - **Complete** - The pagination loop never truncates a result set,
//!   including sets whose size is an exact multiple of the page size
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Injectable** - The remote store sits behind a trait; credentials
//!   and endpoints come from configuration, never ambient globals
//!
//! ## Quick Start
//!
//! ```no_run
//! use logdrop::{Config, ExportCoordinator, run_with_shutdown};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Arc::new(Config::from_env()?);
//!     let coordinator = Arc::new(ExportCoordinator::from_config(&config)?);
//!
//!     // Serve the API until SIGTERM/SIGINT
//!     run_with_shutdown(coordinator, config).await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Temporary artifact management
pub mod artifact;
/// Configuration types
pub mod config;
/// Export orchestration
pub mod coordinator;
/// Error types
pub mod error;
/// Paginated export loop
pub mod exporter;
/// Remote log store collaborator
pub mod log_store;
/// Timestamp normalization
pub mod time_parse;
/// Core request/response types
pub mod types;

// Re-export commonly used types
pub use artifact::{ArtifactStore, PendingArtifact};
pub use config::{ApiConfig, ArtifactConfig, Config, LogStoreConfig};
pub use coordinator::ExportCoordinator;
pub use error::{ApiError, Error, ErrorDetail, Result, ToHttpStatus};
pub use exporter::PaginatedExporter;
pub use log_store::{HttpLogStore, LogRecord, LogStore, Page};
pub use types::{ExportOutcome, ExportRequest, ExportResponse, TimeRange};

use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve the API with graceful signal handling.
///
/// Binds the configured address and serves until a termination signal
/// arrives, then finishes in-flight requests and returns. Deletion timers
/// for still-live artifacts die with the process; the files they would
/// have removed are re-created fresh on the next run of their exports.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with a ctrl_c fallback if
///   signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
pub async fn run_with_shutdown(
    coordinator: Arc<ExportCoordinator>,
    config: Arc<Config>,
) -> Result<()> {
    let bind_address = config.api.bind_address;
    let app = api::create_router(coordinator, config);

    let listener = TcpListener::bind(bind_address).await.map_err(Error::Io)?;
    tracing::info!(address = %bind_address, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_signal())
        .await
        .map_err(|e| Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Signal registration may fail in restricted environments (containers,
    // tests); fall back to ctrl_c rather than giving up
    match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => tracing::info!("Received SIGTERM signal"),
                _ = sigint.recv() => tracing::info!("Received SIGINT signal (Ctrl+C)"),
            }
        }
        _ => {
            tracing::warn!("Could not register signal handlers, using ctrl_c fallback");
            tokio::signal::ctrl_c().await.ok();
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C signal"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C signal"),
    }
}
