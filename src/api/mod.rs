//! REST API server module
//!
//! Provides the two externally visible operations — submit an export,
//! fetch an artifact by name — plus health and OpenAPI endpoints.

use crate::{Config, ExportCoordinator, Result};
use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod auth;
pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the API router with all route definitions
///
/// # Routes
///
/// ## Exports
/// - `POST /api/v1/exports` - Submit an export request (bearer-token
///   protected when a token is configured)
///
/// ## Artifacts
/// - `GET /api/v1/artifacts/:name` - Download an exported artifact
///
/// ## System
/// - `GET /api/v1/health` - Health check
/// - `GET /api/v1/openapi.json` - OpenAPI specification
/// - `GET /swagger-ui` - Interactive Swagger UI documentation (if enabled)
pub fn create_router(coordinator: Arc<ExportCoordinator>, config: Arc<Config>) -> Router {
    let state = AppState::new(coordinator, config.clone());

    // Export submission is the authenticated surface. The artifact
    // endpoint stays public: download links must be clickable without
    // credentials, and artifact names are unguessable by construction.
    let mut protected = Router::new().route("/api/v1/exports", post(routes::submit_export));
    if config.api.api_token.is_some() {
        protected = protected.layer(middleware::from_fn_with_state(
            config.api.api_token.clone(),
            auth::require_bearer_token,
        ));
    }

    let public = Router::new()
        .route("/api/v1/artifacts/:name", get(routes::fetch_artifact))
        .route("/api/v1/health", get(routes::health_check))
        .route("/api/v1/openapi.json", get(routes::openapi_spec));

    let router = protected.merge(public);

    // Merge Swagger UI routes if enabled in config (before applying state).
    // The UI serves its own spec copy at a distinct path so it does not
    // collide with the /api/v1/openapi.json route above.
    let router = if config.api.swagger_ui {
        router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    } else {
        router
    };

    let router = router.with_state(state).layer(TraceLayer::new_for_http());

    // Apply CORS middleware if enabled in config
    if config.api.cors_enabled {
        let cors = build_cors_layer(&config.api.cors_origins);
        router.layer(cors)
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins
///
/// Supports "*" for any origin; an empty list also allows all origins
/// (default for local development).
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the API server on the configured bind address.
///
/// Creates a TCP listener, binds it, and serves the router until the
/// server stops. For signal-aware operation use
/// [`run_with_shutdown`](crate::run_with_shutdown) instead.
///
/// # Example
///
/// ```no_run
/// use logdrop::{Config, ExportCoordinator};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Arc::new(Config::from_env()?);
/// let coordinator = Arc::new(ExportCoordinator::from_config(&config)?);
///
/// // Start API server (blocks until shutdown)
/// logdrop::api::start_api_server(coordinator, config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server(
    coordinator: Arc<ExportCoordinator>,
    config: Arc<Config>,
) -> Result<()> {
    let bind_address = config.api.bind_address;

    tracing::info!(address = %bind_address, "Starting API server");

    let app = create_router(coordinator, config);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(address = %bind_address, "API server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
