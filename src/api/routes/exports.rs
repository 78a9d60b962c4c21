//! Export submission handler.

use crate::api::AppState;
use crate::config::Config;
use crate::error::Error;
use crate::types::{ExportOutcome, ExportRequest, ExportResponse};
use axum::{Json, extract::State};

/// POST /exports - Submit an export request
///
/// Runs the full export synchronously from the client's point of view: the
/// response arrives once the artifact is materialized (or the store turned
/// up empty). Other requests keep being served while this one waits on its
/// worker.
#[utoipa::path(
    post,
    path = "/api/v1/exports",
    tag = "exports",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "Export finished; no-records outcome or record count with download reference", body = ExportResponse),
        (status = 400, description = "Unparsable start or end time"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "Remote store or I/O failure during export")
    ),
    security(
        ("bearer_token" = [])
    )
)]
pub async fn submit_export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, Error> {
    let outcome = state.coordinator.run(request).await?;

    let response = match outcome {
        ExportOutcome::NoRecords => ExportResponse::no_records(),
        ExportOutcome::Completed {
            artifact,
            record_count,
        } => {
            let url = download_url(&state.config, &artifact);
            ExportResponse::completed(
                &artifact,
                record_count,
                &url,
                state.config.artifacts.ttl_secs,
            )
        }
    };

    Ok(Json(response))
}

/// Render the download link for an artifact, absolute when a public base
/// URL is configured, relative otherwise.
fn download_url(config: &Config, artifact: &str) -> String {
    match &config.artifacts.public_base_url {
        Some(base) => format!(
            "{}/api/v1/artifacts/{artifact}",
            base.trim_end_matches('/')
        ),
        None => format!("/api/v1/artifacts/{artifact}"),
    }
}
