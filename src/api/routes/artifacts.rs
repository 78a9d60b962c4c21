//! Artifact download handler.

use crate::api::AppState;
use crate::error::Error;
use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

/// GET /artifacts/:name - Download an exported artifact
///
/// The requested name is reduced to its base component before lookup, so
/// no path outside the managed directory is addressable. A 404 here is the
/// normal end state of every artifact: expired, already deleted, or never
/// created.
#[utoipa::path(
    get,
    path = "/api/v1/artifacts/{name}",
    tag = "artifacts",
    params(
        ("name" = String, Path, description = "Artifact file name from the export response")
    ),
    responses(
        (status = 200, description = "Raw artifact content", content_type = "text/plain"),
        (status = 404, description = "Artifact expired or does not exist")
    )
)]
pub async fn fetch_artifact(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, Error> {
    let (file_name, file) = state.coordinator.open_artifact(&name).await?;

    // Stream straight from the open handle; on unix an unlink by the
    // deletion timer mid-transfer leaves this read intact.
    let body = Body::from_stream(ReaderStream::new(file));

    let headers = [
        (
            header::CONTENT_TYPE,
            "text/plain; charset=utf-8".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ),
    ];

    Ok((headers, body).into_response())
}
