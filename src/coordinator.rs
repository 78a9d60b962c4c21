//! Export orchestration
//!
//! One [`ExportCoordinator::run`] call takes an export request end-to-end:
//! validate and parse the time range, run the paginated fetch loop on its
//! own worker task, publish or discard the artifact, and schedule its
//! deletion. The coordinator owns nothing mutable across requests; every
//! in-flight export works on its own uniquely-named artifact.

use crate::artifact::ArtifactStore;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::exporter::PaginatedExporter;
use crate::log_store::{HttpLogStore, LogStore};
use crate::types::{ExportOutcome, ExportRequest, TimeRange};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs::File;

/// Orchestrates export requests against an injected [`LogStore`].
pub struct ExportCoordinator {
    store: Arc<dyn LogStore>,
    artifacts: Arc<ArtifactStore>,
    page_size: usize,
    artifact_ttl: Duration,
}

impl ExportCoordinator {
    /// Create a coordinator from explicit collaborators.
    pub fn new(
        store: Arc<dyn LogStore>,
        artifacts: Arc<ArtifactStore>,
        page_size: usize,
        artifact_ttl: Duration,
    ) -> Self {
        Self {
            store,
            artifacts,
            page_size,
            artifact_ttl,
        }
    }

    /// Create a coordinator wired to an [`HttpLogStore`] and an
    /// [`ArtifactStore`] built from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = Arc::new(HttpLogStore::new(&config.log_store)?);
        let artifacts = Arc::new(ArtifactStore::new(&config.artifacts.dir)?);
        Ok(Self::new(
            store,
            artifacts,
            config.log_store.page_size,
            config.artifacts.ttl(),
        ))
    }

    /// The configured artifact time-to-live.
    pub fn artifact_ttl(&self) -> Duration {
        self.artifact_ttl
    }

    /// Run one export request end-to-end.
    ///
    /// Validation failures terminate before any remote call or file
    /// creation. The fetch loop runs on its own spawned task so a slow or
    /// large export only suspends this request, never the service. A
    /// zero-record result leaves no artifact behind; a successful export is
    /// published and scheduled for deletion after the configured window.
    pub async fn run(&self, request: ExportRequest) -> Result<ExportOutcome> {
        let range = TimeRange::from_request(&request)?;

        let file_name = self.artifacts.unique_file_name(&request.logstore);
        let mut pending = self.artifacts.create(&file_name).await?;

        tracing::info!(
            logstore = %request.logstore,
            start = range.start,
            end = range.end,
            artifact = %file_name,
            "starting log export"
        );

        let exporter = PaginatedExporter::new(Arc::clone(&self.store), self.page_size);
        let logstore = request.logstore.clone();
        let worker = tokio::spawn(async move {
            let result = exporter.export(&logstore, range, pending.writer()).await;
            (pending, result)
        });
        // Suspends this request only; a join error means the worker
        // panicked or was aborted, and the staged file stays in incoming/
        // where no download can reach it.
        let (pending, result) = worker.await.map_err(Error::export_failed)?;

        let record_count = match result {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(logstore = %request.logstore, error = %e, "export aborted");
                pending.discard().await;
                return Err(e);
            }
        };

        if record_count == 0 {
            tracing::info!(logstore = %request.logstore, "no matching records, no artifact created");
            pending.discard().await;
            return Ok(ExportOutcome::NoRecords);
        }

        let path = pending.commit().await?;
        self.artifacts
            .schedule_deletion(path, self.artifact_ttl);

        tracing::info!(
            logstore = %request.logstore,
            artifact = %file_name,
            records = record_count,
            ttl_secs = self.artifact_ttl.as_secs(),
            "export complete, deletion scheduled"
        );

        Ok(ExportOutcome::Completed {
            artifact: file_name,
            record_count,
        })
    }

    /// Open a previously exported artifact for download.
    pub async fn open_artifact(&self, requested: &str) -> Result<(String, File)> {
        self.artifacts.open(requested).await
    }
}
