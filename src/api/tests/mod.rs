use super::*;
use crate::artifact::ArtifactStore;
use crate::error::Result;
use crate::log_store::{LogRecord, LogStore, Page};
use crate::types::TimeRange;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use tower::ServiceExt; // for oneshot


/// Fake log store serving a fixed record list, paged by offset/limit.
struct FakeLogStore {
    records: Vec<LogRecord>,
    fail: bool,
    calls: AtomicUsize,
}

impl FakeLogStore {
    fn with_lines(count: usize) -> Arc<Self> {
        Arc::new(Self {
            records: (0..count)
                .map(|i| LogRecord::new(format!("log line {i}")))
                .collect(),
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            records: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl LogStore for FakeLogStore {
    async fn fetch_page(
        &self,
        _logstore: &str,
        _range: TimeRange,
        page: Page,
    ) -> Result<Vec<LogRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(crate::error::Error::Io(std::io::Error::other(
                "remote store down",
            )));
        }
        Ok(self
            .records
            .iter()
            .skip(page.offset)
            .take(page.limit)
            .cloned()
            .collect())
    }
}

/// Build a router over a fake store, with artifacts in a scratch directory.
fn test_app(store: Arc<dyn LogStore>, token: Option<&str>) -> (Router, TempDir) {
    let temp = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.artifacts.dir = temp.path().to_path_buf();
    config.api.api_token = token.map(String::from);
    config.api.swagger_ui = false;
    let config = Arc::new(config);

    let artifacts = Arc::new(ArtifactStore::new(temp.path()).unwrap());
    let coordinator = Arc::new(ExportCoordinator::new(
        store,
        artifacts,
        100,
        config.artifacts.ttl(),
    ));

    let app = create_router(coordinator, config);
    (app, temp)
}

fn export_body() -> String {
    serde_json::json!({
        "logstore": "app",
        "start_time": "2024-01-01 00:00:00",
        "end_time": "2024-01-01 01:00:00",
    })
    .to_string()
}

async fn post_export(app: &Router, token: Option<&str>, body: String) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/v1/exports")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body)).unwrap();

    app.clone().oneshot(request).await.unwrap()
}

async fn get_path(app: &Router, path: &str) -> Response {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn cors_headers_present_when_enabled() {
    let (app, _temp) = test_app(FakeLogStore::with_lines(0), None);

    let request = Request::builder()
        .uri("/api/v1/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn api_server_spawns_on_ephemeral_port() {
    let temp = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.artifacts.dir = temp.path().to_path_buf();
    config.api.bind_address = "127.0.0.1:0".parse().unwrap(); // OS assigns a free port
    let config = Arc::new(config);

    let artifacts = Arc::new(ArtifactStore::new(temp.path()).unwrap());
    let coordinator = Arc::new(ExportCoordinator::new(
        FakeLogStore::with_lines(0),
        artifacts,
        100,
        config.artifacts.ttl(),
    ));

    let handle = tokio::spawn({
        let config = config.clone();
        async move { start_api_server(coordinator, config).await }
    });

    // Give it a moment to bind, then stop it
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    handle.abort();
}
