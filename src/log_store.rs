//! Remote log store collaborator
//!
//! The remote store is an opaque paginated-query service: given a log store
//! name, a time range, and an offset/limit cursor it returns one batch of
//! record envelopes. [`LogStore`] is the seam the exporter works against;
//! [`HttpLogStore`] is the reqwest-backed implementation used in production.

use crate::config::LogStoreConfig;
use crate::error::{Error, Result};
use crate::types::TimeRange;
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

/// Pagination cursor for one fetch. Entirely local to a single export run;
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Zero-based record offset into the result set
    pub offset: usize,
    /// Maximum records per fetch
    pub limit: usize,
}

impl Page {
    /// The first page of a result set.
    pub fn first(limit: usize) -> Self {
        Self { offset: 0, limit }
    }

    /// The page immediately after this one.
    pub fn next(self) -> Self {
        Self {
            offset: self.offset + self.limit,
            limit: self.limit,
        }
    }
}

/// One record envelope as returned by the remote store.
///
/// Only the textual `content` field is kept; all other envelope fields are
/// discarded on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LogRecord {
    /// The textual payload of the record; may be empty
    #[serde(default)]
    pub content: String,
}

impl LogRecord {
    /// Construct a record from its textual content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// The remote log store boundary.
///
/// Implementations must return records in a stable order across pages of
/// the same query; the exporter relies on this for ordered output.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Fetch one page of records for `logstore` within `range`.
    ///
    /// An empty vec means the result set is exhausted.
    async fn fetch_page(
        &self,
        logstore: &str,
        range: TimeRange,
        page: Page,
    ) -> Result<Vec<LogRecord>>;
}

/// HTTP-backed [`LogStore`] implementation.
///
/// Queries `GET {endpoint}/logstores/{name}/logs` with the project, time
/// bounds, and cursor as query parameters, and access keys as headers.
/// Constructed once at startup and shared; never ambient global state.
#[derive(Debug)]
pub struct HttpLogStore {
    client: reqwest::Client,
    endpoint: Url,
    project: String,
    access_key_id: Option<String>,
    access_key_secret: Option<String>,
}

impl HttpLogStore {
    /// Build a store client from configuration.
    pub fn new(config: &LogStoreConfig) -> Result<Self> {
        // A trailing slash keeps Url::join from eating the last path segment
        let mut endpoint = config.endpoint.clone();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        let endpoint = Url::parse(&endpoint).map_err(|e| Error::Config {
            message: format!("invalid log store endpoint {:?}: {e}", config.endpoint),
            key: Some("log_store.endpoint".to_string()),
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            project: config.project.clone(),
            access_key_id: config.access_key_id.clone(),
            access_key_secret: config.access_key_secret.clone(),
        })
    }
}

#[async_trait]
impl LogStore for HttpLogStore {
    async fn fetch_page(
        &self,
        logstore: &str,
        range: TimeRange,
        page: Page,
    ) -> Result<Vec<LogRecord>> {
        let url = self
            .endpoint
            .join(&format!("logstores/{logstore}/logs"))
            .map_err(|e| Error::Config {
                message: format!("cannot build query URL for logstore {logstore:?}: {e}"),
                key: Some("log_store.endpoint".to_string()),
            })?;

        let mut request = self.client.get(url).query(&[
            ("project", self.project.clone()),
            ("from", range.start.to_string()),
            ("to", range.end.to_string()),
            ("offset", page.offset.to_string()),
            ("line", page.limit.to_string()),
        ]);
        if let Some(id) = &self.access_key_id {
            request = request.header("x-log-access-key-id", id);
        }
        if let Some(secret) = &self.access_key_secret {
            request = request.header("x-log-access-key-secret", secret);
        }

        let records = request
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<LogRecord>>()
            .await?;

        tracing::debug!(
            logstore = %logstore,
            offset = page.offset,
            returned = records.len(),
            "fetched log page"
        );

        Ok(records)
    }
}
