//! Paginated export loop
//!
//! Drives the fetch-all loop against the remote log store, appending record
//! content line-by-line to a destination writer and returning the count.

use crate::error::{Error, Result};
use crate::log_store::{LogStore, Page};
use crate::types::TimeRange;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Sequential offset/limit exporter over a [`LogStore`].
///
/// Pages are fetched strictly one after another — output order depends on
/// it. There are no retries; the first store or write error aborts the run.
pub struct PaginatedExporter {
    store: Arc<dyn LogStore>,
    page_size: usize,
}

impl PaginatedExporter {
    /// Create an exporter over `store` fetching `page_size` records per call.
    pub fn new(store: Arc<dyn LogStore>, page_size: usize) -> Self {
        Self { store, page_size }
    }

    /// Export every record of `logstore` within `range` into `dest`.
    ///
    /// Each record's non-empty `content` field becomes one appended line;
    /// empty-content records are skipped. Returns the number of lines
    /// written.
    ///
    /// Termination: an empty page ends the loop, and so does a page shorter
    /// than the page size (last page). A page filled exactly to the limit
    /// always triggers one more fetch — a result set whose size is an exact
    /// multiple of the page size must not be truncated at the boundary.
    ///
    /// Failures propagate as [`Error::ExportFailed`] wrapping the cause.
    /// Partial output already written to `dest` is left for the caller to
    /// discard; it is never published to downloaders by this component.
    pub async fn export<W>(&self, logstore: &str, range: TimeRange, dest: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let mut page = Page::first(self.page_size);
        let mut count: u64 = 0;

        loop {
            let records = self
                .store
                .fetch_page(logstore, range, page)
                .await
                .map_err(Error::export_failed)?;

            if records.is_empty() {
                break;
            }

            for record in &records {
                if record.content.is_empty() {
                    continue;
                }
                dest.write_all(record.content.as_bytes())
                    .await
                    .map_err(Error::export_failed)?;
                dest.write_all(b"\n").await.map_err(Error::export_failed)?;
                count += 1;
            }

            if records.len() < page.limit {
                break;
            }
            page = page.next();
        }

        dest.flush().await.map_err(Error::export_failed)?;
        Ok(count)
    }
}
