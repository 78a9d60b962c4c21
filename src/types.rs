//! Core request/response types

use crate::error::Result;
use crate::time_parse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An export request as submitted by a client.
///
/// Time bounds are free-form strings; see [`crate::time_parse`] for the
/// accepted formats. The request is transient — it exists only for the
/// duration of one export call.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExportRequest {
    /// Name of the log store to export from
    pub logstore: String,

    /// Inclusive start of the time range (free-form, e.g. "2024-01-01 00:00:00")
    pub start_time: String,

    /// Inclusive end of the time range (free-form)
    pub end_time: String,
}

/// A parsed, validated time range in epoch seconds.
///
/// Both bounds parse successfully or the request is rejected before any
/// remote call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Inclusive range start, epoch seconds
    pub start: i64,
    /// Inclusive range end, epoch seconds
    pub end: i64,
}

impl TimeRange {
    /// Create a range from already-parsed epoch seconds.
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Parse both bounds of an [`ExportRequest`], failing fast with
    /// `InvalidTimeFormat` on the first unparsable input.
    pub fn from_request(request: &ExportRequest) -> Result<Self> {
        let start = time_parse::parse_epoch_seconds(&request.start_time)?;
        let end = time_parse::parse_epoch_seconds(&request.end_time)?;
        Ok(Self { start, end })
    }
}

/// Outcome of a completed export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The remote store returned no matching records; no artifact exists.
    NoRecords,

    /// Records were exported into an artifact scheduled for deletion.
    Completed {
        /// Artifact file name, usable as the download reference
        artifact: String,
        /// Number of lines written
        record_count: u64,
    },
}

/// Response body for a submitted export.
///
/// `text` is always present and human-readable; the structured fields are
/// set only when an artifact was produced.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExportResponse {
    /// Human-readable outcome message (markdown on success)
    pub text: String,

    /// Number of exported records, when any were found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u64>,

    /// Artifact name to pass to the download endpoint, when one was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
}

impl ExportResponse {
    /// Response for an export that matched no records.
    pub fn no_records() -> Self {
        Self {
            text: "No matching log records were found in the requested time range.".to_string(),
            record_count: None,
            artifact: None,
        }
    }

    /// Response for a successful export, with the download link inlined
    /// into the markdown message.
    pub fn completed(artifact: &str, record_count: u64, download_url: &str, ttl_secs: u64) -> Self {
        let text = format!(
            "### Log export complete ({record_count} records)\n\n\
             [View or download the log file]({download_url})\n\n\
             **Note:** this link expires in {ttl_secs} seconds, after which \
             the file is permanently deleted."
        );
        Self {
            text,
            record_count: Some(record_count),
            artifact: Some(artifact.to_string()),
        }
    }
}
