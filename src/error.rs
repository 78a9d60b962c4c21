//! Error types for logdrop
//!
//! This module provides error handling for the library, including:
//! - The export/artifact error taxonomy (Unauthorized, InvalidTimeFormat, ...)
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for logdrop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for logdrop
///
/// Validation errors (`Unauthorized`, `InvalidTimeFormat`) are raised before
/// any remote call or file creation. `ArtifactNotFound` is an expected
/// terminal state for expired downloads, not an exceptional condition.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid API credential
    #[error("unauthorized: missing or invalid credential")]
    Unauthorized,

    /// A start/end time string matched none of the accepted formats
    #[error("unparsable time string: {input}")]
    InvalidTimeFormat {
        /// The offending input, verbatim
        input: String,
    },

    /// The export fetch loop aborted (remote store or I/O failure)
    #[error("export failed: {source}")]
    ExportFailed {
        /// The underlying cause
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Download of a missing, expired, or never-created artifact
    #[error("artifact not found: {name}")]
    ArtifactNotFound {
        /// The requested artifact name (as given by the client)
        name: String,
    },

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "artifacts.dir")
        key: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error talking to the remote log store
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),
}

impl Error {
    /// Wrap an underlying cause as an `ExportFailed` error.
    ///
    /// Used by the exporter and coordinator for anything that aborts the
    /// fetch loop: remote store failures, write failures, worker panics.
    pub fn export_failed(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::ExportFailed {
            source: source.into(),
        }
    }
}

/// API error response format
///
/// This structure is returned by API endpoints when an error occurs.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "artifact_not_found",
///     "message": "artifact not found: app_20240101_000000_deadbeef.txt",
///     "details": {
///       "name": "app_20240101_000000_deadbeef.txt"
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "invalid_time_format")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an API error with additional details
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    /// Create an "unauthorized" error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("unauthorized", message)
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::InvalidTimeFormat { .. } => 400,
            Error::Config { .. } => 400,

            // 401 Unauthorized
            Error::Unauthorized => 401,

            // 404 Not Found - expired or never-created artifact
            Error::ArtifactNotFound { .. } => 404,

            // 500 Internal Server Error - export and server-side issues
            Error::ExportFailed { .. } => 500,
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,

            // 502 Bad Gateway - remote log store transport errors
            Error::Network(_) => 502,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Unauthorized => "unauthorized",
            Error::InvalidTimeFormat { .. } => "invalid_time_format",
            Error::ExportFailed { .. } => "export_failed",
            Error::ArtifactNotFound { .. } => "artifact_not_found",
            Error::Config { .. } => "config_error",
            Error::Io(_) => "io_error",
            Error::Network(_) => "network_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        // Add contextual details for specific error types
        let details = match &error {
            Error::InvalidTimeFormat { input } => Some(serde_json::json!({
                "input": input,
            })),
            Error::ArtifactNotFound { name } => Some(serde_json::json!({
                "name": name,
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a vec of (Error, expected_status_code, expected_error_code) for
    /// every reachable match arm in ToHttpStatus.
    fn all_error_variants() -> Vec<(Error, u16, &'static str)> {
        vec![
            (Error::Unauthorized, 401, "unauthorized"),
            (
                Error::InvalidTimeFormat {
                    input: "not-a-date".into(),
                },
                400,
                "invalid_time_format",
            ),
            (
                Error::export_failed(std::io::Error::other("remote store exploded")),
                500,
                "export_failed",
            ),
            (
                Error::ArtifactNotFound {
                    name: "app_123.txt".into(),
                },
                404,
                "artifact_not_found",
            ),
            (
                Error::Config {
                    message: "bad value".into(),
                    key: Some("artifacts.dir".into()),
                },
                400,
                "config_error",
            ),
            (
                Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
                500,
                "io_error",
            ),
            (
                Error::ApiServerError("bind failed".into()),
                500,
                "api_server_error",
            ),
        ]
    }

    #[test]
    fn every_variant_maps_to_expected_status_code() {
        for (error, expected_status, expected_code) in all_error_variants() {
            let actual_status = error.status_code();
            assert_eq!(
                actual_status, expected_status,
                "Error variant with error_code={expected_code} returned status {actual_status}, expected {expected_status}"
            );
        }
    }

    #[test]
    fn every_variant_maps_to_expected_error_code() {
        for (error, expected_status, expected_code) in all_error_variants() {
            let actual_code = error.error_code();
            assert_eq!(
                actual_code, expected_code,
                "Error variant with expected status={expected_status} returned error_code={actual_code}, expected {expected_code}"
            );
        }
    }

    #[test]
    fn invalid_time_format_is_400_not_500() {
        let err = Error::InvalidTimeFormat {
            input: "yesterday-ish".into(),
        };
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn artifact_not_found_is_404() {
        let err = Error::ArtifactNotFound {
            name: "nope.txt".into(),
        };
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn export_failed_is_500_server_error() {
        let err = Error::export_failed(std::io::Error::other("disk full"));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn export_failed_preserves_underlying_cause() {
        let err = Error::export_failed(std::io::Error::other("connection reset"));
        assert!(err.to_string().contains("connection reset"));

        let source = std::error::Error::source(&err).expect("should have a source");
        assert!(source.to_string().contains("connection reset"));
    }

    #[test]
    fn api_error_from_invalid_time_format_has_input() {
        let err = Error::InvalidTimeFormat {
            input: "not-a-date".into(),
        };
        let api: ApiError = err.into();

        assert_eq!(api.error.code, "invalid_time_format");
        assert!(api.error.message.contains("not-a-date"));
        let details = api.error.details.expect("should have details");
        assert_eq!(details["input"], "not-a-date");
    }

    #[test]
    fn api_error_from_artifact_not_found_has_name() {
        let err = Error::ArtifactNotFound {
            name: "app_20240101_000000_deadbeef.txt".into(),
        };
        let api: ApiError = err.into();

        assert_eq!(api.error.code, "artifact_not_found");
        let details = api.error.details.expect("should have details");
        assert_eq!(details["name"], "app_20240101_000000_deadbeef.txt");
    }

    #[test]
    fn api_error_from_unauthorized_has_no_details() {
        let api: ApiError = Error::Unauthorized.into();

        assert_eq!(api.error.code, "unauthorized");
        assert!(
            api.error.details.is_none(),
            "Unauthorized should not have structured details"
        );
    }

    #[test]
    fn api_error_from_export_failed_has_no_details() {
        let api: ApiError = Error::export_failed(std::io::Error::other("boom")).into();

        assert_eq!(api.error.code, "export_failed");
        assert!(api.error.details.is_none());
    }

    #[test]
    fn api_error_message_matches_error_display() {
        let err = Error::InvalidTimeFormat {
            input: "banana".into(),
        };
        let display_msg = err.to_string();
        let api: ApiError = err.into();

        assert_eq!(
            api.error.message, display_msg,
            "ApiError message should match the Error's Display output"
        );
    }

    #[test]
    fn api_error_without_details_omits_details_in_json() {
        let api = ApiError::new("test_code", "test message");

        let json_str = serde_json::to_string(&api).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json_str).unwrap();

        assert_eq!(parsed["error"]["code"], "test_code");
        assert_eq!(parsed["error"]["message"], "test message");
        assert!(
            parsed["error"].get("details").is_none(),
            "details field should be omitted from JSON when None"
        );
    }

    #[test]
    fn api_error_round_trips_through_json() {
        let original = ApiError::with_details(
            "artifact_not_found",
            "artifact not found: x.txt",
            serde_json::json!({"name": "x.txt"}),
        );

        let json_str = serde_json::to_string(&original).unwrap();
        let deserialized: ApiError = serde_json::from_str(&json_str).unwrap();

        assert_eq!(deserialized.error.code, original.error.code);
        assert_eq!(deserialized.error.message, original.error.message);
        assert_eq!(deserialized.error.details, original.error.details);
    }

    #[test]
    fn api_error_unauthorized_factory() {
        let api = ApiError::unauthorized("invalid token");

        assert_eq!(api.error.code, "unauthorized");
        assert_eq!(api.error.message, "invalid token");
        assert!(api.error.details.is_none());
    }
}
