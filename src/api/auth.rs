//! Authentication middleware for the REST API
//!
//! Export submissions are guarded by a bearer token carried in the
//! Authorization header. When no token is configured, all requests pass
//! through. The download endpoint is deliberately left outside this layer
//! so links stay clickable without credentials.

use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Middleware that checks for a valid `Authorization: Bearer <token>` header
///
/// Returns 401 Unauthorized when the configured token is missing from the
/// request or does not match; otherwise forwards to the next handler.
pub async fn require_bearer_token(
    State(expected_token): State<Option<String>>,
    request: Request,
    next: Next,
) -> Response {
    // No token configured: auth is disabled
    let Some(expected) = expected_token else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    // Constant-time comparison to prevent timing side-channel attacks
    match provided {
        Some(token) if constant_time_eq(token.as_bytes(), expected.as_bytes()) => {
            next.run(request).await
        }
        Some(_) => unauthorized_response("Invalid bearer token"),
        None => unauthorized_response("Missing or malformed Authorization header"),
    }
}

/// Constant-time byte comparison. Always compares all bytes regardless of
/// where the first mismatch occurs.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Helper to create a 401 Unauthorized response with a JSON error body
fn unauthorized_response(message: &str) -> Response {
    let body = Json(json!({
        "error": {
            "code": "unauthorized",
            "message": message
        }
    }));

    (StatusCode::UNAUTHORIZED, body).into_response()
}
