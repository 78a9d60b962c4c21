//! OpenAPI documentation and schema generation
//!
//! This module defines the OpenAPI specification for the logdrop REST API
//! using utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the logdrop REST API
///
/// The spec can be accessed via:
/// - `/api/v1/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation (if enabled)
#[derive(OpenApi)]
#[openapi(
    info(
        title = "logdrop REST API",
        version = "0.1.0",
        description = "Export time-bounded log records to a self-expiring download artifact",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        // Exports
        crate::api::routes::submit_export,

        // Artifacts
        crate::api::routes::fetch_artifact,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        crate::types::ExportRequest,
        crate::types::ExportResponse,
        crate::error::ApiError,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "exports", description = "Export submission - Pull a time range of logs into a temporary artifact"),
        (name = "artifacts", description = "Artifact download - Fetch an exported file until it expires"),
        (name = "system", description = "System endpoints - Health checks and OpenAPI spec"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Security addon to add the bearer-token authentication scheme to the
/// OpenAPI spec
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = &mut openapi.components {
            components.add_security_scheme(
                "bearer_token",
                utoipa::openapi::security::SecurityScheme::Http(utoipa::openapi::security::Http::new(
                    utoipa::openapi::security::HttpAuthScheme::Bearer,
                )),
            );
        }
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_doc_generates_without_panicking() {
        let _spec = ApiDoc::openapi();
    }

    #[test]
    fn openapi_spec_has_paths() {
        let spec = ApiDoc::openapi();

        assert!(
            !spec.paths.paths.is_empty(),
            "OpenAPI spec should have paths defined"
        );
        assert!(
            spec.paths.paths.contains_key("/api/v1/exports"),
            "should document the export submission path"
        );
        assert!(
            spec.paths.paths.contains_key("/api/v1/artifacts/{name}"),
            "should document the artifact download path"
        );
    }

    #[test]
    fn openapi_spec_has_components() {
        let spec = ApiDoc::openapi();

        let components = spec.components.expect("spec should have components");
        assert!(
            !components.schemas.is_empty(),
            "OpenAPI spec should have schemas defined"
        );
    }

    #[test]
    fn openapi_spec_has_tags() {
        let spec = ApiDoc::openapi();

        let tags = spec.tags.expect("spec should have tags");
        let tag_names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert!(tag_names.contains(&"exports"), "Should have 'exports' tag");
        assert!(
            tag_names.contains(&"artifacts"),
            "Should have 'artifacts' tag"
        );
        assert!(tag_names.contains(&"system"), "Should have 'system' tag");
    }

    #[test]
    fn openapi_spec_has_bearer_security_scheme() {
        let spec = ApiDoc::openapi();

        let components = spec.components.expect("spec should have components");
        assert!(
            components.security_schemes.contains_key("bearer_token"),
            "Should have 'bearer_token' security scheme defined"
        );
    }

    #[test]
    fn openapi_json_serialization_round_trips() {
        let spec = ApiDoc::openapi();

        let json = serde_json::to_string(&spec).expect("Should serialize to JSON");
        let _value: serde_json::Value =
            serde_json::from_str(&json).expect("Generated JSON should be valid");
    }
}
