//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Analytics API",
        version = "0.1.0",
        description = "Ingests analytics events and reports per-user lifetime value",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    nest(
        (path = "/v1", api = domain_events::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_paths_are_versioned() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/v1/events"));
        assert!(doc.paths.paths.contains_key("/v1/ltv"));
    }
}
