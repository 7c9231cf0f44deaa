//! Route definitions and OpenAPI document

use std::time::Duration;

use axum::{Router, response::Json, routing::get};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::config::Config;
use crate::domain::secscan;
use crate::presentation::controllers::{
    self, AppState, app_capabilities, health_check, manifest_security, metrics,
};
use crate::presentation::models::HealthResponse;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        controllers::app_capabilities,
        controllers::manifest_security,
        controllers::health_check,
        controllers::metrics,
    ),
    components(schemas(
        secscan::Response,
        secscan::Data,
        secscan::Layer,
        secscan::Feature,
        secscan::Vulnerability,
        secscan::AppCapabilities,
        secscan::Capabilities,
        secscan::ViewImage,
        secscan::RestApi,
        HealthResponse,
    )),
    tags(
        (name = "capabilities", description = "Capability discovery for CSO clients"),
        (name = "security", description = "Manifest vulnerability queries translated from the registry"),
        (name = "health", description = "Service health and metrics endpoints")
    ),
    info(
        title = "CSO Adapter",
        version = "0.2.0",
        description = "Translation proxy between Container-Security-Operator clients and a Harbor container registry.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json - machine-readable API description
async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create the application router with the standard middleware stack
pub fn create_router(state: AppState, config: &Config) -> Router {
    let mut router = Router::new()
        .route("/.well-known/app-capabilities", get(app_capabilities))
        .route("/cso/v1/repository/{*rest}", get(manifest_security))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics));

    // Expose the OpenAPI document only when configured (avoid leaking docs
    // in production).
    if config.server.enable_docs {
        router = router.route("/api-docs/openapi.json", get(openapi_document));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_seconds,
                ))),
        )
        .with_state(state)
}
