//! Request handlers for the adapter API
//!
//! The manifest security route is a wildcard plus a compiled-once pattern
//! match rather than a parameterized route: the repository portion of the
//! path has a variable number of segments, and the original, undecoded
//! path is what gets matched.

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::Json,
};
use chrono::Utc;
use metrics::counter;
use metrics_exporter_prometheus::PrometheusHandle;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{error, info};

use crate::domain::secscan;
use crate::infrastructure::{RegistryAdapter, SecurityOptions};
use crate::metrics::{LABEL_OUTCOME, MANIFEST_REQUESTS_TOTAL};
use crate::presentation::models::{HealthResponse, SecurityQuery};

/// Paths that qualify as a manifest security query: two or more repository
/// segments, then a digest, e.g.
/// `/cso/v1/repository/library/nginx/manifest/sha256:abc/security`.
static MANIFEST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/cso/v1/repository/([^/]+/){2,}manifest/([^/]+)/security$").unwrap()
});

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Selected registry backend.
    pub adapter: Arc<dyn RegistryAdapter>,
    /// Fixed upstream base URI; derived from the request host when unset.
    pub registry_url: Option<String>,
    /// Renders the Prometheus exposition for `/metrics`.
    pub metrics: PrometheusHandle,
}

/// GET /.well-known/app-capabilities - capability discovery document
#[utoipa::path(
    get,
    path = "/.well-known/app-capabilities",
    responses(
        (status = 200, description = "Capability manifest for the serving host", body = secscan::AppCapabilities)
    ),
    tag = "capabilities"
)]
pub async fn app_capabilities(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<secscan::AppCapabilities> {
    let scheme = forwarded_proto(&headers).unwrap_or("https");
    let host = host_header(&headers);
    Json(state.adapter.capabilities(scheme, host))
}

/// GET /cso/v1/repository/{...}/manifest/{digest}/security - translated report
#[utoipa::path(
    get,
    path = "/cso/v1/repository/{repository}/manifest/{digest}/security",
    params(
        ("repository" = String, Path, description = "Registry-qualified namespace/repository, two or more segments"),
        ("digest" = String, Path, description = "Manifest digest"),
        ("features" = Option<String>, Query, description = "Include the feature list when equal to \"true\""),
        ("vulnerabilities" = Option<String>, Query, description = "Include per-feature vulnerabilities when equal to \"true\"")
    ),
    responses(
        (status = 200, description = "Translated vulnerability report", body = secscan::Response),
        (status = 404, description = "Path is not a manifest security query"),
        (status = 500, description = "Registry unreachable or returned an invalid report")
    ),
    tag = "security"
)]
pub async fn manifest_security(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<SecurityQuery>,
    headers: HeaderMap,
) -> Result<Json<secscan::Response>, (StatusCode, String)> {
    let Some((repository, digest)) = parse_manifest_path(uri.path()) else {
        counter!(MANIFEST_REQUESTS_TOTAL, LABEL_OUTCOME => "no_match").increment(1);
        return Err((StatusCode::NOT_FOUND, "not found".to_string()));
    };

    let features = query.features.as_deref() == Some("true");
    let vulnerabilities = query.vulnerabilities.as_deref() == Some("true");

    let base_uri = state
        .registry_url
        .clone()
        .unwrap_or_else(|| format!("https://{}", host_header(&headers)));

    info!(
        repository,
        digest, features, vulnerabilities, "fetching manifest information"
    );

    let opts = SecurityOptions {
        base_uri,
        features,
        vulnerabilities,
    };
    match state.adapter.manifest_security(repository, digest, opts).await {
        Ok(response) => {
            counter!(MANIFEST_REQUESTS_TOTAL, LABEL_OUTCOME => "success").increment(1);
            Ok(Json(response))
        }
        Err(e) => {
            counter!(MANIFEST_REQUESTS_TOTAL, LABEL_OUTCOME => "error").increment(1);
            error!(error = %e, repository, digest, "manifest security request failed");
            let status =
                StatusCode::from_u16(e.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Err((status, e.to_string()))
        }
    }
}

/// GET /health - service liveness
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// GET /metrics - Prometheus exposition
#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Prometheus text exposition", body = String)
    ),
    tag = "health"
)]
pub async fn metrics(State(state): State<AppState>) -> String {
    state.metrics.render()
}

/// Recognize a manifest security path, yielding the registry-qualified
/// repository path and the digest.
///
/// The repository path is everything between the fixed prefix and the
/// first `/manifest/` marker; the digest is the second capture of the
/// pattern.
fn parse_manifest_path(path: &str) -> Option<(&str, &str)> {
    let captures = MANIFEST_PATTERN.captures(path)?;
    let digest = captures.get(2)?.as_str();
    let repository = path
        .strip_prefix("/cso/v1/repository/")?
        .split_once("/manifest/")?
        .0;
    Some((repository, digest))
}

fn host_header(headers: &HeaderMap) -> &str {
    headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn forwarded_proto(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_segment_path_matches() {
        let parsed =
            parse_manifest_path("/cso/v1/repository/bitnami/postgresql/manifest/foobar/security");
        assert_eq!(parsed, Some(("bitnami/postgresql", "foobar")));
    }

    #[test]
    fn registry_qualified_path_matches() {
        let parsed = parse_manifest_path(
            "/cso/v1/repository/registry.gitlab.com/av1o/base-images/alpine/manifest/sha256:7edb%2Babc/security",
        );
        assert_eq!(
            parsed,
            Some(("registry.gitlab.com/av1o/base-images/alpine", "sha256:7edb%2Babc"))
        );
    }

    #[test]
    fn image_path_does_not_match() {
        assert_eq!(
            parse_manifest_path("/cso/v1/repository/bitnami/postgresql/image/foobar/security"),
            None
        );
    }

    #[test]
    fn single_segment_path_does_not_match() {
        assert_eq!(
            parse_manifest_path("/cso/v1/repository/postgresql/manifest/foobar/security"),
            None
        );
    }

    #[test]
    fn perturbed_paths_do_not_match() {
        assert_eq!(
            parse_manifest_path("/cso/v2/repository/bitnami/postgresql/manifest/foobar/security"),
            None
        );
        assert_eq!(
            parse_manifest_path("/cso/v1/repository/bitnami/postgresql/manifest/foobar"),
            None
        );
        assert_eq!(
            parse_manifest_path(
                "/cso/v1/repository/bitnami/postgresql/manifest/foobar/security/extra"
            ),
            None
        );
        assert_eq!(
            parse_manifest_path("/cso/v1/repository/bitnami/postgresql/manifest//security"),
            None
        );
    }

    #[test]
    fn repeated_manifest_marker_splits_at_first() {
        // The repository path stops at the first marker while the digest
        // comes from the trailing match.
        let parsed = parse_manifest_path(
            "/cso/v1/repository/a/b/manifest/x/manifest/y/security",
        );
        assert_eq!(parsed, Some(("a/b", "y")));
    }
}
