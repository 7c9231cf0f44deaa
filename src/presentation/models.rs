//! API request and response models
//!
//! The security and capabilities payloads live in `crate::domain::secscan`;
//! only handler-local shapes belong here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Display flags accepted by the manifest security endpoint.
///
/// Flags are compared against the literal string `"true"`; anything else,
/// `"TRUE"` and `"1"` included, counts as false.
#[derive(Debug, Default, Deserialize)]
pub struct SecurityQuery {
    pub features: Option<String>,
    pub vulnerabilities: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall service health status
    #[schema(example = "healthy")]
    pub status: String,

    /// Service name
    #[schema(example = "cso-adapter")]
    pub service: String,

    /// Running service version
    #[schema(example = "0.2.0")]
    pub version: String,

    /// Health check timestamp
    #[schema(example = "2026-01-15T10:30:00Z")]
    pub timestamp: DateTime<Utc>,
}
