//! Container-Security-Operator response schema
//!
//! The `secscan` shapes the CSO client consumes, plus the
//! `/.well-known/app-capabilities` discovery document. Field casing follows
//! the CSO wire format exactly: PascalCase for features and vulnerabilities,
//! lowercase for the envelope, kebab-case for capability entries.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status reported on every successfully translated response.
pub const STATUS_SCANNED: &str = "scanned";

/// Top-level security response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Response {
    pub status: String,
    pub data: Data,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Data {
    pub layer: Layer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Layer {
    pub features: Vec<Feature>,
}

/// One installed package/version pair and the vulnerabilities affecting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Feature {
    /// Package name.
    pub name: String,
    /// OS namespace, always empty: Harbor reports carry no such notion.
    pub namespace_name: String,
    pub version_format: String,
    /// Package version.
    pub version: String,
    pub vulnerabilities: Vec<Vulnerability>,
    pub added_by: String,
}

/// One vulnerability attached to a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Vulnerability {
    /// Vulnerability identifier, e.g. `CVE-2017-8283`.
    pub name: String,
    pub namespace_name: String,
    pub description: String,
    /// First reference link from the source report, empty if none.
    pub link: String,
    pub severity: String,
    /// Fixing version, empty if no fix is available.
    pub fixed_by: String,
}

/// Discovery document served at `/.well-known/app-capabilities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppCapabilities {
    /// Reverse-DNS application name derived from the serving host,
    /// e.g. `dev.dcas.harbor` for `harbor.dcas.dev`.
    #[serde(rename = "appName")]
    pub app_name: String,
    pub capabilities: Capabilities,
}

/// URL templates the client substitutes itself; the `{namespace}`,
/// `{reponame}`, `{tag}`, `{digest}` and `{imageid}` placeholders are
/// literal text here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Capabilities {
    #[serde(rename = "view-image")]
    pub view_image: ViewImage,
    #[serde(rename = "manifest-security")]
    pub manifest_security: RestApi,
    /// Absent when the backend cannot answer image-id queries.
    #[serde(
        rename = "image-security",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_security: Option<RestApi>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ViewImage {
    #[serde(rename = "url-template")]
    pub url_template: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RestApi {
    #[serde(rename = "rest-api-template")]
    pub rest_api_template: String,
}
