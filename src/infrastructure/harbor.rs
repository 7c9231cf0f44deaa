//! Harbor registry backend
//!
//! Talks to Harbor's `additions/vulnerabilities` endpoint and translates
//! the result into the CSO schema. One `HarborClient` (and its reqwest
//! connection pool) is built at startup and shared across requests.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use metrics::histogram;
use reqwest::Client;
use tracing::{info, warn};

use crate::application::aggregate::aggregate;
use crate::application::errors::AdapterError;
use crate::domain::harbor::ScanReport;
use crate::domain::secscan::{AppCapabilities, Capabilities, Response, RestApi, ViewImage};
use crate::metrics::REGISTRY_REQUEST_DURATION_SECONDS;

use super::{RegistryAdapter, SecurityOptions};

/// Report representation requested from Harbor. Servers that predate the
/// v1.1 report format ignore the header and answer with their default.
const ACCEPT_VULNERABILITIES: &str =
    "application/vnd.security.vulnerability.report; version=1.1";

const USER_AGENT: &str = concat!("cso-adapter/", env!("CARGO_PKG_VERSION"));

/// Low-level HTTP client for Harbor's vulnerability addition.
pub struct HarborClient {
    client: Client,
}

impl HarborClient {
    /// Create a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch the vulnerability report for a single artifact.
    ///
    /// `repository` must already be percent-encoded by the caller. Non-2xx
    /// answers surface as [`AdapterError::Upstream`] without the body ever
    /// being parsed.
    pub async fn vulnerability_report(
        &self,
        base: &str,
        namespace: &str,
        repository: &str,
        reference: &str,
    ) -> Result<ScanReport, AdapterError> {
        let target = format!(
            "{base}/api/v2.0/projects/{namespace}/repositories/{repository}/artifacts/{reference}/additions/vulnerabilities"
        );

        let start = Instant::now();
        let response = self
            .client
            .get(&target)
            .header("X-Accept-Vulnerabilities", ACCEPT_VULNERABILITIES)
            .send()
            .await?;

        let elapsed = start.elapsed();
        histogram!(REGISTRY_REQUEST_DURATION_SECONDS).record(elapsed.as_secs_f64());

        let status = response.status();
        info!(
            url = %target,
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            "registry responded"
        );

        if !status.is_success() {
            warn!(status = status.as_u16(), "registry request failed");
            return Err(AdapterError::Upstream {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Harbor implementation of the registry adapter.
pub struct HarborAdapter {
    client: HarborClient,
}

impl HarborAdapter {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: HarborClient::new(timeout)?,
        })
    }
}

#[async_trait]
impl RegistryAdapter for HarborAdapter {
    fn kind(&self) -> &'static str {
        "harbor"
    }

    fn capabilities(&self, scheme: &str, host: &str) -> AppCapabilities {
        let app_url = format!("{scheme}://{host}");
        AppCapabilities {
            app_name: default_app_name(host),
            capabilities: Capabilities {
                view_image: ViewImage {
                    url_template: format!("{app_url}/{{namespace}}/{{reponame}}:{{tag}}"),
                },
                manifest_security: RestApi {
                    rest_api_template: format!(
                        "{app_url}/cso/v1/repository/{{namespace}}/{{reponame}}/manifest/{{digest}}/security"
                    ),
                },
                image_security: Some(RestApi {
                    rest_api_template: format!(
                        "{app_url}/cso/v1/repository/{{namespace}}/{{reponame}}/image/{{imageid}}/security"
                    ),
                }),
            },
        }
    }

    async fn manifest_security(
        &self,
        path: &str,
        digest: &str,
        opts: SecurityOptions,
    ) -> Result<Response, AdapterError> {
        let (namespace, repository) = split_repository_path(path);
        // Harbor expects nested repository names percent-encoded, and the
        // final segment may carry colons or other reserved characters.
        let repository = urlencoding::encode(repository);

        let report = self
            .client
            .vulnerability_report(&opts.base_uri, namespace, &repository, digest)
            .await?;

        Ok(aggregate(&report, opts.features, opts.vulnerabilities))
    }
}

/// Split a registry-qualified path on its last slash into
/// (namespace, repository). `registry.gitlab.com/av1o/alpine` becomes
/// `("registry.gitlab.com/av1o", "alpine")`.
fn split_repository_path(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}

/// Reverse the DNS labels of a host, dropping any port.
/// `harbor.dcas.dev` becomes `dev.dcas.harbor`.
fn default_app_name(host: &str) -> String {
    let hostname = host.rsplit_once(':').map_or(host, |(h, _)| h);
    let mut labels: Vec<&str> = hostname.split('.').collect();
    labels.reverse();
    labels.join(".")
}
