//! Infrastructure Layer - Registry backends
//!
//! Defines the adapter seam between the HTTP surface and a concrete
//! container registry, plus the registration point used to select a
//! backend at startup.
//!
//! - Domain:         wire schemas live in `crate::domain`
//! - Application:    aggregation and error taxonomy live in `crate::application`
//! - Infrastructure: `HarborAdapter` implements the trait below

pub mod harbor;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::errors::AdapterError;
use crate::domain::secscan;

pub use harbor::HarborAdapter;

/// Options for a manifest security query.
#[derive(Debug, Clone)]
pub struct SecurityOptions {
    /// Base URI of the registry to query, scheme included.
    pub base_uri: String,
    /// Include the feature list in the response.
    pub features: bool,
    /// Include per-feature vulnerability lists in the response.
    pub vulnerabilities: bool,
}

/// A registry backend capable of answering CSO queries.
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Short identifier used to select this backend in configuration.
    fn kind(&self) -> &'static str;

    /// Build the capability manifest for the serving scheme and host.
    fn capabilities(&self, scheme: &str, host: &str) -> secscan::AppCapabilities;

    /// Fetch and translate the vulnerability report for one manifest.
    ///
    /// `path` is the registry-qualified `namespace/repository` (two or
    /// more segments); `digest` identifies the manifest.
    async fn manifest_security(
        &self,
        path: &str,
        digest: &str,
        opts: SecurityOptions,
    ) -> Result<secscan::Response, AdapterError>;
}

/// Registry of adapter backends, keyed by their configuration identifier.
pub struct AdapterRegistry {
    adapters: HashMap<&'static str, Arc<dyn RegistryAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// Register a backend under its own kind.
    pub fn register(&mut self, adapter: Arc<dyn RegistryAdapter>) {
        self.adapters.insert(adapter.kind(), adapter);
    }

    /// Look up a backend by kind.
    pub fn get(&self, kind: &str) -> Option<Arc<dyn RegistryAdapter>> {
        self.adapters.get(kind).cloned()
    }

    /// Kinds with a registered backend.
    pub fn registered(&self) -> Vec<&'static str> {
        self.adapters.keys().copied().collect()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
