//! Metric names and descriptions
//!
//! Central definition of every Prometheus metric the adapter emits.
//! Emitting modules call `metrics::counter!()` / `metrics::histogram!()`
//! with these constants.

use metrics::{describe_counter, describe_histogram};

/// Outcome label key (`success`, `error`, `no_match`).
pub const LABEL_OUTCOME: &str = "outcome";

/// Manifest security requests handled, by outcome (counter).
pub const MANIFEST_REQUESTS_TOTAL: &str = "cso_manifest_requests_total";

/// Latency of upstream registry calls in seconds (histogram).
pub const REGISTRY_REQUEST_DURATION_SECONDS: &str = "cso_registry_request_duration_seconds";

/// Register descriptions for all metrics. Call once after the recorder
/// is installed.
pub fn describe_all() {
    describe_counter!(
        MANIFEST_REQUESTS_TOTAL,
        "Manifest security requests handled, labeled by outcome"
    );
    describe_histogram!(
        REGISTRY_REQUEST_DURATION_SECONDS,
        "Latency of upstream registry calls in seconds"
    );
}
