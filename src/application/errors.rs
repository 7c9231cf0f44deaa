//! Error taxonomy for the translation path
//!
//! Routing mismatches never reach this module; the router answers 404
//! directly. Everything past routing maps onto `AdapterError`, which knows
//! the HTTP status it should surface as. Status codes are plain `u16` so
//! this layer stays free of HTTP framework types.

use thiserror::Error;

/// Failures while fetching or decoding an upstream report.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Network-level failure reaching the registry (DNS, connect, timeout,
    /// interrupted body read).
    #[error("failed to contact registry: {0}")]
    Transport(#[from] reqwest::Error),

    /// The registry answered with a non-2xx status. The status is surfaced
    /// to the caller verbatim; the body is never parsed.
    #[error("registry request failed: {status} {status_text}")]
    Upstream { status: u16, status_text: String },

    /// The registry answered 2xx but the body did not decode as a report.
    #[error("failed to decode vulnerability report: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AdapterError {
    /// HTTP status this error surfaces as.
    pub fn status(&self) -> u16 {
        match self {
            Self::Upstream { status, .. } => *status,
            Self::Transport(_) | Self::Decode(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_surfaces_registry_status() {
        let err = AdapterError::Upstream {
            status: 404,
            status_text: "Not Found".into(),
        };
        assert_eq!(err.status(), 404);
        assert_eq!(err.to_string(), "registry request failed: 404 Not Found");
    }

    #[test]
    fn decode_error_is_internal() {
        let json_err = serde_json::from_str::<crate::domain::harbor::ScanReport>("not json")
            .unwrap_err();
        let err = AdapterError::from(json_err);
        assert_eq!(err.status(), 500);
        assert!(err.to_string().starts_with("failed to decode vulnerability report"));
    }
}
