//! Harbor vulnerability report schema
//!
//! Mirrors the report served by Harbor's artifact `additions/vulnerabilities`
//! endpoint. Decoding is lenient: every field falls back to its empty value
//! when absent, and unknown fields (scanner metadata and friends) are
//! ignored, since scanner plugins vary in what they emit.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scan results keyed by report MIME type, e.g.
/// `application/vnd.security.vulnerability.report; version=1.1`.
pub type ScanReport = HashMap<String, Report>;

/// A single scanner's report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    /// Time this report was generated.
    pub generated_at: Option<DateTime<Utc>>,
    /// Overall severity across all findings.
    pub severity: String,
    /// One entry per vulnerable package occurrence.
    pub vulnerabilities: Vec<VulnerabilityItem>,
}

/// One vulnerability found in one installed package.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VulnerabilityItem {
    /// Vulnerability identifier, e.g. `CVE-2017-8283`.
    pub id: String,
    /// Package containing the vulnerability, e.g. `dpkg`.
    pub package: String,
    /// Version of the affected package, e.g. `1.17.27`.
    pub version: String,
    /// Version containing the fix, empty if none is available.
    pub fix_version: String,
    pub severity: String,
    pub description: String,
    /// Links to upstream databases describing the vulnerability.
    pub links: Vec<String>,
    /// Digests of the artifacts the vulnerability belongs to.
    pub artifact_digests: Vec<String>,
    pub preferred_cvss: Cvss,
    /// Associated CWE identifiers, e.g. `CWE-465`.
    pub cwe_ids: Vec<String>,
    /// Scanner-specific attributes, carried through untouched.
    pub vendor_attributes: HashMap<String, serde_json::Value>,
}

/// CVSS v3/v2 scores and attack vectors.
///
/// Scores are `Option` because an absent score is not the same as 0.0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Cvss {
    pub score_v3: Option<f64>,
    pub score_v2: Option<f64>,
    pub vector_v3: String,
    pub vector_v2: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_report() {
        let body = r#"{
            "application/vnd.security.vulnerability.report; version=1.1": {
                "generated_at": "2022-03-01T10:28:30.493Z",
                "scanner": {"name": "Trivy", "vendor": "Aqua Security", "version": "v0.24.0"},
                "severity": "High",
                "vulnerabilities": [
                    {
                        "id": "CVE-2017-8283",
                        "package": "dpkg",
                        "version": "1.17.27",
                        "fix_version": "1.18.0",
                        "severity": "High",
                        "description": "dpkg-source in dpkg 1.3.0 ...",
                        "links": ["https://security-tracker.debian.org/tracker/CVE-2017-8283"],
                        "artifact_digests": ["sha256:ee1d00c5250b"],
                        "preferred_cvss": {
                            "score_v3": 7.5,
                            "score_v2": null,
                            "vector_v3": "CVSS:3.0/AV:L/AC:L/PR:L/UI:N/S:U/C:H/I:N/A:N",
                            "vector_v2": ""
                        },
                        "cwe_ids": ["CWE-20"],
                        "vendor_attributes": {"CVSS": {"nvd": {"V3Score": 7.5}}}
                    }
                ]
            }
        }"#;

        let report: ScanReport = serde_json::from_str(body).unwrap();
        assert_eq!(report.len(), 1);
        let scan = &report["application/vnd.security.vulnerability.report; version=1.1"];
        assert_eq!(scan.severity, "High");
        assert!(scan.generated_at.is_some());
        assert_eq!(scan.vulnerabilities.len(), 1);

        let item = &scan.vulnerabilities[0];
        assert_eq!(item.id, "CVE-2017-8283");
        assert_eq!(item.package, "dpkg");
        assert_eq!(item.fix_version, "1.18.0");
        assert_eq!(item.preferred_cvss.score_v3, Some(7.5));
        assert_eq!(item.preferred_cvss.score_v2, None);
        assert_eq!(item.cwe_ids, vec!["CWE-20"]);
    }

    #[test]
    fn decodes_sparse_report() {
        // Harbor omits most fields when a scan produced nothing.
        let body = r#"{"mime": {"severity": "None"}}"#;

        let report: ScanReport = serde_json::from_str(body).unwrap();
        let scan = &report["mime"];
        assert_eq!(scan.severity, "None");
        assert!(scan.generated_at.is_none());
        assert!(scan.vulnerabilities.is_empty());
    }

    #[test]
    fn decodes_item_with_missing_fields() {
        let body = r#"{"id": "CVE-1", "package": "openssl"}"#;

        let item: VulnerabilityItem = serde_json::from_str(body).unwrap();
        assert_eq!(item.id, "CVE-1");
        assert_eq!(item.version, "");
        assert!(item.links.is_empty());
        assert_eq!(item.preferred_cvss.score_v3, None);
    }
}
