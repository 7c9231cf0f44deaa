//! Harbor report to CSO response aggregation
//!
//! Pure translation: vulnerabilities from every scanner report are grouped
//! by installed package/version pair, then shaped into the CSO feature
//! list. The grouping key is a proper struct rather than the historical
//! `"name:version"` string, so package names containing colons survive
//! intact.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::harbor::ScanReport;
use crate::domain::secscan::{self, Data, Feature, Layer, Vulnerability};

/// Grouping key: one feature per installed package/version pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PackageKey {
    name: String,
    version: String,
}

/// Translate a Harbor scan report into a CSO security response.
///
/// `show_features == false` suppresses the feature list entirely;
/// `show_features && !show_vulnerabilities` keeps one feature per
/// package/version pair but empties each vulnerability list. Feature order
/// follows map iteration and is unspecified.
pub fn aggregate(
    report: &ScanReport,
    show_features: bool,
    show_vulnerabilities: bool,
) -> secscan::Response {
    let mut packages: HashMap<PackageKey, Vec<Vulnerability>> = HashMap::new();
    for (mime, scan) in report {
        debug!(report = %mime, findings = scan.vulnerabilities.len(), "reading report");
        for item in &scan.vulnerabilities {
            let key = PackageKey {
                name: item.package.clone(),
                version: item.version.clone(),
            };
            packages.entry(key).or_default().push(Vulnerability {
                name: item.id.clone(),
                namespace_name: String::new(),
                description: item.description.clone(),
                link: first_link(&item.links).to_string(),
                severity: item.severity.clone(),
                fixed_by: item.fix_version.clone(),
            });
        }
    }

    let mut features = Vec::new();
    if show_features {
        for (key, vulnerabilities) in packages {
            features.push(Feature {
                name: key.name,
                namespace_name: String::new(),
                version_format: String::new(),
                version: key.version,
                vulnerabilities: if show_vulnerabilities {
                    vulnerabilities
                } else {
                    Vec::new()
                },
                added_by: String::new(),
            });
        }
    }

    secscan::Response {
        status: secscan::STATUS_SCANNED.to_string(),
        data: Data {
            layer: Layer { features },
        },
    }
}

/// First element of a link list, or the empty string.
pub fn first_link(links: &[String]) -> &str {
    links.first().map(String::as_str).unwrap_or_default()
}
