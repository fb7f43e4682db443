//! Structural round-trip check: element counts per qualified tag at every
//! depth, root included. Attribute order, prefixes and namespace declaration
//! placement do not matter.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::error::RoundTripMismatch;
use crate::xml::{Element, QName};

/// Occurrences of one qualified tag in both documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub original: usize,
    pub exported: usize,
}

impl TagCount {
    pub fn delta(&self) -> i64 {
        self.exported as i64 - self.original as i64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundTripReport {
    /// Keyed by `{namespace}local`.
    pub counts: BTreeMap<String, TagCount>,
    pub is_lossless: bool,
}

impl RoundTripReport {
    /// Tags whose counts differ, in tag order.
    pub fn mismatches(&self) -> impl Iterator<Item = (&str, &TagCount)> {
        self.counts
            .iter()
            .filter(|(_, count)| count.original != count.exported)
            .map(|(tag, count)| (tag.as_str(), count))
    }

    pub fn summary(&self) -> String {
        if self.is_lossless {
            let total: usize = self.counts.values().map(|c| c.original).sum();
            return format!("lossless ({} elements, {} tags)", total, self.counts.len());
        }
        let mut out = String::new();
        for (tag, count) in self.mismatches() {
            if !out.is_empty() {
                out.push_str(", ");
            }
            let _ = write!(out, "{} {}->{}", tag, count.original, count.exported);
        }
        out
    }
}

/// Compares two trees with qualified tags taken as-is.
pub fn diff(original: &Element, exported: &Element) -> RoundTripReport {
    diff_by(original, exported, QName::clone)
}

/// Compares two trees after mapping every tag through `key`.
pub fn diff_by(
    original: &Element,
    exported: &Element,
    key: impl Fn(&QName) -> QName,
) -> RoundTripReport {
    let mut counts: BTreeMap<String, TagCount> = BTreeMap::new();
    for element in original.descendants() {
        counts.entry(key(&element.name).to_string()).or_default().original += 1;
    }
    for element in exported.descendants() {
        counts.entry(key(&element.name).to_string()).or_default().exported += 1;
    }
    let is_lossless = counts.values().all(|c| c.original == c.exported);
    RoundTripReport {
        counts,
        is_lossless,
    }
}

/// Like [`diff`], but any delta is an error.
pub fn verify(original: &Element, exported: &Element) -> Result<RoundTripReport, RoundTripMismatch> {
    let report = diff(original, exported);
    if report.is_lossless {
        Ok(report)
    } else {
        Err(RoundTripMismatch { report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://www.ech.ch/xmlns/eCH-0010/5";

    fn doc(leaves: &[&str]) -> Element {
        let mut root = Element::new(QName::new(NS, "swissAddressInformation"));
        for leaf in leaves {
            root.children.push(Element::leaf(QName::new(NS, *leaf), "x"));
        }
        root
    }

    #[test]
    fn test_identical_trees_are_lossless() {
        let report = diff(&doc(&["town", "swissZipCode"]), &doc(&["town", "swissZipCode"]));
        assert!(report.is_lossless);
        assert_eq!(report.counts.len(), 3);
        assert_eq!(report.mismatches().count(), 0);
        assert!(report.summary().starts_with("lossless"));
    }

    #[test]
    fn test_dropped_element_is_reported() {
        let report = diff(&doc(&["town", "swissZipCode"]), &doc(&["town"]));
        assert!(!report.is_lossless);
        let key = format!("{{{NS}}}swissZipCode");
        assert_eq!(
            report.counts[&key],
            TagCount {
                original: 1,
                exported: 0
            }
        );
        assert_eq!(report.counts[&key].delta(), -1);
        assert_eq!(report.summary(), format!("{key} 1->0"));
    }

    #[test]
    fn test_namespace_is_part_of_the_tag() {
        let mut exported = doc(&["town"]);
        exported.children[0].name = QName::new("urn:other", "town");
        let report = diff(&doc(&["town"]), &exported);
        assert!(!report.is_lossless);
        assert_eq!(report.mismatches().count(), 2);
    }

    #[test]
    fn test_child_order_does_not_matter() {
        let report = diff(&doc(&["town", "street"]), &doc(&["street", "town"]));
        assert!(report.is_lossless);
    }

    #[test]
    fn test_verify_returns_mismatch() {
        let err = verify(&doc(&["town"]), &doc(&["town", "town"])).unwrap_err();
        assert_eq!(err.report.mismatches().count(), 1);
        assert!(err.to_string().contains("1->2"));
    }

    #[test]
    fn test_diff_by_folds_aliases() {
        let mut exported = doc(&["town"]);
        exported.children[0].name = QName::new("urn:alias", "town");
        let report = diff_by(&doc(&["town"]), &exported, |name| {
            if name.namespace == "urn:alias" {
                QName::new(NS, name.local.clone())
            } else {
                name.clone()
            }
        });
        assert!(report.is_lossless);
    }
}
