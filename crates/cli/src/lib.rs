//! Round-trip verification of eCH documents.
//!
//! Each document is parsed into its typed model, written back out and
//! compared with the original tag by tag. Any difference in the count of a
//! qualified tag fails the document.

pub mod config;

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use openmun_ech::Document;
use openmun_serde::{Catalog, Element, RoundTripReport};
use serde::Serialize;
use tracing::{debug, info, warn};

pub use config::{Command, Config, OutputFormat};

/// Initializes the tracing subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "openmun_cli={level},openmun_ech={level},openmun_serde={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Lossless,
    Lossy,
    Failed,
}

/// Outcome for one document.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<RoundTripReport>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.status == Status::Lossless
    }

    fn failed(path: &Path, kind: Option<&'static str>, error: impl ToString) -> Self {
        Self {
            path: path.display().to_string(),
            status: Status::Failed,
            kind,
            error: Some(error.to_string()),
            report: None,
        }
    }
}

fn read_tree(path: &Path) -> anyhow::Result<Element> {
    let bytes = fs::read(path)?;
    Ok(Element::parse_slice(&bytes)?)
}

/// Parses, re-serializes and verifies one document.
pub fn roundtrip_file(catalog: &Catalog, path: &Path) -> FileReport {
    let original = match read_tree(path) {
        Ok(tree) => tree,
        Err(e) => return FileReport::failed(path, None, e),
    };
    let document = match Document::from_element(catalog, &original) {
        Ok(document) => document,
        Err(e) => return FileReport::failed(path, None, e),
    };
    let kind = Some(document.kind());
    let exported = match document
        .to_xml_string(catalog)
        .map_err(anyhow::Error::from)
        .and_then(|xml| Element::parse(&xml).map_err(anyhow::Error::from))
    {
        Ok(tree) => tree,
        Err(e) => return FileReport::failed(path, kind, e),
    };

    let report = catalog.verify(&original, &exported);
    let status = if report.is_lossless {
        Status::Lossless
    } else {
        Status::Lossy
    };
    debug!(path = %path.display(), kind = ?kind, summary = %report.summary(), "Verified");
    FileReport {
        path: path.display().to_string(),
        status,
        kind,
        error: None,
        report: Some(report),
    }
}

/// Round-trips every file in order. With `fail_fast`, stops after the
/// first file that is not lossless.
pub fn roundtrip_files<P: AsRef<Path>>(catalog: &Catalog, files: &[P], fail_fast: bool) -> Vec<FileReport> {
    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        let report = roundtrip_file(catalog, path.as_ref());
        let ok = report.is_ok();
        if !ok {
            warn!(
                path = %report.path,
                status = ?report.status,
                error = report.error.as_deref().unwrap_or_default(),
                "Round trip failed"
            );
        }
        reports.push(report);
        if !ok && fail_fast {
            break;
        }
    }
    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    info!(checked = reports.len(), failed, "Round trip finished");
    reports
}

/// Compares two arbitrary documents. Alias namespaces are folded.
pub fn diff_files(catalog: &Catalog, original: &Path, exported: &Path) -> anyhow::Result<RoundTripReport> {
    let original = read_tree(original)?;
    let exported = read_tree(exported)?;
    Ok(catalog.verify(&original, &exported))
}

pub fn render_text(reports: &[FileReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let status = match report.status {
            Status::Lossless => "OK  ",
            Status::Lossy => "DIFF",
            Status::Failed => "FAIL",
        };
        let _ = write!(out, "{} {}", status, report.path);
        if let Some(kind) = report.kind {
            let _ = write!(out, " ({})", kind);
        }
        if let Some(error) = &report.error {
            let _ = write!(out, ": {}", error);
        } else if let Some(r) = &report.report {
            let _ = write!(out, ": {}", r.summary());
        }
        out.push('\n');
    }
    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    let _ = writeln!(out, "{} checked, {} failed", reports.len(), failed);
    out
}

pub fn render_diff_text(report: &RoundTripReport) -> String {
    if report.is_lossless {
        return format!("identical: {}\n", report.summary());
    }
    let mut out = String::new();
    for (tag, count) in report.mismatches() {
        let _ = writeln!(out, "{:+} {} ({} -> {})", count.delta(), tag, count.original, count.exported);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_summarises_failures() {
        let reports = vec![
            FileReport {
                path: "a.xml".to_string(),
                status: Status::Lossless,
                kind: Some("eCH-0099 receipt"),
                error: None,
                report: None,
            },
            FileReport::failed(Path::new("b.xml"), None, "malformed XML: eof"),
        ];
        let text = render_text(&reports);
        assert!(text.contains("OK   a.xml (eCH-0099 receipt)"));
        assert!(text.contains("FAIL b.xml: malformed XML: eof"));
        assert!(text.ends_with("2 checked, 1 failed\n"));
    }

    #[test]
    fn test_file_report_json_omits_empty_fields() {
        let report = FileReport::failed(Path::new("b.xml"), None, "boom");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "failed");
        assert!(json.get("report").is_none());
        assert!(json.get("kind").is_none());
    }
}
