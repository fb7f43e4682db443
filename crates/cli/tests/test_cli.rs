use std::fs;
use std::path::{Path, PathBuf};

use openmun_cli::{Status, diff_files, render_diff_text, roundtrip_file, roundtrip_files};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("ech")
        .join("tests")
        .join("data")
        .join(name)
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const RECEIPT_HEADER: &str = r#"<eCH-0099:receiptHeader>
    <eCH-0058:senderId>sedex://T6-CH-1</eCH-0058:senderId>
    <eCH-0058:messageId>m-1</eCH-0058:messageId>
    <eCH-0058:messageType>statistics</eCH-0058:messageType>
    <eCH-0058:sendingApplication>
      <eCH-0058:manufacturer>BFS</eCH-0058:manufacturer>
      <eCH-0058:product>Validator</eCH-0058:product>
      <eCH-0058:productVersion>3.2</eCH-0058:productVersion>
    </eCH-0058:sendingApplication>
    <eCH-0058:messageDate>2024-01-02T07:05:12</eCH-0058:messageDate>
    <eCH-0058:action>8</eCH-0058:action>
    <eCH-0058:testDeliveryFlag>false</eCH-0058:testDeliveryFlag>
  </eCH-0099:receiptHeader>"#;

fn receipt(extra: &str) -> String {
    format!(
        r#"<eCH-0099:receipt xmlns:eCH-0099="http://www.ech.ch/xmlns/eCH-0099/2"
                  xmlns:eCH-0058="http://www.ech.ch/xmlns/eCH-0058/4" version="2.1">
  {}
  <eCH-0099:eventTime>2024-01-02</eCH-0099:eventTime>{}
</eCH-0099:receipt>"#,
        RECEIPT_HEADER, extra
    )
}

#[test]
fn test_roundtrip_fixture_is_lossless() {
    let catalog = openmun_ech::catalog().unwrap();
    let report = roundtrip_file(catalog, &fixture("ech0020_move_in.xml"));
    assert_eq!(report.status, Status::Lossless, "{:?}", report.error);
    assert_eq!(report.kind, Some("eCH-0020 delivery"));
}

#[test]
fn test_roundtrip_reports_unknown_element() {
    let catalog = openmun_ech::catalog().unwrap();
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "receipt.xml",
        &receipt("\n  <eCH-0099:comment>late</eCH-0099:comment>"),
    );

    let report = roundtrip_file(catalog, &path);
    assert_eq!(report.status, Status::Failed);
    assert!(report.error.unwrap().contains("comment"));
}

#[test]
fn test_roundtrip_reports_malformed_xml() {
    let catalog = openmun_ech::catalog().unwrap();
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.xml", "<eCH-0099:receipt");

    let report = roundtrip_file(catalog, &path);
    assert_eq!(report.status, Status::Failed);
    assert!(report.kind.is_none());
}

#[test]
fn test_fail_fast_stops_at_first_failure() {
    let catalog = openmun_ech::catalog().unwrap();
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.xml", &receipt(""));
    let bad = write(&dir, "bad.xml", "not xml");

    let files = vec![bad.clone(), good.clone()];
    let all = roundtrip_files(catalog, &files, false);
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].status, Status::Lossless);

    let stopped = roundtrip_files(catalog, &files, true);
    assert_eq!(stopped.len(), 1);
}

#[test]
fn test_diff_reports_missing_elements() {
    let catalog = openmun_ech::catalog().unwrap();
    let dir = TempDir::new().unwrap();
    let original = write(&dir, "a.xml", &receipt(""));
    let trimmed = receipt("").replace("<eCH-0099:eventTime>2024-01-02</eCH-0099:eventTime>", "");
    let exported = write(&dir, "b.xml", &trimmed);

    let report = diff_files(catalog, &original, &exported).unwrap();
    assert!(!report.is_lossless);
    let text = render_diff_text(&report);
    assert_eq!(text, "-1 {http://www.ech.ch/xmlns/eCH-0099/2}eventTime (1 -> 0)\n");
}

#[test]
fn test_diff_identical_documents() {
    let catalog = openmun_ech::catalog().unwrap();
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.xml", &receipt(""));
    let b = write(&dir, "b.xml", &receipt(""));
    let report = diff_files(catalog, &a, &b).unwrap();
    assert!(report.is_lossless);
    assert!(render_diff_text(&report).starts_with("identical"));
}
