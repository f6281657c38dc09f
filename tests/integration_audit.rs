// tests/integration_audit.rs
//! End-to-end: reference files on disk through detection, clustering and rendering.

use std::fs;
use tempfile::TempDir;
use unpass_core::audit::Auditor;
use unpass_core::cluster::cluster_by_kind;
use unpass_core::config::{Config, ReportFormat};
use unpass_core::reference::{ReferenceData, PASSKEY_FILE, TWOFA_FILE};
use unpass_core::report;
use unpass_core::{Credential, FindingKind};

fn setup_reference() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(TWOFA_FILE),
        r#"{
  "sites": [
    {"domain": "github.com", "supports_2fa": true, "methods": ["totp", "webauthn"]},
    {"domain": "google.com", "supports_2fa": true, "methods": ["totp"]},
    {"domain": "legacy.example", "supports_2fa": false}
  ]
}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join(PASSKEY_FILE),
        r#"[
  {"id": 1, "name": "Google", "domain": "google.com", "approved": true, "passkey_signin": true, "category": "Tech"},
  {"id": 2, "name": "Hidden", "domain": "hidden.example", "approved": true, "passkey_signin": true, "hidden": true},
  {"id": 3, "name": "Bank", "domain": "bank.example", "approved": true, "passkey_mfa": true}
]"#,
    )
    .unwrap();
    dir
}

fn credential(id: &str, title: &str, url: &str) -> Credential {
    Credential {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        ..Credential::default()
    }
}

fn credentials() -> Vec<Credential> {
    let mut with_totp = credential("5", "GitHub Work", "https://github.com/login");
    with_totp.totp = "otpauth://totp/GitHub:work?secret=ABC".to_string();
    let mut with_passkey = credential("6", "Google Work", "https://google.com");
    with_passkey.passkey = "pk-1".to_string();

    vec![
        credential("1", "GitHub", "https://github.com"),
        credential("2", "GitHub Enterprise", "https://api.github.com/v3"),
        credential("3", "GitHub Actions", "github.com/features/actions"),
        credential("4", "Google", "https://accounts.google.com"),
        with_totp,
        with_passkey,
        credential("7", "Evil", "https://evil-github.com"),
        credential("8", "Hidden", "https://hidden.example"),
        credential("9", "Bank", "https://www.bank.example/login"),
        credential("10", "Legacy", "https://legacy.example"),
        credential("11", "No URL", ""),
    ]
}

fn ids(report: &unpass_core::types::AuditReport, kind: FindingKind) -> Vec<String> {
    report
        .findings_of(kind)
        .into_iter()
        .map(|f| f.credential_id)
        .collect()
}

#[test]
fn test_full_audit_pipeline() {
    let dir = setup_reference();
    let config = Config::default();
    let reference = ReferenceData::load(dir.path(), &config.detectors).unwrap();
    let auditor = Auditor::from_reference(&config, &reference).unwrap();
    assert_eq!(auditor.detector_names(), vec!["twofa", "passkey"]);

    let report = auditor.run(&credentials()).unwrap();

    assert_eq!(ids(&report, FindingKind::Missing2fa), vec!["1", "2", "3", "4", "6"]);
    assert_eq!(ids(&report, FindingKind::MissingPasskey), vec!["4", "9"]);
    assert_eq!(report.summary.total_credentials, 11);
    assert_eq!(report.summary.issues_found, 7);
    assert_eq!(report.summary.by_kind[&FindingKind::Missing2fa], 5);

    let twofa = report.findings_of(FindingKind::Missing2fa);
    assert_eq!(twofa[1].domain, "github.com");
    assert_eq!(twofa[1].original_url, "https://api.github.com/v3");
    assert_eq!(twofa[0].metadata["supported_methods"][1], "webauthn");
}

#[test]
fn test_clusters_per_kind() {
    let dir = setup_reference();
    let config = Config::default();
    let reference = ReferenceData::load(dir.path(), &config.detectors).unwrap();
    let report = Auditor::from_reference(&config, &reference)
        .unwrap()
        .run(&credentials())
        .unwrap();

    let grouped = cluster_by_kind(&report.results, &config.clustering);
    assert_eq!(grouped.len(), 2);

    let (kind, twofa) = &grouped[0];
    assert_eq!(*kind, FindingKind::Missing2fa);
    let names: Vec<&str> = twofa.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["GitHub Services", "Google Services"]);
    assert_eq!(twofa[0].len(), 3);

    // Two passkey findings form one trivial cluster.
    let (_, passkey) = &grouped[1];
    assert_eq!(passkey.len(), 1);
    assert_eq!(passkey[0].len(), 2);
}

#[test]
fn test_render_table_and_json() {
    colored::control::set_override(false);
    let dir = setup_reference();
    let config = Config::default();
    let reference = ReferenceData::load(dir.path(), &config.detectors).unwrap();
    let report = Auditor::from_reference(&config, &reference)
        .unwrap()
        .run(&credentials())
        .unwrap();

    let table = report::render(&report, ReportFormat::Table, &config.clustering).unwrap();
    assert!(table.contains("Two-Factor Authentication Issues (5 total):"));
    assert!(table.contains("[GitHub Services] (3 items)"));
    assert!(table.contains("  Google (google.com)"));
    assert!(table.contains("Passkey Authentication Issues (2 total):"));

    let json = report::render(&report, ReportFormat::Json, &config.clustering).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["summary"]["issues_found"], 7);
    assert_eq!(value["results"][0]["type"], "missing_2fa");
    assert!(value["timestamp"].is_string());
}

#[test]
fn test_disabled_detector_needs_no_reference() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(TWOFA_FILE),
        r#"{"sites": [{"domain": "github.com", "supports_2fa": true}]}"#,
    )
    .unwrap();

    let config = Config::from_toml_str("[detectors]\npasskey = false").unwrap();
    let reference = ReferenceData::load(dir.path(), &config.detectors).unwrap();
    let auditor = Auditor::from_reference(&config, &reference).unwrap();
    assert_eq!(auditor.detector_names(), vec!["twofa"]);

    let report = auditor.run(&credentials()).unwrap();
    assert!(report.findings_of(FindingKind::MissingPasskey).is_empty());
}
