// src/types.rs
//! Core data structures shared by detection, clustering and reporting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A stored login as exported by a password manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// TOTP secret or `otpauth://` URI, if the login already has one.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub totp: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub passkey: String,
}

/// The kind of upgrade a finding recommends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    #[serde(rename = "missing_2fa")]
    Missing2fa,
    #[serde(rename = "missing_passkey")]
    MissingPasskey,
}

impl FindingKind {
    pub const ALL: [FindingKind; 2] = [FindingKind::Missing2fa, FindingKind::MissingPasskey];

    /// Returns a short label for summaries.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Missing2fa => "Missing 2FA",
            Self::MissingPasskey => "Missing Passkey",
        }
    }

    /// Returns the section heading used in reports.
    #[must_use]
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Missing2fa => "Two-Factor Authentication Issues",
            Self::MissingPasskey => "Passkey Authentication Issues",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

/// One flagged credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub credential_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub severity: Severity,
    pub message: String,
    /// Resolved registrable domain, empty when the URL did not resolve.
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub original_url: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Finding {
    #[must_use]
    pub fn new(credential_id: &str, title: &str, kind: FindingKind, domain: &str) -> Self {
        Self {
            credential_id: credential_id.to_string(),
            title: title.to_string(),
            kind,
            severity: Severity::Medium,
            message: String::new(),
            domain: domain.to_string(),
            original_url: String::new(),
            metadata: BTreeMap::new(),
        }
    }
}

/// A named group of findings for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    pub name: String,
    pub findings: Vec<Finding>,
}

impl Cluster {
    #[must_use]
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub total_credentials: usize,
    pub issues_found: usize,
    pub by_kind: BTreeMap<FindingKind, usize>,
}

/// The complete result of one audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub results: Vec<Finding>,
    pub summary: AuditSummary,
    pub timestamp: DateTime<Utc>,
}

impl AuditReport {
    /// Returns the findings of one kind, in report order.
    #[must_use]
    pub fn findings_of(&self, kind: FindingKind) -> Vec<Finding> {
        self.results
            .iter()
            .filter(|f| f.kind == kind)
            .cloned()
            .collect()
    }
}
