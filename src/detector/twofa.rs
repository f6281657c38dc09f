// src/detector/twofa.rs
use super::Detector;
use crate::domain::{normalize_domain, KnownDomainSet};
use crate::reference::{TwoFaDatabase, TwoFaSite};
use crate::types::{Credential, Finding, FindingKind, Severity};
use anyhow::Result;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

const MESSAGE: &str = "Website supports 2FA but may not be enabled";

/// Flags logins on sites that offer two-factor authentication.
pub struct TwoFaDetector {
    supported: HashMap<String, TwoFaSite>,
    known: Arc<KnownDomainSet>,
}

impl TwoFaDetector {
    #[must_use]
    pub fn new(db: &TwoFaDatabase, known: Arc<KnownDomainSet>) -> Self {
        let supported = db
            .sites
            .iter()
            .filter(|site| site.supports_2fa)
            .map(|site| (normalize_domain(&site.domain), site.clone()))
            .collect();

        Self { supported, known }
    }
}

impl Detector for TwoFaDetector {
    fn name(&self) -> &'static str {
        "twofa"
    }

    fn detect(&self, credentials: &[Credential]) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for cred in credentials {
            // Already protected by a one-time code.
            if !cred.totp.is_empty() {
                continue;
            }

            let zone = self.known.resolve(&cred.url);
            if zone.is_empty() {
                continue;
            }

            let Some(site) = self.supported.get(&zone) else {
                continue;
            };

            let mut metadata = BTreeMap::new();
            metadata.insert("supported_methods".to_string(), json!(site.methods));
            metadata.insert(
                "documentation_url".to_string(),
                json!(site.documentation_url),
            );

            findings.push(Finding {
                credential_id: cred.id.clone(),
                title: cred.title.clone(),
                kind: FindingKind::Missing2fa,
                severity: Severity::Medium,
                message: MESSAGE.to_string(),
                domain: zone,
                original_url: cred.url.clone(),
                metadata,
            });
        }

        Ok(findings)
    }
}
