// src/detector/passkey.rs
use super::Detector;
use crate::domain::{normalize_domain, KnownDomainSet};
use crate::reference::PasskeySite;
use crate::types::{Credential, Finding, FindingKind, Severity};
use anyhow::Result;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

const MESSAGE: &str = "Website supports Passkey but traditional password is still used";

/// Flags logins on sites that accept passkeys.
pub struct PasskeyDetector {
    supported: HashMap<String, PasskeySite>,
    known: Arc<KnownDomainSet>,
}

impl PasskeyDetector {
    #[must_use]
    pub fn new(sites: &[PasskeySite], known: Arc<KnownDomainSet>) -> Self {
        let supported = sites
            .iter()
            .filter(|site| site.supports_passkey())
            .map(|site| (normalize_domain(&site.domain), site.clone()))
            .collect();

        Self { supported, known }
    }
}

fn support_type(site: &PasskeySite) -> &'static str {
    if site.passkey_signin {
        "signin"
    } else {
        "mfa"
    }
}

impl Detector for PasskeyDetector {
    fn name(&self) -> &'static str {
        "passkey"
    }

    fn detect(&self, credentials: &[Credential]) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for cred in credentials.iter().filter(|c| c.passkey.is_empty()) {
            let zone = self.known.resolve(&cred.url);
            let Some(site) = self.supported.get(&zone) else {
                continue;
            };

            let metadata = BTreeMap::from([
                ("site_name".to_string(), json!(site.name)),
                ("support_type".to_string(), json!(support_type(site))),
                ("setup_link".to_string(), json!(site.setup_link)),
                ("category".to_string(), json!(site.category)),
            ]);

            findings.push(Finding {
                credential_id: cred.id.clone(),
                title: cred.title.clone(),
                kind: FindingKind::MissingPasskey,
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
