// src/audit/mod.rs
//! Audit engine: runs the registered detectors over a credential set.

use crate::config::Config;
use crate::detector::{Detector, PasskeyDetector, TwoFaDetector};
use crate::domain::KnownDomainSet;
use crate::error::UnpassError;
use crate::reference::ReferenceData;
use crate::types::{AuditReport, AuditSummary, Credential};
use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

#[derive(Default)]
pub struct Auditor {
    detectors: Vec<Box<dyn Detector>>,
}

impl Auditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    /// Names of the registered detectors, in run order.
    #[must_use]
    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Builds an auditor with the detectors enabled in `config`.
    ///
    /// All detectors share one known-domain set compiled from every loaded database.
    ///
    /// # Errors
    /// Returns error if an enabled detector's reference database was not loaded.
    pub fn from_reference(config: &Config, reference: &ReferenceData) -> Result<Self> {
        let known = Arc::new(KnownDomainSet::from_reference(
            reference.twofa.as_ref(),
            reference.passkey.as_deref(),
        ));

        let mut auditor = Self::new();

        if config.detectors.twofa {
            let db = reference
                .twofa
                .as_ref()
                .ok_or(UnpassError::MissingReference("2FA"))?;
            auditor.register(Box::new(TwoFaDetector::new(db, Arc::clone(&known))));
        }

        if config.detectors.passkey {
            let sites = reference
                .passkey
                .as_deref()
                .ok_or(UnpassError::MissingReference("passkey"))?;
            auditor.register(Box::new(PasskeyDetector::new(sites, Arc::clone(&known))));
        }

        Ok(auditor)
    }

    /// Runs every detector and assembles the report.
    ///
    /// # Errors
    /// Returns error if any detector fails.
    pub fn run(&self, credentials: &[Credential]) -> Result<AuditReport> {
        let start = Instant::now();
        let mut results = Vec::new();

        for detector in &self.detectors {
            let found = detector
                .detect(credentials)
                .with_context(|| format!("detector {} failed", detector.name()))?;
            tracing::info!(detector = detector.name(), findings = found.len(), "detector finished");
            results.extend(found);
        }

        let mut summary = AuditSummary {
            total_credentials: credentials.len(),
            issues_found: results.len(),
            ..AuditSummary::default()
        };
        for finding in &results {
            *summary.by_kind.entry(finding.kind).or_default() += 1;
        }

        tracing::debug!(elapsed_ms = start.elapsed().as_millis(), "audit complete");

        Ok(AuditReport {
            results,
            summary,
            timestamp: Utc::now(),
        })
    }
}
