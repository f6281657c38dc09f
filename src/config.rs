// src/config.rs
//! `unpass.toml` configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock behaviour.

use crate::error::{Result, UnpassError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "unpass.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub detectors: DetectorConfig,
    #[serde(default)]
    pub clustering: ClusterPolicy,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    #[serde(default = "default_enabled")]
    pub twofa: bool,
    #[serde(default = "default_enabled")]
    pub passkey: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            twofa: default_enabled(),
            passkey: default_enabled(),
        }
    }
}

/// Thresholds that drive the similarity clustering engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterPolicy {
    /// Inputs this small are returned as a single cluster.
    #[serde(default = "default_trivial_max")]
    pub trivial_max: usize,
    /// Largest domain bucket accepted without inspection.
    #[serde(default = "default_bucket_max")]
    pub bucket_max: usize,
    /// Largest title sub-cluster accepted without re-splitting.
    #[serde(default = "default_subcluster_max")]
    pub subcluster_max: usize,
    #[serde(default = "default_max_clusters")]
    pub max_clusters: usize,
    /// Average-link merging stops below this similarity.
    #[serde(default = "default_merge_threshold")]
    pub merge_threshold: f64,
    #[serde(default = "default_keyword_dominance")]
    pub keyword_dominance: f64,
    #[serde(default = "default_domain_dominance")]
    pub domain_dominance: f64,
    /// How many times an oversized sub-cluster may be re-partitioned.
    #[serde(default = "default_split_depth")]
    pub split_depth: usize,
}

impl Default for ClusterPolicy {
    fn default() -> Self {
        Self {
            trivial_max: default_trivial_max(),
            bucket_max: default_bucket_max(),
            subcluster_max: default_subcluster_max(),
            max_clusters: default_max_clusters(),
            merge_threshold: default_merge_threshold(),
            keyword_dominance: default_keyword_dominance(),
            domain_dominance: default_domain_dominance(),
            split_depth: default_split_depth(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,
}

fn default_enabled() -> bool { true }
fn default_trivial_max() -> usize { 3 }
fn default_bucket_max() -> usize { 6 }
fn default_subcluster_max() -> usize { 8 }
fn default_max_clusters() -> usize { 15 }
fn default_merge_threshold() -> f64 { 0.3 }
fn default_keyword_dominance() -> f64 { 0.7 }
fn default_domain_dominance() -> f64 { 0.8 }
fn default_split_depth() -> usize { 3 }

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    /// Returns error if the TOML is malformed or a field has the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| UnpassError::io(e, path))?;
        Self::from_toml_str(&content)
    }

    /// Loads configuration from `path`, falling back to defaults when the file is absent.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns an error if a clustering threshold is outside its usable range.
    pub fn validate(&self) -> Result<()> {
        let policy = &self.clustering;
        if policy.max_clusters == 0 {
            return Err(UnpassError::Other(
                "clustering.max_clusters must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("merge_threshold", policy.merge_threshold),
            ("keyword_dominance", policy.keyword_dominance),
            ("domain_dominance", policy.domain_dominance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(UnpassError::Other(format!(
                    "clustering.{name} must be within 0.0..=1.0, got {value}"
                )));
            }
        }
        Ok(())
    }
}
