// src/reference.rs
//! Authoritative 2FA and passkey reference records.

use crate::config::DetectorConfig;
use crate::error::{Result, UnpassError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const TWOFA_FILE: &str = "2fa_database.json";
pub const PASSKEY_FILE: &str = "passkey_database.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwoFaDatabase {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub sites: Vec<TwoFaSite>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwoFaSite {
    pub domain: String,
    #[serde(default)]
    pub supports_2fa: bool,
    #[serde(default)]
    pub methods: Vec<String>,
    #[serde(default)]
    pub documentation_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasskeySite {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub domain: String,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub passkey_signin: bool,
    #[serde(default)]
    pub passkey_mfa: bool,
    #[serde(default)]
    pub setup_link: String,
    #[serde(default)]
    pub documentation_link: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

impl PasskeySite {
    /// Approved and visible entries are the only ones trusted for matching.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.approved && !self.hidden
    }

    #[must_use]
    pub fn supports_passkey(&self) -> bool {
        self.is_listed() && (self.passkey_signin || self.passkey_mfa)
    }
}

/// Reference databases loaded for one audit run.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub twofa: Option<TwoFaDatabase>,
    pub passkey: Option<Vec<PasskeySite>>,
}

impl ReferenceData {
    /// Loads the databases under `dir`.
    ///
    /// A database required by an enabled detector must be present; the other
    /// one is loaded when available and only feeds the known-domain set.
    ///
    /// # Errors
    /// Returns error if a required database is missing or any present one is malformed.
    pub fn load(dir: &Path, detectors: &DetectorConfig) -> Result<Self> {
        let twofa_path = dir.join(TWOFA_FILE);
        let passkey_path = dir.join(PASSKEY_FILE);

        let twofa = load_optional(&twofa_path, detectors.twofa, load_twofa)?;
        let passkey = load_optional(&passkey_path, detectors.passkey, load_passkey)?;

        Ok(Self { twofa, passkey })
    }
}

fn load_optional<T>(
    path: &Path,
    required: bool,
    loader: fn(&Path) -> Result<T>,
) -> Result<Option<T>> {
    if path.exists() {
        return loader(path).map(Some);
    }
    if required {
        return Err(UnpassError::io(
            std::io::Error::new(std::io::ErrorKind::NotFound, "reference database not found"),
            path,
        ));
    }
    tracing::warn!(path = %path.display(), "optional reference database not found");
    Ok(None)
}

/// Reads a 2FA database file.
///
/// # Errors
/// Returns error if the file cannot be read or is not valid JSON.
pub fn load_twofa(path: &Path) -> Result<TwoFaDatabase> {
    let data = fs::read_to_string(path).map_err(|e| UnpassError::io(e, path))?;
    serde_json::from_str(&data).map_err(|e| UnpassError::json(e, path))
}

/// Reads a passkey database file (a JSON array of sites).
///
/// # Errors
/// Returns error if the file cannot be read or is not valid JSON.
pub fn load_passkey(path: &Path) -> Result<Vec<PasskeySite>> {
    let data = fs::read_to_string(path).map_err(|e| UnpassError::io(e, path))?;
    serde_json::from_str(&data).map_err(|e| UnpassError::json(e, path))
}
