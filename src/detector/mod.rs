// src/detector/mod.rs
//! Finding generation: match credentials against the reference lists.

mod passkey;
mod twofa;

pub use passkey::PasskeyDetector;
pub use twofa::TwoFaDetector;

use crate::types::Credential;
use crate::types::Finding;
use anyhow::Result;

/// A source of findings over a credential set.
pub trait Detector {
    fn name(&self) -> &'static str;

    /// Produces findings in credential order.
    ///
    /// # Errors
    /// Returns error if the detector cannot evaluate the credentials.
    fn detect(&self, credentials: &[Credential]) -> Result<Vec<Finding>>;
}
