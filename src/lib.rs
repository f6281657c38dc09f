//! Credential upgrade audit.
//!
//! Matches stored logins against reference lists of sites that support
//! two-factor authentication or passkeys, then groups the resulting findings
//! into a handful of named clusters for review.

pub mod audit;
pub mod cluster;
pub mod config;
pub mod detector;
pub mod domain;
pub mod error;
pub mod reference;
pub mod report;
pub mod types;

pub use cluster::{cluster, cluster_with};
pub use domain::{resolve, KnownDomainSet};
pub use error::{Result, UnpassError};
pub use types::{Cluster, Credential, Finding, FindingKind};
