// src/report/mod.rs
//! Output formatting for audit reports.
//!
//! This module provides both human-readable and machine-readable output
//! formats for audit results.

mod json;
mod table;

pub use json::format_json;
pub use table::format_table;

use crate::config::{ClusterPolicy, ReportFormat};
use crate::error::Result;
use crate::types::AuditReport;

/// Renders the report in the requested format.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn render(report: &AuditReport, format: ReportFormat, policy: &ClusterPolicy) -> Result<String> {
    match format {
        ReportFormat::Json => format_json(report),
        ReportFormat::Table => Ok(format_table(report, policy)),
    }
}
