// src/report/json.rs
use crate::error::{Result, UnpassError};
use crate::types::AuditReport;

/// Formats the audit report as pretty-printed JSON for machine consumption.
///
/// # Errors
/// Returns error if a metadata value cannot be serialized.
pub fn format_json(report: &AuditReport) -> Result<String> {
    serde_json::to_string_pretty(report)
        .map(|mut out| {
            out.push('\n');
            out
        })
        .map_err(|e| UnpassError::Other(format!("failed to serialize report: {e}")))
}
