// src/report/table.rs
use crate::cluster::cluster_by_kind;
use crate::config::ClusterPolicy;
use crate::types::{AuditReport, AuditSummary, Cluster, FindingKind};
use colored::Colorize;
use std::fmt::Write;

/// Formats the audit report for terminal display, grouping each kind's findings into clusters.
#[must_use]
pub fn format_table(report: &AuditReport, policy: &ClusterPolicy) -> String {
    let mut out = String::new();

    writeln!(out, "Name:         unpass-security-audit").ok();
    writeln!(out, "Namespace:    security").ok();
    writeln!(
        out,
        "Created:      {}",
        report.timestamp.format("%a, %d %b %Y %H:%M:%S UTC")
    )
    .ok();
    writeln!(out).ok();

    write_summary(&mut out, &report.summary);

    if report.results.is_empty() {
        writeln!(
            out,
            "{}",
            "No upgrade opportunities found. Every matched login is already protected.".green()
        )
        .ok();
        return out;
    }

    for (kind, clusters) in cluster_by_kind(&report.results, policy) {
        let total: usize = clusters.iter().map(Cluster::len).sum();
        writeln!(
            out,
            "{}",
            format!("{} ({total} total):", kind.heading()).cyan().bold()
        )
        .ok();
        for cluster in &clusters {
            write_cluster(&mut out, cluster);
        }
        writeln!(out).ok();
    }

    out
}

fn write_summary(out: &mut String, summary: &AuditSummary) {
    writeln!(out, "{}", "Summary:".bold()).ok();
    writeln!(
        out,
        "  Total Credentials:    {}",
        summary.total_credentials.to_string().white()
    )
    .ok();
    writeln!(
        out,
        "  Issues Found:         {}",
        format_count(summary.issues_found)
    )
    .ok();
    writeln!(out).ok();

    let counts: Vec<(FindingKind, usize)> = FindingKind::ALL
        .iter()
        .filter_map(|kind| {
            summary
                .by_kind
                .get(kind)
                .filter(|&&n| n > 0)
                .map(|&n| (*kind, n))
        })
        .collect();

    if counts.is_empty() {
        return;
    }

    writeln!(out, "{}", "Issues by Category:".bold()).ok();
    for (kind, count) in counts {
        let label = format!("{}:", kind.label());
        writeln!(out, "  {label:<22}{}", format_count(count)).ok();
    }
    writeln!(out).ok();
}

fn format_count(n: usize) -> String {
    if n == 0 {
        "0".dimmed().to_string()
    } else {
        n.to_string().yellow().to_string()
    }
}

fn write_cluster(out: &mut String, cluster: &Cluster) {
    writeln!(out).ok();
    writeln!(
        out,
        "[{}] ({} items)",
        cluster.name.white().bold(),
        cluster.len()
    )
    .ok();

    for finding in &cluster.findings {
        if finding.domain.is_empty() {
            writeln!(out, "  {}", finding.title).ok();
        } else {
            writeln!(
                out,
                "  {} {}",
                finding.title,
                format!("({})", finding.domain).dimmed()
            )
            .ok();
        }
    }
}
