// src/cluster/mod.rs
//! Similarity clustering of findings for report display.
//!
//! Findings of one kind are partitioned into a small number of named groups:
//! - **Domain partition**: findings sharing a main domain start in one bucket.
//! - **Title similarity**: large buckets without a dominant identity are split
//!   by average-link clustering over TF-IDF title vectors.
//! - **Cap**: when there are too many groups, singletons are coalesced.
//!
//! Every finding ends up in exactly one cluster, and the output depends only
//! on the input order.

pub mod linkage;
pub mod naming;
pub mod tfidf;
pub mod tokens;

use crate::config::ClusterPolicy;
use crate::domain::{bucket_key, UNKNOWN_DOMAIN};
use crate::types::{Cluster, Finding, FindingKind};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// A finding plus the bookkeeping clustering needs.
struct Item<'a> {
    /// Position in the caller's input; the stable tie-breaker everywhere.
    index: usize,
    finding: &'a Finding,
    bucket: String,
}

/// Accumulates accepted groups and deferred singletons across the recursion.
#[derive(Default)]
struct Partition<'a> {
    groups: Vec<Vec<Item<'a>>>,
    singletons: Vec<Item<'a>>,
}

/// Clusters findings with the default policy.
#[must_use]
pub fn cluster(findings: &[Finding]) -> Vec<Cluster> {
    cluster_with(findings, &ClusterPolicy::default())
}

/// Clusters findings of a single kind into named groups.
#[must_use]
pub fn cluster_with(findings: &[Finding], policy: &ClusterPolicy) -> Vec<Cluster> {
    if findings.is_empty() {
        return Vec::new();
    }

    let items: Vec<Item> = findings
        .iter()
        .enumerate()
        .map(|(index, finding)| Item {
            index,
            finding,
            bucket: bucket_key(&finding.domain),
        })
        .collect();

    if items.len() <= policy.trivial_max {
        return vec![finish(items)];
    }

    let mut partition = Partition::default();
    place(items, policy.split_depth, policy, &mut partition);

    let Partition {
        mut groups,
        mut singletons,
    } = partition;

    debug!(
        findings = findings.len(),
        groups = groups.len(),
        singletons = singletons.len(),
        "clustered findings"
    );

    singletons.sort_by_key(|item| item.index);
    groups.extend(singletons.into_iter().map(|item| vec![item]));

    cap_clusters(groups, policy.max_clusters)
        .into_iter()
        .map(finish)
        .collect()
}

/// Splits findings by kind and clusters each kind separately.
#[must_use]
pub fn cluster_by_kind(
    findings: &[Finding],
    policy: &ClusterPolicy,
) -> Vec<(FindingKind, Vec<Cluster>)> {
    FindingKind::ALL
        .iter()
        .filter_map(|&kind| {
            let subset: Vec<Finding> = findings
                .iter()
                .filter(|f| f.kind == kind)
                .cloned()
                .collect();
            if subset.is_empty() {
                None
            } else {
                Some((kind, cluster_with(&subset, policy)))
            }
        })
        .collect()
}

/// Applies the bucket sizing policy to every main-domain bucket of `items`.
///
/// `depth` bounds how often an oversized title sub-cluster may come back here.
fn place<'a>(items: Vec<Item<'a>>, depth: usize, policy: &ClusterPolicy, out: &mut Partition<'a>) {
    for bucket in partition_by_domain(items) {
        match bucket.len() {
            0 => {}
            1 => out.singletons.extend(bucket),
            n if n <= policy.bucket_max => out.groups.push(bucket),
            _ if has_dominant_identity(&bucket, policy) => out.groups.push(bucket),
            _ => split_by_title(bucket, depth, policy, out),
        }
    }
}

fn split_by_title<'a>(
    bucket: Vec<Item<'a>>,
    depth: usize,
    policy: &ClusterPolicy,
    out: &mut Partition<'a>,
) {
    for sub in title_subclusters(bucket, policy.merge_threshold) {
        match sub.len() {
            0 => {}
            1 => out.singletons.extend(sub),
            n if n <= policy.subcluster_max => out.groups.push(sub),
            _ if depth == 0 => out.groups.push(sub),
            _ => place(sub, depth - 1, policy, out),
        }
    }
}

/// Groups items by main domain, buckets ordered by first appearance.
fn partition_by_domain(items: Vec<Item<'_>>) -> Vec<Vec<Item<'_>>> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<Vec<Item>> = Vec::new();

    for item in items {
        let slot = *slots.entry(item.bucket.clone()).or_insert_with(|| {
            buckets.push(Vec::new());
            buckets.len() - 1
        });
        if let Some(bucket) = buckets.get_mut(slot) {
            bucket.push(item);
        }
    }

    buckets
}

/// True when the bucket evidently belongs to one service.
#[allow(clippy::cast_precision_loss)]
fn has_dominant_identity(bucket: &[Item], policy: &ClusterPolicy) -> bool {
    if bucket.len() <= 1 {
        return false;
    }
    let total = bucket.len() as f64;

    let mut keyword_freq: HashMap<String, usize> = HashMap::new();
    for item in bucket {
        let distinct: BTreeSet<String> = tokens::keywords(&item.finding.title).into_iter().collect();
        for word in distinct {
            *keyword_freq.entry(word).or_default() += 1;
        }
    }
    if keyword_freq
        .values()
        .any(|&freq| freq as f64 / total >= policy.keyword_dominance)
    {
        return true;
    }

    let mut domain_freq: HashMap<&str, usize> = HashMap::new();
    for item in bucket.iter().filter(|item| item.bucket != UNKNOWN_DOMAIN) {
        *domain_freq.entry(item.bucket.as_str()).or_default() += 1;
    }
    domain_freq
        .values()
        .max()
        .is_some_and(|&freq| freq as f64 / total >= policy.domain_dominance)
}

/// Splits a bucket by average-link clustering over TF-IDF title vectors.
fn title_subclusters(bucket: Vec<Item<'_>>, threshold: f64) -> Vec<Vec<Item<'_>>> {
    let titles: Vec<&str> = bucket.iter().map(|item| item.finding.title.as_str()).collect();
    let vectors = tfidf::build_vectors(&titles);
    let similarities = tfidf::similarity_matrix(&vectors);
    let groups = linkage::average_link(&similarities, threshold);

    let mut slots: Vec<Option<Item>> = bucket.into_iter().map(Some).collect();
    groups
        .into_iter()
        .map(|group| {
            group
                .into_iter()
                .filter_map(|i| slots.get_mut(i).and_then(Option::take))
                .collect()
        })
        .collect()
}

/// Enforces the cluster-count cap by coalescing singletons into chunks.
///
/// Multi-item groups are never merged, so when they alone reach `max` all
/// singletons share one trailing chunk.
fn cap_clusters(mut groups: Vec<Vec<Item<'_>>>, max: usize) -> Vec<Vec<Item<'_>>> {
    if groups.len() <= max {
        return groups;
    }

    groups.sort_by_key(Vec::len);
    let (mut result, singles): (Vec<_>, Vec<_>) = groups.into_iter().partition(|g| g.len() > 1);
    let singles: Vec<Item> = singles.into_iter().flatten().collect();
    if singles.is_empty() {
        return result;
    }

    let remaining = max.saturating_sub(result.len());
    let chunk_size = if remaining == 0 {
        singles.len()
    } else {
        singles.len().div_ceil(remaining).max(1)
    };

    debug!(
        multi = result.len(),
        singletons = singles.len(),
        chunk_size,
        "capping cluster count"
    );

    let mut rest = singles.into_iter().peekable();
    while rest.peek().is_some() {
        result.push(rest.by_ref().take(chunk_size).collect());
    }

    result
}

/// Names a group and orders its members for display.
fn finish(mut items: Vec<Item<'_>>) -> Cluster {
    items.sort_by_key(|item| item.index);
    let members: Vec<&Finding> = items.iter().map(|item| item.finding).collect();
    let name = naming::cluster_name(&members);

    items.sort_by(|a, b| {
        a.finding
            .title
            .cmp(&b.finding.title)
            .then(a.index.cmp(&b.index))
    });

    Cluster {
        name,
        findings: items.into_iter().map(|item| item.finding.clone()).collect(),
    }
}
