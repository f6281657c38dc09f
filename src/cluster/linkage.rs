// src/cluster/linkage.rs
//! Average-link agglomerative clustering over a similarity matrix.

/// Merges groups of item indices until no pair reaches `threshold`.
///
/// Each round merges the pair with the highest mean pairwise similarity; the
/// earliest pair wins ties, so the result depends only on input order.
/// Groups keep the position of their lower-indexed half.
#[must_use]
pub fn average_link(similarities: &[Vec<f64>], threshold: f64) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = (0..similarities.len()).map(|i| vec![i]).collect();

    loop {
        let mut best: Option<(usize, usize, f64)> = None;

        for i in 0..groups.len() {
            for j in (i + 1)..groups.len() {
                let sim = average_similarity(&groups[i], &groups[j], similarities);
                if best.map_or(true, |(_, _, top)| sim > top) {
                    best = Some((i, j, sim));
                }
            }
        }

        match best {
            Some((i, j, sim)) if sim >= threshold => {
                let absorbed = groups.remove(j);
                groups[i].extend(absorbed);
            }
            _ => break,
        }
    }

    groups
}

#[allow(clippy::indexing_slicing, clippy::cast_precision_loss)] // Guarded: indices come from `average_link`, all < matrix size
fn average_similarity(a: &[usize], b: &[usize], similarities: &[Vec<f64>]) -> f64 {
    let pairs = a.len() * b.len();
    if pairs == 0 {
        return 0.0;
    }

    let total: f64 = a
        .iter()
        .flat_map(|&i| b.iter().map(move |&j| similarities[i][j]))
        .sum();

    total / pairs as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merges_above_threshold_only() {
        let m = vec![
            vec![1.0, 0.9, 0.0],
            vec![0.9, 1.0, 0.1],
            vec![0.0, 0.1, 1.0],
        ];
        assert_eq!(average_link(&m, 0.3), vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn test_uses_mean_not_max_link() {
        // 2 is close to 0 but far from 1: mean 0.25 stays below 0.3.
        let m = vec![
            vec![1.0, 0.9, 0.5],
            vec![0.9, 1.0, 0.0],
            vec![0.5, 0.0, 1.0],
        ];
        assert_eq!(average_link(&m, 0.3), vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(average_link(&[], 0.3).is_empty());
        assert_eq!(average_link(&[vec![1.0]], 0.3), vec![vec![0]]);
    }
}
