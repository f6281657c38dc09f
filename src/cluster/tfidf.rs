// src/cluster/tfidf.rs
//! TF-IDF vectors and cosine similarity over short titles.

use super::tokens::tokenize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Token to TF-IDF weight. Ordered so that floating-point sums are reproducible.
pub type TermVector = BTreeMap<String, f64>;

/// Builds one vector per document.
///
/// tf = count / document length, idf = ln(documents / document frequency).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn build_vectors(docs: &[&str]) -> Vec<TermVector> {
    let tokenized: Vec<Vec<String>> = docs.iter().map(|doc| tokenize(doc)).collect();

    let mut doc_freq: HashMap<&str, usize> = HashMap::new();
    for doc in &tokenized {
        let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
        for token in unique {
            *doc_freq.entry(token).or_default() += 1;
        }
    }

    let doc_count = tokenized.len() as f64;

    tokenized
        .iter()
        .map(|doc| {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for token in doc {
                *counts.entry(token.as_str()).or_default() += 1;
            }

            let len = doc.len() as f64;
            counts
                .into_iter()
                .map(|(token, count)| {
                    let df = doc_freq.get(token).copied().unwrap_or(1) as f64;
                    let weight = (count as f64 / len) * (doc_count / df).ln();
                    (token.to_string(), weight)
                })
                .collect()
        })
        .collect()
}

/// Cosine similarity; 0.0 when either vector has zero norm.
#[must_use]
pub fn cosine(a: &TermVector, b: &TermVector) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(token, wa)| b.get(token).map(|wb| wa * wb))
        .sum();
    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Symmetric matrix of pairwise cosine similarities.
#[must_use]
#[allow(clippy::indexing_slicing)] // Guarded: i, j < n
pub fn similarity_matrix(vectors: &[TermVector]) -> Vec<Vec<f64>> {
    let n = vectors.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for (i, a) in vectors.iter().enumerate() {
        for (j, b) in vectors.iter().enumerate().skip(i) {
            let sim = cosine(a, b);
            matrix[i][j] = sim;
            matrix[j][i] = sim;
        }
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_token_has_zero_idf() {
        let v = build_vectors(&["steam wallet", "steam deck"]);
        assert!(v[0]["steam"].abs() < f64::EPSILON);
        assert!(v[0]["wallet"] > 0.0);
    }

    #[test]
    fn test_identical_titles_are_fully_similar() {
        let v = build_vectors(&["Bank Savings", "Bank Savings", "Weather"]);
        assert!((cosine(&v[0], &v[1]) - 1.0).abs() < 1e-9);
        assert!(cosine(&v[0], &v[2]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_norm_is_zero_similarity() {
        let v = build_vectors(&["!!!", "bank"]);
        assert!(v[0].is_empty());
        assert!(cosine(&v[0], &v[1]).abs() < f64::EPSILON);
        let m = similarity_matrix(&v);
        assert!(m[0][0].abs() < f64::EPSILON);
    }
}
