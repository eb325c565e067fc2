//! Sparse TF-IDF vectorization and k-means clustering of article texts.

pub mod cluster;
pub mod kmeans;
pub mod similarity;
pub mod types;

pub use cluster::{cluster, cluster_count, partition};
pub use kmeans::{kmeans, KMeansResult, KMEANS_MAX_ITERATIONS, KMEANS_TOLERANCE};
pub use similarity::*;
pub use types::*;

use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

use crate::text::tokenize;
use crate::TARGET_CLUSTER;

/// Term-frequency x inverse-document-frequency vectorizer.
///
/// Terms are kept when their document frequency is at least `min_df` and at
/// most `max_df * n_documents`; of those, the `max_features` most frequent
/// across the corpus survive.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    pub min_df: usize,
    pub max_df: f64,
    pub max_features: usize,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self {
            min_df: 2,
            max_df: 0.8,
            max_features: 5000,
        }
    }
}

impl TfidfVectorizer {
    pub fn new(min_df: usize, max_df: f64, max_features: usize) -> Self {
        Self {
            min_df,
            max_df,
            max_features,
        }
    }

    /// Fits the vocabulary and weights every text.
    ///
    /// Returns `None` when no term survives document-frequency pruning.
    pub fn fit_transform<S: AsRef<str>>(&self, texts: &[S]) -> Option<TfidfMatrix> {
        let n_docs = texts.len();
        let token_counts: Vec<HashMap<String, usize>> = texts
            .iter()
            .map(|text| {
                let mut counts = HashMap::new();
                for token in tokenize(text.as_ref()) {
                    *counts.entry(token).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        // (document frequency, corpus frequency) per term
        let mut stats: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for counts in &token_counts {
            for (term, count) in counts {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += count;
            }
        }

        let max_doc_count = self.max_df * n_docs as f64;
        let mut candidates: Vec<(&str, usize, usize)> = stats
            .into_iter()
            .filter(|(_, (df, _))| *df >= self.min_df && (*df as f64) <= max_doc_count)
            .map(|(term, (df, cf))| (term, df, cf))
            .collect();

        if candidates.len() > self.max_features {
            // Most frequent first; alphabetical among equals
            candidates.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(b.0)));
            candidates.truncate(self.max_features);
            candidates.sort_by(|a, b| a.0.cmp(b.0));
        }

        if candidates.is_empty() {
            debug!(target: TARGET_CLUSTER, "No terms left after pruning {} documents", n_docs);
            return None;
        }

        let vocabulary: Vec<String> = candidates.iter().map(|(t, _, _)| t.to_string()).collect();
        let index: HashMap<&str, (usize, f64)> = candidates
            .iter()
            .enumerate()
            .map(|(i, (term, df, _))| {
                let idf = ((1.0 + n_docs as f64) / (1.0 + *df as f64)).ln() + 1.0;
                (*term, (i, idf))
            })
            .collect();

        let rows = token_counts
            .iter()
            .map(|counts| {
                let pairs = counts
                    .iter()
                    .filter_map(|(term, count)| {
                        index
                            .get(term.as_str())
                            .map(|(i, idf)| (*i, *count as f64 * idf))
                    })
                    .collect();
                let mut row = SparseVector::from_pairs(pairs);
                row.l2_normalize();
                row
            })
            .collect();

        debug!(
            target: TARGET_CLUSTER,
            "Vectorized {} documents over {} terms", n_docs, vocabulary.len()
        );

        Some(TfidfMatrix { vocabulary, rows })
    }
}

/// Number of distinct rows (an empty row counts once), used to cap the cluster count.
pub fn distinct_rows(rows: &[SparseVector]) -> usize {
    let mut seen: HashSet<Vec<(usize, u64)>> = HashSet::new();
    for row in rows {
        seen.insert(row.entries().iter().map(|(i, w)| (*i, w.to_bits())).collect());
    }
    seen.len()
}
