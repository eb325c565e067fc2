use serde::Serialize;

/// A sparse term-weight vector: `(term index, weight)` pairs sorted by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Builds a vector from unsorted pairs, dropping zero weights.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.retain(|(_, weight)| *weight != 0.0);
        pairs.sort_by_key(|(index, _)| *index);
        Self { entries: pairs }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Scales the vector to unit length; zero vectors are left untouched.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, weight) in &mut self.entries {
                *weight /= norm;
            }
        }
    }

    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(index, weight)| dense.get(*index).map(|c| c * weight))
            .sum()
    }

    /// Adds this vector into a dense accumulator.
    pub fn add_to(&self, dense: &mut [f64]) {
        for (index, weight) in &self.entries {
            if let Some(slot) = dense.get_mut(*index) {
                *slot += weight;
            }
        }
    }
}

/// The fitted result of vectorizing a corpus.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    /// Vocabulary terms, alphabetically ordered; a term's position is its index.
    pub vocabulary: Vec<String>,
    /// One L2-normalized row per input document, in input order.
    pub rows: Vec<SparseVector>,
}
