use super::types::SparseVector;

/// Squared Euclidean distance between a sparse vector and a dense centroid.
///
/// `centroid_norm_sq` is the centroid's precomputed squared norm.
pub fn squared_distance(vector: &SparseVector, centroid: &[f64], centroid_norm_sq: f64) -> f64 {
    let vector_norm = vector.norm();
    let distance = vector_norm * vector_norm - 2.0 * vector.dot_dense(centroid) + centroid_norm_sq;
    distance.max(0.0)
}
