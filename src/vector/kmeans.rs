use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::similarity::squared_distance;
use super::types::SparseVector;

/// Upper bound on Lloyd refinement passes.
pub const KMEANS_MAX_ITERATIONS: usize = 300;

/// Refinement stops once the summed squared centroid shift drops below this.
pub const KMEANS_TOLERANCE: f64 = 1e-4;

#[derive(Debug, Clone)]
pub struct KMeansResult {
    /// Cluster index per input row.
    pub labels: Vec<usize>,
    /// Dense centroids, one per cluster.
    pub centroids: Vec<Vec<f64>>,
    pub iterations: usize,
}

/// Partitions `rows` into `k` clusters with k-means++ seeding and Lloyd refinement.
///
/// Deterministic for a given `seed`. Distance ties go to the lowest cluster
/// index; a cluster that loses all its rows keeps its previous centroid.
pub fn kmeans(rows: &[SparseVector], dimensions: usize, k: usize, seed: u64) -> KMeansResult {
    let k = k.clamp(1, rows.len().max(1));
    if rows.is_empty() {
        return KMeansResult {
            labels: Vec::new(),
            centroids: Vec::new(),
            iterations: 0,
        };
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids = seed_centroids(rows, dimensions, k, &mut rng);
    let mut labels = vec![0; rows.len()];
    let mut iterations = 0;

    while iterations < KMEANS_MAX_ITERATIONS {
        iterations += 1;
        let norms: Vec<f64> = centroids.iter().map(|c| squared_norm(c)).collect();
        for (row, label) in rows.iter().zip(labels.iter_mut()) {
            *label = nearest_centroid(row, &centroids, &norms);
        }

        let mut sums = vec![vec![0.0; dimensions]; k];
        let mut counts = vec![0usize; k];
        for (row, label) in rows.iter().zip(&labels) {
            row.add_to(&mut sums[*label]);
            counts[*label] += 1;
        }

        let mut shift = 0.0;
        for (cluster, sum) in sums.iter_mut().enumerate() {
            if counts[cluster] == 0 {
                continue;
            }
            for value in sum.iter_mut() {
                *value /= counts[cluster] as f64;
            }
            shift += sum
                .iter()
                .zip(&centroids[cluster])
                .map(|(new, old)| (new - old) * (new - old))
                .sum::<f64>();
            centroids[cluster] = std::mem::take(sum);
        }

        if shift < KMEANS_TOLERANCE {
            break;
        }
    }

    // Final assignment against the settled centroids
    let norms: Vec<f64> = centroids.iter().map(|c| squared_norm(c)).collect();
    for (row, label) in rows.iter().zip(labels.iter_mut()) {
        *label = nearest_centroid(row, &centroids, &norms);
    }

    KMeansResult {
        labels,
        centroids,
        iterations,
    }
}

/// k-means++ seeding: each further centroid is drawn with probability
/// proportional to its squared distance from the nearest chosen one.
fn seed_centroids(rows: &[SparseVector], dimensions: usize, k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let to_dense = |row: &SparseVector| {
        let mut dense = vec![0.0; dimensions];
        row.add_to(&mut dense);
        dense
    };

    let first = rng.random_range(0..rows.len());
    let mut centroids = vec![to_dense(&rows[first])];
    let mut closest: Vec<f64> = rows
        .iter()
        .map(|row| squared_distance(row, &centroids[0], squared_norm(&centroids[0])))
        .collect();

    while centroids.len() < k {
        let total: f64 = closest.iter().sum();
        let chosen = if total > 0.0 {
            let mut target = rng.random::<f64>() * total;
            let mut pick = closest.iter().rposition(|d| *d > 0.0).unwrap_or(0);
            for (index, distance) in closest.iter().enumerate() {
                if *distance <= 0.0 {
                    continue;
                }
                if target < *distance {
                    pick = index;
                    break;
                }
                target -= distance;
            }
            pick
        } else {
            // Every row coincides with a centroid already
            rng.random_range(0..rows.len())
        };

        let centroid = to_dense(&rows[chosen]);
        let norm = squared_norm(&centroid);
        for (row, best) in rows.iter().zip(closest.iter_mut()) {
            *best = best.min(squared_distance(row, &centroid, norm));
        }
        centroids.push(centroid);
    }

    centroids
}

fn nearest_centroid(row: &SparseVector, centroids: &[Vec<f64>], norms: &[f64]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, (centroid, norm)) in centroids.iter().zip(norms).enumerate() {
        let distance = squared_distance(row, centroid, *norm);
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

fn squared_norm(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum()
}
