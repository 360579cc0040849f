use crate::centroid::Centroid;
use crate::error::KMeansError;
use crate::observation::Observation;
use ndarray::{Array1, ArrayView1};
use rayon::prelude::*;

/// Euclidean distance between two coordinate vectors
///
/// Returns `DimensionMismatch` if the vectors differ in length.
pub fn euclidean_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> Result<f64, KMeansError> {
    if a.len() != b.len() {
        return Err(KMeansError::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(euclidean_distance_unchecked(a, b))
}

/// Euclidean distance for inputs already known to share a length
#[inline]
pub(crate) fn euclidean_distance_unchecked(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Index of the nearest centroid to `point`
///
/// Ties go to the centroid encountered first.
#[inline]
pub(crate) fn find_nearest_centroid(point: &ArrayView1<f64>, centroids: &[Centroid]) -> usize {
    let mut best_label = 0;
    let mut best_dist = f64::INFINITY;

    for (j, centroid) in centroids.iter().enumerate() {
        let dist = euclidean_distance_unchecked(point, &centroid.coordinates());
        if dist < best_dist {
            best_dist = dist;
            best_label = j;
        }
    }

    best_label
}

/// Find the nearest centroid for every observation
///
/// The search runs in parallel across observations; the returned labels are in
/// observation order. Callers must have validated dimensions beforehand.
pub(crate) fn find_nearest_centroids(
    observations: &[Observation],
    centroids: &[Centroid],
) -> Vec<usize> {
    observations
        .par_iter()
        .map(|obs| find_nearest_centroid(&obs.coordinates(), centroids))
        .collect()
}

/// Compute centroid shift (sum of L2 norms of centroid movements)
pub(crate) fn compute_centroid_shift(old_centroids: &[Array1<f64>], new_centroids: &[Centroid]) -> f64 {
    old_centroids
        .iter()
        .zip(new_centroids.iter())
        .map(|(old_c, new_c)| euclidean_distance_unchecked(&old_c.view(), &new_c.coordinates()))
        .sum()
}
