use crate::centroid::Centroid;
use crate::config::InitStrategy;
use crate::error::KMeansError;
use crate::observation::Observation;
use ndarray::Array1;
use rand::Rng;

/// Place `k` initial centroids according to `strategy`
///
/// Sample-based placement copies the first `k` observations, so callers that
/// want a random pick should shuffle beforehand.
pub fn initialize_centroids<R: Rng + ?Sized>(
    observations: &[Observation],
    k: usize,
    strategy: InitStrategy,
    rng: &mut R,
) -> Result<Vec<Centroid>, KMeansError> {
    if observations.is_empty() {
        return Err(KMeansError::EmptyInput);
    }
    if k == 0 {
        return Err(KMeansError::InvalidK(
            "k must be greater than 0".to_string(),
        ));
    }
    if k > observations.len() {
        return Err(KMeansError::InvalidK(format!(
            "k ({}) is greater than the number of observations ({})",
            k,
            observations.len()
        )));
    }

    match strategy {
        InitStrategy::SampleBased => Ok(sample_based(observations, k)),
        InitStrategy::BoundingBoxRandom => bounding_box_random(observations, k, rng),
    }
}

fn sample_based(observations: &[Observation], k: usize) -> Vec<Centroid> {
    observations
        .iter()
        .take(k)
        .enumerate()
        .map(|(i, obs)| Centroid::new(i, obs.coordinates().to_owned()))
        .collect()
}

fn bounding_box_random<R: Rng + ?Sized>(
    observations: &[Observation],
    k: usize,
    rng: &mut R,
) -> Result<Vec<Centroid>, KMeansError> {
    let (mins, maxs) = bounding_box(observations)?;

    let centroids = (0..k)
        .map(|i| {
            let coordinates: Array1<f64> = mins
                .iter()
                .zip(maxs.iter())
                .map(|(&lo, &hi)| sample_between(lo, hi, rng))
                .collect();
            Centroid::new(i, coordinates)
        })
        .collect();

    Ok(centroids)
}

/// Uniform draw from `[lo, hi]` that stays finite for any finite bounds
fn sample_between<R: Rng + ?Sized>(lo: f64, hi: f64, rng: &mut R) -> f64 {
    if lo >= hi {
        return lo;
    }
    let t: f64 = rng.gen();
    let span = hi - lo;
    if span.is_finite() {
        lo + t * span
    } else {
        // span overflows, interpolate without forming it
        lo * (1.0 - t) + hi * t
    }
}

/// Per-dimension minimum and maximum over all observations
pub fn bounding_box(observations: &[Observation]) -> Result<(Array1<f64>, Array1<f64>), KMeansError> {
    let first = observations.first().ok_or(KMeansError::EmptyInput)?;
    let n_features = first.dimensions();

    let mut mins = first.coordinates().to_owned();
    let mut maxs = first.coordinates().to_owned();

    for obs in &observations[1..] {
        if obs.dimensions() != n_features {
            return Err(KMeansError::DimensionMismatch {
                expected: n_features,
                found: obs.dimensions(),
            });
        }
        for (j, &value) in obs.coordinates().iter().enumerate() {
            mins[j] = mins[j].min(value);
            maxs[j] = maxs[j].max(value);
        }
    }

    Ok((mins, maxs))
}
