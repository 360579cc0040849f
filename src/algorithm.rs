use crate::centroid::Centroid;
use crate::config::KMeansConfig;
use crate::distance::{compute_centroid_shift, find_nearest_centroids};
use crate::error::KMeansError;
use crate::init::initialize_centroids;
use crate::observation::Observation;
use crate::purity::purity;
use crate::report::{CentroidReport, IterationReport, Reporter, RunStatus, RunSummary};
use log::{debug, info, warn};
use ndarray::{Array1, Array2};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use std::time::Instant;

/// Result of the k-means algorithm
pub struct LloydResult {
    pub centroids: Vec<Centroid>,
    pub n_iterations: usize,
    pub status: RunStatus,
}

/// Per-centroid coordinate sums and member counts from one assignment pass
#[derive(Debug, Clone)]
pub struct Accumulator {
    pub sums: Array2<f64>,
    pub counts: Vec<usize>,
}

/// Run Lloyd's algorithm until memberships stop changing or `max_iters` is hit
///
/// The observations are shuffled in place (when enabled) and carry their final
/// assignments on return.
pub fn run_lloyd<R: Rng + ?Sized>(
    observations: &mut [Observation],
    n_features: usize,
    config: &KMeansConfig,
    labels: Option<&[String]>,
    rng: &mut R,
    reporter: &mut dyn Reporter,
) -> Result<LloydResult, KMeansError> {
    validate_input(observations, n_features, config)?;
    let k = config.k;

    info!(
        "Training k-means: {} observations, {} features, {} clusters, {} init",
        observations.len(),
        n_features,
        k,
        config.init
    );

    if config.shuffle {
        observations.shuffle(rng);
    }

    let mut centroids = initialize_centroids(observations, k, config.init, rng)?;
    let mut previous: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); k];
    let mut n_iterations = 0;

    let status = loop {
        let iter_start = Instant::now();
        n_iterations += 1;

        for (prev, centroid) in previous.iter_mut().zip(centroids.iter_mut()) {
            *prev = centroid.take_members();
        }

        let accumulator = assign_observations(observations, &mut centroids)?;

        let prev_coordinates: Vec<Array1<f64>> =
            centroids.iter().map(|c| c.coordinates().to_owned()).collect();
        reposition_centroids(&mut centroids, &accumulator);
        let shift = compute_centroid_shift(&prev_coordinates, &centroids);

        let changed = n_iterations == 1 || membership_changed(&previous, &centroids);

        debug!(
            "  Iteration {}/{}: shift = {:.6}, changed = {}, time = {:.4}s",
            n_iterations,
            config.max_iters,
            shift,
            changed,
            iter_start.elapsed().as_secs_f64()
        );

        let report = build_report(n_iterations, changed, shift, &centroids, observations, labels);
        reporter.on_iteration(&report);

        if !changed {
            info!("  Converged after {} iterations", n_iterations);
            break RunStatus::Converged;
        }

        if n_iterations >= config.max_iters {
            warn!(
                "Memberships still changing after {} iterations; stopping at the iteration limit",
                n_iterations
            );
            break RunStatus::IterationLimitReached;
        }
    };

    reporter.on_finish(&RunSummary {
        status,
        iterations: n_iterations,
    });

    Ok(LloydResult {
        centroids,
        n_iterations,
        status,
    })
}

fn validate_input(
    observations: &[Observation],
    n_features: usize,
    config: &KMeansConfig,
) -> Result<(), KMeansError> {
    if n_features == 0 {
        return Err(KMeansError::Configuration(
            "dimensionality must be greater than 0".to_string(),
        ));
    }
    if config.max_iters == 0 {
        return Err(KMeansError::Configuration(
            "max_iters must be greater than 0".to_string(),
        ));
    }
    if observations.is_empty() {
        return Err(KMeansError::EmptyInput);
    }
    if config.k == 0 {
        return Err(KMeansError::InvalidK(
            "k must be greater than 0".to_string(),
        ));
    }
    if observations.len() < config.k {
        return Err(KMeansError::InvalidK(format!(
            "Number of observations ({}) is less than k ({})",
            observations.len(),
            config.k
        )));
    }
    check_dimensions(observations, n_features)?;

    if let Some(idx) = observations
        .iter()
        .position(|o| o.coordinates().iter().any(|v| !v.is_finite()))
    {
        return Err(KMeansError::InvalidData(format!(
            "observation {} has a non-finite coordinate",
            idx
        )));
    }
    Ok(())
}

pub(crate) fn check_dimensions(
    observations: &[Observation],
    n_features: usize,
) -> Result<(), KMeansError> {
    match observations.iter().find(|o| o.dimensions() != n_features) {
        Some(obs) => Err(KMeansError::DimensionMismatch {
            expected: n_features,
            found: obs.dimensions(),
        }),
        None => Ok(()),
    }
}

/// Assign every observation to its nearest centroid.
///
/// Centroid memberships are rebuilt from scratch. Sums are accumulated in
/// observation order so repeated runs produce identical centroids.
pub fn assign_observations(
    observations: &mut [Observation],
    centroids: &mut [Centroid],
) -> Result<Accumulator, KMeansError> {
    let first = centroids.first().ok_or_else(|| {
        KMeansError::Configuration("cannot assign observations without centroids".to_string())
    })?;
    let n_features = first.coordinates().len();
    let k = centroids.len();

    if let Some(c) = centroids.iter().find(|c| c.coordinates().len() != n_features) {
        return Err(KMeansError::DimensionMismatch {
            expected: n_features,
            found: c.coordinates().len(),
        });
    }
    check_dimensions(observations, n_features)?;

    for centroid in centroids.iter_mut() {
        centroid.clear_members();
    }

    let labels = find_nearest_centroids(observations, centroids);

    let mut sums: Array2<f64> = Array2::zeros((k, n_features));
    let mut counts = vec![0usize; k];

    for (i, (obs, &label)) in observations.iter_mut().zip(labels.iter()).enumerate() {
        obs.assign(label);
        centroids[label].insert_member(i);
        counts[label] += 1;
        let mut row = sums.row_mut(label);
        row += &obs.coordinates();
    }

    Ok(Accumulator { sums, counts })
}

/// Move every non-empty centroid to the mean of its members.
///
/// Centroids with no members keep their coordinates.
pub fn reposition_centroids(centroids: &mut [Centroid], accumulator: &Accumulator) {
    for (idx, centroid) in centroids.iter_mut().enumerate() {
        let count = accumulator.counts[idx];
        if count > 0 {
            let mean = accumulator.sums.row(idx).mapv(|s| s / count as f64);
            centroid.update(mean);
        } else {
            debug!("  {} has no observations, keeping its position", centroid.name());
        }
    }
}

/// Whether any centroid's members differ from its previous members
pub fn membership_changed(previous: &[BTreeSet<usize>], centroids: &[Centroid]) -> bool {
    previous
        .iter()
        .zip(centroids.iter())
        .any(|(prev, centroid)| prev != centroid.members())
}

fn build_report(
    iteration: usize,
    membership_changed: bool,
    shift: f64,
    centroids: &[Centroid],
    observations: &[Observation],
    labels: Option<&[String]>,
) -> IterationReport {
    IterationReport {
        iteration,
        membership_changed,
        shift,
        centroids: centroids
            .iter()
            .map(|c| CentroidReport {
                name: c.name().to_string(),
                coordinates: c.coordinates().to_vec(),
                member_count: c.len(),
                purity: labels.map(|l| purity(c, observations, l)),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InitStrategy;
    use crate::report::NoopReporter;
    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn line_observations() -> Vec<Observation> {
        vec![
            Observation::new(vec![0.0]),
            Observation::new(vec![1.0]),
            Observation::new(vec![9.0]),
            Observation::new(vec![10.0]),
        ]
    }

    #[test]
    fn test_assign_observations() {
        let mut observations = line_observations();
        let mut centroids = vec![Centroid::new(0, array![0.0]), Centroid::new(1, array![10.0])];

        let acc = assign_observations(&mut observations, &mut centroids).unwrap();

        assert_eq!(acc.counts, vec![2, 2]);
        assert_relative_eq!(acc.sums[[0, 0]], 1.0);
        assert_relative_eq!(acc.sums[[1, 0]], 19.0);
        assert_eq!(observations[1].cluster(), Some(0));
        assert_eq!(observations[2].cluster(), Some(1));
        assert_eq!(centroids[0].members().iter().copied().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(centroids[1].members().iter().copied().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_assign_discards_previous_members() {
        let mut observations = line_observations();
        let mut centroids = vec![Centroid::new(0, array![0.0]), Centroid::new(1, array![10.0])];
        centroids[1].insert_member(0);

        assign_observations(&mut observations, &mut centroids).unwrap();

        assert!(!centroids[1].members().contains(&0));
    }

    #[test]
    fn test_assign_without_centroids_fails() {
        let mut observations = line_observations();
        let result = assign_observations(&mut observations, &mut []);
        assert!(matches!(result, Err(KMeansError::Configuration(_))));
    }

    #[test]
    fn test_assign_dimension_mismatch() {
        let mut observations = vec![Observation::new(vec![0.0, 1.0])];
        let mut centroids = vec![Centroid::new(0, array![0.0])];

        let result = assign_observations(&mut observations, &mut centroids);
        assert!(matches!(
            result,
            Err(KMeansError::DimensionMismatch {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn test_reposition_uses_true_mean() {
        // Mixed signs: the mean of -4 and 2 is -1
        let mut observations = vec![Observation::new(vec![-4.0, 3.0]), Observation::new(vec![2.0, 5.0])];
        let mut centroids = vec![Centroid::new(0, array![0.0, 0.0]), Centroid::new(1, array![100.0, 100.0])];

        let acc = assign_observations(&mut observations, &mut centroids).unwrap();
        reposition_centroids(&mut centroids, &acc);

        assert_relative_eq!(centroids[0].coordinates()[0], -1.0);
        assert_relative_eq!(centroids[0].coordinates()[1], 4.0);
        // Empty centroid is left where it was
        assert_relative_eq!(centroids[1].coordinates()[0], 100.0);
        assert_relative_eq!(centroids[1].coordinates()[1], 100.0);
    }

    #[test]
    fn test_membership_changed() {
        let mut centroids = vec![Centroid::new(0, array![0.0])];
        centroids[0].insert_member(1);

        let same: Vec<BTreeSet<usize>> = vec![[1].into_iter().collect()];
        let different: Vec<BTreeSet<usize>> = vec![[2].into_iter().collect()];

        assert!(!membership_changed(&same, &centroids));
        assert!(membership_changed(&different, &centroids));
    }

    #[test]
    fn test_run_lloyd_line() {
        let mut observations = line_observations();
        let config = KMeansConfig::new(2).with_shuffle(false);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let result =
            run_lloyd(&mut observations, 1, &config, None, &mut rng, &mut NoopReporter).unwrap();

        assert_eq!(result.status, RunStatus::Converged);
        assert_relative_eq!(result.centroids[0].coordinates()[0], 0.5);
        assert_relative_eq!(result.centroids[1].coordinates()[0], 9.5);
    }

    #[test]
    fn test_run_lloyd_iteration_limit() {
        let mut observations = line_observations();
        let config = KMeansConfig::new(2).with_shuffle(false).with_max_iters(1);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let result =
            run_lloyd(&mut observations, 1, &config, None, &mut rng, &mut NoopReporter).unwrap();

        assert_eq!(result.status, RunStatus::IterationLimitReached);
        assert_eq!(result.n_iterations, 1);
    }

    #[test]
    fn test_run_lloyd_reports_purity() {
        let mut observations = vec![
            Observation::labelled(vec![0.0], "low"),
            Observation::labelled(vec![10.0], "high"),
            Observation::labelled(vec![1.0], "low"),
            Observation::labelled(vec![9.0], "high"),
        ];
        let labels = vec!["low".to_string(), "high".to_string()];
        let config = KMeansConfig::new(2)
            .with_shuffle(false)
            .with_init(InitStrategy::SampleBased);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut reports: Vec<IterationReport> = Vec::new();

        run_lloyd(&mut observations, 1, &config, Some(&labels), &mut rng, &mut reports).unwrap();

        let last = reports.last().unwrap();
        assert!(!last.membership_changed);
        let first = last.centroids[0].purity.as_ref().unwrap();
        assert_relative_eq!(first.percentage("low").unwrap(), 100.0);
        assert_relative_eq!(first.percentage("high").unwrap(), 0.0);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let observations = vec![Observation::new(vec![0.0]), Observation::new(vec![f64::NAN])];
        assert!(matches!(
            validate_input(&observations, 1, &KMeansConfig::new(1)),
            Err(KMeansError::InvalidData(_))
        ));

        let observations = vec![Observation::new(vec![f64::INFINITY])];
        assert!(matches!(
            validate_input(&observations, 1, &KMeansConfig::new(1)),
            Err(KMeansError::InvalidData(_))
        ));
    }

    #[test]
    fn test_validate_input() {
        let observations = line_observations();
        assert!(matches!(
            validate_input(&observations, 0, &KMeansConfig::new(2)),
            Err(KMeansError::Configuration(_))
        ));
        assert!(matches!(
            validate_input(&observations, 1, &KMeansConfig::new(2).with_max_iters(0)),
            Err(KMeansError::Configuration(_))
        ));
        assert!(matches!(
            validate_input(&[], 1, &KMeansConfig::new(2)),
            Err(KMeansError::EmptyInput)
        ));
        assert!(matches!(
            validate_input(&observations, 1, &KMeansConfig::new(5)),
            Err(KMeansError::InvalidK(_))
        ));
        assert!(matches!(
            validate_input(&observations, 2, &KMeansConfig::new(2)),
            Err(KMeansError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
    }
}
