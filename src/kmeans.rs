use crate::algorithm::{check_dimensions, run_lloyd};
use crate::centroid::Centroid;
use crate::config::KMeansConfig;
use crate::distance::find_nearest_centroids;
use crate::error::KMeansError;
use crate::observation::{label_vocabulary, Observation};
use crate::report::{NoopReporter, Reporter, RunStatus};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Lloyd's k-means over a set of observations.
///
/// The model owns the observations of its last fit, in the (possibly
/// shuffled) order it iterated over them, each carrying its final cluster.
///
/// # Example
///
/// ```
/// use lloyd_kmeans::{KMeans, Observation};
///
/// let observations = vec![
///     Observation::new(vec![0.0, 0.0]),
///     Observation::new(vec![0.5, 0.2]),
///     Observation::new(vec![9.0, 9.5]),
///     Observation::new(vec![9.4, 9.1]),
/// ];
///
/// let mut kmeans = KMeans::new(2, 2);
/// kmeans.fit(observations).unwrap();
///
/// let labels = kmeans.predict(&[Observation::new(vec![8.0, 8.0])]).unwrap();
/// assert_eq!(labels.len(), 1);
/// ```
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Number of features (dimensions)
    d: usize,

    /// Labels supplied through `with_label_vocabulary`
    supplied_vocabulary: Option<Vec<String>>,

    /// Labels the last fit scored purity against
    label_vocabulary: Option<Vec<String>>,

    /// Observations of the last fit with their assignments
    observations: Vec<Observation>,

    /// Fitted centroids (None if not yet fitted)
    centroids: Option<Vec<Centroid>>,

    n_iterations: usize,

    status: Option<RunStatus>,
}

impl KMeans {
    /// Create a new KMeans instance with default configuration.
    ///
    /// # Arguments
    ///
    /// * `d` - Number of features (dimensions) in the data
    /// * `k` - Number of clusters
    pub fn new(d: usize, k: usize) -> Self {
        Self::with_config(d, KMeansConfig::new(k))
    }

    /// Create a new KMeans instance with custom configuration.
    pub fn with_config(d: usize, config: KMeansConfig) -> Self {
        Self {
            config,
            d,
            supplied_vocabulary: None,
            label_vocabulary: None,
            observations: Vec::new(),
            centroids: None,
            n_iterations: 0,
            status: None,
        }
    }

    /// Supply the label vocabulary used for purity scoring.
    ///
    /// Without it, the distinct labels of the fitted observations are used in
    /// order of first appearance, derived afresh on every fit.
    pub fn with_label_vocabulary(mut self, labels: Vec<String>) -> Self {
        self.supplied_vocabulary = Some(labels);
        self
    }

    /// Fit the model to the observations.
    ///
    /// The random generator is seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No observations are given
    /// - k is 0 or larger than the number of observations
    /// - Any observation does not have `d` coordinates
    /// - A coordinate is NaN or infinite
    pub fn fit(&mut self, observations: Vec<Observation>) -> Result<&mut Self, KMeansError> {
        self.fit_with_reporter(observations, &mut NoopReporter)
    }

    /// Fit the model, handing every iteration's state to `reporter`.
    pub fn fit_with_reporter(
        &mut self,
        observations: Vec<Observation>,
        reporter: &mut dyn Reporter,
    ) -> Result<&mut Self, KMeansError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.fit_with_rng(observations, &mut rng, reporter)
    }

    /// Fit the model with a caller-supplied random generator.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &mut self,
        observations: Vec<Observation>,
        rng: &mut R,
        reporter: &mut dyn Reporter,
    ) -> Result<&mut Self, KMeansError> {
        let mut observations = observations;

        let vocabulary = if self.config.report_purity {
            Some(
                self.supplied_vocabulary
                    .clone()
                    .unwrap_or_else(|| label_vocabulary(&observations)),
            )
        } else {
            None
        };

        let result = run_lloyd(
            &mut observations,
            self.d,
            &self.config,
            vocabulary.as_deref(),
            rng,
            reporter,
        )?;

        self.label_vocabulary = vocabulary;
        self.observations = observations;
        self.centroids = Some(result.centroids);
        self.n_iterations = result.n_iterations;
        self.status = Some(result.status);
        Ok(self)
    }

    /// Predict the nearest fitted centroid for each observation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model has not been fitted yet
    /// - An observation does not have `d` coordinates
    pub fn predict(&self, observations: &[Observation]) -> Result<Vec<usize>, KMeansError> {
        let centroids = self.centroids.as_ref().ok_or(KMeansError::NotFitted)?;
        check_dimensions(observations, self.d)?;

        Ok(find_nearest_centroids(observations, centroids))
    }

    /// Get the centroids of the fitted model.
    pub fn centroids(&self) -> Option<&[Centroid]> {
        self.centroids.as_deref()
    }

    /// Observations of the last fit, in iteration order, with their assignments.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Cluster index of every fitted observation, aligned with [`KMeans::observations`].
    pub fn assignments(&self) -> Option<Vec<usize>> {
        self.centroids.as_ref()?;
        self.observations.iter().map(Observation::cluster).collect()
    }

    /// How the last fit ended, or `None` before fitting.
    pub fn status(&self) -> Option<RunStatus> {
        self.status
    }

    /// Number of iterations the last fit ran.
    pub fn n_iterations(&self) -> usize {
        self.n_iterations
    }

    /// Labels the last fit scored purity against, if any.
    pub fn label_vocabulary(&self) -> Option<&[String]> {
        self.label_vocabulary.as_deref()
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Get the number of features (dimensions).
    pub fn d(&self) -> usize {
        self.d
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}
