use std::fmt;
use std::str::FromStr;

/// How the initial centroids are placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitStrategy {
    /// Use the coordinates of the first k (shuffled) observations
    #[default]
    SampleBased,
    /// Draw each coordinate uniformly within the per-dimension bounding box of the data
    BoundingBoxRandom,
}

impl fmt::Display for InitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitStrategy::SampleBased => write!(f, "sample-based"),
            InitStrategy::BoundingBoxRandom => write!(f, "bounding-box-random"),
        }
    }
}

impl FromStr for InitStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sample" | "sample-based" => Ok(InitStrategy::SampleBased),
            "bounding-box" | "bounding-box-random" => Ok(InitStrategy::BoundingBoxRandom),
            other => Err(format!(
                "unknown init strategy '{}' (expected sample-based or bounding-box-random)",
                other
            )),
        }
    }
}

/// Configuration for the k-means engine
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Maximum number of iterations. Reaching it while memberships are still
    /// changing ends the run with `RunStatus::IterationLimitReached`.
    pub max_iters: usize,

    /// Random seed for the observation shuffle and bounding-box sampling
    pub seed: u64,

    /// Initial centroid placement
    pub init: InitStrategy,

    /// Shuffle the observations before initialization
    pub shuffle: bool,

    /// Compute label purity for every centroid on each iteration
    pub report_purity: bool,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 8,
            max_iters: 300,
            seed: 0,
            init: InitStrategy::SampleBased,
            shuffle: true,
            report_purity: false,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the initialization strategy
    pub fn with_init(mut self, init: InitStrategy) -> Self {
        self.init = init;
        self
    }

    /// Enable or disable the initial shuffle
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Enable or disable purity reporting
    pub fn with_purity(mut self, report_purity: bool) -> Self {
        self.report_purity = report_purity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = KMeansConfig::new(4)
            .with_max_iters(10)
            .with_seed(7)
            .with_init(InitStrategy::BoundingBoxRandom)
            .with_shuffle(false)
            .with_purity(true);

        assert_eq!(config.k, 4);
        assert_eq!(config.max_iters, 10);
        assert_eq!(config.seed, 7);
        assert_eq!(config.init, InitStrategy::BoundingBoxRandom);
        assert!(!config.shuffle);
        assert!(config.report_purity);
    }

    #[test]
    fn test_init_strategy_parse() {
        assert_eq!(
            "sample".parse::<InitStrategy>().unwrap(),
            InitStrategy::SampleBased
        );
        assert_eq!(
            "bounding-box-random".parse::<InitStrategy>().unwrap(),
            InitStrategy::BoundingBoxRandom
        );
        assert!("kmeans++".parse::<InitStrategy>().is_err());
    }
}
