//! # lloyd-kmeans
//!
//! Lloyd's k-means clustering of numeric observations, with optional label
//! purity diagnostics.
//!
//! ## Features
//!
//! - **Two initialization strategies**: copy k (shuffled) observations, or
//!   sample uniformly within the bounding box of the data
//! - **Membership-based convergence**: iterates until no observation changes
//!   cluster, with an iteration cap as a safety net
//! - **Parallel assignment**: the nearest-centroid search uses rayon while
//!   keeping results deterministic
//! - **Structured diagnostics**: per-iteration reports, including label purity
//!   when ground-truth labels are available
//!
//! ## Example
//!
//! ```rust
//! use lloyd_kmeans::{KMeans, KMeansConfig, Observation, RunStatus};
//!
//! let observations = vec![
//!     Observation::new(vec![0.0]),
//!     Observation::new(vec![1.0]),
//!     Observation::new(vec![9.0]),
//!     Observation::new(vec![10.0]),
//! ];
//!
//! let config = KMeansConfig::new(2).with_shuffle(false);
//! let mut kmeans = KMeans::with_config(1, config);
//! kmeans.fit(observations).unwrap();
//!
//! assert_eq!(kmeans.status(), Some(RunStatus::Converged));
//! let centroids = kmeans.centroids().unwrap();
//! assert_eq!(centroids[0].coordinates()[0], 0.5);
//! assert_eq!(centroids[1].coordinates()[0], 9.5);
//! ```
//!
//! ## Labelled data
//!
//! ```rust,no_run
//! use lloyd_kmeans::{Dataset, KMeans, KMeansConfig, LogReporter};
//!
//! let dataset = Dataset::from_path("data/iris.txt", true).unwrap();
//! let config = KMeansConfig::new(3).with_purity(true).with_seed(42);
//!
//! let mut kmeans = KMeans::with_config(dataset.dimensions, config)
//!     .with_label_vocabulary(dataset.labels.clone());
//! kmeans
//!     .fit_with_reporter(dataset.observations, &mut LogReporter)
//!     .unwrap();
//! ```

mod algorithm;
mod centroid;
mod config;
mod dataset;
mod distance;
mod error;
mod init;
mod kmeans;
mod observation;
mod purity;
mod report;

pub use algorithm::{assign_observations, membership_changed, reposition_centroids, Accumulator};
pub use centroid::Centroid;
pub use config::{InitStrategy, KMeansConfig};
pub use dataset::Dataset;
pub use distance::euclidean_distance;
pub use error::KMeansError;
pub use init::{bounding_box, initialize_centroids};
pub use kmeans::KMeans;
pub use observation::{label_vocabulary, Observation};
pub use purity::{purity, Purity};
pub use report::{
    CentroidReport, IterationReport, LogReporter, NoopReporter, Reporter, RunStatus, RunSummary,
};
