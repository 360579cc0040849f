use thiserror::Error;

/// Error types for the lloyd-kmeans library
#[derive(Error, Debug)]
pub enum KMeansError {
    /// The number of clusters k is invalid (must be > 0 and <= number of observations)
    #[error("Invalid k value: {0}")]
    InvalidK(String),

    /// No observations were supplied
    #[error("No observations supplied")]
    EmptyInput,

    /// A vector does not have the run's dimensionality
    #[error("Dimension mismatch: expected {expected} coordinates, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// An observation holds values the engine cannot cluster (NaN or infinite)
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The engine was configured with values it cannot run with
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Model has not been fitted yet
    #[error("Model has not been fitted. Call fit() first.")]
    NotFitted,

    /// Reading an input file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The delimited reader rejected the input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A line of delimited input could not be parsed
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}
