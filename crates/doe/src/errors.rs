use thiserror::Error;

/// A result type for design of experiments
pub type Result<T> = std::result::Result<T, DoeError>;

/// An error when building a design of experiments
#[derive(Error, Debug)]
pub enum DoeError {
    /// When the distributions or the number of samples are not acceptable
    #[error("InvalidInput error: {0}")]
    InvalidInputError(String),
    /// When a design cannot be built or is not a valid latin hypercube
    #[error("InvalidDesign error: {0}")]
    InvalidDesignError(String),
    /// When a criterion cannot be satisfied given the design size
    #[error("IncompatibleCapability error: {0}")]
    IncompatibleCapabilityError(String),
    /// When a matrix does not have the expected shape
    #[error("Dimension mismatch: expected {expected:?}, found {actual:?}")]
    DimensionMismatchError {
        /// expected (nrows, ncols)
        expected: (usize, usize),
        /// actual (nrows, ncols)
        actual: (usize, usize),
    },
    /// When a distribution fails
    #[error(transparent)]
    DistError(#[from] uqbox_dist::DistError),
    /// When a distance computation fails
    #[error(transparent)]
    DistanceError(#[from] ndarray_stats::errors::MultiInputError),
    /// When a correlation computation fails
    #[error(transparent)]
    CorrelationError(#[from] ndarray_stats::errors::EmptyInput),
}
