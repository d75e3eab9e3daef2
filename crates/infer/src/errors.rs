use thiserror::Error;

/// A result type for inference operations
pub type Result<T> = std::result::Result<T, InferError>;

/// An error when estimating the parameters of an inference model
#[derive(Error, Debug)]
pub enum InferError {
    /// When an argument of the estimation is not acceptable
    #[error("InvalidInput error: {0}")]
    InvalidInputError(String),
    /// When a parameter vector does not match the number of model parameters
    #[error("Dimension mismatch: expected {expected}, found {actual}")]
    DimensionMismatchError {
        /// expected dimension
        expected: usize,
        /// actual dimension
        actual: usize,
    },
    /// When no optimization run gives a finite likelihood
    #[error("Optimization error: {0}")]
    OptimizationError(String),
    /// When error due to the underlying distribution
    #[error(transparent)]
    DistError(#[from] uqbox_dist::DistError),
}
