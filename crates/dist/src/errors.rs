use thiserror::Error;

/// A result type for distribution operations
pub type Result<T> = std::result::Result<T, DistError>;

/// An error when building or evaluating a distribution
#[derive(Error, Debug)]
pub enum DistError {
    /// When an argument is not acceptable to build a distribution
    #[error("InvalidInput error: {0}")]
    InvalidInputError(String),
    /// When a capability (cdf, pdf, ...) is requested but not provided
    #[error("Missing capability: {0}")]
    MissingCapabilityError(String),
    /// When a parameter key is not known by the distribution
    #[error("Unknown parameter: {0}")]
    UnknownParameterError(String),
    /// When input data dimension does not match the distribution dimension
    #[error("Dimension mismatch: expected {expected}, found {actual}")]
    DimensionMismatchError {
        /// expected dimension
        expected: usize,
        /// actual dimension
        actual: usize,
    },
    /// When error due to a bad value
    #[error("InvalidValue error: {0}")]
    InvalidValueError(String),
}
