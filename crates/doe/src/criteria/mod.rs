//! Criteria used to place the samples of a latin hypercube design.
//!
//! A criterion is given the shape of the design through [Criterion::create_bins]
//! and then generates unit hypercube samples satisfying the latin hypercube
//! property: along every dimension, each of the `ns` strata of `[0, 1)` contains
//! exactly one sample.
//!
//! Available criteria:
//! * [Random]: samples are placed randomly within their strata,
//! * [Centered]: samples are placed at the middle of their strata,
//! * [MaxiMin]: the minimum distance between samples is maximized,
//! * [MinCorrelation]: the correlation between dimensions is minimized.
//!
//! Other placement policies can be used by implementing [Criterion].
mod centered;
mod maximin;
mod min_correlation;
mod random;

pub use centered::*;
pub use maximin::*;
pub use min_correlation::*;
pub use random::*;

use crate::errors::{DoeError, Result};
use crate::grid::StratificationGrid;
use linfa::Float;
use ndarray::{Array2, ArrayView2};

/// Default number of candidate designs drawn by optimizing criteria
pub const DEFAULT_ITERATIONS: usize = 100;

/// Placement policy of the samples of a latin hypercube design
pub trait Criterion<F: Float> {
    /// Builds the stratification of `[0, 1]` given a (ns, nx) matrix
    /// where ns is the number of samples and nx the dimension of the design.
    fn create_bins(&mut self, samples: &ArrayView2<F>) -> Result<()>;

    /// Generates a (ns, nx) matrix of samples in `[0, 1)^nx` with one sample
    /// per stratum along each dimension.
    fn generate_samples(&mut self) -> Result<Array2<F>>;
}

/// Returns the grid built by `create_bins`
pub(crate) fn built_grid<F: Float>(
    grid: &Option<StratificationGrid<F>>,
) -> Result<&StratificationGrid<F>> {
    grid.as_ref().ok_or_else(|| {
        DoeError::InvalidDesignError(
            "create_bins() should be called before generate_samples()".to_string(),
        )
    })
}
