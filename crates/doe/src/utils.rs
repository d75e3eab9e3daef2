use crate::errors::Result;
use linfa::Float;
use ndarray::{Array, Array1, ArrayBase, Data, Ix2};
use ndarray_stats::{CorrelationExt, DeviationExt};
use rayon::prelude::*;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Distance used to compare two samples of a design
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum DistanceMetric {
    /// L2 norm of the difference
    #[default]
    Euclidean,
    /// L1 norm of the difference, a.k.a. cityblock
    Manhattan,
    /// Infinity norm of the difference
    Chebyshev,
}

/// Computes the pairwise distances between rows of a 2D-array using parallel processing
/// Warning : The result is expected to be used in a context where order does not matter
/// (e.g., get min distance) as the order of distances depends on the order of parallel execution
pub fn pdist<F: Float>(
    x: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>,
    metric: DistanceMetric,
) -> Result<Array1<F>> {
    let nrows = x.nrows();

    let pairs: Vec<_> = (0..nrows)
        .flat_map(|i| ((i + 1)..nrows).map(move |j| (i, j)))
        .collect();

    let distances = pairs
        .par_iter()
        .map(|&(i, j)| {
            let a = x.row(i);
            let b = x.row(j);
            match metric {
                DistanceMetric::Euclidean => a.l2_dist(&b).map(F::cast),
                DistanceMetric::Manhattan => a.l1_dist(&b),
                DistanceMetric::Chebyshev => a.linf_dist(&b),
            }
        })
        .collect::<std::result::Result<Vec<F>, _>>()?;

    Ok(Array::from_vec(distances))
}

/// Minimum pairwise distance between rows of a 2D-array, infinity when less than two rows
pub fn min_distance<F: Float>(
    x: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>,
    metric: DistanceMetric,
) -> Result<F> {
    Ok(pdist(x, metric)?.fold(F::infinity(), |acc, &d| acc.min(d)))
}

/// Maximum absolute Pearson correlation coefficient between two distinct columns of a 2D-array.
///
/// Undefined coefficients (constant column) count as a full correlation.
pub fn max_abs_correlation<F: Float>(x: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<F> {
    // pearson_correlation expects variables as rows
    let corr = x.t().pearson_correlation()?;
    let nx = corr.nrows();
    let mut max_corr = F::zero();
    for i in 0..nx {
        for j in (i + 1)..nx {
            let c = corr[[i, j]];
            let c = if c.is_finite() { c.abs() } else { F::one() };
            max_corr = max_corr.max(c);
        }
    }
    Ok(max_corr.min(F::one()))
}
