use crate::errors::{DoeError, Result};
use linfa::Float;
use ndarray::{s, Array1, ArrayView1};

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Partition of `[0, 1]` into `ns` equal-probability strata, shared by
/// the `nx` dimensions of a design.
///
/// The stratum `k` spans `[k/ns, (k+1)/ns)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct StratificationGrid<F: Float> {
    /// `ns + 1` strictly increasing edges from 0 to 1
    cut: Array1<F>,
    /// Number of dimensions
    nx: usize,
}

impl<F: Float> StratificationGrid<F> {
    /// Constructor given the number of strata `ns` (i.e. the number of samples)
    /// and the number of dimensions `nx`
    ///
    /// ```
    /// use uqbox_doe::StratificationGrid;
    ///
    /// let grid = StratificationGrid::<f64>::new(4, 2).unwrap();
    /// assert_eq!(grid.bin_width(), 0.25);
    /// ```
    pub fn new(ns: usize, nx: usize) -> Result<Self> {
        if ns < 1 {
            return Err(DoeError::InvalidDesignError(
                "Stratification requires at least one sample".to_string(),
            ));
        }
        if nx < 1 {
            return Err(DoeError::InvalidDesignError(
                "Stratification requires at least one dimension".to_string(),
            ));
        }
        let cut = Array1::from_shape_fn(ns + 1, |k| F::cast(k) / F::cast(ns));
        Ok(StratificationGrid { cut, nx })
    }

    /// Number of strata per dimension
    pub fn nsamples(&self) -> usize {
        self.cut.len() - 1
    }

    /// Number of dimensions
    pub fn dim(&self) -> usize {
        self.nx
    }

    /// Stratum edges
    pub fn edges(&self) -> ArrayView1<F> {
        self.cut.view()
    }

    /// Lower bounds of the strata
    pub fn lower_bounds(&self) -> ArrayView1<F> {
        self.cut.slice(s![..-1])
    }

    /// Upper bounds of the strata
    pub fn upper_bounds(&self) -> ArrayView1<F> {
        self.cut.slice(s![1..])
    }

    /// Width of a stratum
    pub fn bin_width(&self) -> F {
        F::one() / F::cast(self.nsamples())
    }

    /// Centers of the strata
    pub fn midpoints(&self) -> Array1<F> {
        (&self.lower_bounds() + &self.upper_bounds()) / F::cast(2.)
    }

    /// Index of the stratum containing `value`, `None` if outside `[0, 1)`
    pub fn stratum_of(&self, value: F) -> Option<usize> {
        if !(value >= F::zero() && value < F::one()) {
            return None;
        }
        let ns = self.nsamples();
        // edges are rounded, adjust the guess around value * ns
        let mut k = (value * F::cast(ns)).floor().to_usize().unwrap_or(0).min(ns - 1);
        while k > 0 && value < self.cut[k] {
            k -= 1;
        }
        while k + 1 < ns && value >= self.cut[k + 1] {
            k += 1;
        }
        Some(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_grid() {
        let grid = StratificationGrid::<f64>::new(4, 3).unwrap();
        assert_eq!(grid.nsamples(), 4);
        assert_eq!(grid.dim(), 3);
        let expected_edges = array![0., 0.25, 0.5, 0.75, 1.];
        let expected_lower = array![0., 0.25, 0.5, 0.75];
        let expected_upper = array![0.25, 0.5, 0.75, 1.];
        assert_abs_diff_eq!(grid.edges(), expected_edges.view());
        assert_abs_diff_eq!(grid.lower_bounds(), expected_lower.view());
        assert_abs_diff_eq!(grid.upper_bounds(), expected_upper.view());
        assert_abs_diff_eq!(grid.midpoints(), array![0.125, 0.375, 0.625, 0.875]);
    }

    #[test]
    fn test_grid_edges_increasing() {
        let grid = StratificationGrid::<f64>::new(37, 1).unwrap();
        let edges = grid.edges();
        assert_eq!(edges[0], 0.);
        assert_eq!(edges[37], 1.);
        assert!(edges.windows(2).into_iter().all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_stratum_of() {
        let grid = StratificationGrid::<f64>::new(10, 1).unwrap();
        assert_eq!(grid.stratum_of(0.), Some(0));
        assert_eq!(grid.stratum_of(0.3), Some(3));
        assert_eq!(grid.stratum_of(0.2999999), Some(2));
        assert_eq!(grid.stratum_of(0.99999), Some(9));
        assert_eq!(grid.stratum_of(1.), None);
        assert_eq!(grid.stratum_of(-0.1), None);
        assert_eq!(grid.stratum_of(f64::NAN), None);
    }

    #[test]
    fn test_invalid_grid() {
        assert!(matches!(
            StratificationGrid::<f64>::new(0, 2),
            Err(DoeError::InvalidDesignError(_))
        ));
        assert!(StratificationGrid::<f64>::new(3, 0).is_err());
    }
}
