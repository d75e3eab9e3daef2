use super::random::classic_lhs;
use super::{built_grid, Criterion, DEFAULT_ITERATIONS};
use crate::errors::{DoeError, Result};
use crate::grid::StratificationGrid;
use crate::utils::max_abs_correlation;
use linfa::Float;
use log::debug;
use ndarray::{Array2, ArrayView2};
use ndarray_rand::{rand::Rng, rand::SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// The correlation between the dimensions of the design is minimized.
///
/// `iterations` random latin designs are drawn and the one with the smallest
/// maximum absolute Pearson correlation between two dimensions is kept.
/// The first design reaching the best correlation wins.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct MinCorrelation<F: Float, R: Rng> {
    grid: Option<StratificationGrid<F>>,
    /// Number of candidate designs
    iterations: usize,
    /// Maximum absolute correlation of the last retained design
    best_score: Option<F>,
    /// Random generator used for reproducibility
    rng: R,
}

impl<F: Float> MinCorrelation<F, Xoshiro256Plus> {
    /// Constructor with default random generator
    pub fn new() -> Self {
        Self::new_with_rng(Xoshiro256Plus::from_entropy())
    }
}

impl<F: Float> Default for MinCorrelation<F, Xoshiro256Plus> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, R: Rng> MinCorrelation<F, R> {
    /// Constructor with given random generator
    pub fn new_with_rng(rng: R) -> Self {
        MinCorrelation {
            grid: None,
            iterations: DEFAULT_ITERATIONS,
            best_score: None,
            rng,
        }
    }

    /// Sets the number of candidate designs (at least one)
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    /// Sets the random generator
    pub fn with_rng<R2: Rng>(self, rng: R2) -> MinCorrelation<F, R2> {
        MinCorrelation {
            grid: self.grid,
            iterations: self.iterations,
            best_score: self.best_score,
            rng,
        }
    }

    /// Maximum absolute correlation of the last generated design, in `[0, 1]`
    pub fn best_score(&self) -> Option<F> {
        self.best_score
    }
}

impl<F: Float, R: Rng> Criterion<F> for MinCorrelation<F, R> {
    fn create_bins(&mut self, samples: &ArrayView2<F>) -> Result<()> {
        let (ns, nx) = samples.dim();
        if nx < 2 {
            return Err(DoeError::IncompatibleCapabilityError(format!(
                "MinCorrelation requires at least 2 dimensions, got {nx}"
            )));
        }
        if ns < 2 {
            return Err(DoeError::IncompatibleCapabilityError(format!(
                "MinCorrelation requires at least 2 samples, got {ns}"
            )));
        }
        self.grid = Some(StratificationGrid::new(ns, nx)?);
        self.best_score = None;
        Ok(())
    }

    fn generate_samples(&mut self) -> Result<Array2<F>> {
        let grid = built_grid(&self.grid)?.clone();

        let mut lhs_mincorr = classic_lhs(&grid, &mut self.rng);
        let mut min_corr = max_abs_correlation(&lhs_mincorr)?;
        for i in 1..self.iterations {
            let lhs = classic_lhs(&grid, &mut self.rng);
            let corr = max_abs_correlation(&lhs)?;
            if corr < min_corr {
                debug!("MinCorrelation candidate {i} improves correlation {min_corr} -> {corr}");
                min_corr = corr;
                lhs_mincorr = lhs;
            }
        }
        debug!("MinCorrelation retained correlation {min_corr}");
        self.best_score = Some(min_corr);
        Ok(lhs_mincorr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::tests::assert_latin;
    use approx::assert_abs_diff_eq;

    fn run(iterations: usize, ns: usize, nx: usize) -> (Array2<f64>, f64) {
        let mut criterion = MinCorrelation::<f64, _>::new()
            .iterations(iterations)
            .with_rng(Xoshiro256Plus::seed_from_u64(42));
        criterion
            .create_bins(&Array2::<f64>::zeros((ns, nx)).view())
            .unwrap();
        let samples = criterion.generate_samples().unwrap();
        (samples, criterion.best_score().unwrap())
    }

    #[test]
    fn test_min_correlation_bounded() {
        for iterations in [1, 10, 50] {
            let (samples, score) = run(iterations, 10, 3);
            assert_latin(&samples);
            assert!((0. ..=1.).contains(&score), "{score}");
            assert_abs_diff_eq!(score, max_abs_correlation(&samples).unwrap(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_min_correlation_improves() {
        let (_, score1) = run(1, 20, 2);
        let (_, score100) = run(100, 20, 2);
        assert!(score100 <= score1);
    }

    #[test]
    fn test_min_correlation_requires_two_dimensions() {
        let mut criterion = MinCorrelation::<f64, _>::new();
        assert!(matches!(
            criterion.create_bins(&Array2::<f64>::zeros((10, 1)).view()),
            Err(DoeError::IncompatibleCapabilityError(_))
        ));
        assert!(criterion
            .create_bins(&Array2::<f64>::zeros((1, 3)).view())
            .is_err());
    }
}
