use super::centered::centered_lhs;
use super::random::classic_lhs;
use super::{built_grid, Criterion, DEFAULT_ITERATIONS};
use crate::errors::{DoeError, Result};
use crate::grid::StratificationGrid;
use crate::utils::{min_distance, DistanceMetric};
use linfa::Float;
use log::debug;
use ndarray::{Array2, ArrayView2};
use ndarray_rand::{rand::Rng, rand::SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// The minimum distance between samples is maximized.
///
/// `iterations` random latin designs are drawn and the one with the largest
/// minimum pairwise distance is kept. The first design reaching the best
/// distance wins.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct MaxiMin<F: Float, R: Rng> {
    grid: Option<StratificationGrid<F>>,
    /// Number of candidate designs
    iterations: usize,
    /// Distance used between samples
    metric: DistanceMetric,
    /// Whether candidates samples are at the middle of their stratum
    centered: bool,
    /// Minimum distance of the last retained design
    best_score: Option<F>,
    /// Random generator used for reproducibility
    rng: R,
}

impl<F: Float> MaxiMin<F, Xoshiro256Plus> {
    /// Constructor with default random generator
    ///
    /// ```
    /// use uqbox_doe::{DistanceMetric, MaxiMin};
    ///
    /// let criterion = MaxiMin::<f64, _>::new()
    ///     .iterations(20)
    ///     .metric(DistanceMetric::Manhattan);
    /// ```
    pub fn new() -> Self {
        Self::new_with_rng(Xoshiro256Plus::from_entropy())
    }
}

impl<F: Float> Default for MaxiMin<F, Xoshiro256Plus> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, R: Rng> MaxiMin<F, R> {
    /// Constructor with given random generator
    pub fn new_with_rng(rng: R) -> Self {
        MaxiMin {
            grid: None,
            iterations: DEFAULT_ITERATIONS,
            metric: DistanceMetric::default(),
            centered: false,
            best_score: None,
            rng,
        }
    }

    /// Sets the number of candidate designs (at least one)
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    /// Sets the distance used between samples
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Draws candidates with samples at the middle of their stratum
    pub fn centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    /// Sets the random generator
    pub fn with_rng<R2: Rng>(self, rng: R2) -> MaxiMin<F, R2> {
        MaxiMin {
            grid: self.grid,
            iterations: self.iterations,
            metric: self.metric,
            centered: self.centered,
            best_score: self.best_score,
            rng,
        }
    }

    /// Minimum pairwise distance of the last generated design
    pub fn best_score(&self) -> Option<F> {
        self.best_score
    }

    fn candidate(&mut self, grid: &StratificationGrid<F>) -> Array2<F> {
        if self.centered {
            centered_lhs(grid, &mut self.rng)
        } else {
            classic_lhs(grid, &mut self.rng)
        }
    }
}

impl<F: Float, R: Rng> Criterion<F> for MaxiMin<F, R> {
    fn create_bins(&mut self, samples: &ArrayView2<F>) -> Result<()> {
        if samples.nrows() < 2 {
            return Err(DoeError::IncompatibleCapabilityError(format!(
                "MaxiMin requires at least 2 samples, got {}",
                samples.nrows()
            )));
        }
        self.grid = Some(StratificationGrid::new(samples.nrows(), samples.ncols())?);
        self.best_score = None;
        Ok(())
    }

    fn generate_samples(&mut self) -> Result<Array2<F>> {
        let grid = built_grid(&self.grid)?.clone();

        let mut lhs_maximin = self.candidate(&grid);
        let mut max_dist = min_distance(&lhs_maximin, self.metric)?;
        for i in 1..self.iterations {
            let lhs = self.candidate(&grid);
            let d_min = min_distance(&lhs, self.metric)?;
            if max_dist < d_min {
                debug!("MaxiMin candidate {i} improves min distance {max_dist} -> {d_min}");
                max_dist = d_min;
                lhs_maximin = lhs;
            }
        }
        debug!("MaxiMin retained min distance {max_dist}");
        self.best_score = Some(max_dist);
        Ok(lhs_maximin)
    }
}
