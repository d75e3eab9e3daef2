use super::{built_grid, Criterion};
use crate::errors::Result;
use crate::grid::StratificationGrid;
use linfa::Float;
use ndarray::{Array2, ArrayView2};
use ndarray_rand::{rand::seq::SliceRandom, rand::Rng, rand::SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Samples are placed at the middle of their stratum.
///
/// Only the assignment of strata to samples is random, the design has `ns`
/// distinct levels per dimension.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct Centered<F: Float, R: Rng> {
    grid: Option<StratificationGrid<F>>,
    /// Random generator used for reproducibility
    rng: R,
}

impl<F: Float> Centered<F, Xoshiro256Plus> {
    /// Constructor with default random generator
    pub fn new() -> Self {
        Self::new_with_rng(Xoshiro256Plus::from_entropy())
    }
}

impl<F: Float> Default for Centered<F, Xoshiro256Plus> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, R: Rng> Centered<F, R> {
    /// Constructor with given random generator
    pub fn new_with_rng(rng: R) -> Self {
        Centered { grid: None, rng }
    }

    /// Sets the random generator
    pub fn with_rng<R2: Rng>(self, rng: R2) -> Centered<F, R2> {
        Centered {
            grid: self.grid,
            rng,
        }
    }
}

impl<F: Float, R: Rng> Criterion<F> for Centered<F, R> {
    fn create_bins(&mut self, samples: &ArrayView2<F>) -> Result<()> {
        self.grid = Some(StratificationGrid::new(samples.nrows(), samples.ncols())?);
        Ok(())
    }

    fn generate_samples(&mut self) -> Result<Array2<F>> {
        let grid = built_grid(&self.grid)?;
        Ok(centered_lhs(grid, &mut self.rng))
    }
}

/// Shuffles strata midpoints independently along each dimension
pub(crate) fn centered_lhs<F: Float, R: Rng>(grid: &StratificationGrid<F>, rng: &mut R) -> Array2<F> {
    let (ns, nx) = (grid.nsamples(), grid.dim());
    let mut c = grid.midpoints().to_vec();
    let mut lhs = Array2::zeros((ns, nx));
    for mut col in lhs.columns_mut() {
        c.shuffle(&mut *rng);
        col.assign(&ndarray::aview1(&c));
    }
    lhs
}
