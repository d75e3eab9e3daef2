use super::{built_grid, Criterion};
use crate::errors::Result;
use crate::grid::StratificationGrid;
use linfa::Float;
use ndarray::{Array, Array2, ArrayView2, Zip};
use ndarray_rand::{
    rand::seq::SliceRandom, rand::Rng, rand::SeedableRng, rand_distr::Uniform, RandomExt,
};
use rand_xoshiro::Xoshiro256Plus;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Samples are chosen randomly within their stratum.
///
/// Each dimension is handled independently: strata are randomly assigned to
/// the samples and each sample is drawn uniformly within its stratum.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct Random<F: Float, R: Rng> {
    grid: Option<StratificationGrid<F>>,
    /// Random generator used for reproducibility
    rng: R,
}

impl<F: Float> Random<F, Xoshiro256Plus> {
    /// Constructor with default random generator
    ///
    /// ```
    /// use uqbox_doe::Random;
    /// use ndarray_rand::rand::SeedableRng;
    /// use rand_xoshiro::Xoshiro256Plus;
    ///
    /// let criterion = Random::<f64, _>::new().with_rng(Xoshiro256Plus::seed_from_u64(42));
    /// ```
    pub fn new() -> Self {
        Self::new_with_rng(Xoshiro256Plus::from_entropy())
    }
}

impl<F: Float> Default for Random<F, Xoshiro256Plus> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, R: Rng> Random<F, R> {
    /// Constructor with given random generator
    pub fn new_with_rng(rng: R) -> Self {
        Random { grid: None, rng }
    }

    /// Sets the random generator
    pub fn with_rng<R2: Rng>(self, rng: R2) -> Random<F, R2> {
        Random {
            grid: self.grid,
            rng,
        }
    }
}

impl<F: Float, R: Rng> Criterion<F> for Random<F, R> {
    fn create_bins(&mut self, samples: &ArrayView2<F>) -> Result<()> {
        self.grid = Some(StratificationGrid::new(samples.nrows(), samples.ncols())?);
        Ok(())
    }

    fn generate_samples(&mut self) -> Result<Array2<F>> {
        let grid = built_grid(&self.grid)?;
        Ok(classic_lhs(grid, &mut self.rng))
    }
}

/// Draws one sample uniformly within each stratum then shuffles strata
/// independently along each dimension
pub(crate) fn classic_lhs<F: Float, R: Rng>(grid: &StratificationGrid<F>, rng: &mut R) -> Array2<F> {
    let (ns, nx) = (grid.nsamples(), grid.dim());
    let rnd = Array::random_using((ns, nx), Uniform::new(0., 1.), &mut *rng).mapv(F::cast);
    let a = grid.lower_bounds();
    let b = grid.upper_bounds();

    let mut lhs = Array2::zeros((ns, nx));
    for j in 0..nx {
        let mut colj: Vec<F> = Zip::from(rnd.column(j))
            .and(&a)
            .and(&b)
            .map_collect(|&u, &lo, &hi| within_stratum(lo + u * (hi - lo), lo, hi))
            .to_vec();
        colj.shuffle(&mut *rng);
        lhs.column_mut(j).assign(&Array::from_vec(colj));
    }
    lhs
}

/// Keeps `value` in `[lo, hi)` when rounding pushed it onto the upper edge
fn within_stratum<F: Float>(value: F, lo: F, hi: F) -> F {
    value.min(hi - hi * F::epsilon()).max(lo)
}
