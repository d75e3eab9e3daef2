use crate::errors::{DistError, Result};
use linfa::Float;
use ndarray::{Array1, ArrayView2, Axis};

/// Copula cdf evaluation
pub trait CopulaCdf<F: Float> {
    /// Evaluates the copula cdf given a (n, dim) matrix of unit uniform samples
    fn evaluate_cdf(&self, unit_uniform_samples: &ArrayView2<F>) -> Array1<F>;
}

/// Copula density evaluation
pub trait CopulaPdf<F: Float> {
    /// Evaluates the copula density given a (n, dim) matrix of unit uniform samples
    fn evaluate_pdf(&self, unit_uniform_samples: &ArrayView2<F>) -> Array1<F>;
}

/// Dependency structure used to build a [crate::JointCopula] from marginals
pub trait Copula<F: Float> {
    /// Ordered list of (name, value) parameters
    fn parameters(&self) -> Vec<(String, F)>;

    /// Sets the parameter `name` to `value`
    fn update_parameter(&mut self, name: &str, value: F) -> Result<()>;

    /// Checks the copula can be used with `n_marginals` marginals
    fn check_marginals(&self, n_marginals: usize) -> Result<()> {
        if n_marginals < 2 {
            return Err(DistError::InvalidInputError(format!(
                "A copula requires at least two marginals, got {n_marginals}"
            )));
        }
        Ok(())
    }

    /// Cdf capability if any
    fn as_cdf(&self) -> Option<&dyn CopulaCdf<F>> {
        None
    }

    /// Density capability if any
    fn as_pdf(&self) -> Option<&dyn CopulaPdf<F>> {
        None
    }
}

/// Independence copula: `C(u) = prod(u_i)` with unit density
#[derive(Clone, Copy, Debug, Default)]
pub struct Independence;

impl<F: Float> Copula<F> for Independence {
    fn parameters(&self) -> Vec<(String, F)> {
        vec![]
    }

    fn update_parameter(&mut self, name: &str, _value: F) -> Result<()> {
        Err(DistError::UnknownParameterError(name.to_string()))
    }

    fn as_cdf(&self) -> Option<&dyn CopulaCdf<F>> {
        Some(self)
    }

    fn as_pdf(&self) -> Option<&dyn CopulaPdf<F>> {
        Some(self)
    }
}

impl<F: Float> CopulaCdf<F> for Independence {
    fn evaluate_cdf(&self, unit_uniform_samples: &ArrayView2<F>) -> Array1<F> {
        unit_uniform_samples.map_axis(Axis(1), |row| row.fold(F::one(), |acc, &u| acc * u))
    }
}

impl<F: Float> CopulaPdf<F> for Independence {
    fn evaluate_pdf(&self, unit_uniform_samples: &ArrayView2<F>) -> Array1<F> {
        Array1::ones(unit_uniform_samples.nrows())
    }
}
