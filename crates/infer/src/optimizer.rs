use crate::errors::{InferError, Result};
use cobyla::{minimize, Func, RhoBeg, StopTols};
use log::warn;

/// Result of a minimization
#[derive(Clone, Debug, PartialEq)]
pub struct OptimResult {
    /// Minimizer
    pub x: Vec<f64>,
    /// Objective value at `x`
    pub fun: f64,
}

/// A minimizer of a scalar function of several variables
pub trait Optimizer {
    /// Optional `(lower, upper)` bounds of each variable
    fn bounds(&self) -> Option<&[(f64, f64)]>;

    /// Minimizes `f` starting from `x0`
    fn optimize(&self, f: &dyn Fn(&[f64]) -> f64, x0: &[f64]) -> Result<OptimResult>;
}

/// Derivative-free constrained optimization by linear approximations
/// as implemented by the [cobyla](https://docs.rs/cobyla) crate
#[derive(Clone, Debug, PartialEq)]
pub struct Cobyla {
    bounds: Option<Vec<(f64, f64)>>,
    rhobeg: f64,
    ftol_rel: f64,
    maxeval: usize,
}

impl Default for Cobyla {
    fn default() -> Self {
        Cobyla {
            bounds: None,
            rhobeg: 0.5,
            ftol_rel: 1e-4,
            maxeval: 200,
        }
    }
}

impl Cobyla {
    /// Unbounded optimizer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `(lower, upper)` bounds of each variable
    pub fn bounds(mut self, bounds: Vec<(f64, f64)>) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Sets the initial variable change
    pub fn rhobeg(mut self, rhobeg: f64) -> Self {
        self.rhobeg = rhobeg;
        self
    }

    /// Sets the relative tolerance on the objective used as stopping criterion
    pub fn ftol_rel(mut self, ftol_rel: f64) -> Self {
        self.ftol_rel = ftol_rel;
        self
    }

    /// Sets the maximum number of objective evaluations
    pub fn maxeval(mut self, maxeval: usize) -> Self {
        self.maxeval = maxeval;
        self
    }
}

impl Optimizer for Cobyla {
    fn bounds(&self) -> Option<&[(f64, f64)]> {
        self.bounds.as_deref()
    }

    fn optimize(&self, f: &dyn Fn(&[f64]) -> f64, x0: &[f64]) -> Result<OptimResult> {
        let bounds = match &self.bounds {
            Some(bounds) if bounds.len() != x0.len() => {
                return Err(InferError::DimensionMismatchError {
                    expected: bounds.len(),
                    actual: x0.len(),
                })
            }
            Some(bounds) => bounds.clone(),
            None => vec![(f64::NEG_INFINITY, f64::INFINITY); x0.len()],
        };
        let cons: Vec<&dyn Func<()>> = vec![];

        match minimize(
            |x: &[f64], _: &mut ()| f(x),
            x0,
            &bounds,
            &cons,
            (),
            self.maxeval,
            RhoBeg::All(self.rhobeg),
            Some(StopTols {
                ftol_rel: self.ftol_rel,
                ..StopTols::default()
            }),
        ) {
            Ok((_, x, fun)) => {
                let fun = if f64::is_nan(fun) { f64::INFINITY } else { fun };
                Ok(OptimResult { x, fun })
            }
            Err((status, x, _)) => {
                warn!("Cobyla optimizer failed, status={status:?}");
                Ok(OptimResult {
                    x,
                    fun: f64::INFINITY,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_cobyla_quadratic() {
        let optimizer = Cobyla::new().ftol_rel(1e-10).maxeval(1000);
        let f = |x: &[f64]| (x[0] - 1.).powi(2) + (x[1] + 2.).powi(2);
        let res = optimizer.optimize(&f, &[0., 0.]).unwrap();
        assert_abs_diff_eq!(res.x[0], 1., epsilon = 1e-3);
        assert_abs_diff_eq!(res.x[1], -2., epsilon = 1e-3);
        assert_abs_diff_eq!(res.fun, 0., epsilon = 1e-6);
        assert_eq!(Optimizer::bounds(&optimizer), None);
    }

    #[test]
    fn test_cobyla_bounded() {
        let optimizer = Cobyla::new()
            .bounds(vec![(2., 5.)])
            .ftol_rel(1e-10)
            .maxeval(1000);
        let f = |x: &[f64]| x[0] * x[0];
        let res = optimizer.optimize(&f, &[4.]).unwrap();
        assert_abs_diff_eq!(res.x[0], 2., epsilon = 1e-3);
        assert_eq!(Optimizer::bounds(&optimizer), Some(&[(2., 5.)][..]));
    }

    #[test]
    fn test_cobyla_bounds_mismatch() {
        let optimizer = Cobyla::new().bounds(vec![(0., 1.)]);
        let f = |x: &[f64]| x.iter().sum::<f64>();
        assert!(matches!(
            optimizer.optimize(&f, &[0.5, 0.5]),
            Err(InferError::DimensionMismatchError {
                expected: 1,
                actual: 2
            })
        ));
    }
}
