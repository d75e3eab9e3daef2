use crate::errors::{InferError, Result};
use crate::model::InferenceModel;
use crate::optimizer::{Cobyla, Optimizer};
use linfa::Float;
use log::{debug, info, warn};
use ndarray::{Array, Array1, Array2, ArrayView1, Axis};
use ndarray_rand::{rand::Rng, rand::SeedableRng, rand_distr::Uniform, RandomExt};
use rand_xoshiro::Xoshiro256Plus;
use std::cell::RefCell;

/// Maximum likelihood estimation of the parameters of an [InferenceModel].
///
/// When the model provides a closed-form fit (see [InferenceModel::as_fittable]),
/// it is used to compute the estimate. Otherwise the negative log-likelihood
/// is minimized with an [Optimizer] from several starting points and the
/// estimate with the largest log-likelihood is retained.
///
/// ```
/// use uqbox_dist::Uniform;
/// use uqbox_infer::{DistributionModel, Mle};
/// use ndarray::array;
///
/// let model = DistributionModel::new(Uniform::default(), &["loc", "scale"]).unwrap();
/// let mut mle = Mle::new(model);
/// mle.run(&array![1., 2., 4.].view()).unwrap();
/// assert_eq!(mle.mle().unwrap(), &array![1., 3.]);
/// ```
pub struct Mle<F: Float, R: Rng> {
    model: Box<dyn InferenceModel<F>>,
    /// Number of optimization runs when no initial parameters are given
    n_optimizations: usize,
    /// (nstarts, n_parameters) matrix of starting points
    initial_parameters: Option<Array2<F>>,
    optimizer: Box<dyn Optimizer>,
    mle: Option<Array1<F>>,
    max_log_like: Option<F>,
    /// Random generator used for reproducibility
    rng: R,
}

impl<F: Float> Mle<F, Xoshiro256Plus> {
    /// Constructor with default optimizer and default random generator
    pub fn new(model: impl InferenceModel<F> + 'static) -> Self {
        Self::new_with_rng(model, Xoshiro256Plus::from_entropy())
    }
}

impl<F: Float, R: Rng> Mle<F, R> {
    /// Constructor with given random generator
    pub fn new_with_rng(model: impl InferenceModel<F> + 'static, rng: R) -> Self {
        Mle {
            model: Box::new(model),
            n_optimizations: 1,
            initial_parameters: None,
            optimizer: Box::new(Cobyla::new()),
            mle: None,
            max_log_like: None,
            rng,
        }
    }

    /// Sets the number of optimization runs (at least one).
    ///
    /// Starting points are drawn uniformly in `[0, 1]` or within the optimizer
    /// bounds when given. Ignored when initial parameters are given.
    pub fn n_optimizations(mut self, n_optimizations: usize) -> Self {
        self.n_optimizations = n_optimizations.max(1);
        self
    }

    /// Sets the (nstarts, n_parameters) matrix of starting points
    pub fn initial_parameters(mut self, initial_parameters: Array2<F>) -> Self {
        self.initial_parameters = Some(initial_parameters);
        self
    }

    /// Sets a single starting point of n_parameters values
    pub fn initial_point(self, x0: Array1<F>) -> Self {
        self.initial_parameters(x0.insert_axis(Axis(0)))
    }

    /// Sets the optimizer minimizing the negative log-likelihood
    pub fn optimizer(mut self, optimizer: impl Optimizer + 'static) -> Self {
        self.optimizer = Box::new(optimizer);
        self
    }

    /// Sets the random generator
    pub fn with_rng<R2: Rng>(self, rng: R2) -> Mle<F, R2> {
        Mle {
            model: self.model,
            n_optimizations: self.n_optimizations,
            initial_parameters: self.initial_parameters,
            optimizer: self.optimizer,
            mle: self.mle,
            max_log_like: self.max_log_like,
            rng,
        }
    }

    /// Parameter vector maximizing the likelihood, `None` before the first run
    pub fn mle(&self) -> Option<&Array1<F>> {
        self.mle.as_ref()
    }

    /// Log-likelihood at [Mle::mle], `None` before the first run
    pub fn max_log_like(&self) -> Option<F> {
        self.max_log_like
    }

    /// Estimates the parameters of the model given `data`.
    ///
    /// # Errors
    ///
    /// * [InferError::InvalidInputError] when `data` is empty
    /// * [InferError::DimensionMismatchError] when initial parameters do not
    ///   match the number of model parameters
    /// * [InferError::OptimizationError] when no run gives a finite log-likelihood
    pub fn run(&mut self, data: &ArrayView1<F>) -> Result<()> {
        if data.is_empty() {
            return Err(InferError::InvalidInputError(
                "data should not be empty".to_string(),
            ));
        }
        info!(
            "Evaluating maximum likelihood estimate for inference model {}",
            self.model.name()
        );
        let (mle, max_log_like) = if self.model.as_fittable().is_some() {
            self.run_fit(data)?
        } else {
            self.run_optimization(data)?
        };
        if !max_log_like.is_finite() {
            return Err(InferError::OptimizationError(format!(
                "no finite log-likelihood found, best is {max_log_like}"
            )));
        }
        info!("ML estimation completed with log-likelihood {max_log_like}");
        self.mle = Some(mle);
        self.max_log_like = Some(max_log_like);
        Ok(())
    }

    fn run_fit(&mut self, data: &ArrayView1<F>) -> Result<(Array1<F>, F)> {
        let mut best: Option<(Array1<F>, F)> = None;
        for _ in 0..self.n_optimizations {
            let params = match self.model.as_fittable() {
                Some(fittable) => fittable.fit(data.view())?,
                None => break,
            };
            let log_like = self.model.evaluate_log_likelihood(params.view(), data.view())?;
            if best.as_ref().map_or(true, |(_, best_ll)| log_like > *best_ll) {
                best = Some((params, log_like));
            }
        }
        best.ok_or_else(|| InferError::OptimizationError("closed-form fit unavailable".to_string()))
    }

    fn run_optimization(&mut self, data: &ArrayView1<F>) -> Result<(Array1<F>, F)> {
        let x0s = self.starting_points()?;
        let model = RefCell::new(&mut self.model);
        let objective = |x: &[f64]| -> f64 {
            let params = Array::from_iter(x.iter().map(|&v| F::cast(v)));
            match model
                .borrow_mut()
                .evaluate_log_likelihood(params.view(), data.view())
            {
                Ok(log_like) => match log_like.to_f64() {
                    Some(v) if v.is_finite() => -v,
                    _ => f64::INFINITY,
                },
                Err(err) => {
                    debug!("Log-likelihood evaluation failed: {err}");
                    f64::INFINITY
                }
            }
        };

        let mut best: Option<(Array1<F>, F)> = None;
        for (i, x0) in x0s.rows().into_iter().enumerate() {
            let x0: Vec<f64> = x0.iter().map(|v| v.to_f64().unwrap_or(f64::NAN)).collect();
            let res = self.optimizer.optimize(&objective, &x0)?;
            if !res.fun.is_finite() {
                warn!("Optimization run {i} gives no finite log-likelihood");
            }
            let log_like = F::cast(-res.fun);
            debug!("Optimization run {i} ends with log-likelihood {log_like}");
            if best.as_ref().map_or(true, |(_, best_ll)| log_like > *best_ll) {
                let mle = Array::from_iter(res.x.iter().map(|&v| F::cast(v)));
                best = Some((mle, log_like));
            }
        }
        best.ok_or_else(|| InferError::OptimizationError("no starting point".to_string()))
    }

    /// Returns the given initial parameters or draws `n_optimizations` starting points
    fn starting_points(&mut self) -> Result<Array2<F>> {
        let n_params = self.model.n_parameters();
        if let Some(x0s) = &self.initial_parameters {
            if x0s.ncols() != n_params {
                return Err(InferError::DimensionMismatchError {
                    expected: n_params,
                    actual: x0s.ncols(),
                });
            }
            return Ok(x0s.to_owned());
        }
        let mut x0s = Array::random_using(
            (self.n_optimizations, n_params),
            Uniform::new(0., 1.),
            &mut self.rng,
        );
        if let Some(bounds) = self.optimizer.bounds() {
            if bounds.len() != n_params {
                return Err(InferError::DimensionMismatchError {
                    expected: n_params,
                    actual: bounds.len(),
                });
            }
            for (mut col, (lower, upper)) in x0s.columns_mut().into_iter().zip(bounds) {
                col.mapv_inplace(|u| lower + (upper - lower) * u);
            }
        }
        Ok(x0s.mapv(F::cast))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::Normal;
    use crate::model::DistributionModel;
    use crate::optimizer::OptimResult;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use uqbox_dist::Uniform;

    /// Log-likelihood -(x - 1)^2 whatever the data
    struct Parabola;

    impl InferenceModel<f64> for Parabola {
        fn n_parameters(&self) -> usize {
            1
        }
        fn name(&self) -> &str {
            "parabola"
        }
        fn evaluate_log_likelihood(
            &mut self,
            params: ArrayView1<f64>,
            _data: ArrayView1<f64>,
        ) -> Result<f64> {
            Ok(-(params[0] - 1.).powi(2))
        }
    }

    /// Optimizer returning its starting point
    struct Identity {
        bounds: Option<Vec<(f64, f64)>>,
    }

    impl Optimizer for Identity {
        fn bounds(&self) -> Option<&[(f64, f64)]> {
            self.bounds.as_deref()
        }
        fn optimize(&self, f: &dyn Fn(&[f64]) -> f64, x0: &[f64]) -> Result<OptimResult> {
            Ok(OptimResult {
                x: x0.to_vec(),
                fun: f(x0),
            })
        }
    }

    #[test]
    fn test_mle_closed_form() {
        let model = DistributionModel::new(Uniform::<f64>::default(), &["loc", "scale"]).unwrap();
        let mut mle = Mle::new(model).n_optimizations(3);
        assert!(mle.mle().is_none());
        mle.run(&array![1., 2., 4.].view()).unwrap();
        assert_abs_diff_eq!(*mle.mle().unwrap(), array![1., 3.], epsilon = 1e-12);
        assert_abs_diff_eq!(mle.max_log_like().unwrap(), -3. * 3f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_mle_cobyla() {
        let model = DistributionModel::new(Normal { mean: 0., std: 1. }, &["mean"]).unwrap();
        let mut mle = Mle::new(model)
            .n_optimizations(3)
            .optimizer(
                Cobyla::new()
                    .bounds(vec![(-10., 10.)])
                    .ftol_rel(1e-10)
                    .maxeval(1000),
            )
            .with_rng(Xoshiro256Plus::seed_from_u64(42));
        let data = array![0.5, 1.5, 2., 3., 3.];
        mle.run(&data.view()).unwrap();
        assert_abs_diff_eq!(mle.mle().unwrap()[0], 2., epsilon = 1e-3);
    }

    #[test]
    fn test_mle_best_start() {
        let mut mle = Mle::new(Parabola)
            .initial_parameters(array![[0.], [2.5], [1.5], [0.5]])
            .optimizer(Identity { bounds: None });
        mle.run(&array![0.].view()).unwrap();
        // 1.5 and 0.5 are equally good, the first one is kept
        assert_abs_diff_eq!(mle.mle().unwrap()[0], 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(mle.max_log_like().unwrap(), -0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_mle_single_start() {
        let mut mle = Mle::new(Parabola)
            .initial_point(array![0.5])
            .optimizer(Identity { bounds: None });
        mle.run(&array![0.].view()).unwrap();
        assert_abs_diff_eq!(mle.mle().unwrap()[0], 0.5, epsilon = 1e-12);

        let mut mle = Mle::new(Parabola).initial_point(array![0.5, 1.]);
        assert!(matches!(
            mle.run(&array![0.].view()),
            Err(InferError::DimensionMismatchError {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_mle_random_starts_within_bounds() {
        let mut mle = Mle::new(Parabola)
            .n_optimizations(20)
            .optimizer(Identity {
                bounds: Some(vec![(5., 6.)]),
            })
            .with_rng(Xoshiro256Plus::seed_from_u64(0));
        mle.run(&array![0.].view()).unwrap();
        let x = mle.mle().unwrap()[0];
        assert!((5. ..=6.).contains(&x), "{x}");
        assert!(mle.max_log_like().unwrap() <= -16.);
    }

    #[test]
    fn test_mle_invalid_inputs() {
        let mut mle = Mle::new(Parabola).initial_parameters(array![[0., 1.]]);
        assert!(matches!(
            mle.run(&array![0.].view()),
            Err(InferError::DimensionMismatchError {
                expected: 1,
                actual: 2
            })
        ));
        assert!(matches!(
            mle.run(&Array1::<f64>::zeros(0).view()),
            Err(InferError::InvalidInputError(_))
        ));
        assert!(mle.mle().is_none());
    }
}
