use crate::errors::{InferError, Result};
use linfa::Float;
use ndarray::{Array1, ArrayView1};
use uqbox_dist::{DistError, Distribution1D};

/// A model whose parameters are learnt from data by likelihood maximization
pub trait InferenceModel<F: Float> {
    /// Number of parameters to estimate
    fn n_parameters(&self) -> usize;

    /// Name used in logs
    fn name(&self) -> &str;

    /// Log-likelihood of `data` given the parameter vector `params`
    ///
    /// # Errors
    ///
    /// [InferError::DimensionMismatchError] when `params` length is not [InferenceModel::n_parameters]
    fn evaluate_log_likelihood(&mut self, params: ArrayView1<F>, data: ArrayView1<F>)
        -> Result<F>;

    /// Closed-form estimation of the parameters if any
    fn as_fittable(&self) -> Option<&dyn FittableModel<F>> {
        None
    }
}

/// An inference model whose parameters are estimated in closed form
pub trait FittableModel<F: Float> {
    /// Estimated parameter vector given `data`
    fn fit(&self, data: ArrayView1<F>) -> Result<Array1<F>>;
}

/// Inference model of data following a univariate distribution.
///
/// Only the parameters listed at construction are estimated, the other
/// parameters of the distribution keep their current value.
pub struct DistributionModel<F: Float> {
    name: String,
    distribution: Box<dyn Distribution1D<F>>,
    parameters_to_estimate: Vec<String>,
}

impl<F: Float> DistributionModel<F> {
    /// Constructor given the distribution and the names of the parameters to estimate
    ///
    /// # Errors
    ///
    /// * [InferError::InvalidInputError] when a name is not a parameter of `distribution`
    /// * [DistError::MissingCapabilityError] when `distribution` has neither log pdf nor pdf
    pub fn new(
        distribution: impl Distribution1D<F> + 'static,
        parameters_to_estimate: &[&str],
    ) -> Result<Self> {
        if distribution.as_log_pdf().is_none() && distribution.as_pdf().is_none() {
            return Err(DistError::MissingCapabilityError(
                "distribution model requires a log pdf or a pdf".to_string(),
            )
            .into());
        }
        let known: Vec<String> = distribution
            .parameters()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        if let Some(name) = parameters_to_estimate
            .iter()
            .find(|name| !known.iter().any(|k| k == *name))
        {
            return Err(InferError::InvalidInputError(format!(
                "{name} is not a parameter of the distribution, expected one of {known:?}"
            )));
        }
        Ok(DistributionModel {
            name: "distribution model".to_string(),
            distribution: Box::new(distribution),
            parameters_to_estimate: parameters_to_estimate
                .iter()
                .map(|name| name.to_string())
                .collect(),
        })
    }

    /// Sets the name of the model
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Names of the estimated parameters, in parameter vector order
    pub fn parameters_to_estimate(&self) -> &[String] {
        &self.parameters_to_estimate
    }

    /// Underlying distribution holding the last evaluated parameters
    pub fn distribution(&self) -> &dyn Distribution1D<F> {
        self.distribution.as_ref()
    }
}

impl<F: Float> InferenceModel<F> for DistributionModel<F> {
    fn n_parameters(&self) -> usize {
        self.parameters_to_estimate.len()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate_log_likelihood(
        &mut self,
        params: ArrayView1<F>,
        data: ArrayView1<F>,
    ) -> Result<F> {
        if params.len() != self.n_parameters() {
            return Err(InferError::DimensionMismatchError {
                expected: self.n_parameters(),
                actual: params.len(),
            });
        }
        for (name, &value) in self.parameters_to_estimate.iter().zip(params.iter()) {
            self.distribution.update_parameter(name, value)?;
        }
        if let Some(log_pdf) = self.distribution.as_log_pdf() {
            Ok(log_pdf.log_pdf(data).sum())
        } else if let Some(pdf) = self.distribution.as_pdf() {
            Ok(pdf.pdf(data).mapv(|v| v.ln()).sum())
        } else {
            Err(DistError::MissingCapabilityError("log pdf".to_string()).into())
        }
    }

    fn as_fittable(&self) -> Option<&dyn FittableModel<F>> {
        self.distribution.as_fit().map(|_| self as &dyn FittableModel<F>)
    }
}

impl<F: Float> FittableModel<F> for DistributionModel<F> {
    fn fit(&self, data: ArrayView1<F>) -> Result<Array1<F>> {
        let fit = self
            .distribution
            .as_fit()
            .ok_or_else(|| DistError::MissingCapabilityError("fit".to_string()))?;
        let fitted = fit.fit(data)?;
        self.parameters_to_estimate
            .iter()
            .map(|name| {
                fitted
                    .iter()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| *v)
                    .ok_or_else(|| DistError::UnknownParameterError(name.to_string()).into())
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use uqbox_dist::{LogPdf, Uniform};

    /// Normal distribution only providing its log pdf
    pub(crate) struct Normal {
        pub(crate) mean: f64,
        pub(crate) std: f64,
    }

    impl Distribution1D<f64> for Normal {
        fn parameters(&self) -> Vec<(String, f64)> {
            vec![("mean".to_string(), self.mean), ("std".to_string(), self.std)]
        }
        fn update_parameter(&mut self, name: &str, value: f64) -> uqbox_dist::Result<()> {
            match name {
                "mean" => self.mean = value,
                "std" => self.std = value,
                _ => return Err(DistError::UnknownParameterError(name.to_string())),
            }
            Ok(())
        }
        fn as_log_pdf(&self) -> Option<&dyn LogPdf<f64>> {
            Some(self)
        }
    }

    impl LogPdf<f64> for Normal {
        fn log_pdf(&self, x: ArrayView1<f64>) -> Array1<f64> {
            x.mapv(|v| {
                let z = (v - self.mean) / self.std;
                -0.5 * z * z - self.std.ln() - 0.5 * (2. * std::f64::consts::PI).ln()
            })
        }
    }

    /// Distribution without any evaluation function
    struct Opaque;

    impl Distribution1D<f64> for Opaque {
        fn parameters(&self) -> Vec<(String, f64)> {
            vec![("a".to_string(), 0.)]
        }
        fn update_parameter(&mut self, name: &str, _value: f64) -> uqbox_dist::Result<()> {
            Err(DistError::UnknownParameterError(name.to_string()))
        }
    }

    #[test]
    fn test_log_likelihood() {
        let mut model = DistributionModel::new(Normal { mean: 0., std: 1. }, &["mean"]).unwrap();
        assert_eq!(model.n_parameters(), 1);
        let data = array![1., 2., 3.];
        let ll = model
            .evaluate_log_likelihood(array![2.].view(), data.view())
            .unwrap();
        let expected = -1. - 1.5 * (2. * std::f64::consts::PI).ln();
        assert_abs_diff_eq!(ll, expected, epsilon = 1e-12);
        assert_eq!(model.distribution().parameters()[0].1, 2.);
    }

    #[test]
    fn test_log_likelihood_dimension_mismatch() {
        let mut model = DistributionModel::new(Normal { mean: 0., std: 1. }, &["mean"]).unwrap();
        let data = array![1., 2., 3.];
        assert!(matches!(
            model.evaluate_log_likelihood(array![0., 1.].view(), data.view()),
            Err(InferError::DimensionMismatchError {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_invalid_models() {
        assert!(matches!(
            DistributionModel::new(Normal { mean: 0., std: 1. }, &["sigma"]),
            Err(InferError::InvalidInputError(_))
        ));
        assert!(matches!(
            DistributionModel::<f64>::new(Opaque, &["a"]),
            Err(InferError::DistError(DistError::MissingCapabilityError(_)))
        ));
    }

    #[test]
    fn test_fittable() {
        let normal = DistributionModel::new(Normal { mean: 0., std: 1. }, &["mean"]).unwrap();
        assert!(normal.as_fittable().is_none());

        let uniform = DistributionModel::new(Uniform::<f64>::default(), &["scale", "loc"])
            .unwrap()
            .with_name("uniform");
        assert_eq!(uniform.name(), "uniform");
        let fitted = uniform
            .as_fittable()
            .unwrap()
            .fit(array![1., 3., 2.].view())
            .unwrap();
        assert_abs_diff_eq!(fitted, array![2., 1.], epsilon = 1e-12);
    }
}
