use crate::copula::Copula;
use crate::errors::{DistError, Result};
use crate::joint_independent::{check_keys, marginal_parameters, restore_marginals, update_marginals};
use crate::parameters::{ParamKey, ParamOwner};
use crate::traits::{check_x_dimension, common_capabilities, Capabilities, Distribution1D};
use linfa::Float;
use log::warn;
use ndarray::{Array1, Array2, ArrayView2};

/// Joint distribution built from marginals and a copula introducing dependency.
///
/// Every marginal must provide a cdf. The joint evaluations depend on what
/// the copula and the marginals provide:
/// * `cdf` when the copula provides a cdf,
/// * `pdf` when the copula provides a density and all marginals a pdf,
/// * `log_pdf` when the copula provides a density and all marginals a log-pdf.
///
/// Available evaluations are resolved once at construction, see [JointCopula::capabilities].
pub struct JointCopula<F: Float> {
    marginals: Vec<Box<dyn Distribution1D<F>>>,
    copula: Box<dyn Copula<F>>,
    capabilities: Capabilities,
}

impl<F: Float> JointCopula<F> {
    /// Constructor given marginals and copula
    ///
    /// # Errors
    ///
    /// * [DistError::InvalidInputError] when a marginal has no cdf
    /// * copula specific error when the copula does not accept the marginals
    pub fn new(marginals: Vec<Box<dyn Distribution1D<F>>>, copula: Box<dyn Copula<F>>) -> Result<Self> {
        if let Some(i) = marginals.iter().position(|m| m.as_cdf().is_none()) {
            return Err(DistError::InvalidInputError(format!(
                "All the marginals should have a cdf to define a joint with copula (marginal {i} has none)"
            )));
        }
        copula.check_marginals(marginals.len())?;

        let common = common_capabilities(&marginals);
        let mut capabilities = Capabilities::empty();
        capabilities.set(Capabilities::CDF, copula.as_cdf().is_some());
        capabilities.set(
            Capabilities::PDF,
            copula.as_pdf().is_some() && common.contains(Capabilities::PDF),
        );
        capabilities.set(
            Capabilities::LOG_PDF,
            copula.as_pdf().is_some() && common.contains(Capabilities::LOG_PDF),
        );
        log::debug!("JointCopula capabilities: {capabilities:?}");

        Ok(JointCopula {
            marginals,
            copula,
            capabilities,
        })
    }

    /// Number of marginals
    pub fn dim(&self) -> usize {
        self.marginals.len()
    }

    /// Ordered marginals
    pub fn marginals(&self) -> &[Box<dyn Distribution1D<F>>] {
        &self.marginals
    }

    /// Copula
    pub fn copula(&self) -> &dyn Copula<F> {
        self.copula.as_ref()
    }

    /// Joint evaluations available
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn require(&self, cap: Capabilities, name: &str) -> Result<()> {
        if !self.capabilities.contains(cap) {
            return Err(DistError::MissingCapabilityError(format!(
                "JointCopula {name} is not available with the given copula and marginals"
            )));
        }
        Ok(())
    }

    /// Marginal cdfs of `x` as a (n, dim) matrix of unit uniforms
    fn unit_uniforms(&self, x: &ArrayView2<F>) -> Result<Array2<F>> {
        let mut unif = Array2::zeros(x.dim());
        for (j, m) in self.marginals.iter().enumerate() {
            let cdf = m.as_cdf().ok_or_else(|| {
                DistError::MissingCapabilityError(format!("cdf of marginal {j}"))
            })?;
            unif.column_mut(j).assign(&cdf.cdf(x.column(j)));
        }
        Ok(unif)
    }

    /// Joint cdf of `x`, a (n, dim) matrix
    pub fn cdf(&self, x: &ArrayView2<F>) -> Result<Array1<F>> {
        self.require(Capabilities::CDF, "cdf")?;
        check_x_dimension(x, self.dim())?;
        let unif = self.unit_uniforms(x)?;
        let copula_cdf = self
            .copula
            .as_cdf()
            .ok_or_else(|| DistError::MissingCapabilityError("copula cdf".to_string()))?;
        Ok(copula_cdf.evaluate_cdf(&unif.view()))
    }

    fn copula_density(&self, x: &ArrayView2<F>) -> Result<Array1<F>> {
        let unif = self.unit_uniforms(x)?;
        let copula_pdf = self
            .copula
            .as_pdf()
            .ok_or_else(|| DistError::MissingCapabilityError("copula pdf".to_string()))?;
        Ok(copula_pdf.evaluate_pdf(&unif.view()))
    }

    /// Joint pdf of `x`, a (n, dim) matrix
    pub fn pdf(&self, x: &ArrayView2<F>) -> Result<Array1<F>> {
        self.require(Capabilities::PDF, "pdf")?;
        check_x_dimension(x, self.dim())?;
        let mut res = self.copula_density(x)?;
        for (j, m) in self.marginals.iter().enumerate() {
            if let Some(pdf) = m.as_pdf() {
                res = res * pdf.pdf(x.column(j));
            }
        }
        Ok(res)
    }

    /// Joint log-pdf of `x`, a (n, dim) matrix
    pub fn log_pdf(&self, x: &ArrayView2<F>) -> Result<Array1<F>> {
        self.require(Capabilities::LOG_PDF, "log_pdf")?;
        check_x_dimension(x, self.dim())?;
        let mut res = self.copula_density(x)?.mapv(|c| c.ln());
        for (j, m) in self.marginals.iter().enumerate() {
            if let Some(log_pdf) = m.as_log_pdf() {
                res = res + log_pdf.log_pdf(x.column(j));
            }
        }
        Ok(res)
    }

    /// Ordered parameters of the marginals followed by the copula ones
    pub fn parameters(&self) -> Vec<(ParamKey, F)> {
        let mut params = marginal_parameters(&self.marginals);
        params.extend(
            self.copula
                .parameters()
                .into_iter()
                .map(|(name, v)| (ParamKey::copula(name), v)),
        );
        params
    }

    /// Updates the given parameters of the marginals and the copula.
    ///
    /// All keys are checked before any update takes place. When a marginal or
    /// the copula rejects a value, the parameters already updated are restored.
    pub fn update_parameters(&mut self, updates: &[(ParamKey, F)]) -> Result<()> {
        let previous = self.parameters();
        check_keys(&previous, updates)?;
        let copula_updates = updates
            .iter()
            .filter(|(key, _)| key.owner == ParamOwner::Copula);
        let res = update_marginals(&mut self.marginals, updates).and_then(|_| {
            copula_updates
                .clone()
                .try_for_each(|(key, value)| self.copula.update_parameter(&key.name, *value))
        });
        if res.is_err() {
            restore_marginals(&mut self.marginals, &previous, updates);
            for (key, value) in previous.iter().filter(|(key, _)| key.owner == ParamOwner::Copula) {
                if copula_updates.clone().any(|(k, _)| k == key) {
                    if let Err(err) = self.copula.update_parameter(&key.name, *value) {
                        warn!("Parameter {key} cannot be restored: {err}");
                    }
                }
            }
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copula::{CopulaCdf, Independence};
    use crate::traits::{Cdf, Icdf};
    use crate::Uniform;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, ArrayView1};

    /// Marginal with cdf but neither pdf nor log-pdf
    struct CdfOnly;

    impl Distribution1D<f64> for CdfOnly {
        fn parameters(&self) -> Vec<(String, f64)> {
            vec![]
        }
        fn update_parameter(&mut self, name: &str, _value: f64) -> Result<()> {
            Err(DistError::UnknownParameterError(name.to_string()))
        }
        fn as_cdf(&self) -> Option<&dyn Cdf<f64>> {
            Some(self)
        }
    }

    impl Cdf<f64> for CdfOnly {
        fn cdf(&self, x: ArrayView1<f64>) -> Array1<f64> {
            x.mapv(|v| v.clamp(0., 1.))
        }
    }

    /// Marginal with icdf only
    struct IcdfOnly;

    impl Distribution1D<f64> for IcdfOnly {
        fn parameters(&self) -> Vec<(String, f64)> {
            vec![]
        }
        fn update_parameter(&mut self, name: &str, _value: f64) -> Result<()> {
            Err(DistError::UnknownParameterError(name.to_string()))
        }
        fn as_icdf(&self) -> Option<&dyn Icdf<f64>> {
            Some(self)
        }
    }

    impl Icdf<f64> for IcdfOnly {
        fn icdf(&self, u: ArrayView1<f64>) -> Array1<f64> {
            u.to_owned()
        }
    }

    /// Copula with a cdf and a `theta` parameter, no density
    struct MinCopula {
        theta: f64,
    }

    impl Copula<f64> for MinCopula {
        fn parameters(&self) -> Vec<(String, f64)> {
            vec![("theta".to_string(), self.theta)]
        }
        fn update_parameter(&mut self, name: &str, value: f64) -> Result<()> {
            match name {
                "theta" if value < 0. => Err(DistError::InvalidValueError(format!(
                    "theta should be non negative, got {value}"
                ))),
                "theta" => {
                    self.theta = value;
                    Ok(())
                }
                _ => Err(DistError::UnknownParameterError(name.to_string())),
            }
        }
        fn as_cdf(&self) -> Option<&dyn CopulaCdf<f64>> {
            Some(self)
        }
    }

    impl CopulaCdf<f64> for MinCopula {
        fn evaluate_cdf(&self, u: &ArrayView2<f64>) -> Array1<f64> {
            u.map_axis(ndarray::Axis(1), |row| row.fold(1., |acc: f64, &v| acc.min(v)))
        }
    }

    fn uniforms() -> Vec<Box<dyn Distribution1D<f64>>> {
        vec![
            Box::new(Uniform::new(0., 2.).unwrap()),
            Box::new(Uniform::new(0., 4.).unwrap()),
        ]
    }

    #[test]
    fn test_independence_copula_joint() {
        let joint = JointCopula::new(uniforms(), Box::new(Independence)).unwrap();
        assert_eq!(
            joint.capabilities(),
            Capabilities::CDF | Capabilities::PDF | Capabilities::LOG_PDF
        );
        let x = array![[1., 1.], [2., 2.]];
        assert_abs_diff_eq!(joint.cdf(&x.view()).unwrap(), array![0.125, 0.5], epsilon = 1e-12);
        assert_abs_diff_eq!(joint.pdf(&x.view()).unwrap(), array![0.125, 0.125], epsilon = 1e-12);
        assert_abs_diff_eq!(
            joint.log_pdf(&x.view()).unwrap(),
            array![0.125f64.ln(), 0.125f64.ln()],
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_capabilities_resolution() {
        let marginals: Vec<Box<dyn Distribution1D<f64>>> = vec![Box::new(CdfOnly), Box::new(CdfOnly)];
        let joint = JointCopula::new(marginals, Box::new(Independence)).unwrap();
        assert_eq!(joint.capabilities(), Capabilities::CDF);
        assert!(matches!(
            joint.pdf(&array![[0.5, 0.5]].view()),
            Err(DistError::MissingCapabilityError(_))
        ));

        let joint = JointCopula::new(uniforms(), Box::new(MinCopula { theta: 1. })).unwrap();
        assert_eq!(joint.capabilities(), Capabilities::CDF);
        assert_abs_diff_eq!(
            joint.cdf(&array![[1., 1.]].view()).unwrap(),
            array![0.25],
            epsilon = 1e-12
        );
        assert!(joint.log_pdf(&array![[1., 1.]].view()).is_err());
    }

    #[test]
    fn test_marginals_without_cdf() {
        let marginals: Vec<Box<dyn Distribution1D<f64>>> = vec![Box::new(CdfOnly), Box::new(IcdfOnly)];
        assert!(matches!(
            JointCopula::new(marginals, Box::new(Independence)),
            Err(DistError::InvalidInputError(_))
        ));
        let marginals: Vec<Box<dyn Distribution1D<f64>>> = vec![Box::new(CdfOnly)];
        assert!(JointCopula::new(marginals, Box::new(Independence)).is_err());
    }

    #[test]
    fn test_copula_parameters() {
        let mut joint = JointCopula::new(uniforms(), Box::new(MinCopula { theta: 1. })).unwrap();
        let params = joint.parameters();
        assert_eq!(params.len(), 5);
        assert_eq!(params[4], (ParamKey::copula("theta"), 1.));

        joint
            .update_parameters(&[
                (ParamKey::copula("theta"), 3.),
                (ParamKey::marginal(0, "loc"), -1.),
            ])
            .unwrap();
        let params = joint.parameters();
        assert_eq!(params[0], (ParamKey::marginal(0, "loc"), -1.));
        assert_eq!(params[4], (ParamKey::copula("theta"), 3.));
        assert!(joint
            .update_parameters(&[(ParamKey::marginal(2, "loc"), 0.)])
            .is_err());
    }

    #[test]
    fn test_copula_rejected_value() {
        let mut joint = JointCopula::new(uniforms(), Box::new(MinCopula { theta: 1. })).unwrap();
        let before = joint.parameters();
        let res = joint.update_parameters(&[
            (ParamKey::marginal(0, "loc"), -1.),
            (ParamKey::copula("theta"), -2.),
        ]);
        assert!(matches!(res, Err(DistError::InvalidValueError(_))));
        assert_eq!(joint.parameters(), before);

        let res = joint.update_parameters(&[
            (ParamKey::copula("theta"), 2.),
            (ParamKey::marginal(1, "scale"), 0.),
        ]);
        assert!(matches!(res, Err(DistError::InvalidValueError(_))));
        assert_eq!(joint.parameters(), before);
    }
}
