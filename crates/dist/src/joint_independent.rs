use crate::errors::{DistError, Result};
use crate::parameters::{ParamKey, ParamOwner};
use crate::traits::{check_x_dimension, common_capabilities, Capabilities, Distribution1D};
use linfa::Float;
use log::warn;
use ndarray::{Array1, ArrayView2};

/// Joint distribution of independent 1D marginals.
///
/// Joint cdf and pdf are products of the marginal ones, the joint log-pdf is
/// the sum of the marginal ones. Each joint evaluation is available only when
/// every marginal provides the corresponding capability.
pub struct JointIndependent<F: Float> {
    marginals: Vec<Box<dyn Distribution1D<F>>>,
    capabilities: Capabilities,
}

impl<F: Float> JointIndependent<F> {
    /// Constructor given the ordered list of marginals
    ///
    /// # Errors
    ///
    /// [DistError::InvalidInputError] when no marginal is given
    pub fn new(marginals: Vec<Box<dyn Distribution1D<F>>>) -> Result<Self> {
        if marginals.is_empty() {
            return Err(DistError::InvalidInputError(
                "JointIndependent requires at least one marginal".to_string(),
            ));
        }
        let capabilities = common_capabilities(&marginals) & !Capabilities::FIT;
        Ok(JointIndependent {
            marginals,
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

    /// Capabilities shared by all marginals
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn require(&self, cap: Capabilities, name: &str) -> Result<()> {
        if !self.capabilities.contains(cap) {
            return Err(DistError::MissingCapabilityError(format!(
                "JointIndependent {name}: all marginals should provide {name}"
            )));
        }
        Ok(())
    }

    /// Joint cdf of `x`, a (n, dim) matrix
    pub fn cdf(&self, x: &ArrayView2<F>) -> Result<Array1<F>> {
        self.require(Capabilities::CDF, "cdf")?;
        check_x_dimension(x, self.dim())?;
        let mut res = Array1::ones(x.nrows());
        for (j, m) in self.marginals.iter().enumerate() {
            if let Some(cdf) = m.as_cdf() {
                res = res * cdf.cdf(x.column(j));
            }
        }
        Ok(res)
    }

    /// Joint pdf of `x`, a (n, dim) matrix
    pub fn pdf(&self, x: &ArrayView2<F>) -> Result<Array1<F>> {
        self.require(Capabilities::PDF, "pdf")?;
        check_x_dimension(x, self.dim())?;
        let mut res = Array1::ones(x.nrows());
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
        let mut res = Array1::zeros(x.nrows());
        for (j, m) in self.marginals.iter().enumerate() {
            if let Some(log_pdf) = m.as_log_pdf() {
                res = res + log_pdf.log_pdf(x.column(j));
            }
        }
        Ok(res)
    }

    /// Ordered parameters of all marginals
    pub fn parameters(&self) -> Vec<(ParamKey, F)> {
        marginal_parameters(&self.marginals)
    }

    /// Updates the given parameters.
    ///
    /// All keys are checked before any update takes place. When a marginal
    /// rejects a value, the parameters already updated are restored.
    ///
    /// # Errors
    ///
    /// * [DistError::UnknownParameterError] if a key is not a parameter of a marginal
    /// * marginal error when a value is rejected
    pub fn update_parameters(&mut self, updates: &[(ParamKey, F)]) -> Result<()> {
        let previous = self.parameters();
        check_keys(&previous, updates)?;
        update_marginals(&mut self.marginals, updates).map_err(|err| {
            restore_marginals(&mut self.marginals, &previous, updates);
            err
        })
    }
}

pub(crate) fn marginal_parameters<F: Float>(
    marginals: &[Box<dyn Distribution1D<F>>],
) -> Vec<(ParamKey, F)> {
    marginals
        .iter()
        .enumerate()
        .flat_map(|(i, m)| {
            m.parameters()
                .into_iter()
                .map(move |(name, v)| (ParamKey::marginal(i, name), v))
        })
        .collect()
}

pub(crate) fn check_keys<F: Float>(known: &[(ParamKey, F)], updates: &[(ParamKey, F)]) -> Result<()> {
    match updates
        .iter()
        .find(|(key, _)| !known.iter().any(|(k, _)| k == key))
    {
        Some((key, _)) => Err(DistError::UnknownParameterError(key.to_string())),
        None => Ok(()),
    }
}

pub(crate) fn update_marginals<F: Float>(
    marginals: &mut [Box<dyn Distribution1D<F>>],
    updates: &[(ParamKey, F)],
) -> Result<()> {
    for (key, value) in updates {
        if let ParamOwner::Marginal(i) = key.owner {
            marginals[i].update_parameter(&key.name, *value)?;
        }
    }
    Ok(())
}

/// Sets back the `previous` values of the marginal parameters named in `updates`
pub(crate) fn restore_marginals<F: Float>(
    marginals: &mut [Box<dyn Distribution1D<F>>],
    previous: &[(ParamKey, F)],
    updates: &[(ParamKey, F)],
) {
    for (key, value) in previous {
        if let ParamOwner::Marginal(i) = key.owner {
            if updates.iter().any(|(k, _)| k == key) {
                if let Err(err) = marginals[i].update_parameter(&key.name, *value) {
                    warn!("Parameter {key} cannot be restored: {err}");
                }
            }
        }
    }
}
