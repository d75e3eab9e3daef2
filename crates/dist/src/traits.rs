use crate::errors::{DistError, Result};
use bitflags::bitflags;
use linfa::Float;
use ndarray::{Array1, ArrayView1, ArrayView2};

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Flags describing what a distribution is able to evaluate.
    ///
    /// Flags are resolved once when a joint distribution is built, then
    /// checked before each evaluation.
    /// ```ignore
    /// let caps = Capabilities::CDF | Capabilities::PDF;
    /// ```
    #[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
    #[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
    pub struct Capabilities: u8 {
        /// Inverse cumulative distribution function
        const ICDF = 0x01;
        /// Cumulative distribution function
        const CDF = 0x02;
        /// Probability density function
        const PDF = 0x04;
        /// Logarithm of the probability density function
        const LOG_PDF = 0x08;
        /// Closed-form parameter fitting from data
        const FIT = 0x10;
    }
}

/// Inverse cumulative distribution function of a 1D distribution
pub trait Icdf<F: Float> {
    /// Maps each value `u` of `[0, 1)` to the corresponding quantile
    fn icdf(&self, u: ArrayView1<F>) -> Array1<F>;
}

/// Cumulative distribution function of a 1D distribution
pub trait Cdf<F: Float> {
    /// Evaluates the cdf at each value of `x`
    fn cdf(&self, x: ArrayView1<F>) -> Array1<F>;
}

/// Probability density function of a 1D distribution
pub trait Pdf<F: Float> {
    /// Evaluates the pdf at each value of `x`
    fn pdf(&self, x: ArrayView1<F>) -> Array1<F>;
}

/// Log probability density function of a 1D distribution
pub trait LogPdf<F: Float> {
    /// Evaluates the log of the pdf at each value of `x`
    fn log_pdf(&self, x: ArrayView1<F>) -> Array1<F>;
}

/// Closed-form estimation of the parameters of a 1D distribution
pub trait Fit<F: Float> {
    /// Returns the estimated parameters given `data`, ordered as
    /// [Distribution1D::parameters]
    fn fit(&self, data: ArrayView1<F>) -> Result<Vec<(String, F)>>;
}

/// A univariate distribution.
///
/// The base contract only deals with parameters, evaluation functions are
/// optional and exposed through the `as_*` accessors which return `None`
/// by default. An implementation providing a capability overrides the
/// accessor with `Some(self)`.
pub trait Distribution1D<F: Float> {
    /// Ordered list of (name, value) parameters
    fn parameters(&self) -> Vec<(String, F)>;

    /// Sets the parameter `name` to `value`
    ///
    /// # Errors
    ///
    /// [DistError::UnknownParameterError] when `name` is not a parameter of the distribution
    fn update_parameter(&mut self, name: &str, value: F) -> Result<()>;

    /// Inverse cdf capability if any
    fn as_icdf(&self) -> Option<&dyn Icdf<F>> {
        None
    }

    /// Cdf capability if any
    fn as_cdf(&self) -> Option<&dyn Cdf<F>> {
        None
    }

    /// Pdf capability if any
    fn as_pdf(&self) -> Option<&dyn Pdf<F>> {
        None
    }

    /// Log-pdf capability if any
    fn as_log_pdf(&self) -> Option<&dyn LogPdf<F>> {
        None
    }

    /// Fit capability if any
    fn as_fit(&self) -> Option<&dyn Fit<F>> {
        None
    }

    /// Capabilities provided by the distribution
    fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::empty();
        caps.set(Capabilities::ICDF, self.as_icdf().is_some());
        caps.set(Capabilities::CDF, self.as_cdf().is_some());
        caps.set(Capabilities::PDF, self.as_pdf().is_some());
        caps.set(Capabilities::LOG_PDF, self.as_log_pdf().is_some());
        caps.set(Capabilities::FIT, self.as_fit().is_some());
        caps
    }
}

/// Checks `x` is a (n, dim) matrix of samples
pub(crate) fn check_x_dimension<F: Float>(x: &ArrayView2<F>, dim: usize) -> Result<()> {
    if x.ncols() != dim {
        return Err(DistError::DimensionMismatchError {
            expected: dim,
            actual: x.ncols(),
        });
    }
    Ok(())
}

/// Common capabilities of a set of marginals
pub(crate) fn common_capabilities<F: Float>(marginals: &[Box<dyn Distribution1D<F>>]) -> Capabilities {
    marginals
        .iter()
        .fold(Capabilities::all(), |caps, m| caps & m.capabilities())
}
