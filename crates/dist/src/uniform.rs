use crate::errors::{DistError, Result};
use crate::traits::{Cdf, Distribution1D, Fit, Icdf, LogPdf, Pdf};
use linfa::Float;
use ndarray::{Array1, ArrayView1};

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Uniform distribution over `[loc, loc + scale]`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct Uniform<F: Float> {
    loc: F,
    scale: F,
}

impl<F: Float> Default for Uniform<F> {
    /// Uniform distribution over `[0, 1]`
    fn default() -> Self {
        Uniform {
            loc: F::zero(),
            scale: F::one(),
        }
    }
}

impl<F: Float> Uniform<F> {
    /// Constructor given lower bound `loc` and range `scale`
    ///
    /// ```
    /// use uqbox_dist::Uniform;
    ///
    /// let dist = Uniform::new(5., 5.).unwrap();
    /// ```
    pub fn new(loc: F, scale: F) -> Result<Self> {
        if scale <= F::zero() {
            return Err(DistError::InvalidValueError(format!(
                "Uniform scale should be positive, got {scale}"
            )));
        }
        Ok(Uniform { loc, scale })
    }

    /// Lower bound
    pub fn loc(&self) -> F {
        self.loc
    }

    /// Range
    pub fn scale(&self) -> F {
        self.scale
    }
}

impl<F: Float> Distribution1D<F> for Uniform<F> {
    fn parameters(&self) -> Vec<(String, F)> {
        vec![("loc".to_string(), self.loc), ("scale".to_string(), self.scale)]
    }

    fn update_parameter(&mut self, name: &str, value: F) -> Result<()> {
        match name {
            "loc" => self.loc = value,
            "scale" => {
                if value <= F::zero() {
                    return Err(DistError::InvalidValueError(format!(
                        "Uniform scale should be positive, got {value}"
                    )));
                }
                self.scale = value
            }
            _ => return Err(DistError::UnknownParameterError(name.to_string())),
        }
        Ok(())
    }

    fn as_icdf(&self) -> Option<&dyn Icdf<F>> {
        Some(self)
    }

    fn as_cdf(&self) -> Option<&dyn Cdf<F>> {
        Some(self)
    }

    fn as_pdf(&self) -> Option<&dyn Pdf<F>> {
        Some(self)
    }

    fn as_log_pdf(&self) -> Option<&dyn LogPdf<F>> {
        Some(self)
    }

    fn as_fit(&self) -> Option<&dyn Fit<F>> {
        Some(self)
    }
}

impl<F: Float> Icdf<F> for Uniform<F> {
    fn icdf(&self, u: ArrayView1<F>) -> Array1<F> {
        u.mapv(|v| self.loc + v * self.scale)
    }
}

impl<F: Float> Cdf<F> for Uniform<F> {
    fn cdf(&self, x: ArrayView1<F>) -> Array1<F> {
        x.mapv(|v| ((v - self.loc) / self.scale).max(F::zero()).min(F::one()))
    }
}

impl<F: Float> Pdf<F> for Uniform<F> {
    fn pdf(&self, x: ArrayView1<F>) -> Array1<F> {
        let upper = self.loc + self.scale;
        x.mapv(|v| {
            if v >= self.loc && v <= upper {
                F::one() / self.scale
            } else {
                F::zero()
            }
        })
    }
}

impl<F: Float> LogPdf<F> for Uniform<F> {
    fn log_pdf(&self, x: ArrayView1<F>) -> Array1<F> {
        self.pdf(x).mapv(|v| v.ln())
    }
}

impl<F: Float> Fit<F> for Uniform<F> {
    fn fit(&self, data: ArrayView1<F>) -> Result<Vec<(String, F)>> {
        if data.is_empty() {
            return Err(DistError::InvalidInputError(
                "Uniform fit requires at least one data point".to_string(),
            ));
        }
        let lower = data.fold(F::infinity(), |acc, &v| acc.min(v));
        let upper = data.fold(F::neg_infinity(), |acc, &v| acc.max(v));
        if upper <= lower {
            return Err(DistError::InvalidValueError(
                "Uniform fit requires data with a non-zero range".to_string(),
            ));
        }
        Ok(vec![
            ("loc".to_string(), lower),
            ("scale".to_string(), upper - lower),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Capabilities;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_uniform_evaluations() {
        let dist = Uniform::new(5., 5.).unwrap();
        assert_abs_diff_eq!(
            dist.icdf(array![0., 0.5, 0.9].view()),
            array![5., 7.5, 9.5],
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            dist.cdf(array![4., 6., 11.].view()),
            array![0., 0.2, 1.],
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            dist.pdf(array![4., 6.].view()),
            array![0., 0.2],
            epsilon = 1e-12
        );
        assert_eq!(dist.log_pdf(array![4.].view())[0], f64::NEG_INFINITY);
        assert_eq!(dist.capabilities(), Capabilities::all());
    }

    #[test]
    fn test_uniform_parameters() {
        let mut dist = Uniform::<f64>::default();
        dist.update_parameter("scale", 2.).unwrap();
        assert_eq!(
            dist.parameters(),
            vec![("loc".to_string(), 0.), ("scale".to_string(), 2.)]
        );
        assert!(matches!(
            dist.update_parameter("shape", 1.),
            Err(DistError::UnknownParameterError(_))
        ));
        assert!(dist.update_parameter("scale", -1.).is_err());
        assert!(Uniform::new(0., 0.).is_err());
    }

    #[test]
    fn test_uniform_fit() {
        let dist = Uniform::<f64>::default();
        let params = dist.fit(array![2., 3.5, 6.].view()).unwrap();
        assert_eq!(params[0], ("loc".to_string(), 2.));
        assert_eq!(params[1], ("scale".to_string(), 4.));
        assert!(dist.fit(Array1::<f64>::zeros(0).view()).is_err());
    }
}
