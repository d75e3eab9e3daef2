use crate::criteria::{Criterion, Random};
use crate::distributions::Distributions;
use crate::errors::{DoeError, Result};
use crate::grid::StratificationGrid;
use linfa::Float;
use log::{info, warn};
use ndarray::Array2;

/// Latin hypercube sampling of independent random variables.
///
/// The design is built as follows: `[0, 1]` is divided into ns strata where
/// ns is the number of samples, one sample is placed in each stratum of each
/// dimension according to a [Criterion], then each dimension is mapped
/// through the inverse cdf of its distribution.
///
/// Random variables must be independent: distributions are given as a single
/// distribution, a list of distributions or a [uqbox_dist::JointIndependent].
///
/// ```
/// use uqbox_dist::{Distribution1D, Uniform};
/// use uqbox_doe::{Centered, LatinHypercubeSampling};
///
/// let dists: Vec<Box<dyn Distribution1D<f64>>> = vec![
///     Box::new(Uniform::new(5., 5.).unwrap()),
///     Box::new(Uniform::new(0., 1.).unwrap()),
/// ];
/// let lhs = LatinHypercubeSampling::build(dists, 5, Centered::<f64, _>::new()).unwrap();
/// assert_eq!(lhs.samples().dim(), (5, 2));
/// ```
pub struct LatinHypercubeSampling<F: Float> {
    distributions: Distributions<F>,
    criterion: Box<dyn Criterion<F>>,
    samples_number: Option<usize>,
    /// Samples mapped through the inverse cdf of the distributions
    samples: Array2<F>,
    /// Samples in the unit hypercube
    samples_u01: Array2<F>,
}

impl<F: Float> LatinHypercubeSampling<F> {
    /// Constructor given the distributions of the random variables.
    ///
    /// No samples are drawn until [LatinHypercubeSampling::run] is called.
    /// Samples are placed using a [Random] criterion unless another one
    /// is given with [LatinHypercubeSampling::criterion].
    ///
    /// # Errors
    ///
    /// [DoeError::InvalidInputError] when no distribution is given
    pub fn new(distributions: impl Into<Distributions<F>>) -> Result<Self> {
        let distributions = distributions.into();
        distributions.validate()?;
        let nx = distributions.dim();
        Ok(LatinHypercubeSampling {
            distributions,
            criterion: Box::new(Random::<F, _>::new()),
            samples_number: None,
            samples: Array2::zeros((0, nx)),
            samples_u01: Array2::zeros((0, nx)),
        })
    }

    /// Constructor which draws `samples_number` samples right away
    pub fn build(
        distributions: impl Into<Distributions<F>>,
        samples_number: usize,
        criterion: impl Criterion<F> + 'static,
    ) -> Result<Self> {
        let mut lhs = Self::new(distributions)?.criterion(criterion);
        lhs.run(samples_number)?;
        Ok(lhs)
    }

    /// Sets the criterion used to place the samples
    pub fn criterion(mut self, criterion: impl Criterion<F> + 'static) -> Self {
        self.criterion = Box::new(criterion);
        self
    }

    /// Draws `samples_number` samples.
    ///
    /// Previous samples are discarded: calling `run` again does not extend
    /// the design but rebuilds it with the new number of samples.
    /// Dimensions whose distribution has no inverse cdf are left to zero in
    /// [LatinHypercubeSampling::samples].
    ///
    /// # Errors
    ///
    /// * [DoeError::InvalidInputError] when `samples_number` is zero
    /// * criterion errors (see [Criterion])
    /// * [DoeError::DimensionMismatchError] or [DoeError::InvalidDesignError]
    ///   when the criterion does not generate a latin hypercube design
    ///
    /// On error, the previous samples are left untouched.
    pub fn run(&mut self, samples_number: usize) -> Result<()> {
        if samples_number < 1 {
            return Err(DoeError::InvalidInputError(
                "samples_number should be a positive integer".to_string(),
            ));
        }
        info!("Running Latin hypercube sampling...");
        let nx = self.dimension();
        let grid = StratificationGrid::new(samples_number, nx)?;

        let mut samples = Array2::zeros((samples_number, nx));
        self.criterion.create_bins(&samples.view())?;
        let samples_u01 = self.criterion.generate_samples()?;
        check_latin(&grid, &samples_u01)?;

        for j in 0..nx {
            match self.distributions.marginal(j).and_then(|m| m.as_icdf()) {
                Some(icdf) => {
                    let xj = icdf.icdf(samples_u01.column(j));
                    if xj.len() != samples_number {
                        return Err(DoeError::DimensionMismatchError {
                            expected: (samples_number, 1),
                            actual: (xj.len(), 1),
                        });
                    }
                    samples.column_mut(j).assign(&xj);
                }
                None => warn!("Distribution {j} has no inverse cdf, samples left to zero"),
            }
        }

        self.samples_number = Some(samples_number);
        self.samples = samples;
        self.samples_u01 = samples_u01;
        info!("Successful execution of LHS design");
        Ok(())
    }

    /// Number of random variables
    pub fn dimension(&self) -> usize {
        self.distributions.dim()
    }

    /// Number of samples of the last run, `None` before the first run
    pub fn samples_number(&self) -> Option<usize> {
        self.samples_number
    }

    /// Distributions of the random variables
    pub fn distributions(&self) -> &Distributions<F> {
        &self.distributions
    }

    /// (ns, nx) matrix of samples mapped through the distributions
    pub fn samples(&self) -> &Array2<F> {
        &self.samples
    }

    /// (ns, nx) matrix of samples in the unit hypercube
    pub fn samples_u01(&self) -> &Array2<F> {
        &self.samples_u01
    }
}

/// Checks `samples` holds exactly one sample per stratum along each dimension
fn check_latin<F: Float>(grid: &StratificationGrid<F>, samples: &Array2<F>) -> Result<()> {
    let (ns, nx) = (grid.nsamples(), grid.dim());
    if samples.dim() != (ns, nx) {
        return Err(DoeError::DimensionMismatchError {
            expected: (ns, nx),
            actual: samples.dim(),
        });
    }
    for (j, col) in samples.columns().into_iter().enumerate() {
        let mut filled = vec![false; ns];
        for &v in col.iter() {
            match grid.stratum_of(v) {
                Some(k) if !filled[k] => filled[k] = true,
                Some(k) => {
                    return Err(DoeError::InvalidDesignError(format!(
                        "stratum {k} of dimension {j} holds more than one sample"
                    )))
                }
                None => {
                    return Err(DoeError::InvalidDesignError(format!(
                        "sample {v} of dimension {j} is out of [0, 1)"
                    )))
                }
            }
        }
    }
    Ok(())
}
