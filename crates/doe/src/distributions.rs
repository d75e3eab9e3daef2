use crate::errors::{DoeError, Result};
use linfa::Float;
use uqbox_dist::{Distribution1D, JointIndependent};

/// Distributions of the random variables sampled by a design
pub enum Distributions<F: Float> {
    /// A single random variable
    Single(Box<dyn Distribution1D<F>>),
    /// One distribution per random variable
    List(Vec<Box<dyn Distribution1D<F>>>),
    /// Independent marginals of a joint distribution
    Joint(JointIndependent<F>),
}

impl<F: Float> Distributions<F> {
    /// Single random variable following `dist`
    pub fn single(dist: impl Distribution1D<F> + 'static) -> Self {
        Distributions::Single(Box::new(dist))
    }

    /// Number of random variables, i.e. the dimension of the design
    pub fn dim(&self) -> usize {
        match self {
            Distributions::Single(_) => 1,
            Distributions::List(list) => list.len(),
            Distributions::Joint(joint) => joint.dim(),
        }
    }

    /// Distribution of the `j`-th random variable
    pub fn marginal(&self, j: usize) -> Option<&dyn Distribution1D<F>> {
        match self {
            Distributions::Single(dist) if j == 0 => Some(dist.as_ref()),
            Distributions::Single(_) => None,
            Distributions::List(list) => list.get(j).map(|d| &**d),
            Distributions::Joint(joint) => joint.marginals().get(j).map(|d| &**d),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.dim() == 0 {
            return Err(DoeError::InvalidInputError(
                "distributions should hold at least one distribution".to_string(),
            ));
        }
        Ok(())
    }
}

impl<F: Float> From<Box<dyn Distribution1D<F>>> for Distributions<F> {
    fn from(dist: Box<dyn Distribution1D<F>>) -> Self {
        Distributions::Single(dist)
    }
}

impl<F: Float> From<Vec<Box<dyn Distribution1D<F>>>> for Distributions<F> {
    fn from(list: Vec<Box<dyn Distribution1D<F>>>) -> Self {
        Distributions::List(list)
    }
}

impl<F: Float> From<JointIndependent<F>> for Distributions<F> {
    fn from(joint: JointIndependent<F>) -> Self {
        Distributions::Joint(joint)
    }
}
