/*!
This library implements [Latin Hypercube sampling](https://en.wikipedia.org/wiki/Latin_hypercube_sampling)
of independent random variables.

The unit interval is divided into `ns` strata of equal width where `ns` is the number of samples.
A [Criterion] places exactly one sample in each stratum along each dimension, then each dimension
is mapped through the inverse cumulative distribution function of its random variable.

Example:
```
use uqbox_dist::{Distribution1D, Uniform};
use uqbox_doe::{Centered, LatinHypercubeSampling, MaxiMin, Random};
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

// Random variables are uniform on [5., 10.] and [0., 1.], samples are 2-dimensional.
let dists: Vec<Box<dyn Distribution1D<f64>>> = vec![
    Box::new(Uniform::new(5., 5.).unwrap()),
    Box::new(Uniform::new(0., 1.).unwrap()),
];
let mut lhs = LatinHypercubeSampling::new(dists).unwrap();
// We generate five samples using the random criterion
lhs.run(5).unwrap();
// or else at the middle of the strata with random generator for reproducibility
let mut lhs = lhs.criterion(Centered::<f64, _>::new().with_rng(Xoshiro256Plus::seed_from_u64(42)));
lhs.run(5).unwrap();
// or else maximizing the minimum distance between samples
let mut lhs = lhs.criterion(MaxiMin::<f64, _>::new().iterations(20));
lhs.run(5).unwrap();
assert_eq!(lhs.samples().dim(), (5, 2));
```

This library contains four criteria:
* [Random](crate::criteria::Random),
* [Centered](crate::criteria::Centered),
* [MaxiMin](crate::criteria::MaxiMin),
* [MinCorrelation](crate::criteria::MinCorrelation)

*/
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
pub mod criteria;
mod distributions;
mod errors;
mod grid;
mod lhs;
mod utils;

pub use criteria::*;
pub use distributions::*;
pub use errors::*;
pub use grid::*;
pub use lhs::*;
pub use utils::{max_abs_correlation, min_distance, pdist, DistanceMetric};
