/*!
A toolbox for stratified sampling of random variables and for the estimation
of their distributions.

This crate gathers the libraries of the `uqbox` workspace:
* [dist]: contracts of univariate and joint distributions,
* [doe]: Latin hypercube sampling mapped through distributions,
* [infer]: maximum likelihood estimation of distribution parameters.

Example:
```
use uqbox::dist::{Distribution1D, Uniform};
use uqbox::doe::{LatinHypercubeSampling, MaxiMin};
use uqbox::infer::{DistributionModel, Mle};

// Sample a uniform random variable over [2., 5.]
let dists: Vec<Box<dyn Distribution1D<f64>>> = vec![Box::new(Uniform::new(2., 3.).unwrap())];
let lhs = LatinHypercubeSampling::build(dists, 20, MaxiMin::<f64, _>::new()).unwrap();

// then learn back its bounds from the samples
let model = DistributionModel::new(Uniform::default(), &["loc", "scale"]).unwrap();
let mut mle = Mle::new(model);
mle.run(&lhs.samples().column(0)).unwrap();
let params = mle.mle().unwrap();
assert!(params[0] >= 2. && params[0] + params[1] <= 5.);
```
*/
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub use uqbox_dist as dist;
pub use uqbox_doe as doe;
pub use uqbox_infer as infer;
