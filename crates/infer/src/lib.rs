/*!
This library implements the maximum likelihood estimation of the parameters
of an [InferenceModel] given some data.

A [DistributionModel] estimates some parameters of a univariate distribution from
[uqbox_dist]. The closed-form fit of the distribution is used when available,
otherwise the negative log-likelihood is minimized by an [Optimizer]
([Cobyla] by default) from several starting points.

Example:
```
use uqbox_dist::Uniform;
use uqbox_infer::{Cobyla, DistributionModel, Mle};
use ndarray::array;

let model = DistributionModel::new(Uniform::default(), &["loc", "scale"]).unwrap();
let mut mle = Mle::new(model)
    .n_optimizations(3)
    .optimizer(Cobyla::new().bounds(vec![(-5., 5.), (0.1, 10.)]));
mle.run(&array![1., 2., 4.].view()).unwrap();
assert_eq!(mle.mle().unwrap(), &array![1., 3.]);
```
*/
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod errors;
mod mle;
mod model;
mod optimizer;

pub use errors::*;
pub use mle::*;
pub use model::*;
pub use optimizer::*;
