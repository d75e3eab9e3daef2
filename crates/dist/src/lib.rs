/*!
This library defines the contracts of the probability distributions consumed by
the sampling and inference crates of `uqbox`.

A univariate distribution implements [Distribution1D] which only deals with
parameters. Evaluation functions are optional capabilities ([Icdf], [Cdf], [Pdf],
[LogPdf], [Fit]) a distribution exposes through its `as_*` accessors.

Joint distributions are built from ordered marginals:
* [JointIndependent] for independent marginals,
* [JointCopula] for marginals linked by a [Copula].

Joint evaluations are resolved once at construction given the capabilities of
the marginals and of the copula. Parameters of joint distributions are
identified by a structured [ParamKey].

Example:
```
use uqbox_dist::{Distribution1D, Independence, JointCopula, Uniform};
use ndarray::array;

let marginals: Vec<Box<dyn Distribution1D<f64>>> = vec![
    Box::new(Uniform::new(0., 2.).unwrap()),
    Box::new(Uniform::new(0., 4.).unwrap()),
];
let joint = JointCopula::new(marginals, Box::new(Independence)).unwrap();
let pdf = joint.pdf(&array![[1., 1.]].view()).unwrap();
assert_eq!(pdf[0], 0.125);
```
*/
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod copula;
mod errors;
mod joint_copula;
mod joint_independent;
mod parameters;
mod traits;
mod uniform;

pub use copula::*;
pub use errors::*;
pub use joint_copula::*;
pub use joint_independent::*;
pub use parameters::*;
pub use traits::*;
pub use uniform::*;
