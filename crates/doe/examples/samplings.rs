use uqbox_dist::{Distribution1D, Uniform};
use uqbox_doe::{Centered, LatinHypercubeSampling, MaxiMin, MinCorrelation, Random, Result};

fn uniforms() -> Result<Vec<Box<dyn Distribution1D<f64>>>> {
    Ok(vec![
        Box::new(Uniform::new(0., 1.)?),
        Box::new(Uniform::new(-10., 20.)?),
        Box::new(Uniform::new(5., 10.)?),
    ])
}

fn main() -> Result<()> {
    env_logger::init();
    let n = 10;

    println!("Take {n} samples of U[0, 1] x U[-10, 10] x U[5, 15]\n");

    println!("*** using random criterion");
    let lhs = LatinHypercubeSampling::build(uniforms()?, n, Random::<f64, _>::new())?;
    println!("{}\n", lhs.samples());

    println!("*** using centered criterion");
    let lhs = LatinHypercubeSampling::build(uniforms()?, n, Centered::<f64, _>::new())?;
    println!("{}\n", lhs.samples());

    println!("*** using maximin criterion");
    let lhs = LatinHypercubeSampling::build(uniforms()?, n, MaxiMin::<f64, _>::new())?;
    println!("{}\n", lhs.samples());

    println!("*** using min correlation criterion");
    let lhs = LatinHypercubeSampling::build(uniforms()?, n, MinCorrelation::<f64, _>::new())?;
    println!("{}\n", lhs.samples());

    Ok(())
}
