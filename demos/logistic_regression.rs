//! End-to-end logistic regression with a recorded cost curve.
//!
//! Run with: RUST_LOG=info cargo run --example logistic_regression

use std::error::Error;
use supervised_rs::backend::{CpuBackend, Tensor1D, Tensor2D};
use supervised_rs::model::LogisticRegression;
use supervised_rs::optimizer::{GradientDescent, OptimizerCostGraph};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Hours studied and hours slept, labelled with pass (1) / fail (0).
    let x_train = Tensor2D::<CpuBackend>::from_rows(&[
        vec![0.5, 4.0],
        vec![1.0, 6.0],
        vec![1.5, 5.0],
        vec![2.0, 7.5],
        vec![2.5, 4.5],
        vec![3.0, 8.0],
        vec![3.5, 6.5],
        vec![4.0, 7.0],
        vec![4.5, 5.5],
        vec![5.0, 8.5],
    ])?;
    let y_train = Tensor1D::<CpuBackend>::new(vec![0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0]);

    let gd = GradientDescent::builder()
        .learning_rate(0.1)
        .max_iterations(20_000)
        .tolerance(1e-7)
        .build()?;
    let mut model = LogisticRegression::new(OptimizerCostGraph::new(gd, 500)?);

    let report = model.fit(&x_train, &y_train)?;
    println!("=== Fit ===");
    println!("{}", report.hints);
    println!("intercept:    {:.4}", model.intercept()?);
    println!("coefficients: {:?}", model.get_feature_params()?.to_vec());

    println!("\n=== Cost trace ===");
    for sample in model.optimizer().cost_trace() {
        println!("{:>6}  {:.6}", sample.iteration, sample.cost);
    }

    let x_test = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0, 5.0], vec![2.75, 6.0], vec![4.5, 8.0]])?;
    let probabilities = model.predict(&x_test)?.to_vec();
    let classes = model.predict_classes(&x_test)?.to_vec();

    println!("\n=== Predictions ===");
    for ((row, p), class) in [[1.0, 5.0], [2.75, 6.0], [4.5, 8.0]].iter().zip(&probabilities).zip(&classes) {
        println!("{row:?} -> p(pass) = {p:.3}, class = {class}");
    }

    Ok(())
}
