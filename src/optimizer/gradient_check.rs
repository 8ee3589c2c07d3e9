//! Finite-difference verification of analytic gradients.

use super::{CostFn, ModelFn};
use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::error::{LearnError, Result};
use finitediff::FiniteDiff;

/// Central-difference gradient of `θ ↦ cost_fn(x, model_fn(x, θ), y).0`.
///
/// Costs `2·len(θ)` model and cost evaluations.
pub fn numeric_gradient<B, M, C>(
    x: &Tensor2D<B>,
    y: &Tensor1D<B>,
    params: &Tensor1D<B>,
    model_fn: &M,
    cost_fn: &C,
) -> Tensor1D<B>
where
    B: Backend,
    M: ModelFn<B>,
    C: CostFn<B>,
{
    let objective = |theta: &Vec<f64>| -> f64 {
        let theta = Tensor1D::<B>::new(theta.clone());
        let predictions = model_fn.evaluate(x, &theta);
        cost_fn.evaluate(x, &predictions, y).0.to_f64()
    };
    Tensor1D::new(params.to_vec().central_diff(&objective))
}

/// Largest absolute difference between the gradient returned by `cost_fn`
/// and [`numeric_gradient`] at `params`.
///
/// # Errors
/// [`LearnError::ShapeMismatch`] if the analytic gradient length differs
/// from `params.len()`.
///
/// # Example
/// ```rust
/// use supervised_rs::backend::{CpuBackend, Tensor1D, Tensor2D};
/// use supervised_rs::model::{cost_function, logistic_function};
/// use supervised_rs::optimizer::check_gradient;
///
/// type B = CpuBackend;
/// let x = Tensor2D::<B>::from_rows(&[vec![1.0, 0.5], vec![1.0, -1.5], vec![1.0, 2.0]]).unwrap();
/// let y = Tensor1D::<B>::new(vec![1.0, 0.0, 1.0]);
/// let theta = Tensor1D::<B>::new(vec![0.1, -0.3]);
///
/// let err = check_gradient(&x, &y, &theta, &logistic_function::<B>, &cost_function::<B>).unwrap();
/// assert!(err < 1e-6);
/// ```
pub fn check_gradient<B, M, C>(
    x: &Tensor2D<B>,
    y: &Tensor1D<B>,
    params: &Tensor1D<B>,
    model_fn: &M,
    cost_fn: &C,
) -> Result<f64>
where
    B: Backend,
    M: ModelFn<B>,
    C: CostFn<B>,
{
    let predictions = model_fn.evaluate(x, params);
    let (_, analytic) = cost_fn.evaluate(x, &predictions, y);
    if analytic.len() != params.len() {
        return Err(LearnError::ShapeMismatch {
            context: "gradient length",
            expected: params.len(),
            got: analytic.len(),
        });
    }
    let numeric = numeric_gradient(x, y, params, model_fn, cost_fn);
    let max_diff = analytic
        .to_vec()
        .iter()
        .zip(numeric.to_vec())
        .map(|(a, n)| (a - n).abs())
        .fold(0.0, f64::max);
    log::debug!("gradient check: max abs difference {max_diff:.3e}");
    Ok(max_diff)
}
