//! Iterative parameter search.
//!
//! An [`Optimizer`] receives a model function, a cost function and an initial
//! parameter vector, and iterates until it converges, runs out of budget or
//! diverges. Model and cost functions are plain closures or `fn` items; they
//! are accepted through the [`ModelFn`] and [`CostFn`] traits so every
//! optimizer is statically dispatched.
//!
//! # Example
//! ```rust
//! use supervised_rs::backend::{CpuBackend, Scalar, Tensor1D, Tensor2D};
//! use supervised_rs::optimizer::{ConvergenceStatus, GradientDescent, Optimizer};
//!
//! type B = CpuBackend;
//!
//! // Least squares on a single feature: minimise ½·mean((x·θ - y)²).
//! let x = Tensor2D::<B>::from_rows(&[vec![1.0], vec![2.0], vec![3.0]]).unwrap();
//! let y = Tensor1D::<B>::new(vec![2.0, 4.0, 6.0]);
//! let m = Scalar::<B>::new(3.0);
//!
//! let mut gd = GradientDescent::builder().learning_rate(0.1).build().unwrap();
//! let (theta, status) = gd
//!     .optimize(
//!         &x,
//!         &y,
//!         Tensor1D::zeros(1),
//!         |x: &Tensor2D<B>, p: &Tensor1D<B>| x.dot(p),
//!         |x: &Tensor2D<B>, pred: &Tensor1D<B>, y: &Tensor1D<B>| {
//!             let r = pred.sub(y);
//!             let cost = r.dot(&r) / (m + m);
//!             (cost, x.tdot(&r).scale(&(Scalar::new(1.0) / m)))
//!         },
//!         None,
//!     )
//!     .unwrap();
//! assert_eq!(status, ConvergenceStatus::Converged);
//! assert!((theta.to_vec()[0] - 2.0).abs() < 1e-3);
//! ```

use crate::backend::{Backend, Scalar, Tensor1D, Tensor2D};
use crate::error::Result;
use std::fmt;

mod cost_graph;
mod gradient_check;
mod gradient_descent;

pub use cost_graph::{CostSample, CostTrace, OptimizerCostGraph};
pub use gradient_check::{check_gradient, numeric_gradient};
pub use gradient_descent::{GradientDescent, GradientDescentBuilder, GradientDescentConfig};

/// Maps a feature matrix and a parameter vector to predictions.
///
/// Implemented for every `Fn(&Tensor2D<B>, &Tensor1D<B>) -> Tensor1D<B>`.
pub trait ModelFn<B: Backend> {
    /// Evaluates the model for every row of `x`.
    fn evaluate(&self, x: &Tensor2D<B>, params: &Tensor1D<B>) -> Tensor1D<B>;
}

impl<B, F> ModelFn<B> for F
where
    B: Backend,
    F: Fn(&Tensor2D<B>, &Tensor1D<B>) -> Tensor1D<B>,
{
    fn evaluate(&self, x: &Tensor2D<B>, params: &Tensor1D<B>) -> Tensor1D<B> {
        self(x, params)
    }
}

/// Scores predictions against targets.
///
/// Returns the scalar cost and its gradient with respect to the parameters.
/// The gradient must have the same length as the parameter vector.
pub trait CostFn<B: Backend> {
    /// Computes `(cost, gradient)`.
    fn evaluate(
        &self,
        x: &Tensor2D<B>,
        predictions: &Tensor1D<B>,
        y: &Tensor1D<B>,
    ) -> (Scalar<B>, Tensor1D<B>);
}

impl<B, F> CostFn<B> for F
where
    B: Backend,
    F: Fn(&Tensor2D<B>, &Tensor1D<B>, &Tensor1D<B>) -> (Scalar<B>, Tensor1D<B>),
{
    fn evaluate(
        &self,
        x: &Tensor2D<B>,
        predictions: &Tensor1D<B>,
        y: &Tensor1D<B>,
    ) -> (Scalar<B>, Tensor1D<B>) {
        self(x, predictions, y)
    }
}

/// Per-iteration callback: `(1-based iteration, cost at that iteration)`.
pub type Progress<'a> = Option<&'a mut dyn FnMut(usize, f64)>;

/// Why an optimization run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConvergenceStatus {
    /// The convergence threshold was met.
    Converged,
    /// The iteration budget ran out first. Parameters are still usable.
    MaxIterationsReached,
    /// Cost, gradient or parameters became non-finite.
    Diverged,
}

impl fmt::Display for ConvergenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConvergenceStatus::Converged => "converged",
            ConvergenceStatus::MaxIterationsReached => "max iterations reached",
            ConvergenceStatus::Diverged => "diverged",
        };
        f.write_str(s)
    }
}

/// Diagnostics of the most recent optimization run.
///
/// `Default` describes an optimizer that has not run yet.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergeHints {
    /// Completed iterations.
    pub iterations: usize,
    /// Cost at the last completed iteration.
    pub last_cost: Option<f64>,
    /// `|cost_prev - cost|` at the last completed iteration.
    pub last_cost_delta: Option<f64>,
    /// Euclidean norm of the last finite gradient.
    pub gradient_norm: Option<f64>,
    /// Configured convergence tolerance.
    pub tolerance: f64,
    /// How the run ended. `None` until a run finishes.
    pub status: Option<ConvergenceStatus>,
}

struct OrNa(Option<f64>);

impl fmt::Display for OrNa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v:.3e}"),
            None => f.write_str("n/a"),
        }
    }
}

impl fmt::Display for ConvergeHints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{status}")?,
            None => f.write_str("not run")?,
        }
        write!(
            f,
            " after {} iterations (cost {}, cost delta {}, gradient norm {}, tolerance {:.1e})",
            self.iterations,
            OrNa(self.last_cost),
            OrNa(self.last_cost_delta),
            OrNa(self.gradient_norm),
            self.tolerance,
        )
    }
}

/// An iterative optimizer for a dense parameter vector.
///
/// Implementations must not modify `x` or `y`, must call `progress` exactly
/// once per completed iteration with a finite cost, and must report the true
/// stopping reason in the returned [`ConvergenceStatus`].
pub trait Optimizer<B: Backend> {
    /// Runs the optimization from `initial_params`.
    ///
    /// # Errors
    /// [`LearnError::ShapeMismatch`](crate::LearnError::ShapeMismatch) if
    /// `cost_fn` returns a gradient whose length differs from the parameters.
    /// Divergence is not an error here; it is reported as
    /// [`ConvergenceStatus::Diverged`] with the last finite parameters.
    fn optimize<M, C>(
        &mut self,
        x: &Tensor2D<B>,
        y: &Tensor1D<B>,
        initial_params: Tensor1D<B>,
        model_fn: M,
        cost_fn: C,
        progress: Progress<'_>,
    ) -> Result<(Tensor1D<B>, ConvergenceStatus)>
    where
        M: ModelFn<B>,
        C: CostFn<B>;

    /// Diagnostics of the most recent [`optimize`](Optimizer::optimize) call.
    fn converge_hints(&self) -> ConvergeHints;
}
