//! # supervised-rs
//!
//! Gradient-based fitting of supervised models with pluggable optimizers and
//! tensor backends.
//!
//! ## Core Design
//!
//! - **Optimizer contract**: an [`Optimizer`](optimizer::Optimizer) drives a
//!   parameter vector given a model function and a differentiable cost
//!   function, and reports why it stopped through
//!   [`ConvergenceStatus`](optimizer::ConvergenceStatus).
//! - **Decorators**: [`OptimizerCostGraph`](optimizer::OptimizerCostGraph)
//!   wraps any optimizer and records its cost curve without changing results.
//! - **Backend agnosticism**: models and optimizers are generic over
//!   [`Backend`](backend::Backend); `CpuBackend` is always available and
//!   `NdarrayBackend` is behind the `ndarray` feature.
//!
//! ## Quick Start
//!
//! ```rust
//! use supervised_rs::backend::{CpuBackend, Tensor1D, Tensor2D};
//! use supervised_rs::model::LogisticRegression;
//! use supervised_rs::optimizer::{GradientDescent, OptimizerCostGraph};
//!
//! let x = Tensor2D::<CpuBackend>::from_rows(&[vec![-2.0], vec![-1.0], vec![1.0], vec![2.0]])?;
//! let y = Tensor1D::<CpuBackend>::new(vec![0.0, 0.0, 1.0, 1.0]);
//!
//! let gd = GradientDescent::builder().learning_rate(0.1).build()?;
//! let mut model = LogisticRegression::new(OptimizerCostGraph::new(gd, 500)?);
//! let report = model.fit(&x, &y)?;
//! println!("{}", report.hints);
//!
//! let p = model.predict(&Tensor2D::from_rows(&[vec![1.5]])?)?;
//! assert!(p.to_vec()[0] > 0.5);
//! for sample in model.optimizer().cost_trace() {
//!     println!("{:>6}  {:.6}", sample.iteration, sample.cost);
//! }
//! # Ok::<(), supervised_rs::LearnError>(())
//! ```
//!
//! ## Module Structure
//!
//! - `backend`: tensor storage and arithmetic (`Scalar`, `Tensor1D`, `Tensor2D`)
//! - `optimizer`: the optimizer trait, gradient descent, the cost-graph
//!   decorator and finite-difference gradient checks
//! - `model`: logistic regression
//! - `error`: the crate error type

pub mod backend;

/// Error type shared by every fallible operation.
pub mod error;

/// Models fitted by an optimizer.
pub mod model;

/// Optimization algorithms and their diagnostics.
pub mod optimizer;

pub use error::{LearnError, Result};
