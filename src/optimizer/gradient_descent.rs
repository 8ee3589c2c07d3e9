use super::{ConvergeHints, ConvergenceStatus, CostFn, ModelFn, Optimizer, Progress};
use crate::backend::{Backend, Scalar, Tensor1D, Tensor2D};
use crate::error::{LearnError, Result};

/// Hyperparameters of [`GradientDescent`].
///
/// Defaults:
/// - `learning_rate`: 0.1
/// - `max_iterations`: 10 000
/// - `tolerance`: 1e-6
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GradientDescentConfig {
    /// Step size η in `θ ← θ - η·∇J(θ)`.
    pub learning_rate: f64,
    /// Iteration budget.
    pub max_iterations: usize,
    /// Convergence threshold on gradient norm and on cost change.
    pub tolerance: f64,
}

impl Default for GradientDescentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            max_iterations: 10_000,
            tolerance: 1e-6,
        }
    }
}

impl GradientDescentConfig {
    /// Checks every field against its valid range.
    ///
    /// # Errors
    /// [`LearnError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(LearnError::InvalidParameter {
                name: "learning_rate",
                value: self.learning_rate,
                reason: "must be finite and greater than zero",
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(LearnError::InvalidParameter {
                name: "tolerance",
                value: self.tolerance,
                reason: "must be finite and non-negative",
            });
        }
        if self.max_iterations == 0 {
            return Err(LearnError::InvalidParameter {
                name: "max_iterations",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

/// Batch gradient descent with a fixed iteration budget.
///
/// Each iteration evaluates the model on the full dataset, asks the cost
/// function for `(cost, gradient)` and applies
/// ```text
/// θ ← θ - η · ∇J(θ)
/// ```
/// The run stops as soon as the gradient norm drops below the tolerance or,
/// from the second iteration on, the cost changes by less than the
/// tolerance.
///
/// # Example
/// ```rust
/// use supervised_rs::optimizer::GradientDescent;
///
/// let gd = GradientDescent::builder()
///     .learning_rate(0.05)
///     .max_iterations(500)
///     .build()
///     .unwrap();
/// assert_eq!(gd.config().max_iterations, 500);
/// ```
#[derive(Debug, Clone)]
pub struct GradientDescent {
    config: GradientDescentConfig,
    hints: ConvergeHints,
}

impl GradientDescent {
    /// Creates an optimizer from a validated configuration.
    pub fn new(config: GradientDescentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            hints: ConvergeHints {
                tolerance: config.tolerance,
                ..ConvergeHints::default()
            },
        })
    }

    /// Starts a [`GradientDescentBuilder`] with default hyperparameters.
    pub fn builder() -> GradientDescentBuilder {
        GradientDescentBuilder::new()
    }

    /// The configuration in use.
    pub fn config(&self) -> &GradientDescentConfig {
        &self.config
    }

    /// Learning rate η.
    pub fn learning_rate(&self) -> f64 {
        self.config.learning_rate
    }

    /// Diagnostics of the most recent run, without naming a backend.
    pub fn hints(&self) -> &ConvergeHints {
        &self.hints
    }

    fn finish<B: Backend>(
        &mut self,
        params: Tensor1D<B>,
        status: ConvergenceStatus,
    ) -> (Tensor1D<B>, ConvergenceStatus) {
        self.hints.status = Some(status);
        log::debug!("gradient descent finished: {}", self.hints);
        (params, status)
    }
}

impl<B: Backend> Optimizer<B> for GradientDescent {
    fn optimize<M, C>(
        &mut self,
        x: &Tensor2D<B>,
        y: &Tensor1D<B>,
        initial_params: Tensor1D<B>,
        model_fn: M,
        cost_fn: C,
        mut progress: Progress<'_>,
    ) -> Result<(Tensor1D<B>, ConvergenceStatus)>
    where
        M: ModelFn<B>,
        C: CostFn<B>,
    {
        let GradientDescentConfig {
            learning_rate,
            max_iterations,
            tolerance,
        } = self.config;
        self.hints = ConvergeHints {
            tolerance,
            ..ConvergeHints::default()
        };
        log::debug!(
            "gradient descent start: {} samples, {} parameters, lr={learning_rate}, max_iterations={max_iterations}, tolerance={tolerance:e}",
            x.rows(),
            initial_params.len(),
        );

        let neg_lr = Scalar::<B>::new(-learning_rate);
        let mut params = initial_params;
        let mut prev_cost: Option<f64> = None;

        for iteration in 1..=max_iterations {
            let predictions = model_fn.evaluate(x, &params);
            let (cost, gradient) = cost_fn.evaluate(x, &predictions, y);
            if gradient.len() != params.len() {
                return Err(LearnError::ShapeMismatch {
                    context: "gradient length",
                    expected: params.len(),
                    got: gradient.len(),
                });
            }

            let cost = cost.to_f64();
            if !cost.is_finite() || !gradient.is_finite() {
                log::warn!(
                    "gradient descent diverged at iteration {iteration}: non-finite cost or gradient (cost={cost})"
                );
                return Ok(self.finish(params, ConvergenceStatus::Diverged));
            }

            let grad_norm = gradient.l2_norm().to_f64();
            let delta = prev_cost.map(|prev| (prev - cost).abs());
            self.hints.iterations = iteration;
            self.hints.last_cost = Some(cost);
            self.hints.last_cost_delta = delta;
            self.hints.gradient_norm = Some(grad_norm);

            if let Some(cb) = progress.as_deref_mut() {
                cb(iteration, cost);
            }
            log::trace!("iteration {iteration}: cost={cost:.6e} |grad|={grad_norm:.3e}");

            let updated = params.add(&gradient.scale(&neg_lr));
            if !updated.is_finite() {
                log::warn!(
                    "gradient descent diverged at iteration {iteration}: parameter update is not finite"
                );
                return Ok(self.finish(params, ConvergenceStatus::Diverged));
            }
            params = updated;

            if grad_norm < tolerance || delta.is_some_and(|d| d < tolerance) {
                return Ok(self.finish(params, ConvergenceStatus::Converged));
            }
            prev_cost = Some(cost);
        }

        Ok(self.finish(params, ConvergenceStatus::MaxIterationsReached))
    }

    fn converge_hints(&self) -> ConvergeHints {
        self.hints.clone()
    }
}

/// Fluent builder for [`GradientDescent`].
///
/// Starts from [`GradientDescentConfig::default`]; `build` validates.
#[derive(Debug, Clone, Default)]
pub struct GradientDescentBuilder {
    config: GradientDescentConfig,
}

impl GradientDescentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.config.learning_rate = learning_rate;
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// # Errors
    /// [`LearnError::InvalidParameter`] if any hyperparameter is out of range.
    pub fn build(self) -> Result<GradientDescent> {
        GradientDescent::new(self.config)
    }
}
