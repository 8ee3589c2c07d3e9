//! Binary logistic regression fitted by an injected [`Optimizer`].
//!
//! The model prepends a constant-1 bias column to the features, starts from
//! zero weights and hands [`logistic_function`] and [`cost_function`] to the
//! optimizer. Fitted weights are laid out as `[intercept, coef_1, ..., coef_n]`.
//!
//! The decision boundary is the hyperplane where `x · θ = 0`; a positive
//! coefficient raises the predicted probability of class 1 as its feature
//! grows. Multi-class problems can be handled one-vs-rest with one model per
//! class.

use crate::backend::{Backend, Scalar, Tensor1D, Tensor2D};
use crate::error::{LearnError, Result};
use crate::optimizer::{ConvergeHints, ConvergenceStatus, Optimizer};
use std::marker::PhantomData;

/// Predictions are clamped into `[PROBABILITY_CLIP, 1 - PROBABILITY_CLIP]`
/// before taking logarithms in [`cost_function`].
pub const PROBABILITY_CLIP: f64 = 1e-15;

/// `σ(x · θ)` for every row of `x`.
///
/// # Example
/// ```
/// use supervised_rs::backend::{CpuBackend, Tensor1D, Tensor2D};
/// use supervised_rs::model::logistic_function;
///
/// let x = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0, 0.0], vec![1.0, 2.0]]).unwrap();
/// let p = logistic_function(&x, &Tensor1D::new(vec![0.0, 1.0]));
/// assert_eq!(p.to_vec()[0], 0.5);
/// assert!(p.to_vec()[1] > 0.88);
/// ```
pub fn logistic_function<B: Backend>(x: &Tensor2D<B>, theta: &Tensor1D<B>) -> Tensor1D<B> {
    x.dot(theta).sigmoid()
}

/// Mean cross-entropy and its gradient with respect to `θ`.
///
/// ```text
/// J(θ)  = -(1/m) · (yᵀ log p + (1 - y)ᵀ log(1 - p))
/// ∇J(θ) =  (1/m) · xᵀ (p - y)
/// ```
/// `p` is clamped by [`PROBABILITY_CLIP`] for the cost only, so the cost stays
/// finite when the sigmoid saturates.
///
/// With no samples the cost is `0` and the gradient is all zeros.
pub fn cost_function<B: Backend>(
    x: &Tensor2D<B>,
    predictions: &Tensor1D<B>,
    y: &Tensor1D<B>,
) -> (Scalar<B>, Tensor1D<B>) {
    if y.is_empty() {
        return (Scalar::new(0.0), Tensor1D::zeros(x.cols()));
    }
    let inv_m = Scalar::<B>::new(1.0 / y.len() as f64);
    let one = Scalar::<B>::new(1.0);
    let neg_one = Scalar::<B>::new(-1.0);

    let p = predictions.clip(PROBABILITY_CLIP, 1.0 - PROBABILITY_CLIP);
    let one_minus_y = y.scale(&neg_one).add_scalar(&one);
    let one_minus_p = p.scale(&neg_one).add_scalar(&one);

    let log_likelihood = y.dot(&p.log()) + one_minus_y.dot(&one_minus_p.log());
    let cost = neg_one * inv_m * log_likelihood;
    let gradient = x.tdot(&predictions.sub(y)).scale(&inv_m);
    (cost, gradient)
}

/// Outcome of a successful [`LogisticRegression::fit`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitReport {
    pub status: ConvergenceStatus,
    pub hints: ConvergeHints,
}

impl FitReport {
    pub fn converged(&self) -> bool {
        self.status == ConvergenceStatus::Converged
    }
}

#[derive(Debug, Clone)]
struct FittedParams<B: Backend> {
    weights: Tensor1D<B>,
    n_features: usize,
}

/// Logistic regression classifier.
///
/// `O` is any [`Optimizer`]; the model owns it for its whole lifetime so the
/// optimizer's diagnostics (and, for [`OptimizerCostGraph`], the cost trace)
/// stay reachable through [`optimizer`](Self::optimizer).
///
/// [`OptimizerCostGraph`]: crate::optimizer::OptimizerCostGraph
///
/// # Example
/// ```
/// use supervised_rs::backend::{CpuBackend, Tensor1D, Tensor2D};
/// use supervised_rs::model::LogisticRegression;
/// use supervised_rs::optimizer::GradientDescent;
///
/// let x = Tensor2D::<CpuBackend>::from_rows(&[vec![-2.0], vec![-1.0], vec![1.0], vec![2.0]])?;
/// let y = Tensor1D::<CpuBackend>::new(vec![0.0, 0.0, 1.0, 1.0]);
///
/// let mut model = LogisticRegression::new(GradientDescent::builder().build()?);
/// model.fit(&x, &y)?;
///
/// let test = Tensor2D::<CpuBackend>::from_rows(&[vec![-1.5], vec![1.5]])?;
/// assert_eq!(model.predict_classes(&test)?.to_vec(), vec![0.0, 1.0]);
/// # Ok::<(), supervised_rs::LearnError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LogisticRegression<B: Backend, O> {
    optimizer: O,
    fitted: Option<FittedParams<B>>,
    _backend: PhantomData<B>,
}

impl<B: Backend, O: Optimizer<B>> LogisticRegression<B, O> {
    pub fn new(optimizer: O) -> Self {
        Self {
            optimizer,
            fitted: None,
            _backend: PhantomData,
        }
    }

    /// Fits the weights to `(x, y)`.
    ///
    /// Any previous fit is discarded first, so on error the model is left
    /// unfitted. Running out of iterations is not an error: the weights are
    /// kept, a warning is logged and the report says
    /// [`ConvergenceStatus::MaxIterationsReached`].
    ///
    /// # Errors
    /// - [`LearnError::EmptyData`] if `x` has no rows.
    /// - [`LearnError::ShapeMismatch`] if `y.len()` differs from the row count.
    /// - [`LearnError::InvalidLabel`] if a label is not 0 or 1.
    /// - [`LearnError::NumericInstability`] if the optimizer diverged.
    pub fn fit(&mut self, x: &Tensor2D<B>, y: &Tensor1D<B>) -> Result<FitReport> {
        self.fitted = None;

        let (rows, n_features) = x.shape();
        if rows == 0 {
            return Err(LearnError::EmptyData("fit requires at least one sample"));
        }
        if y.len() != rows {
            return Err(LearnError::ShapeMismatch {
                context: "fit labels",
                expected: rows,
                got: y.len(),
            });
        }
        let labels = y.to_vec();
        if let Some(index) = labels.iter().position(|&v| v != 0.0 && v != 1.0) {
            return Err(LearnError::InvalidLabel {
                index,
                value: labels[index],
            });
        }

        let x_b = x.with_bias_column();
        let initial = Tensor1D::zeros(n_features + 1);
        let (weights, status) = self.optimizer.optimize(
            &x_b,
            y,
            initial,
            logistic_function::<B>,
            cost_function::<B>,
            None,
        )?;
        let hints = self.optimizer.converge_hints();

        match status {
            ConvergenceStatus::Diverged => {
                log::error!("logistic regression fit failed: {hints}");
                return Err(LearnError::NumericInstability { hints });
            }
            ConvergenceStatus::MaxIterationsReached => {
                log::warn!("optimizer did not converge: {hints}");
            }
            ConvergenceStatus::Converged => {
                log::info!("logistic regression fitted: {hints}");
            }
        }

        self.fitted = Some(FittedParams {
            weights,
            n_features,
        });
        Ok(FitReport { status, hints })
    }

    fn fitted(&self) -> Result<&FittedParams<B>> {
        self.fitted.as_ref().ok_or(LearnError::UnfittedModel)
    }

    /// Probability of class 1 for every row of `x`, in `[0, 1]`.
    ///
    /// # Errors
    /// [`LearnError::UnfittedModel`] before a successful fit;
    /// [`LearnError::ShapeMismatch`] if `x` has a different number of columns
    /// than the training data.
    pub fn predict(&self, x: &Tensor2D<B>) -> Result<Tensor1D<B>> {
        let fitted = self.fitted()?;
        if x.cols() != fitted.n_features {
            return Err(LearnError::ShapeMismatch {
                context: "predict features",
                expected: fitted.n_features,
                got: x.cols(),
            });
        }
        Ok(logistic_function(&x.with_bias_column(), &fitted.weights))
    }

    /// Class labels: 1 where [`predict`](Self::predict) is at least 0.5, else 0.
    pub fn predict_classes(&self, x: &Tensor2D<B>) -> Result<Tensor1D<B>> {
        let probabilities = self.predict(x)?.to_vec();
        Ok(Tensor1D::new(
            probabilities
                .into_iter()
                .map(|p| if p >= 0.5 { 1.0 } else { 0.0 })
                .collect(),
        ))
    }

    /// Feature coefficients, excluding the intercept.
    pub fn get_feature_params(&self) -> Result<Tensor1D<B>> {
        let weights = self.fitted()?.weights.to_vec();
        Ok(Tensor1D::new(weights[1..].to_vec()))
    }

    /// Full weight vector `[intercept, coef_1, ..., coef_n]`.
    pub fn weights(&self) -> Result<&Tensor1D<B>> {
        Ok(&self.fitted()?.weights)
    }

    pub fn intercept(&self) -> Result<f64> {
        Ok(self.fitted()?.weights.to_vec()[0])
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    pub fn into_optimizer(self) -> O {
        self.optimizer
    }
}
