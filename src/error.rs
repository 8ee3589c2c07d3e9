//! Error types shared by optimizers and models.

use crate::optimizer::ConvergeHints;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LearnError>;

/// Errors raised while fitting or using a model.
///
/// Non-convergence is deliberately absent: a run that exhausts its iteration
/// budget still produces usable parameters and is reported through
/// [`ConvergenceStatus`](crate::optimizer::ConvergenceStatus) instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LearnError {
    /// Cost, gradient or parameters became non-finite during a fit.
    #[error("numeric instability during fit: {hints}")]
    NumericInstability {
        /// Diagnostics of the run up to the failing iteration.
        hints: ConvergeHints,
    },

    /// A model was used for inference before a successful fit.
    #[error("model is not fitted; call fit before using it")]
    UnfittedModel,

    /// Two dimensions that must agree do not.
    #[error("shape mismatch in {context}: expected {expected}, got {got}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    /// No samples were provided where at least one is required.
    #[error("empty data: {0}")]
    EmptyData(&'static str),

    /// A label is not 0 or 1.
    #[error("invalid label {value} at index {index}: labels must be 0 or 1")]
    InvalidLabel { index: usize, value: f64 },

    /// A hyperparameter is out of its valid range.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_shape_mismatch() {
        let err = LearnError::ShapeMismatch {
            context: "predict features",
            expected: 3,
            got: 2,
        };
        assert_eq!(
            err.to_string(),
            "shape mismatch in predict features: expected 3, got 2"
        );
    }

    #[test]
    fn test_error_display_unfitted() {
        assert!(LearnError::UnfittedModel.to_string().contains("not fitted"));
    }

    #[test]
    fn test_error_display_invalid_label() {
        let err = LearnError::InvalidLabel {
            index: 4,
            value: 2.0,
        };
        assert!(err.to_string().contains("index 4"));
    }

    #[test]
    fn test_error_display_numeric_instability_includes_hints() {
        let err = LearnError::NumericInstability {
            hints: ConvergeHints::default(),
        };
        assert!(err.to_string().starts_with("numeric instability"));
        assert!(err.to_string().contains("0 iterations"));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = LearnError::EmptyData("fit");
        let _: &dyn std::error::Error = &err;
    }
}
