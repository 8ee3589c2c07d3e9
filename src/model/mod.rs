//! Models fitted through an [`Optimizer`](crate::optimizer::Optimizer).

pub mod logistic;

pub use logistic::{cost_function, logistic_function, FitReport, LogisticRegression, PROBABILITY_CLIP};
