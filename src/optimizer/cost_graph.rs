use super::{ConvergeHints, ConvergenceStatus, CostFn, ModelFn, Optimizer, Progress};
use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::error::{LearnError, Result};

/// One recorded point of a cost curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostSample {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Cost evaluated at that iteration.
    pub cost: f64,
}

/// Cost samples of one optimization run, ordered by iteration.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostTrace {
    samples: Vec<CostSample>,
}

impl CostTrace {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[CostSample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CostSample> {
        self.samples.iter()
    }

    /// The most recent sample, if any.
    pub fn last(&self) -> Option<&CostSample> {
        self.samples.last()
    }

    /// Iteration numbers of all samples.
    pub fn iterations(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.iteration).collect()
    }

    /// Costs of all samples.
    pub fn costs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.cost).collect()
    }

    fn push(&mut self, iteration: usize, cost: f64) {
        self.samples.push(CostSample { iteration, cost });
    }
}

impl<'a> IntoIterator for &'a CostTrace {
    type Item = &'a CostSample;
    type IntoIter = std::slice::Iter<'a, CostSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Optimizer decorator that records the cost curve of the wrapped optimizer.
///
/// Every call is forwarded unchanged; parameters and status come straight
/// from the inner optimizer. While it runs, the cost of every
/// `iterations_per_update`-th iteration is appended to a [`CostTrace`],
/// which is rebuilt on each call to [`optimize`](Optimizer::optimize).
/// A run of `n` iterations yields `n / iterations_per_update` samples.
///
/// # Example
/// ```rust
/// use supervised_rs::backend::CpuBackend;
/// use supervised_rs::model::LogisticRegression;
/// use supervised_rs::optimizer::{GradientDescent, OptimizerCostGraph};
/// use supervised_rs::backend::{Tensor1D, Tensor2D};
///
/// let x = Tensor2D::<CpuBackend>::from_rows(&[vec![-1.0], vec![1.0]]).unwrap();
/// let y = Tensor1D::<CpuBackend>::new(vec![0.0, 1.0]);
///
/// let gd = GradientDescent::builder().max_iterations(100).build().unwrap();
/// let graph = OptimizerCostGraph::new(gd, 10).unwrap();
/// let mut model = LogisticRegression::new(graph);
/// model.fit(&x, &y).unwrap();
///
/// let trace = model.optimizer().cost_trace();
/// assert_eq!(trace.iterations(), (1..=10).map(|i| i * 10).collect::<Vec<_>>());
/// ```
#[derive(Debug, Clone)]
pub struct OptimizerCostGraph<O> {
    inner: O,
    iterations_per_update: usize,
    trace: CostTrace,
}

impl<O> OptimizerCostGraph<O> {
    /// Wraps `inner`, sampling the cost every `iterations_per_update`
    /// iterations.
    ///
    /// # Errors
    /// [`LearnError::InvalidParameter`] if `iterations_per_update` is zero.
    pub fn new(inner: O, iterations_per_update: usize) -> Result<Self> {
        if iterations_per_update == 0 {
            return Err(LearnError::InvalidParameter {
                name: "iterations_per_update",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(Self {
            inner,
            iterations_per_update,
            trace: CostTrace::default(),
        })
    }

    /// Samples recorded during the most recent run.
    pub fn cost_trace(&self) -> &CostTrace {
        &self.trace
    }

    pub fn iterations_per_update(&self) -> usize {
        self.iterations_per_update
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<B, O> Optimizer<B> for OptimizerCostGraph<O>
where
    B: Backend,
    O: Optimizer<B>,
{
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
        let every = self.iterations_per_update;
        let mut trace = CostTrace::default();
        let mut record = |iteration: usize, cost: f64| {
            if iteration % every == 0 {
                trace.push(iteration, cost);
            }
            if let Some(outer) = progress.as_deref_mut() {
                outer(iteration, cost);
            }
        };
        let hook: &mut dyn FnMut(usize, f64) = &mut record;
        let result = self
            .inner
            .optimize(x, y, initial_params, model_fn, cost_fn, Some(hook));

        log::debug!("cost graph recorded {} samples", trace.len());
        self.trace = trace;
        result
    }

    fn converge_hints(&self) -> ConvergeHints {
        self.inner.converge_hints()
    }
}
