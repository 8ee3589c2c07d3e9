use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use std::error::Error;
use std::thread;
use supervised_rs::backend::{CpuBackend, Tensor1D, Tensor2D};
use supervised_rs::model::LogisticRegression;
use supervised_rs::optimizer::{ConvergenceStatus, GradientDescent, OptimizerCostGraph};
use supervised_rs::LearnError;

type B = CpuBackend;

/// Two well separated clusters on either side of `x1 + x2 = 0`.
fn separable_2d(n_per_class: usize) -> (Tensor2D<B>, Tensor1D<B>) {
    let mut rows = Vec::with_capacity(2 * n_per_class);
    let mut labels = Vec::with_capacity(2 * n_per_class);
    for i in 0..n_per_class {
        let t = 2.0 * i as f64 / (n_per_class - 1) as f64 - 1.0;
        let wobble = 0.6 * (3.0 * i as f64).cos();
        rows.push(vec![-2.0 + 0.8 * t, -2.0 + wobble]);
        labels.push(0.0);
        rows.push(vec![2.0 - 0.8 * t, 2.0 - wobble]);
        labels.push(1.0);
    }
    (
        Tensor2D::from_rows(&rows).unwrap(),
        Tensor1D::new(labels),
    )
}

fn accuracy(predicted: &[f64], actual: &[f64]) -> f64 {
    let hits = predicted
        .iter()
        .zip(actual)
        .filter(|(p, a)| p == a)
        .count();
    hits as f64 / actual.len() as f64
}

#[test]
fn test_four_sample_scenario() -> Result<(), Box<dyn Error>> {
    let x = Tensor2D::<B>::from_rows(&[vec![-2.0], vec![-1.0], vec![1.0], vec![2.0]])?;
    let y = Tensor1D::<B>::new(vec![0.0, 0.0, 1.0, 1.0]);

    let gd = GradientDescent::builder()
        .learning_rate(0.1)
        .max_iterations(10_000)
        .build()?;
    let mut model = LogisticRegression::new(gd);
    let report = model.fit(&x, &y)?;
    assert_eq!(report.status, ConvergenceStatus::Converged);

    let test = Tensor2D::<B>::from_rows(&[vec![-1.5], vec![1.5]])?;
    let p = model.predict(&test)?.to_vec();
    assert!(p[0] < 0.5, "p(-1.5) = {}", p[0]);
    assert!(p[1] > 0.5, "p(1.5) = {}", p[1]);
    assert_eq!(model.predict_classes(&test)?.to_vec(), vec![0.0, 1.0]);
    Ok(())
}

#[test]
fn test_separable_data_converges_with_high_accuracy() -> Result<(), Box<dyn Error>> {
    let (x, y) = separable_2d(20);
    let gd = GradientDescent::builder().max_iterations(20_000).build()?;
    let mut model = LogisticRegression::new(gd);

    let report = model.fit(&x, &y)?;
    assert!(report.converged(), "{}", report.hints);
    assert!(report.hints.iterations < 20_000);

    let predicted = model.predict_classes(&x)?.to_vec();
    assert!(accuracy(&predicted, &y.to_vec()) >= 0.95);

    let coef = model.get_feature_params()?.to_vec();
    assert_eq!(coef.len(), 2);
    assert!(coef.iter().all(|&c| c > 0.0));
    Ok(())
}

#[test]
fn test_predictions_are_probabilities() -> Result<(), Box<dyn Error>> {
    let (x, y) = separable_2d(10);
    let mut model = LogisticRegression::new(GradientDescent::builder().build()?);
    model.fit(&x, &y)?;

    let far = Tensor2D::<B>::from_rows(&[vec![-1e6, -1e6], vec![0.0, 0.0], vec![1e6, 1e6]])?;
    let p = model.predict(&far)?.to_vec();
    assert_eq!(p.len(), 3);
    assert!(p.iter().all(|v| (0.0..=1.0).contains(v)));
    assert_eq!(p[0], 0.0);
    assert_eq!(p[2], 1.0);
    Ok(())
}

#[test]
fn test_cost_graph_matches_plain_optimizer() -> Result<(), Box<dyn Error>> {
    let (x, y) = separable_2d(15);

    let mut plain = LogisticRegression::new(GradientDescent::builder().build()?);
    let plain_report = plain.fit(&x, &y)?;

    let graph = OptimizerCostGraph::new(GradientDescent::builder().build()?, 50)?;
    let mut traced = LogisticRegression::new(graph);
    let traced_report = traced.fit(&x, &y)?;

    assert_eq!(plain_report, traced_report);
    assert_eq!(plain.weights()?.to_vec(), traced.weights()?.to_vec());

    let iterations = traced_report.hints.iterations;
    let trace = traced.optimizer().cost_trace();
    assert_eq!(trace.len(), iterations / 50);
    assert!(trace.iter().all(|s| s.iteration % 50 == 0));
    assert!(trace.costs().windows(2).all(|w| w[1] <= w[0]));
    if let Some(last) = trace.last() {
        assert!(last.iteration <= iterations);
    }
    Ok(())
}

#[test]
fn test_cost_trace_cadence_one_covers_every_iteration() -> Result<(), Box<dyn Error>> {
    let x = Tensor2D::<B>::from_rows(&[vec![0.0], vec![1.0]])?;
    let y = Tensor1D::<B>::new(vec![0.0, 1.0]);
    let gd = GradientDescent::builder().max_iterations(40).build()?;
    let mut model = LogisticRegression::new(OptimizerCostGraph::new(gd, 1)?);
    let report = model.fit(&x, &y)?;

    let trace = model.optimizer().cost_trace();
    assert_eq!(trace.len(), report.hints.iterations);
    assert_abs_diff_eq!(trace.samples()[0].cost, std::f64::consts::LN_2, epsilon = 1e-12);
    assert_eq!(trace.last().map(|s| s.cost), report.hints.last_cost);
    Ok(())
}

#[test]
fn test_refit_overwrites_previous_parameters() -> Result<(), Box<dyn Error>> {
    let mut model = LogisticRegression::new(GradientDescent::builder().build()?);

    let x1 = Tensor2D::<B>::from_rows(&[vec![-2.0], vec![-1.0], vec![1.0], vec![2.0]])?;
    model.fit(&x1, &Tensor1D::new(vec![0.0, 0.0, 1.0, 1.0]))?;
    assert!(model.get_feature_params()?.to_vec()[0] > 0.0);

    // Flipped labels: the slope must change sign.
    model.fit(&x1, &Tensor1D::new(vec![1.0, 1.0, 0.0, 0.0]))?;
    assert!(model.get_feature_params()?.to_vec()[0] < 0.0);

    // Different feature count: the fitted shape follows the latest fit.
    let (x2, y2) = separable_2d(5);
    model.fit(&x2, &y2)?;
    assert_eq!(model.weights()?.len(), 3);
    assert!(matches!(
        model.predict(&x1),
        Err(LearnError::ShapeMismatch { expected: 2, got: 1, .. })
    ));
    Ok(())
}

#[test]
fn test_predict_before_fit_fails() {
    let model = LogisticRegression::<B, _>::new(GradientDescent::builder().build().unwrap());
    let x = Tensor2D::<B>::from_rows(&[vec![0.0]]).unwrap();
    assert_eq!(model.predict(&x).unwrap_err(), LearnError::UnfittedModel);
}

#[test]
fn test_ragged_rows_are_rejected() {
    let err = Tensor2D::<B>::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
    assert!(matches!(err, LearnError::ShapeMismatch { .. }));
}

#[test]
fn test_independent_models_on_separate_threads() {
    let handles: Vec<_> = [1.0f64, -1.0]
        .into_iter()
        .map(|sign| {
            thread::spawn(move || {
                let x = Tensor2D::<B>::from_rows(&[vec![-2.0], vec![-1.0], vec![1.0], vec![2.0]])
                    .unwrap();
                let labels = if sign > 0.0 {
                    vec![0.0, 0.0, 1.0, 1.0]
                } else {
                    vec![1.0, 1.0, 0.0, 0.0]
                };
                let gd = GradientDescent::builder().build().unwrap();
                let mut model = LogisticRegression::new(OptimizerCostGraph::new(gd, 100).unwrap());
                model.fit(&x, &Tensor1D::new(labels)).unwrap();
                model
            })
        })
        .collect();

    let models: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let slopes: Vec<f64> = models
        .iter()
        .map(|m| m.get_feature_params().unwrap().to_vec()[0])
        .collect();
    assert!(slopes[0] > 0.0);
    assert_abs_diff_eq!(slopes[0], -slopes[1], epsilon = 1e-9);
    assert_eq!(
        models[0].optimizer().cost_trace().len(),
        models[1].optimizer().cost_trace().len()
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_predict_length_matches_rows(
        rows in prop::collection::vec(prop::collection::vec(-10.0f64..10.0, 2), 1..40)
    ) {
        let (x, y) = separable_2d(4);
        let gd = GradientDescent::builder().max_iterations(200).build().unwrap();
        let mut model = LogisticRegression::new(gd);
        model.fit(&x, &y).unwrap();

        let n = rows.len();
        let query = Tensor2D::<B>::from_rows(&rows).unwrap();
        let p = model.predict(&query).unwrap().to_vec();
        prop_assert_eq!(p.len(), n);
        prop_assert!(p.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
