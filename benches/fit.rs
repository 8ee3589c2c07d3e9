use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use supervised_rs::backend::{CpuBackend, Tensor1D, Tensor2D};
use supervised_rs::model::LogisticRegression;
use supervised_rs::optimizer::{GradientDescent, OptimizerCostGraph};

/// Deterministic two-class data with `n_features` columns and a noisy
/// linear boundary.
fn synthetic(n_samples: usize, n_features: usize) -> (Tensor2D<CpuBackend>, Tensor1D<CpuBackend>) {
    let mut data = Vec::with_capacity(n_samples * n_features);
    let mut labels = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let mut score = 0.0;
        for j in 0..n_features {
            let v = ((i * 31 + j * 17) % 97) as f64 / 48.5 - 1.0;
            score += v * if j % 2 == 0 { 1.0 } else { -0.5 };
            data.push(v);
        }
        let noise = ((i * 7) % 13) as f64 / 13.0 - 0.5;
        labels.push(if score + 0.3 * noise > 0.0 { 1.0 } else { 0.0 });
    }
    (
        Tensor2D::new(data, n_samples, n_features).unwrap(),
        Tensor1D::new(labels),
    )
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("logistic_fit");
    for &n_samples in &[100usize, 1_000] {
        let (x, y) = synthetic(n_samples, 4);
        group.bench_with_input(BenchmarkId::new("gradient_descent", n_samples), &n_samples, |b, _| {
            b.iter(|| {
                let gd = GradientDescent::builder().max_iterations(500).build().unwrap();
                let mut model = LogisticRegression::new(gd);
                model.fit(black_box(&x), black_box(&y)).unwrap();
                model
            });
        });
        group.bench_with_input(BenchmarkId::new("with_cost_graph", n_samples), &n_samples, |b, _| {
            b.iter(|| {
                let gd = GradientDescent::builder().max_iterations(500).build().unwrap();
                let mut model = LogisticRegression::new(OptimizerCostGraph::new(gd, 10).unwrap());
                model.fit(black_box(&x), black_box(&y)).unwrap();
                model
            });
        });
    }
    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let (x, y) = synthetic(1_000, 4);
    let mut model = LogisticRegression::new(GradientDescent::builder().build().unwrap());
    model.fit(&x, &y).unwrap();
    c.bench_function("logistic_predict_1000", |b| {
        b.iter(|| model.predict(black_box(&x)).unwrap())
    });
}

criterion_group!(benches, bench_fit, bench_predict);
criterion_main!(benches);
