//! Criterion benchmarks for optkit_core numerical kernels.
//!
//! Measures the normal CDF approximation and a bisection solve of the size
//! used by implied volatility.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use optkit_core::math::distributions::{norm_cdf, norm_pdf};
use optkit_core::math::solvers::{BisectionSolver, SolverConfig};

fn bench_distributions(c: &mut Criterion) {
    let mut group = c.benchmark_group("distributions");
    let xs: Vec<f64> = (0..1000).map(|i| -5.0 + i as f64 * 0.01).collect();

    group.bench_function("norm_cdf_1000", |b| {
        b.iter(|| xs.iter().map(|&x| norm_cdf(black_box(x))).sum::<f64>());
    });
    group.bench_function("norm_pdf_1000", |b| {
        b.iter(|| xs.iter().map(|&x| norm_pdf(black_box(x))).sum::<f64>());
    });

    group.finish();
}

fn bench_bisection(c: &mut Criterion) {
    let solver = BisectionSolver::new(SolverConfig::new(1e-4, 100));

    let cube_root_of_two = |x: f64| x * x * x - black_box(2.0);

    c.bench_function("bisection_cubic", |b| {
        b.iter(|| solver.find_root(cube_root_of_two, 0.001, 5.0));
    });
}

criterion_group!(benches, bench_distributions, bench_bisection);
criterion_main!(benches);
