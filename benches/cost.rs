use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};

use costmat::cost::{cost_matrix_with, CostConfig, SqEuclideanStrategy};
use costmat::Metric;

fn make_ab(n: usize, m: usize, d: usize, seed: u64) -> (Array2<f64>, Array2<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut a = Array2::<f64>::zeros((n, d));
    let mut b = Array2::<f64>::zeros((m, d));
    for i in 0..n {
        for k in 0..d {
            a[[i, k]] = StandardNormal.sample(&mut rng);
        }
    }
    for j in 0..m {
        for k in 0..d {
            b[[j, k]] = StandardNormal.sample(&mut rng);
        }
    }
    (a, b)
}

fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("cost_matrix");
    group.sample_size(30);

    let cases = [(64usize, 64usize, 3usize), (256, 256, 16), (512, 128, 64)];
    let metrics = [
        Metric::SqEuclidean,
        Metric::Euclidean,
        Metric::Manhattan,
        Metric::Minkowski(3.0),
    ];

    for &(n, m, d) in &cases {
        let (a, b) = make_ab(n, m, d, 123);
        let mut out = Array2::<f64>::zeros((n, m));
        let cfg = CostConfig::default();

        for metric in metrics {
            group.bench_with_input(
                BenchmarkId::new(metric.to_string(), format!("n{n}_m{m}_d{d}")),
                &(n, m, d),
                |bch, _| {
                    bch.iter(|| {
                        cost_matrix_with(metric, &a.view(), &b.view(), &mut out, &cfg).unwrap()
                    })
                },
            );
        }
    }

    group.finish();
}

// Naive vs Gram-expansion L2sq; the expansion should win as `d` grows.
fn bench_sq_euclidean_strategy(c: &mut Criterion) {
    let mut group = c.benchmark_group("l2sq_strategy");
    group.sample_size(30);

    for &d in &[4usize, 32, 256] {
        let (a, b) = make_ab(256, 256, d, 7);
        let mut out = Array2::<f64>::zeros((256, 256));

        for (name, strategy) in [
            ("naive", SqEuclideanStrategy::Naive),
            ("expanded", SqEuclideanStrategy::Expanded),
        ] {
            let cfg = CostConfig {
                sq_euclidean: strategy,
                ..CostConfig::default()
            };
            group.bench_with_input(BenchmarkId::new(name, format!("d{d}")), &d, |bch, _| {
                bch.iter(|| {
                    cost_matrix_with(Metric::SqEuclidean, &a.view(), &b.view(), &mut out, &cfg)
                        .unwrap()
                })
            });
        }

        #[cfg(feature = "parallel")]
        {
            let cfg = CostConfig {
                parallel: true,
                ..CostConfig::default()
            };
            group.bench_with_input(BenchmarkId::new("naive_parallel", format!("d{d}")), &d, |bch, _| {
                bch.iter(|| {
                    cost_matrix_with(Metric::SqEuclidean, &a.view(), &b.view(), &mut out, &cfg)
                        .unwrap()
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_metrics, bench_sq_euclidean_strategy);
criterion_main!(benches);
