use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use configspace::hyperparameter::CategoricalHyperparameter;

/// A categorical domain with `size` string choices and increasing weights.
fn domain(size: usize, weighted: bool) -> CategoricalHyperparameter {
    let choices: Vec<String> = (0..size).map(|i| format!("choice_{i}")).collect();
    let builder = CategoricalHyperparameter::builder("x", choices);
    #[allow(clippy::cast_precision_loss)]
    let builder = if weighted {
        builder.weights((1..=size).map(|w| w as f64).collect())
    } else {
        builder
    };
    builder.build().unwrap()
}

/// One size per neighborhood tier.
const SIZES: [usize; 3] = [4, 20, 200];

fn bench_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("categorical_neighbors");
    for size in SIZES {
        let hp = domain(size, false);
        let mut rng = fastrand::Rng::with_seed(42);
        group.bench_with_input(BenchmarkId::new("all", size), &size, |b, &size| {
            b.iter(|| hp.neighbors_vector(size / 2, size - 1, &mut rng));
        });
        group.bench_with_input(BenchmarkId::new("four", size), &size, |b, &size| {
            b.iter(|| hp.neighbors_vector(size / 2, 4, &mut rng));
        });
    }
    group.finish();
}

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("categorical_sample");
    for size in SIZES {
        for weighted in [false, true] {
            let hp = domain(size, weighted);
            let mut rng = fastrand::Rng::with_seed(42);
            let label = if weighted { "weighted" } else { "uniform" };
            group.bench_with_input(BenchmarkId::new(label, size), &size, |b, _| {
                b.iter(|| hp.sample(&mut rng));
            });
        }
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("categorical_build");
    for size in SIZES {
        group.bench_with_input(BenchmarkId::new("weighted", size), &size, |b, &size| {
            b.iter(|| domain(size, true));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_neighbors, bench_sample, bench_build);
criterion_main!(benches);
