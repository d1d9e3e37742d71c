use core::fmt::Write as _;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use configspace::pcs::{self, Dialect};

/// A new-dialect document with `n` blocks of four hyperparameters, each
/// block chained to the previous one by a condition and one forbidden clause.
fn document(n: usize) -> String {
    let mut text = String::new();
    let mut conditions = String::new();
    let mut forbiddens = String::new();
    for i in 0..n {
        let _ = writeln!(text, "kernel_{i} categorical {{rbf, poly, sigmoid}} [rbf]");
        let _ = writeln!(text, "C_{i} real [0.03125, 32768.0] [32.0]log");
        let _ = writeln!(text, "degree_{i} integer [1, 5] [3]");
        let _ = writeln!(text, "effort_{i} ordinal {{low, medium, high}} [low]");
        let _ = writeln!(
            conditions,
            "degree_{i} | kernel_{i} in {{poly, sigmoid}} && effort_{i} > low"
        );
        if i > 0 {
            let _ = writeln!(
                conditions,
                "kernel_{i} | C_{prev} > 1.0 || effort_{prev} == high",
                prev = i - 1
            );
        }
        let _ = writeln!(forbiddens, "{{kernel_{i}=sigmoid, degree_{i}=5}}");
    }
    text.push('\n');
    text.push_str(&conditions);
    text.push('\n');
    text.push_str(&forbiddens);
    text
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("pcs_read");
    for n in [5, 50] {
        let text = document(n);
        group.bench_with_input(BenchmarkId::new("new", n), &text, |b, text| {
            b.iter(|| pcs::read_str(text, Dialect::New).unwrap());
        });
    }
    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("pcs_write");
    for n in [5, 50] {
        let space = pcs::read_str(&document(n), Dialect::New).unwrap();
        group.bench_with_input(BenchmarkId::new("new", n), &space, |b, space| {
            b.iter(|| pcs::write(space, Dialect::New).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_read, bench_write);
criterion_main!(benches);
