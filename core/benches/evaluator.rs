//! Benchmarks for the remexpr evaluator.
//!
//! Run with: `cargo bench` in the core/ directory.
//!
//! Benchmark groups:
//! 1. arithmetic_chain: long left-associative operator chains
//! 2. nested_parens: deep parenthesised nesting
//! 3. user_function: repeated calls into a user-defined function body

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use remexpr_core::{
    api::{Engine, EngineOptions},
    env::Clock,
};

/// Generate an arithmetic expression like "1 + 1 + 1 + ... + 1" with `n` additions.
fn generate_arithmetic_chain(n: usize) -> String {
    let mut expr = String::from("1");
    for _ in 0..n {
        expr.push_str(" + 1");
    }
    expr
}

/// Generate "((...(1)...))" nested `n` deep.
fn generate_nested_parens(n: usize) -> String {
    let mut expr = "(".repeat(n);
    expr.push('1');
    expr.push_str(&")".repeat(n));
    expr
}

fn engine() -> Engine {
    Engine::new(EngineOptions::default()).with_clock(Clock::Fixed {
        date: 12492,
        minutes: 615,
    })
}

fn bench_arithmetic_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic_chain");

    for size in [100, 200, 400, 800] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let source = generate_arithmetic_chain(size);
            let mut engine = engine();

            b.iter(|| {
                let value = engine.eval(black_box(&source)).expect("Eval failed");
                black_box(value)
            });
        });
    }

    group.finish();
}

fn bench_nested_parens(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_parens");

    // Sizes chosen to stay under the default nesting limit (1000)
    for size in [50, 100, 200, 400] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let source = generate_nested_parens(size);
            let mut engine = engine();

            b.iter(|| {
                let value = engine.eval(black_box(&source)).expect("Eval failed");
                black_box(value)
            });
        });
    }

    group.finish();
}

/// Each call re-scans the stored body text, so this measures the lexer as
/// much as the evaluator.
fn bench_user_function(c: &mut Criterion) {
    let mut group = c.benchmark_group("user_function");

    for calls in [10, 50, 100] {
        group.throughput(Throughput::Elements(calls as u64));

        group.bench_with_input(BenchmarkId::from_parameter(calls), &calls, |b, &calls| {
            let mut engine = engine();
            engine
                .define("next(d) = d + 1 + (wkdaynum(d + 1) == 0)")
                .expect("Define failed");
            let source = vec!["wkdaynum(next(today()))"; calls].join(" + ");

            b.iter(|| {
                let value = engine.eval(black_box(&source)).expect("Eval failed");
                black_box(value)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_arithmetic_chain,
    bench_nested_parens,
    bench_user_function
);
criterion_main!(benches);
