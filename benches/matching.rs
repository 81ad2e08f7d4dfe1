// Allow our dollar.cents digit grouping convention (e.g., 50_00 = $50.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! Throughput benchmarks for matching engine operations.
//!
//! Measures performance of core operations:
//! - Limit submission (resting and crossing)
//! - Market order execution against a deep book
//! - Stop trigger cascades
//! - Report generation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use outcry::{report, Engine, Order, Price, Side, Symbol};

fn tame() -> Symbol {
    Symbol::new("TAME")
}

/// Build an engine with `depth` resting orders on each side of TAME,
/// bids below and asks above the $50.00 starting price.
fn build_book(depth: usize) -> Engine {
    let mut engine = Engine::default();
    engine.register("maker");
    engine.register("taker");

    for i in 0..depth {
        let offset = (i as i64 % 50) + 1;
        engine.submit(Order::limit(
            "maker",
            Side::Buy,
            tame(),
            10,
            Price(50_00 - offset),
        ));
        engine.submit(Order::limit(
            "maker",
            Side::Sell,
            tame(),
            10,
            Price(50_00 + offset),
        ));
    }
    engine
}

/// Benchmark: submit a limit order that rests (no match)
fn bench_submit_no_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_no_match");

    for depth in [10, 100, 1000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            let mut engine = build_book(depth);
            b.iter(|| {
                // Far below the book, never crosses.
                black_box(engine.submit(Order::limit(
                    "taker",
                    Side::Buy,
                    tame(),
                    10,
                    Price(10_00),
                )))
            });
        });
    }

    group.finish();
}

/// Benchmark: submit a crossing limit that fills against the best level
fn bench_submit_crossing(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_crossing");
    group.throughput(Throughput::Elements(1));

    group.bench_function("refill_and_cross", |b| {
        let mut engine = build_book(100);
        b.iter(|| {
            // Replenish one ask, then lift it.
            engine.submit(Order::limit("maker", Side::Sell, tame(), 10, Price(50_01)));
            black_box(engine.submit(Order::limit(
                "taker",
                Side::Buy,
                tame(),
                10,
                Price(50_01),
            )))
        });
    });

    group.finish();
}

/// Benchmark: market order sweeping several levels
fn bench_market_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("market_sweep");
    group.throughput(Throughput::Elements(1));

    group.bench_function("sweep_5_levels", |b| {
        let mut engine = build_book(1000);
        b.iter(|| {
            // Restore what the previous iteration consumed.
            for offset in 1..=5 {
                engine.submit(Order::limit(
                    "maker",
                    Side::Sell,
                    tame(),
                    10,
                    Price(50_00 + offset),
                ));
            }
            black_box(engine.submit(Order::market("taker", Side::Buy, tame(), 50)))
        });
    });

    group.finish();
}

/// Benchmark: a trade that fires a chain of stops
fn bench_stop_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("stop_cascade");
    group.throughput(Throughput::Elements(1));

    group.bench_function("chain_of_5", |b| {
        b.iter(|| {
            let mut engine = Engine::default();
            engine.register("maker");
            engine.register("taker");

            // Bids stepping down from 49 to 44.
            for i in 0..6 {
                engine.submit(Order::limit(
                    "maker",
                    Side::Buy,
                    tame(),
                    2,
                    Price(49_00 - i * 100),
                ));
            }
            // Each stop's market child trades down through the next trigger.
            for i in 0..5 {
                let child = Order::market("taker", Side::Sell, tame(), 2);
                engine.submit(Order::stop(
                    "taker",
                    Side::Sell,
                    tame(),
                    Price(49_50 - i * 100),
                    child,
                ));
            }
            // One trade at 49 starts the chain.
            black_box(engine.submit(Order::limit("taker", Side::Sell, tame(), 2, Price(49_00))))
        });
    });

    group.finish();
}

/// Benchmark: report rendering over a populated book
fn bench_reports(c: &mut Criterion) {
    let mut group = c.benchmark_group("reports");

    for depth in [10, 100] {
        let engine = build_book(depth);
        group.bench_with_input(
            BenchmarkId::new("market_summary", depth),
            &engine,
            |b, engine| b.iter(|| black_box(report::market_summary(engine))),
        );
        group.bench_with_input(
            BenchmarkId::new("depth_board", depth),
            &engine,
            |b, engine| {
                let book = engine.book(tame()).unwrap();
                b.iter(|| black_box(report::depth_board(book)))
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_submit_no_match,
    bench_submit_crossing,
    bench_market_sweep,
    bench_stop_cascade,
    bench_reports
);
criterion_main!(benches);
