//! Benchmarks for overtake extraction over a synthetic full race
//!
//! Measures:
//! - Opponent index construction over the whole timing stream
//! - Per-driver extraction (position changes, classification, dedup)
//! - Whole-field extraction with the default rule order
//!
//! Platform: Cross-platform (synthetic data, CI-safe)

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pitwall_overtakes::detection::OpponentResolver;
use pitwall_overtakes::test_utils::SessionBuilder;
use pitwall_overtakes::{DriverNumber, OvertakeConfig, OvertakeEngine, Session};
use std::hint::black_box;

const CARS: usize = 20;
const LAPS: u32 = 60;
const LAP_SECS: i64 = 90;

/// A race where one adjacent pair swaps places every 3 seconds.
fn synthetic_race() -> Session {
    let drivers: Vec<String> = (1..=CARS).map(|n| n.to_string()).collect();
    let mut order: Vec<usize> = (0..CARS).collect();
    let mut builder = SessionBuilder::new();

    for (car, driver) in drivers.iter().enumerate() {
        builder = builder.positions(driver, 1, &[(0, car as u32 + 1)]);
    }

    let race_end = LAP_SECS * LAPS as i64;
    let mut swap = 0usize;
    for secs in (3..race_end).step_by(3) {
        let lap = (secs / LAP_SECS) as u32 + 1;
        let idx = (swap * 7) % (CARS - 1);
        swap += 1;

        order.swap(idx, idx + 1);
        builder = builder
            .positions(&drivers[order[idx]], lap, &[(secs, idx as u32 + 1)])
            .positions(&drivers[order[idx + 1]], lap, &[(secs, idx as u32 + 2)]);
    }

    let names: Vec<&str> = drivers.iter().map(String::as_str).collect();
    for lap in 1..=LAPS {
        let start = LAP_SECS * (lap as i64 - 1);
        builder = builder.racing_lap_for(&names, lap, start, start + LAP_SECS);
    }

    builder.build()
}

fn bench_opponent_index(c: &mut Criterion) {
    let session = synthetic_race();

    let mut group = c.benchmark_group("opponent_index");
    group.throughput(Throughput::Elements(session.timing().len() as u64));
    group.bench_function("build", |b| {
        b.iter(|| black_box(OpponentResolver::new(black_box(session.timing()))))
    });
    group.finish();
}

fn bench_extraction(c: &mut Criterion) {
    let session = synthetic_race();
    let config = OvertakeConfig::default();
    let engine = OvertakeEngine::new(session.view(), &config);

    let mut group = c.benchmark_group("extraction");
    for driver in ["1", "10", "20"] {
        let number = DriverNumber::from(driver);
        group.bench_with_input(BenchmarkId::new("driver", driver), &number, |b, driver| {
            b.iter(|| black_box(engine.extract_overtakes(black_box(driver))))
        });
    }
    group.bench_function("field", |b| b.iter(|| black_box(engine.extract_field())));
    group.finish();
}

criterion_group!(benches, bench_opponent_index, bench_extraction);
criterion_main!(benches);
