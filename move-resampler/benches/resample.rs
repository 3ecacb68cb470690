//! Criterion benchmarks for the per-event and per-vsync hot paths
//!
//! Covers: One Euro filtering, history push with eviction, resample queries
//! (interpolation and extrapolation), and full trace replay.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use move_resampler::filter::one_euro::OneEuroFilter;
use move_resampler::replay::{replay, MoveTrace};
use move_resampler::resample::{EventHistory, MoveEvent, MoveResampler};
use move_resampler::time::vsync::VsyncClock;

const INPUT_INTERVAL_US: i64 = 8_000;

fn drag_points(n: usize) -> Vec<(i64, i32, i32)> {
    (0..n as i64)
        .map(|i| {
            // Curved drag with a pixel of alternating jitter
            let t = i as f64 / n as f64;
            let jitter = if i % 2 == 0 { 1 } else { -1 };
            (
                i * INPUT_INTERVAL_US,
                (t * 800.0) as i32 + jitter,
                (t * t * 400.0) as i32 - jitter,
            )
        })
        .collect()
}

fn filled_resampler(n: usize) -> MoveResampler {
    let mut resampler = MoveResampler::default();
    for (t, x, y) in drag_points(n) {
        resampler.push_event(t, x, y);
    }
    resampler
}

// ---------------------------------------------------------------------------
// Filter benchmarks
// ---------------------------------------------------------------------------

fn bench_one_euro_filter(c: &mut Criterion) {
    c.bench_function("one_euro_filter", |b| {
        let mut filter = OneEuroFilter::default();
        let mut time_us = 0;
        b.iter(|| {
            time_us += INPUT_INTERVAL_US;
            let out = filter.filter(black_box(time_us), black_box((time_us % 97) as f64));
            black_box(out);
        });
    });
}

// ---------------------------------------------------------------------------
// History benchmarks
// ---------------------------------------------------------------------------

fn bench_history_push(c: &mut Criterion) {
    c.bench_function("history_push_with_eviction", |b| {
        let mut history = EventHistory::new(60_000);
        let mut time_us = 0;
        b.iter(|| {
            time_us += INPUT_INTERVAL_US;
            history.push(black_box(MoveEvent::new(time_us, 10, 20)));
        });
    });
}

fn bench_linear_fit(c: &mut Criterion) {
    let mut history = EventHistory::new(i64::MAX);
    for (t, x, y) in drag_points(64) {
        history.push(MoveEvent::new(t, x, y));
    }

    let mut group = c.benchmark_group("linear_fit");
    for count in [3, 5, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &n| {
            b.iter(|| {
                let fit = history.linear_fit_at(black_box(0), black_box(n - 1), 600_000);
                black_box(fit);
            });
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Resampler benchmarks
// ---------------------------------------------------------------------------

fn bench_resample_raw(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample_raw");

    // Eight buffered events at 125 Hz inside the 60 ms window
    let base = filled_resampler(8);
    let last_us = 7 * INPUT_INTERVAL_US;

    group.bench_function("interpolate", |b| {
        let mut resampler = base.clone();
        b.iter(|| black_box(resampler.resample_raw(black_box(last_us - 3_000))));
    });

    group.bench_function("extrapolate", |b| {
        let mut resampler = base.clone();
        b.iter(|| black_box(resampler.resample_raw(black_box(last_us + 4_000))));
    });

    group.finish();
}

fn bench_push_and_resample(c: &mut Criterion) {
    c.bench_function("push_and_resample_at", |b| {
        let mut resampler = MoveResampler::default();
        let mut time_us = 0;
        b.iter(|| {
            time_us += INPUT_INTERVAL_US;
            resampler.push_event(time_us, (time_us / 1_000) as i32, 0);
            let out = resampler.resample_at(black_box(time_us + 4_000));
            black_box(out);
        });
    });
}

// ---------------------------------------------------------------------------
// Replay benchmarks
// ---------------------------------------------------------------------------

fn bench_replay(c: &mut Criterion) {
    let clock = VsyncClock::new(8_333, 0);
    let mut group = c.benchmark_group("replay");

    for count in [50, 200, 1000] {
        let trace = MoveTrace::from_points("bench", &drag_points(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &trace, |b, trace| {
            let mut resampler = MoveResampler::default();
            b.iter(|| {
                let report = replay(black_box(trace), &mut resampler, &clock, 50_000);
                black_box(report)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_one_euro_filter,
    bench_history_push,
    bench_linear_fit,
    bench_resample_raw,
    bench_push_and_resample,
    bench_replay,
);
criterion_main!(benches);
