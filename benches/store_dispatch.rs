// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for state store operations.
//!
//! Measures the performance of:
//! - Single transitions through the store
//! - A full drag-to-seek gesture (down, 100 moves, up)
//! - Deriving the control surface from a snapshot

use criterion::{criterion_group, criterion_main, Criterion};
use scrubline::player::{ControlSurface, PlaybackStateStore, Transition};
use scrubline::stream::SessionState;
use std::hint::black_box;

fn store_with_duration(duration: f64) -> PlaybackStateStore {
    let mut store = PlaybackStateStore::default();
    store.dispatch(Transition::ObserveMetadataLoaded { duration });
    store
}

/// Benchmark a single dispatch of common transitions.
fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_dispatch");

    group.bench_function("toggle_play", |b| {
        let mut store = PlaybackStateStore::default();
        b.iter(|| black_box(store.dispatch(Transition::TogglePlay)));
    });

    group.bench_function("observe_time", |b| {
        let mut store = store_with_duration(3600.0);
        let mut t = 0.0;
        b.iter(|| {
            t = (t + 0.25) % 3600.0;
            black_box(store.dispatch(Transition::ObserveTime {
                current_time: t,
                duration: 3600.0,
            }))
        });
    });

    group.finish();
}

/// Benchmark a complete scrub gesture as the store sees it.
fn bench_scrub_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_dispatch");

    group.bench_function("scrub_gesture_100_moves", |b| {
        b.iter(|| {
            let mut store = store_with_duration(600.0);
            store.dispatch(Transition::BeginScrub(0.0));
            for step in 0..100 {
                store.dispatch(Transition::UpdateScrub(f64::from(step) * 6.0));
                store.dispatch(Transition::SeekApplied);
            }
            black_box(store.dispatch(Transition::EndScrub));
        });
    });

    group.finish();
}

/// Benchmark deriving the render-ready surface.
fn bench_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_dispatch");
    let store = store_with_duration(5400.0);
    let session = SessionState::Ready;

    group.bench_function("derive_surface", |b| {
        b.iter(|| black_box(ControlSurface::derive(store.state(), &session)));
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_scrub_gesture, bench_surface);
criterion_main!(benches);
