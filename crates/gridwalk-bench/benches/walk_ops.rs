//! Criterion benchmarks for the walker, the walk driver, and the manager.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use gridwalk_bench::{
    annealing_batch, entries_batch, open_profile, reference_policies, room_profile,
};
use gridwalk_core::{Coord, PolicyParameters};
use gridwalk_dist::ChaChaSource;
use gridwalk_engine::{Walk, WalkConfig, WalkManager, Walker};

/// Benchmark: 1000 biased steps from the centre of an open 32x32 grid.
fn bench_sample_step(c: &mut Criterion) {
    let grid = open_profile(32).unwrap();
    let policy = reference_policies()[1];
    let mut rng = ChaChaSource::canonical();
    c.bench_function("sample_step_open_32", |b| {
        b.iter(|| {
            let mut walker = Walker::new(policy);
            for _ in 0..1000 {
                walker.place(Coord::new(16, 16));
                black_box(walker.sample_step(&grid, &mut rng).unwrap());
            }
            black_box(walker.weight())
        });
    });
}

/// Benchmark: one analog evaluation of 1000 histories on the 10x10 room.
fn bench_walk_room(c: &mut Criterion) {
    let mut grid = room_profile(10).unwrap();
    let config = WalkConfig {
        num_samples: 1000,
        ..Default::default()
    };
    let mut walk = Walk::new(PolicyParameters::analog(), config).unwrap();
    let mut rng = ChaChaSource::canonical();
    c.bench_function("walk_room_10_analog_1k", |b| {
        b.iter(|| black_box(walk.run(&mut grid.visits(), &mut rng).unwrap()));
    });
}

/// Benchmark: the same evaluation with visit tracking on.
fn bench_walk_room_tracked(c: &mut Criterion) {
    let mut grid = room_profile(10).unwrap();
    let config = WalkConfig {
        num_samples: 1000,
        track_visits: true,
        ..Default::default()
    };
    let mut walk = Walk::new(PolicyParameters::analog(), config).unwrap();
    let mut rng = ChaChaSource::canonical();
    c.bench_function("walk_room_10_tracked_1k", |b| {
        b.iter(|| black_box(walk.run(&mut grid.visits(), &mut rng).unwrap()));
    });
}

/// Benchmark: an entries batch of five policies on the 8x8 room.
fn bench_manager_entries(c: &mut Criterion) {
    let mut grid = room_profile(8).unwrap();
    let mut manager = WalkManager::new(entries_batch(200)).unwrap();
    let mut group = c.benchmark_group("manager");
    group.sample_size(10);
    group.bench_function("entries_room_8", |b| {
        b.iter(|| manager.execute(&mut grid).unwrap());
    });
    group.bench_function("annealing_room_8_x10", |b| {
        let mut annealing = WalkManager::new(annealing_batch(10, 200)).unwrap();
        b.iter(|| annealing.execute(&mut grid).unwrap());
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_sample_step,
    bench_walk_room,
    bench_walk_room_tracked,
    bench_manager_entries
);
criterion_main!(benches);
