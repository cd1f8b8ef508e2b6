//! Benchmarks for per-tick module advancement.
//!
//! The vortex lattice recompute (400 cells, every tick) is the densest
//! arithmetic in the crate and the first candidate for batching; the
//! avalanche field integrates 1000 particles per tick.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pulsefield::{
    AvalancheField, AvalancheMeta, RhythmMode, RhythmSnapshot, SnapshotMeta, TensionMeta,
    TensionSystem, VortexField, VortexMeta,
};

fn bench_vortex_advance(c: &mut Criterion) {
    let mut field = VortexField::new();
    let snapshot = RhythmSnapshot {
        mode: RhythmMode::Vortex,
        timestamp: 0.0,
        values: vec![0.4, -0.2, 0.7, 1.3],
        meta: SnapshotMeta::Vortex(VortexMeta {
            velocity: [0.3, 0.1, -0.2],
        }),
    };

    c.bench_function("vortex_advance_400_cells", |b| {
        b.iter(|| black_box(field.advance(black_box(&snapshot), 0.016)))
    });
}

fn bench_avalanche_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("avalanche_advance");

    let calm = RhythmSnapshot {
        mode: RhythmMode::Avalanche,
        timestamp: 0.0,
        values: vec![0.7],
        meta: SnapshotMeta::Avalanche(AvalancheMeta {
            avalanche_active: false,
            criticality: 0.2,
        }),
    };
    let storm = RhythmSnapshot {
        meta: SnapshotMeta::Avalanche(AvalancheMeta {
            avalanche_active: true,
            criticality: 0.9,
        }),
        ..calm.clone()
    };

    group.bench_function("calm", |b| {
        let mut field = AvalancheField::new();
        b.iter(|| black_box(field.advance(black_box(&calm), 0.016)))
    });
    group.bench_function("avalanche", |b| {
        let mut field = AvalancheField::new();
        b.iter(|| black_box(field.advance(black_box(&storm), 0.016)))
    });

    group.finish();
}

fn bench_tension_advance(c: &mut Criterion) {
    let mut system = TensionSystem::new();
    let snapshot = RhythmSnapshot {
        mode: RhythmMode::Tension,
        timestamp: 0.0,
        values: vec![0.8, 0.6],
        meta: SnapshotMeta::Tension(TensionMeta {
            release_active: true,
        }),
    };

    c.bench_function("tension_advance_500_particles", |b| {
        b.iter(|| black_box(system.advance(black_box(&snapshot), 0.016)))
    });
}

criterion_group!(
    benches,
    bench_vortex_advance,
    bench_avalanche_advance,
    bench_tension_advance
);
criterion_main!(benches);
