// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Lattice Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for construction, the diffusion step, the
//! order metric, and annealing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ghostmesh_lattice::{anneal, Lattice, LatticeConfig};

fn seeded(dimension: usize, grid_size: usize) -> Lattice {
    let cfg = LatticeConfig::with_shape(dimension, grid_size).seeded(42);
    Lattice::new(&cfg).expect("bench config is valid")
}

// ── Construction ────────────────────────────────────────────────────

fn bench_build_3(c: &mut Criterion) {
    let cfg = LatticeConfig::with_shape(64, 3).seeded(42);
    c.bench_function("lattice_build_3x3x3_d64", |b| {
        b.iter(|| Lattice::new(black_box(&cfg)))
    });
}

fn bench_build_5(c: &mut Criterion) {
    let cfg = LatticeConfig::with_shape(64, 5).seeded(42);
    c.bench_function("lattice_build_5x5x5_d64", |b| {
        b.iter(|| Lattice::new(black_box(&cfg)))
    });
}

// ── Lattice.step() ──────────────────────────────────────────────────

fn bench_step_3(c: &mut Criterion) {
    let mut lattice = seeded(64, 3);
    let input = vec![0.01; 64];
    c.bench_function("lattice_step_3x3x3_d64", |b| {
        b.iter(|| lattice.step(black_box(&input), 1.0))
    });
}

fn bench_step_5(c: &mut Criterion) {
    let mut lattice = seeded(64, 5);
    let input = vec![0.01; 64];
    c.bench_function("lattice_step_5x5x5_d64", |b| {
        b.iter(|| lattice.step(black_box(&input), 1.0))
    });
}

// ── Order metric ────────────────────────────────────────────────────

fn bench_order_metric_5(c: &mut Criterion) {
    let lattice = seeded(64, 5);
    c.bench_function("order_metric_5x5x5_d64", |b| {
        b.iter(|| black_box(&lattice).order_metric())
    });
}

// ── Anneal ──────────────────────────────────────────────────────────

fn bench_anneal_144(c: &mut Criterion) {
    let values: Vec<f64> = (0..144).map(|i| (i as f64 * 0.1).cos()).collect();
    c.bench_function("anneal_144", |b| {
        b.iter(|| anneal(black_box(&values), black_box(0.7)))
    });
}

criterion_group!(
    benches,
    bench_build_3,
    bench_build_5,
    bench_step_3,
    bench_step_5,
    bench_order_metric_5,
    bench_anneal_144,
);
criterion_main!(benches);
