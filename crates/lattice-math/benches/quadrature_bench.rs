// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Sn — Quadrature and Diamond-Difference Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, Criterion};
use lattice_math::diamond::{diamond_difference, Streaming};
use lattice_math::quadrature::level_symmetric;
use std::hint::black_box;

fn bench_level_symmetric(c: &mut Criterion) {
    c.bench_function("level_symmetric_s16", |b| {
        b.iter(|| level_symmetric(black_box(16)))
    });
}

fn bench_diamond_row(c: &mut Criterion) {
    let s = Streaming::new(0.35, 0.87, 0.01);
    c.bench_function("diamond_difference_row_126", |b| {
        b.iter(|| {
            let mut edge = 0.0;
            for _ in 0..126 {
                let u = diamond_difference(0.08, 100.0, s, edge, 0.01);
                edge = u.outgoing_x;
            }
            black_box(edge)
        })
    });
}

criterion_group!(benches, bench_level_symmetric, bench_diamond_row);
criterion_main!(benches);
