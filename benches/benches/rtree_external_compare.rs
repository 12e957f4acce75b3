// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dispict_index::{Aabb2D, Index};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

/// Boxes along a sunflower spiral, the shape a layout pass leaves in the index.
fn gen_spiral_rects(n: usize, side: f64) -> Vec<Aabb2D<f64>> {
    let golden = (5.0_f64.sqrt() - 1.0) * core::f64::consts::PI;
    (0..n)
        .map(|i| {
            let t = i as f64;
            let r = side * t.sqrt();
            let (x, y) = (r * (golden * t).cos(), r * (golden * t).sin());
            Aabb2D::<f64>::from_xywh(x - side * 0.5, y - side * 0.5, side * 0.9, side * 0.9)
        })
        .collect()
}

fn to_rstar_rect(r: &Aabb2D<f64>) -> Rectangle<[f64; 2]> {
    Rectangle::from_corners([r.min_x, r.min_y], [r.max_x, r.max_y])
}

fn bench_rtree_external_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_f64");
    for &n in &[1_000usize, 10_000] {
        let rects = gen_spiral_rects(n, 10.0);
        let probes = gen_spiral_rects(n / 4, 7.0);
        group.throughput(Throughput::Elements(n as u64));

        // Interleave inserts and collision probes, like a layout pass does.
        group.bench_function(format!("dispict_insert_probe_n{}", n), |b| {
            b.iter_batched(
                Index::<f64>::with_rtree,
                |mut idx| {
                    let mut hits = 0_usize;
                    for (i, r) in rects.iter().enumerate() {
                        if idx.collides(probes[i % probes.len()]) {
                            hits += 1;
                        }
                        idx.insert(*r);
                    }
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_insert_probe_n{}", n), |b| {
            b.iter_batched(
                RTree::<Rectangle<[f64; 2]>>::new,
                |mut tree| {
                    let mut hits = 0_usize;
                    for (i, r) in rects.iter().enumerate() {
                        let q = probes[i % probes.len()];
                        let aabb = AABB::from_corners([q.min_x, q.min_y], [q.max_x, q.max_y]);
                        if tree.locate_in_envelope_intersecting(&aabb).next().is_some() {
                            hits += 1;
                        }
                        tree.insert(to_rstar_rect(r));
                    }
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare_f64);
criterion_main!(benches);
