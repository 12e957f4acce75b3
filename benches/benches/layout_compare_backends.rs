// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dispict_index::{Aabb2D, FlatVec, Index, IndexGeneric, RTreeF64};
use dispict_layout::SpiralLayout;
use kurbo::Size;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Artwork-like footprints: 10 to 90 units per side.
fn gen_items(n: usize, seed: u64) -> Vec<Size> {
    let mut rng = Rng::new(seed);
    (0..n)
        .map(|_| Size::new(10.0 + rng.next_f64() * 80.0, 10.0 + rng.next_f64() * 80.0))
        .collect()
}

fn gen_random_rects(n: usize, extent: f64, max_side: f64, seed: u64) -> Vec<Aabb2D<f64>> {
    let mut rng = Rng::new(seed);
    (0..n)
        .map(|_| {
            let x = (rng.next_f64() - 0.5) * extent;
            let y = (rng.next_f64() - 0.5) * extent;
            let w = 1.0 + rng.next_f64() * max_side;
            let h = 1.0 + rng.next_f64() * max_side;
            Aabb2D::<f64>::from_xywh(x, y, w, h)
        })
        .collect()
}

fn bench_layout_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("spiral_layout");
    group.sample_size(20);
    let layout = SpiralLayout::default();
    for &n in &[100usize, 400, 1000] {
        let items = gen_items(n, 0xD15C_0001);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("flatvec_n{}", n), |b| {
            b.iter(|| {
                let report = layout
                    .layout_with::<FlatVec<f64>, _>(black_box(&items))
                    .unwrap();
                black_box(report.total_trials());
            })
        });

        group.bench_function(format!("rtree_n{}", n), |b| {
            b.iter(|| {
                let report = layout
                    .layout_with::<RTreeF64, _>(black_box(&items))
                    .unwrap();
                black_box(report.total_trials());
            })
        });
    }
    group.finish();
}

fn bench_collides(c: &mut Criterion) {
    let mut group = c.benchmark_group("collides_f64");
    for &n in &[1_000usize, 10_000] {
        let stored = gen_random_rects(n, 5_000.0, 40.0, 0xD15C_0002);
        let probes = gen_random_rects(1_000, 5_000.0, 40.0, 0xD15C_0003);
        group.throughput(Throughput::Elements(probes.len() as u64));

        group.bench_function(format!("flatvec_n{}", n), |b| {
            b.iter_batched(
                || {
                    let mut idx: Index<f64> = Index::new();
                    for r in &stored {
                        idx.insert(*r);
                    }
                    idx
                },
                |idx| {
                    let hits = probes.iter().filter(|q| idx.collides(**q)).count();
                    black_box(hits);
                },
                BatchSize::LargeInput,
            )
        });

        group.bench_function(format!("rtree_n{}", n), |b| {
            b.iter_batched(
                || {
                    let mut idx: IndexGeneric<f64, RTreeF64> = IndexGeneric::new();
                    for r in &stored {
                        idx.insert(*r);
                    }
                    idx
                },
                |idx| {
                    let hits = probes.iter().filter(|q| idx.collides(**q)).count();
                    black_box(hits);
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout_backends, bench_collides);
criterion_main!(benches);
