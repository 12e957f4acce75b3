// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lay out a ranked list of artworks around a reserved title card.
//!
//! Run with `RUST_LOG=dispict_layout=trace` to see every placement.

use dispict_layout::{Footprint, LayoutConfig, SpiralLayout};
use kurbo::Size;
use tracing_subscriber::EnvFilter;

struct Artwork {
    title: String,
    score: f64,
    width_cm: f64,
    height_cm: f64,
}

impl Footprint for Artwork {
    fn size(&self) -> Size {
        Size::new(self.width_cm, self.height_cm)
    }
}

fn ranked_artworks(n: u32) -> Vec<Artwork> {
    (0..n)
        .map(|i| {
            let f = f64::from(i);
            Artwork {
                title: format!("Untitled #{i}"),
                score: 1.0 / (1.0 + f),
                width_cm: 15.0 + (f * 7.3) % 40.0,
                height_cm: 12.0 + (f * 11.9) % 35.0,
            }
        })
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let works = ranked_artworks(40);
    let layout = SpiralLayout::new(LayoutConfig::default().with_reserved(Size::new(50.0, 30.0)))
        .expect("valid config");
    let report = layout.layout_report(&works).expect("valid artworks");

    let mut extent = report.reserved;
    for (work, placement) in works.iter().zip(&report.placements) {
        extent = extent.union(placement.bounds);
        println!(
            "{:<14} score {:.3}  at ({:>7.1}, {:>7.1})  after {:>3} trials",
            work.title, work.score, placement.center.x, placement.center.y, placement.trials
        );
    }

    let covered: f64 = report.placements.iter().map(|p| p.bounds.area()).sum();
    println!(
        "extent {:.0} x {:.0} cm, {:.0}% covered, {} trials in total",
        extent.width(),
        extent.height(),
        100.0 * covered / extent.area(),
        report.total_trials()
    );
}
