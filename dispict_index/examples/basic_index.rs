// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Dispict Index: insert boxes, test collisions, and query overlaps.

use dispict_index::{Aabb2D, Index};

fn main() {
    let mut idx = Index::<f64>::with_rtree();
    let _reserved = idx.insert(Aabb2D::new(-36.0, -24.0, 36.0, 24.0));
    let _k = idx.insert(Aabb2D::new(36.0, -5.0, 46.0, 5.0));

    // A candidate straddling both boxes collides; one that only touches does not.
    let candidate = Aabb2D::new(30.0, 0.0, 40.0, 10.0);
    println!("collides: {}", idx.collides(candidate));
    let touching = Aabb2D::new(46.0, -5.0, 50.0, 5.0);
    println!("touching collides: {}", idx.collides(touching));

    let hits: Vec<_> = idx.query_rect(candidate).collect();
    println!("hits for {:?}: {:?}", candidate, hits);
}
