// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispict Index: an append-only 2D AABB collision index.
//!
//! The spiral layout asks one question over and over: "does this candidate rectangle
//! overlap anything already placed?" This crate answers it.
//!
//! - Insert axis-aligned bounding boxes (AABBs); they are never moved or removed.
//! - Ask whether a rectangle collides with any stored box, or list the boxes it overlaps.
//! - Overlap is an open-interval test: boxes that only share an edge or a corner do not collide.
//!
//! It is generic over the scalar type `T` and does not depend on any geometry crate.
//! Backends are pluggable via the [`Backend`] trait so the spatial strategy can change
//! without API churn. The default backend is a flat vector (linear scan); the R-tree
//! backend gives sub-linear queries as the stored set grows.
//!
//! # Example
//!
//! ```rust
//! use dispict_index::{Aabb2D, Index};
//!
//! let mut idx: Index<i64> = Index::new();
//! idx.insert(Aabb2D::new(0, 0, 10, 10));
//! idx.insert(Aabb2D::new(20, 0, 30, 10));
//!
//! assert!(idx.collides(Aabb2D::new(5, 5, 25, 6)));
//! // Sharing an edge is not a collision.
//! assert!(!idx.collides(Aabb2D::new(10, 0, 20, 10)));
//! ```
//!
//! The R-tree backend has the same API:
//!
//! ```rust
//! use dispict_index::{Aabb2D, Index};
//!
//! let mut idx = Index::<f64>::with_rtree();
//! for i in 0..100 {
//!     let x = f64::from(i) * 4.0;
//!     idx.insert(Aabb2D::<f64>::from_xywh(x, 0.0, 3.0, 3.0));
//! }
//! let hits: Vec<_> = idx.query_rect(Aabb2D::new(2.0, 1.0, 9.0, 2.0)).collect();
//! assert_eq!(hits.len(), 3);
//! ```
//!
//! ## Choosing a backend
//!
//! - `FlatVec` (default): simplest and smallest, linear scans. Good for very small sets
//!   and as a reference when testing other backends.
//! - `RTreeF32`/`RTreeF64`/`RTreeI64`: R-tree with SAH-like splits and widened metrics;
//!   the right choice once more than a few dozen boxes are stored.
//!   See the [`backends`] docs for a brief SAH overview.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. A NaN coordinate never overlaps anything.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod index;
pub mod types;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use backends::rtree::{RTree, RTreeF32, RTreeF64, RTreeI64};
pub use index::{Index, IndexGeneric, Key};
pub use types::Aabb2D;

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise<B: Backend<i64> + Default>() {
        let mut idx: IndexGeneric<i64, B> = IndexGeneric::new();
        let reserved = idx.insert(Aabb2D::new(-36, -24, 36, 24));
        assert!(idx.collides(Aabb2D::new(-1, -1, 1, 1)), "reserved region blocks origin");
        assert!(!idx.collides(Aabb2D::new(36, -24, 40, 24)), "edge contact is allowed");
        let placed = idx.insert(Aabb2D::new(36, -24, 40, 24));
        let hits: alloc::vec::Vec<_> = idx.query_rect(Aabb2D::new(30, 0, 38, 1)).collect();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits.iter().filter(|(k, _)| *k == reserved).count(), 1);
        assert_eq!(hits.iter().filter(|(k, _)| *k == placed).count(), 1);
    }

    #[test]
    fn flatvec_contract() {
        exercise::<FlatVec<i64>>();
    }

    #[test]
    fn rtree_contract() {
        exercise::<RTreeI64>();
    }
}
