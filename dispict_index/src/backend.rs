// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use alloc::boxed::Box;

use crate::types::Aabb2D;
use core::fmt::Debug;

/// Spatial backend abstraction used by `IndexGeneric`.
///
/// Backends are append-only: slots are inserted and never moved or removed, apart
/// from a wholesale [`clear`](Backend::clear).
pub trait Backend<T: Copy + PartialOrd + Debug> {
    /// Insert a new slot into the spatial structure.
    ///
    /// Slots arrive densely: the first insert after construction or `clear` is slot 0,
    /// and each later one is the next integer.
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>);

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Query slots whose AABB overlaps the rectangle with positive area.
    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a>;

    /// Whether any stored AABB overlaps the rectangle with positive area.
    ///
    /// Backends should override this with a traversal that stops at the first hit.
    fn collides(&self, rect: Aabb2D<T>) -> bool {
        self.query_rect(rect).next().is_some()
    }
}
