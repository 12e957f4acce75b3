// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Index` API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::flatvec::FlatVec;
use crate::backends::rtree::RTree;
use crate::types::{Aabb2D, Scalar};

/// Handle for a stored box; keys are handed out in insertion order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(usize);

impl Key {
    const fn new(idx: usize) -> Self {
        Self(idx)
    }

    /// Position of the box in insertion order.
    pub const fn idx(self) -> usize {
        self.0
    }
}

/// An append-only AABB collision index parameterized by a spatial backend.
///
/// Boxes are never moved or removed once inserted. Every query sees all boxes
/// inserted so far, including the very first.
#[derive(Debug)]
pub struct IndexGeneric<T: Copy + PartialOrd + Debug, B: Backend<T>> {
    entries: Vec<Aabb2D<T>>,
    backend: B,
}

impl<T, B> IndexGeneric<T, B>
where
    T: Copy + PartialOrd + Debug,
    B: Backend<T> + Default,
{
    /// Create an empty index using the backend's default constructor.
    pub fn new() -> Self {
        Self::with_backend(B::default())
    }
}

impl<T, B> Default for IndexGeneric<T, B>
where
    T: Copy + PartialOrd + Debug,
    B: Backend<T> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, B> IndexGeneric<T, B>
where
    T: Copy + PartialOrd + Debug,
    B: Backend<T>,
{
    /// Create an empty index over an explicitly constructed backend.
    ///
    /// The backend is cleared so that its slots line up with this index's keys.
    pub fn with_backend(mut backend: B) -> Self {
        backend.clear();
        Self {
            entries: Vec::new(),
            backend,
        }
    }

    /// Reserve space for at least `n` additional entries.
    pub fn reserve(&mut self, n: usize) {
        self.entries.reserve(n);
    }

    /// Insert a new AABB. Returns its `Key`.
    pub fn insert(&mut self, aabb: Aabb2D<T>) -> Key {
        let slot = self.entries.len();
        self.entries.push(aabb);
        self.backend.insert(slot, aabb);
        Key::new(slot)
    }

    /// Whether `aabb` overlaps any stored box with positive area.
    ///
    /// Edge or corner contact is not a collision.
    pub fn collides(&self, aabb: Aabb2D<T>) -> bool {
        self.backend.collides(aabb)
    }

    /// Query for stored boxes that overlap the given rectangle with positive area.
    pub fn query_rect(&self, rect: Aabb2D<T>) -> impl Iterator<Item = (Key, Aabb2D<T>)> + '_ {
        self.backend
            .query_rect(rect)
            .filter_map(|i| self.entries.get(i).map(|a| (Key::new(i), *a)))
    }

    /// The box stored under `key`, if any.
    pub fn get(&self, key: Key) -> Option<Aabb2D<T>> {
        self.entries.get(key.idx()).copied()
    }

    /// All stored boxes, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Key, Aabb2D<T>)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, a)| (Key::new(i), *a))
    }

    /// Number of stored boxes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every stored box.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.backend.clear();
    }

    /// The spatial backend, for inspection.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Default index using a flat vector backend.
pub type Index<T> = IndexGeneric<T, FlatVec<T>>;

impl<T: Scalar> Index<T> {
    /// Create an R-tree-backed index.
    pub fn with_rtree() -> IndexGeneric<T, RTree<T>> {
        IndexGeneric::new()
    }
}
