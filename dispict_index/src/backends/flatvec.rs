// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Flat vector backend with linear scans.
pub struct FlatVec<T: Copy + PartialOrd + Debug> {
    entries: Vec<Aabb2D<T>>,
}

impl<T: Copy + PartialOrd + Debug> Default for FlatVec<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Copy + PartialOrd + Debug> Debug for FlatVec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<T: Copy + PartialOrd + Debug> Backend<T> for FlatVec<T> {
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>) {
        debug_assert!(slot <= self.entries.len(), "slots are handed out densely");
        match self.entries.get_mut(slot) {
            Some(existing) => *existing = aabb,
            None => self.entries.push(aabb),
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(
            self.entries
                .iter()
                .enumerate()
                .filter(move |(_, a)| a.overlaps(&rect))
                .map(|(i, _)| i),
        )
    }

    fn collides(&self, rect: Aabb2D<T>) -> bool {
        self.entries.iter().any(|a| a.overlaps(&rect))
    }
}
