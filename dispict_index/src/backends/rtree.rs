// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree backend generic over scalar `T: Scalar` with SAH-like split.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::{Aabb2D, Scalar, ScalarAcc, area, union_aabb};

/// Insert-only R-tree using SAH-like splits and widened accumulator metrics.
///
/// Nodes live in a flat arena and refer to each other by index. Internal nodes only
/// hold node children; leaves only hold items.
pub struct RTree<T: Scalar> {
    max_children: usize,
    min_children: usize,
    root: Option<NodeIdx>,
    arena: Vec<RNode<T>>,
    len: usize,
}

#[derive(Clone)]
struct RNode<T: Scalar> {
    bbox: Aabb2D<T>,
    leaf: bool,
    children: Vec<RChild<T>>,
}

#[derive(Copy, Clone)]
enum RChild<T: Scalar> {
    Node(NodeIdx),
    Item { slot: usize, bbox: Aabb2D<T> },
}

impl<T: Scalar> RChild<T> {
    fn bbox(&self, arena: &[RNode<T>]) -> Aabb2D<T> {
        match self {
            Self::Node(i) => arena[i.get()].bbox,
            Self::Item { bbox, .. } => *bbox,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

#[derive(Copy, Clone, Debug)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn centroid<T: Scalar>(self, b: &Aabb2D<T>) -> T {
        match self {
            Self::X => T::mid(b.min_x, b.max_x),
            Self::Y => T::mid(b.min_y, b.max_y),
        }
    }
}

/// Outcome of splitting an overflowing node's children in two.
struct Split<T: Scalar> {
    cost: ScalarAcc<T>,
    left: Vec<RChild<T>>,
    left_bbox: Aabb2D<T>,
    right: Vec<RChild<T>>,
    right_bbox: Aabb2D<T>,
}

impl<T: Scalar> Default for RTree<T> {
    fn default() -> Self {
        Self::with_node_capacity(8)
    }
}

impl<T: Scalar> RTree<T> {
    /// Create an empty tree whose nodes split once they exceed `max_children`.
    ///
    /// Capacities below 4 are raised to 4. The minimum fill after a split is half
    /// the capacity.
    pub fn with_node_capacity(max_children: usize) -> Self {
        let max_children = max_children.max(4);
        Self {
            max_children,
            min_children: max_children / 2,
            root: None,
            arena: Vec::new(),
            len: 0,
        }
    }

    /// Number of items stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of node levels from the root down to the leaves (0 when empty).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut cursor = self.root;
        while let Some(idx) = cursor {
            height += 1;
            let node = &self.arena[idx.get()];
            cursor = if node.leaf {
                None
            } else {
                node.children.iter().find_map(|c| match c {
                    RChild::Node(i) => Some(*i),
                    RChild::Item { .. } => None,
                })
            };
        }
        height
    }

    fn enlarge_cost(a: &Aabb2D<T>, b: &Aabb2D<T>) -> T::Acc {
        area(&union_aabb(*a, *b)) - area(a)
    }

    /// Pick the child node whose bounds grow the least when extended to `bbox`.
    fn choose_subtree(&self, node: usize, bbox: &Aabb2D<T>) -> Option<(usize, NodeIdx)> {
        let mut best: Option<(T::Acc, usize, NodeIdx)> = None;
        for (pos, child) in self.arena[node].children.iter().enumerate() {
            let RChild::Node(idx) = child else {
                continue;
            };
            let cost = Self::enlarge_cost(&self.arena[idx.get()].bbox, bbox);
            if best.as_ref().is_none_or(|(bc, _, _)| cost < *bc) {
                best = Some((cost, pos, *idx));
            }
        }
        best.map(|(_, pos, idx)| (pos, idx))
    }

    /// SAH-like split: sort along an axis, precompute prefix/suffix AABBs, and
    /// choose `k` that minimizes `area(LB_k) * k + area(RB_k) * (n - k)`.
    fn split_children(
        arena: &[RNode<T>],
        children: &[RChild<T>],
        min_children: usize,
    ) -> Option<Split<T>> {
        let n = children.len();
        if n < 2 {
            return None;
        }
        let (mut lo, mut hi) = (min_children.max(1), n.saturating_sub(min_children).min(n - 1));
        if lo > hi {
            lo = n / 2;
            hi = n / 2;
        }

        let mut best: Option<Split<T>> = None;
        for axis in [Axis::X, Axis::Y] {
            let mut v = children.to_vec();
            v.sort_by(|a, b| {
                axis.centroid(&a.bbox(arena))
                    .partial_cmp(&axis.centroid(&b.bbox(arena)))
                    .unwrap_or(Ordering::Equal)
            });
            let boxes: Vec<Aabb2D<T>> = v.iter().map(|c| c.bbox(arena)).collect();

            // Running unions from each end so every split is costed in O(1).
            let mut prefix: Vec<Aabb2D<T>> = Vec::with_capacity(n);
            for &bb in &boxes {
                let next = prefix.last().map_or(bb, |&prev| union_aabb(prev, bb));
                prefix.push(next);
            }
            let mut suffix: Vec<Aabb2D<T>> = Vec::with_capacity(n);
            for &bb in boxes.iter().rev() {
                let next = suffix.last().map_or(bb, |&prev| union_aabb(bb, prev));
                suffix.push(next);
            }
            suffix.reverse();

            let mut axis_best: Option<(T::Acc, usize)> = None;
            for k in lo..=hi {
                let cost = area(&prefix[k - 1]) * T::acc_from_usize(k)
                    + area(&suffix[k]) * T::acc_from_usize(n - k);
                if axis_best.as_ref().is_none_or(|(bc, _)| cost < *bc) {
                    axis_best = Some((cost, k));
                }
            }

            if let Some((cost, k)) = axis_best
                && best.as_ref().is_none_or(|b| cost < b.cost)
            {
                let right = v.split_off(k);
                best = Some(Split {
                    cost,
                    left: v,
                    left_bbox: prefix[k - 1],
                    right,
                    right_bbox: suffix[k],
                });
            }
        }
        best
    }

    /// Split an overflowing node in place, returning the new right sibling.
    fn split_node(&mut self, node: usize) -> Option<NodeIdx> {
        let split = Self::split_children(&self.arena, &self.arena[node].children, self.min_children)?;
        let leaf = self.arena[node].leaf;
        let left = &mut self.arena[node];
        left.children = split.left;
        left.bbox = split.left_bbox;
        let right_idx = NodeIdx::new(self.arena.len());
        self.arena.push(RNode {
            bbox: split.right_bbox,
            leaf,
            children: split.right,
        });
        Some(right_idx)
    }

    /// Descend to a leaf and append the item, splitting overflowing nodes on the way back up.
    fn insert_into(&mut self, node: NodeIdx, slot: usize, bbox: Aabb2D<T>) -> Option<NodeIdx> {
        let i = node.get();
        self.arena[i].bbox = union_aabb(self.arena[i].bbox, bbox);
        if self.arena[i].leaf {
            self.arena[i].children.push(RChild::Item { slot, bbox });
        } else if let Some((pos, child)) = self.choose_subtree(i, &bbox) {
            if let Some(sibling) = self.insert_into(child, slot, bbox) {
                self.arena[i]
                    .children
                    .insert(pos + 1, RChild::Node(sibling));
            }
        } else {
            // An internal node with no node children cannot be built; treat it as a leaf.
            self.arena[i].leaf = true;
            self.arena[i].children.push(RChild::Item { slot, bbox });
        }
        if self.arena[i].children.len() <= self.max_children {
            return None;
        }
        self.split_node(i)
    }

    fn for_each_overlapping(&self, rect: &Aabb2D<T>, mut visit: impl FnMut(usize) -> bool) {
        let Some(root) = self.root else {
            return;
        };
        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            let n = &self.arena[i.get()];
            if !n.bbox.overlaps(rect) {
                continue;
            }
            for c in &n.children {
                match c {
                    RChild::Node(ci) => stack.push(*ci),
                    RChild::Item { slot, bbox } => {
                        if bbox.overlaps(rect) && !visit(*slot) {
                            return;
                        }
                    }
                }
            }
        }
    }
}

impl<T: Scalar> Backend<T> for RTree<T> {
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>) {
        self.len += 1;
        let Some(root) = self.root else {
            let idx = NodeIdx::new(self.arena.len());
            self.arena.push(RNode {
                bbox: aabb,
                leaf: true,
                children: vec![RChild::Item { slot, bbox: aabb }],
            });
            self.root = Some(idx);
            return;
        };
        if let Some(right) = self.insert_into(root, slot, aabb) {
            // Grow a level: the old root and its new sibling share a fresh root.
            let bbox = union_aabb(self.arena[root.get()].bbox, self.arena[right.get()].bbox);
            let idx = NodeIdx::new(self.arena.len());
            self.arena.push(RNode {
                bbox,
                leaf: false,
                children: vec![RChild::Node(root), RChild::Node(right)],
            });
            self.root = Some(idx);
        }
    }

    fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
        self.len = 0;
    }

    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut out = Vec::new();
        self.for_each_overlapping(&rect, |slot| {
            out.push(slot);
            true
        });
        Box::new(out.into_iter())
    }

    fn collides(&self, rect: Aabb2D<T>) -> bool {
        let mut hit = false;
        self.for_each_overlapping(&rect, |_| {
            hit = true;
            false
        });
        hit
    }
}

impl<T: Scalar> Debug for RTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("max_children", &self.max_children)
            .field("min_children", &self.min_children)
            .field("arena_nodes", &self.arena.len())
            .field("len", &self.len)
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

/// Convenience type aliases.
/// R-tree with i64 coordinates and i128 metrics.
pub type RTreeI64 = RTree<i64>;

/// R-tree with f32 coordinates and f64 metrics.
pub type RTreeF32 = RTree<f32>;

/// R-tree with f64 coordinates and f64 metrics.
pub type RTreeF64 = RTree<f64>;
