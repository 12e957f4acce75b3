// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans (small, simple).
//! - `rtree`: generic R-tree (`T: Scalar`) with SAH-like split (aliases: `RTreeI64`, `RTreeF32`, `RTreeF64`).
//!
//! SAH note
//! --------
//! The R-tree splits an overflowing node with an SAH-like heuristic.
//! For a split point `k` along a sorted axis we minimize:
//!
//! `cost(k) = area(LB_k) * k + area(RB_k) * (n - k)`
//!
//! where `LB_k` and `RB_k` are the bounding boxes of the first `k` and remaining `n - k` children.
//! We evaluate all `k` in O(n) per axis using prefix/suffix bounding boxes, and pick the lowest cost.
//! Accumulators are widened (`f32`→`f64`, `f64`→`f64`, `i64`→`i128`) for robust comparisons.

pub mod flatvec;
pub mod rtree;
