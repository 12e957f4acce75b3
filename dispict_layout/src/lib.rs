// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispict Layout: place prioritized rectangles on a spiral without overlap.
//!
//! Given an ordered list of rectangular items (artworks, cards, thumbnails), this crate
//! computes a center point for each so that:
//!
//! - the first item lands nearest the origin and later items drift outward,
//! - no two padded footprints overlap,
//! - nothing intrudes on a reserved region around the origin (a logo or focal area).
//!
//! Candidates are generated along a golden-angle spiral and tested against a
//! [`dispict_index`] R-tree holding everything placed so far.
//!
//! ## Algorithm
//!
//! A step counter `t` starts at zero. For each item in order:
//!
//! 1. Compute the candidate center at radius `radial_step * sqrt(t)` and angle `angle_step * t`.
//! 2. Inflate the item by `buffer` and center it on the candidate.
//! 3. If it overlaps nothing, accept it and insert it into the index; otherwise `t += 1` and retry.
//! 4. Halve `t` before moving on to the next item.
//!
//! The halving step restarts each search closer to the center than where the previous
//! one ended. Priority is therefore preserved in aggregate rather than per item: a later,
//! smaller item can fill a gap nearer the origin than an earlier, larger one.
//!
//! ## Example
//!
//! ```
//! use dispict_layout::{LayoutConfig, SpiralLayout};
//! use kurbo::Size;
//!
//! let items = [Size::new(40.0, 30.0), Size::new(20.0, 25.0), Size::new(35.0, 35.0)];
//!
//! // Default constants: radial step 5, buffer 3, reserved 72×48 centered on the origin.
//! let positions = dispict_layout::layout(&items).unwrap();
//! assert_eq!(positions.len(), items.len());
//!
//! // The reserved region is configurable.
//! let layout = SpiralLayout::new(LayoutConfig::default().with_reserved(Size::new(50.0, 30.0)))
//!     .unwrap();
//! let report = layout.layout_report(&items).unwrap();
//! assert!(report.placements.iter().all(|p| p.bounds.area() > 0.0));
//! ```
//!
//! ## Item types
//!
//! Anything implementing [`Footprint`] can be laid out:
//!
//! ```
//! use dispict_layout::Footprint;
//! use kurbo::Size;
//!
//! struct Artwork {
//!     title: &'static str,
//!     width_cm: f64,
//!     height_cm: f64,
//! }
//!
//! impl Footprint for Artwork {
//!     fn size(&self) -> Size {
//!         Size::new(self.width_cm, self.height_cm)
//!     }
//! }
//!
//! let works = [
//!     Artwork { title: "Water Lilies", width_cm: 90.0, height_cm: 60.0 },
//!     Artwork { title: "Study", width_cm: 20.0, height_cm: 28.0 },
//! ];
//! let positions = dispict_layout::layout(&works).unwrap();
//! assert_eq!(positions.len(), 2);
//! # let _ = works[0].title;
//! ```
//!
//! Items with a non-positive or non-finite side are rejected up front with
//! [`LayoutError::InvalidFootprint`]; a pass never fails once it starts.

pub mod config;
pub mod engine;
pub mod error;
pub mod footprint;
pub mod spiral;

pub use config::{GOLDEN_ANGLE, LayoutConfig};
pub use engine::{LayoutReport, Placement, SpiralLayout, layout};
pub use error::LayoutError;
pub use footprint::Footprint;
pub use spiral::{Spiral, Steps};
