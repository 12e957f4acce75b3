// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The placement pass: walk the spiral for each item until a free spot turns up.

use dispict_index::{Aabb2D, Backend, IndexGeneric, RTreeF64};
use kurbo::{Point, Rect, Size};
use tracing::{debug, trace};

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::footprint::{Footprint, is_valid};
use crate::spiral::Spiral;

/// Where one item ended up, and how the search got there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Center of the item.
    pub center: Point,
    /// Padded footprint reserved in the index for this item.
    pub bounds: Rect,
    /// Spiral step the search for this item started from.
    pub start_step: f64,
    /// Spiral step at which the item was accepted.
    pub final_step: f64,
    /// Number of rejected candidates before acceptance.
    pub trials: u64,
}

/// Result of a layout pass with per-item diagnostics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutReport {
    /// The reserved keep-out region the pass started with.
    pub reserved: Rect,
    /// One entry per input item, in input order.
    pub placements: Vec<Placement>,
}

impl LayoutReport {
    /// Item centers, in input order.
    pub fn positions(&self) -> Vec<Point> {
        self.placements.iter().map(|p| p.center).collect()
    }

    /// Consume the report, keeping only the item centers.
    pub fn into_positions(self) -> Vec<Point> {
        self.positions()
    }

    /// Total number of rejected candidates across all items.
    pub fn total_trials(&self) -> u64 {
        self.placements.iter().map(|p| p.trials).sum()
    }
}

/// Places prioritized rectangles along a golden-angle spiral without overlap.
///
/// Each item is tried at successive spiral steps until its padded footprint clears the
/// reserved region and every item placed before it. After an item is accepted the step
/// counter is halved, so the next search restarts closer to the center and fills gaps
/// left behind by larger items.
///
/// A pass is a pure function of its input: the collision index is built and dropped
/// inside the call.
#[derive(Clone, Debug, Default)]
pub struct SpiralLayout {
    config: LayoutConfig,
}

impl SpiralLayout {
    /// Create a layout after validating `config`.
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this layout runs with.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Center points for `items`, one per item, in input order.
    pub fn layout<I: Footprint>(&self, items: &[I]) -> Result<Vec<Point>, LayoutError> {
        self.layout_report(items).map(LayoutReport::into_positions)
    }

    /// Like [`layout`](Self::layout), with per-item search diagnostics.
    pub fn layout_report<I: Footprint>(&self, items: &[I]) -> Result<LayoutReport, LayoutError> {
        self.layout_with::<RTreeF64, I>(items)
    }

    /// Run the pass over a specific index backend.
    ///
    /// Every backend yields the same placements; only the query cost differs.
    pub fn layout_with<B, I>(&self, items: &[I]) -> Result<LayoutReport, LayoutError>
    where
        B: Backend<f64> + Default,
        I: Footprint,
    {
        let sizes = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let size = item.size();
                if is_valid(size) {
                    Ok(size)
                } else {
                    Err(LayoutError::InvalidFootprint {
                        index,
                        width: size.width,
                        height: size.height,
                    })
                }
            })
            .collect::<Result<Vec<Size>, _>>()?;

        let LayoutConfig {
            radial_step,
            angle_step,
            buffer,
            ..
        } = self.config;
        let spiral = Spiral::new(radial_step, angle_step);
        let reserved = self.config.reserved_rect();

        let mut index: IndexGeneric<f64, B> = IndexGeneric::new();
        index.reserve(sizes.len() + 1);
        index.insert(rect_to_aabb(reserved));

        let mut placements = Vec::with_capacity(sizes.len());
        let mut step = 0.0_f64;
        for (i, size) in sizes.into_iter().enumerate() {
            let padded = Size::new(size.width + buffer, size.height + buffer);
            let start_step = step;
            let mut trials = 0_u64;
            let (center, bounds) = loop {
                let center = spiral.point_at(step);
                let bounds = Rect::from_center_size(center, padded);
                if !index.collides(rect_to_aabb(bounds)) {
                    break (center, bounds);
                }
                step += 1.0;
                trials += 1;
            };
            index.insert(rect_to_aabb(bounds));
            trace!(
                item = i,
                x = center.x,
                y = center.y,
                start_step,
                final_step = step,
                trials,
                "placed item"
            );
            placements.push(Placement {
                center,
                bounds,
                start_step,
                final_step: step,
                trials,
            });
            step *= 0.5;
        }

        let report = LayoutReport {
            reserved,
            placements,
        };
        debug!(
            items = report.placements.len(),
            total_trials = report.total_trials(),
            "spiral layout complete"
        );
        Ok(report)
    }
}

/// Lay out `items` with the default configuration.
///
/// Shorthand for `SpiralLayout::default().layout(items)`.
pub fn layout<I: Footprint>(items: &[I]) -> Result<Vec<Point>, LayoutError> {
    SpiralLayout::default().layout(items)
}

fn rect_to_aabb(r: Rect) -> Aabb2D<f64> {
    Aabb2D::new(r.x0, r.y0, r.x1, r.y1)
}
