// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validation errors raised before a layout pass starts.

use thiserror::Error;

/// Rejected input to [`SpiralLayout`](crate::SpiralLayout).
///
/// A layout pass itself cannot fail; every error is detected up front, before any
/// item is placed.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum LayoutError {
    /// An item's width or height is zero, negative, or not finite.
    #[error("item {index} has footprint {width}x{height}; both sides must be positive and finite")]
    InvalidFootprint {
        /// Position of the item in the input sequence.
        index: usize,
        /// Reported width.
        width: f64,
        /// Reported height.
        height: f64,
    },

    /// A configuration value is out of range.
    #[error("invalid layout config: {field} = {value}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}
