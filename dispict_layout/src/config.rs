// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable constants of the spiral layout.

use kurbo::{Point, Rect, Size};

use crate::error::LayoutError;

/// The golden angle `(√5 − 1)·π` in radians.
///
/// Successive spiral steps advance by this angle, which spreads candidates evenly
/// around the origin instead of retracing earlier rays.
pub const GOLDEN_ANGLE: f64 = 3.883_222_077_450_933;

/// Parameters of a [`SpiralLayout`](crate::SpiralLayout).
///
/// All lengths share the caller's unit (centimeters in the gallery this was built for).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Radial growth constant: the candidate radius at step `t` is `radial_step * sqrt(t)`.
    pub radial_step: f64,
    /// Angular increment per step, in radians.
    pub angle_step: f64,
    /// Extra extent added to each item's width and height before collision testing,
    /// split evenly between both sides.
    pub buffer: f64,
    /// Size of the keep-out region centered on the origin.
    pub reserved: Size,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radial_step: 5.0,
            angle_step: GOLDEN_ANGLE,
            buffer: 3.0,
            reserved: Size::new(72.0, 48.0),
        }
    }
}

impl LayoutConfig {
    /// Set the radial growth constant.
    #[must_use]
    pub fn with_radial_step(mut self, radial_step: f64) -> Self {
        self.radial_step = radial_step;
        self
    }

    /// Set the angular increment per step.
    #[must_use]
    pub fn with_angle_step(mut self, angle_step: f64) -> Self {
        self.angle_step = angle_step;
        self
    }

    /// Set the spacing buffer.
    #[must_use]
    pub fn with_buffer(mut self, buffer: f64) -> Self {
        self.buffer = buffer;
        self
    }

    /// Set the size of the reserved center region.
    #[must_use]
    pub fn with_reserved(mut self, reserved: Size) -> Self {
        self.reserved = reserved;
        self
    }

    /// The reserved keep-out rectangle, centered on the origin.
    pub fn reserved_rect(&self) -> Rect {
        Rect::from_center_size(Point::ORIGIN, self.reserved)
    }

    /// Check that every field is in range.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let checks = [
            ("radial_step", self.radial_step, self.radial_step > 0.0),
            ("angle_step", self.angle_step, true),
            ("buffer", self.buffer, self.buffer >= 0.0),
            ("reserved.width", self.reserved.width, self.reserved.width > 0.0),
            ("reserved.height", self.reserved.height, self.reserved.height > 0.0),
        ];
        for (field, value, in_range) in checks {
            if !value.is_finite() || !in_range {
                return Err(LayoutError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_angle_matches_formula() {
        let formula = (5.0_f64.sqrt() - 1.0) * core::f64::consts::PI;
        assert_eq!(GOLDEN_ANGLE.to_bits(), formula.to_bits());
    }

    #[test]
    fn default_is_valid() {
        let config = LayoutConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.reserved_rect(), Rect::new(-36.0, -24.0, 36.0, 24.0));
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let bad = [
            (LayoutConfig::default().with_radial_step(0.0), "radial_step"),
            (LayoutConfig::default().with_angle_step(f64::NAN), "angle_step"),
            (LayoutConfig::default().with_buffer(-1.0), "buffer"),
            (
                LayoutConfig::default().with_reserved(Size::new(0.0, 30.0)),
                "reserved.width",
            ),
            (
                LayoutConfig::default().with_reserved(Size::new(50.0, f64::INFINITY)),
                "reserved.height",
            ),
        ];
        for (config, expected) in bad {
            match config.validate() {
                Err(LayoutError::InvalidConfig { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected {expected} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn zero_buffer_is_allowed() {
        assert_eq!(LayoutConfig::default().with_buffer(0.0).validate(), Ok(()));
    }
}
