// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate positions along a phyllotactic (sunflower) spiral.

use kurbo::Point;

/// A spiral parameterized by a continuous step `t`.
///
/// The point at step `t` lies at radius `radial_step * sqrt(t)` and angle
/// `angle_step * t`. With the golden angle, consecutive integer steps cover the plane
/// with roughly constant density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spiral {
    radial_step: f64,
    angle_step: f64,
}

impl Spiral {
    /// Create a spiral from its radial and angular constants.
    pub const fn new(radial_step: f64, angle_step: f64) -> Self {
        Self {
            radial_step,
            angle_step,
        }
    }

    /// The candidate point at step `t`. `t` need not be an integer.
    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        let radius = self.radial_step * t.sqrt();
        let angle = self.angle_step * t;
        Point::new(radius * angle.cos(), radius * angle.sin())
    }

    /// Iterate `(t, point)` pairs for `t = start, start + 1, start + 2, ...`.
    pub fn steps_from(self, start: f64) -> Steps {
        Steps {
            spiral: self,
            t: start,
        }
    }
}

/// Unbounded iterator over spiral steps, created by [`Spiral::steps_from`].
#[derive(Clone, Debug)]
pub struct Steps {
    spiral: Spiral,
    t: f64,
}

impl Iterator for Steps {
    type Item = (f64, Point);

    fn next(&mut self) -> Option<Self::Item> {
        let t = self.t;
        self.t += 1.0;
        Some((t, self.spiral.point_at(t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GOLDEN_ANGLE;

    #[test]
    fn starts_at_origin() {
        let spiral = Spiral::new(5.0, GOLDEN_ANGLE);
        assert_eq!(spiral.point_at(0.0), Point::ORIGIN);
    }

    #[test]
    fn radius_grows_with_sqrt_of_step() {
        let spiral = Spiral::new(5.0, GOLDEN_ANGLE);
        for t in [1.0, 4.0, 9.5, 100.0] {
            let r = spiral.point_at(t).to_vec2().hypot();
            assert!((r - 5.0 * f64::sqrt(t)).abs() < 1e-9, "radius at step {t} was {r}");
        }
    }

    #[test]
    fn steps_advance_by_one_from_fractional_start() {
        let spiral = Spiral::new(5.0, GOLDEN_ANGLE);
        let steps: Vec<_> = spiral.steps_from(2.5).take(3).collect();
        let ts: Vec<f64> = steps.iter().map(|(t, _)| *t).collect();
        assert_eq!(ts, [2.5, 3.5, 4.5]);
        assert_eq!(steps[1].1, spiral.point_at(3.5));
    }

    #[test]
    fn consecutive_steps_change_direction() {
        // Golden-angle steps never line up along the same ray.
        let spiral = Spiral::new(1.0, GOLDEN_ANGLE);
        let a = spiral.point_at(1.0).to_vec2().atan2();
        let b = spiral.point_at(2.0).to_vec2().atan2();
        assert!((a - b).abs() > 0.5, "angles {a} and {b} are too close");
    }
}
