// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The one thing the layout needs to know about an item: its size.

use kurbo::{Rect, Size};

/// Anything with a rectangular footprint that can be placed by the layout.
///
/// Implement this for your own item type (for example an artwork record carrying its
/// physical dimensions). Priority is implied by position in the input slice.
pub trait Footprint {
    /// Width and height of the item, in layout units.
    fn size(&self) -> Size;
}

impl Footprint for Size {
    fn size(&self) -> Size {
        *self
    }
}

impl Footprint for Rect {
    fn size(&self) -> Size {
        Rect::size(self)
    }
}

impl Footprint for (f64, f64) {
    fn size(&self) -> Size {
        Size::new(self.0, self.1)
    }
}

impl Footprint for [f64; 2] {
    fn size(&self) -> Size {
        Size::new(self[0], self[1])
    }
}

impl<T: Footprint + ?Sized> Footprint for &T {
    fn size(&self) -> Size {
        (**self).size()
    }
}

/// Whether a footprint is usable: both sides positive and finite.
pub(crate) fn is_valid(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}
