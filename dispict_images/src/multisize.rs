// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! All loaded resolutions of a single image.

use alloc::collections::BTreeMap;
use alloc::string::String;

/// The resolutions of one image that have been loaded or are being fetched.
///
/// Widths are in pixels. Handles `H` are whatever the caller uses to display an image
/// (an object URL, a texture id, decoded bytes).
#[derive(Clone, Debug)]
pub struct MultisizeImage<H> {
    url: String,
    loaded: BTreeMap<u32, H>,
    /// Width → attempt number of the fetch in flight.
    pending: BTreeMap<u32, u32>,
    revision: u64,
}

impl<H> MultisizeImage<H> {
    pub(crate) fn new(url: String) -> Self {
        Self {
            url,
            loaded: BTreeMap::new(),
            pending: BTreeMap::new(),
            revision: 0,
        }
    }

    /// Resource URL, without any size parameter.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether a handle for exactly `width` is available.
    pub fn is_loaded(&self, width: u32) -> bool {
        self.loaded.contains_key(&width)
    }

    /// Whether a fetch for `width` is in flight.
    pub fn is_pending(&self, width: u32) -> bool {
        self.pending.contains_key(&width)
    }

    /// Loaded widths in ascending order.
    pub fn loaded_widths(&self) -> impl Iterator<Item = u32> + '_ {
        self.loaded.keys().copied()
    }

    /// Counter bumped every time a new resolution arrives.
    ///
    /// Compare against a previously seen value to find out whether
    /// [`closest_width`](Self::closest_width) may have changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The best loaded handle for displaying the image at `width`.
    ///
    /// Picks the smallest loaded width that is at least `width`; if every loaded width is
    /// smaller, picks the largest of them.
    pub fn closest_width(&self, width: u32) -> Option<(u32, &H)> {
        self.loaded
            .range(width..)
            .next()
            .or_else(|| self.loaded.range(..width).next_back())
            .map(|(w, h)| (*w, h))
    }

    /// Start tracking a fetch unless the width is already loaded or in flight.
    pub(crate) fn begin(&mut self, width: u32) -> bool {
        if self.is_loaded(width) || self.is_pending(width) {
            return false;
        }
        self.pending.insert(width, 0);
        true
    }

    /// Whether `attempt` is the fetch currently in flight for `width`.
    pub(crate) fn expects(&self, width: u32, attempt: u32) -> bool {
        self.pending.get(&width) == Some(&attempt)
    }

    /// Record a successful fetch. The first handle to arrive for a width wins.
    pub(crate) fn resolve(&mut self, width: u32, handle: H) -> bool {
        self.pending.remove(&width);
        if self.is_loaded(width) {
            return false;
        }
        self.loaded.insert(width, handle);
        self.revision += 1;
        true
    }

    /// Move the fetch for `width` on to `attempt`.
    pub(crate) fn retry(&mut self, width: u32, attempt: u32) {
        self.pending.insert(width, attempt);
    }

    /// Stop waiting on `width`.
    pub(crate) fn abandon(&mut self, width: u32) {
        self.pending.remove(&width);
    }
}
