//! Scroll-driven batch pagination over a filtered icon sequence.

use std::ops::Range;

/// Icons rendered per batch.
pub const BATCH_SIZE: usize = 50;
/// Distance from the bottom edge (px) at which the next batch is requested.
pub const SCROLL_THRESHOLD_PX: f64 = 10.0;

/// Scroll geometry of the grid container at the time of a scroll event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Current scroll offset from the top.
    pub scroll_top: f64,
    /// Visible height of the container.
    pub client_height: f64,
    /// Total scrollable content height.
    pub scroll_height: f64,
}

impl ScrollMetrics {
    /// True when the viewport bottom is within `threshold` px of the content bottom.
    pub fn near_bottom(&self, threshold: f64) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - threshold
    }
}

/// Tracks how much of a backing sequence of `len` items has been handed out.
///
/// Offsets only grow; switching sequences means building a new pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPager {
    len: usize,
    loaded: usize,
    batch_size: usize,
}

impl BatchPager {
    /// Pager over `len` items using [`BATCH_SIZE`].
    pub fn new(len: usize) -> Self {
        Self::with_batch_size(len, BATCH_SIZE)
    }

    /// Pager over `len` items with a custom batch size (minimum 1).
    pub fn with_batch_size(len: usize, batch_size: usize) -> Self {
        Self {
            len,
            loaded: 0,
            batch_size: batch_size.max(1),
        }
    }

    /// Claims the next batch range, or `None` once the sequence is exhausted.
    pub fn next_batch(&mut self) -> Option<Range<usize>> {
        if self.loaded >= self.len {
            return None;
        }
        let start = self.loaded;
        let end = (start + self.batch_size).min(self.len);
        self.loaded = end;
        Some(start..end)
    }

    /// Number of items handed out so far.
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    /// True once every item has been handed out.
    pub fn is_exhausted(&self) -> bool {
        self.loaded >= self.len
    }
}
