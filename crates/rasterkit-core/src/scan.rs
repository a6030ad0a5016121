//! Scan geometry
//!
//! Every filter defines its working window as a [`Region`] and walks it with
//! a [`Scan`]. Two traversal orders exist:
//!
//! - [`ScanOrder::RowMajor`] - outer loop over `x`, inner loop over `y`
//!   (all `y` for each `x`)
//! - [`ScanOrder::ColumnMajor`] - outer loop over `y`, inner loop over `x`
//!   (all `x` for each `y`)
//!
//! Two-pass filters run their first pass in one order and the second pass
//! in the other. Because the linear filters update in place, the order is
//! observable in the output and must not be swapped.

use std::iter::FusedIterator;

/// Traversal order of a [`Scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanOrder {
    /// Outer `x`, inner `y`.
    #[default]
    RowMajor,
    /// Outer `y`, inner `x`.
    ColumnMajor,
}

/// Half-open rectangle `[x0, x1) x [y0, y1)`.
///
/// A region whose end does not exceed its start on either axis is empty and
/// yields no coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Region {
    /// Create a region from explicit bounds.
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// The whole `width x height` frame.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// The frame shrunk by `margin` pixels on every side.
    ///
    /// When the frame is too small to keep any interior the result is an
    /// empty region rather than a wrapped-around one.
    pub fn inset(width: u32, height: u32, margin: u32) -> Self {
        Self::new(
            margin,
            margin,
            width.saturating_sub(margin),
            height.saturating_sub(margin),
        )
    }

    /// Region width (0 when empty along x).
    #[inline]
    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    /// Region height (0 when empty along y).
    #[inline]
    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    /// Whether the region contains no coordinates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Number of coordinates in the region.
    #[inline]
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Check whether `(x, y)` lies inside the region.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Walk the region in the given order.
    pub fn scan(self, order: ScanOrder) -> Scan {
        Scan::new(self, order)
    }

    /// Shorthand for `scan(ScanOrder::RowMajor)`.
    pub fn row_major(self) -> Scan {
        self.scan(ScanOrder::RowMajor)
    }

    /// Shorthand for `scan(ScanOrder::ColumnMajor)`.
    pub fn col_major(self) -> Scan {
        self.scan(ScanOrder::ColumnMajor)
    }
}

/// Lazy coordinate sequence over a [`Region`].
///
/// Cloning a `Scan` copies its current position. Call [`Scan::restart`] or
/// build a new one from the region to walk it again from the start.
#[derive(Debug, Clone)]
pub struct Scan {
    region: Region,
    order: ScanOrder,
    outer: u32,
    outer_end: u32,
    inner: u32,
    inner_start: u32,
    inner_end: u32,
}

impl Scan {
    fn new(region: Region, order: ScanOrder) -> Self {
        let (outer_start, outer_end, inner_start, inner_end) = match order {
            ScanOrder::RowMajor => (region.x0, region.x1, region.y0, region.y1),
            ScanOrder::ColumnMajor => (region.y0, region.y1, region.x0, region.x1),
        };
        // An empty inner range must not produce (outer, inner_start) items.
        let outer = if region.is_empty() {
            outer_end.max(outer_start)
        } else {
            outer_start
        };
        Self {
            region,
            order,
            outer,
            outer_end,
            inner: inner_start,
            inner_start,
            inner_end,
        }
    }

    /// The region being walked.
    pub fn region(&self) -> Region {
        self.region
    }

    /// The traversal order.
    pub fn order(&self) -> ScanOrder {
        self.order
    }

    /// A fresh scan over the same region and order.
    pub fn restart(&self) -> Self {
        Self::new(self.region, self.order)
    }

    fn remaining(&self) -> u64 {
        if self.outer >= self.outer_end {
            return 0;
        }
        let inner_len = (self.inner_end - self.inner_start) as u64;
        let outer_left = (self.outer_end - self.outer) as u64;
        outer_left * inner_len - (self.inner - self.inner_start) as u64
    }
}

impl Iterator for Scan {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<(u32, u32)> {
        if self.outer >= self.outer_end {
            return None;
        }
        let item = match self.order {
            ScanOrder::RowMajor => (self.outer, self.inner),
            ScanOrder::ColumnMajor => (self.inner, self.outer),
        };
        self.inner += 1;
        if self.inner >= self.inner_end {
            self.inner = self.inner_start;
            self.outer += 1;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Scan {}

impl FusedIterator for Scan {}
