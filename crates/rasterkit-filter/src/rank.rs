//! Rank filtering: median and mode over a fixed 5x5 window
//!
//! Window values are read from the unmodified source. Results are staged in
//! an auxiliary buffer and committed over the inset region once the whole
//! scan is done, so no output feeds a later window.
//!
//! The region is inset by [`RANK_RADIUS`] pixels; images smaller than 5x5
//! are returned unchanged.

use crate::scratch::AuxBuffer;
use rasterkit_core::{Image, Region};
use tracing::{debug, trace};

/// Distance from the window centre to its edge.
pub const RANK_RADIUS: u32 = 2;

/// Side length of the window.
pub const RANK_WINDOW: u32 = 2 * RANK_RADIUS + 1;

const WINDOW_LEN: usize = (RANK_WINDOW * RANK_WINDOW) as usize;

/// Order statistic computed over each window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankStat {
    /// Sorted index 12 of the 25 values.
    Median,
    /// Most frequent value; the smallest one on a tie.
    Mode,
}

impl RankStat {
    /// Reduce a sorted window to one value.
    fn select(self, sorted: &[u8; WINDOW_LEN]) -> u8 {
        match self {
            RankStat::Median => sorted[WINDOW_LEN / 2],
            RankStat::Mode => mode_of_sorted(sorted),
        }
    }
}

/// Most frequent value of a sorted slice.
///
/// Runs are visited in ascending order and only a strictly longer run
/// replaces the current best, so ties resolve to the smallest value.
/// Returns 0 for an empty slice.
pub fn mode_of_sorted(sorted: &[u8]) -> u8 {
    let mut best = (0u8, 0usize);
    for run in sorted.chunk_by(|a, b| a == b) {
        if run.len() > best.1 {
            best = (run[0], run.len());
        }
    }
    best.0
}

/// Apply a 5x5 rank filter in place.
pub fn rank_filter(image: &mut Image, stat: RankStat) {
    let region = Region::inset(image.width(), image.height(), RANK_RADIUS);
    debug!(
        width = image.width(),
        height = image.height(),
        ?stat,
        "rank filter"
    );

    let mut aux = AuxBuffer::from_image(image);
    let mut window = [0u8; WINDOW_LEN];
    for (x, y) in region.row_major() {
        let mut k = 0;
        for wx in x - RANK_RADIUS..=x + RANK_RADIUS {
            for wy in y - RANK_RADIUS..=y + RANK_RADIUS {
                window[k] = image.value_unchecked(wx, wy);
                k += 1;
            }
        }
        window.sort_unstable();
        aux.set(x, y, stat.select(&window) as i32);
    }
    trace!(pixels = region.area(), "rank values staged");

    aux.commit(image, region);
}

/// 5x5 median filter in place.
pub fn median_filter(image: &mut Image) {
    rank_filter(image, RankStat::Median);
}

/// 5x5 mode filter in place.
pub fn mode_filter(image: &mut Image) {
    rank_filter(image, RankStat::Mode);
}
