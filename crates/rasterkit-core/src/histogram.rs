//! Intensity histogram and exact probabilities
//!
//! The histogram counts the representative channel of every pixel. It is
//! derived on demand and never cached on the image, so it always reflects
//! the current pixel state.
//!
//! Per-level probabilities are kept as exact rationals ([`Ratio`]) so that
//! accumulating 256 of them is order-independent and the final rounding of
//! an equalization table sees the true value, ties included.

use crate::error::{Error, Result};
use crate::image::Image;
use crate::{INTENSITY_LEVELS, MAX_INTENSITY};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Highest level as `u64`, the scale of an equalization table.
pub const LEVEL_SCALE: u64 = MAX_INTENSITY as u64;

/// Reduced non-negative fraction `num / den` with `den > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    num: u64,
    den: u64,
}

impl Ratio {
    /// Zero.
    pub const ZERO: Ratio = Ratio { num: 0, den: 1 };
    /// One.
    pub const ONE: Ratio = Ratio { num: 1, den: 1 };

    /// Create `num / den` in lowest terms.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `den` is 0.
    pub fn new(num: u64, den: u64) -> Result<Self> {
        if den == 0 {
            return Err(Error::InvalidParameter("ratio denominator is zero".into()));
        }
        let g = gcd(num, den);
        Ok(Self {
            num: num / g,
            den: den / g,
        })
    }

    /// Numerator in lowest terms.
    #[inline]
    pub fn numer(&self) -> u64 {
        self.num
    }

    /// Denominator in lowest terms.
    #[inline]
    pub fn denom(&self) -> u64 {
        self.den
    }

    /// Nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Exact sum, or `None` if the reduced result does not fit in `u64`.
    pub fn checked_add(self, other: Ratio) -> Option<Ratio> {
        if self.den == other.den {
            let num = self.num.checked_add(other.num)?;
            return Ratio::new(num, self.den).ok();
        }
        let num = self.num as u128 * other.den as u128 + other.num as u128 * self.den as u128;
        let den = self.den as u128 * other.den as u128;
        let g = gcd_u128(num, den);
        let num = u64::try_from(num / g).ok()?;
        let den = u64::try_from(den / g).ok()?;
        Some(Ratio { num, den })
    }

    /// `self * scale`, rounded to the nearest integer with ties to even.
    ///
    /// Computed in integer arithmetic, so a product that is exactly halfway
    /// between two integers is recognised as a tie.
    pub fn scale_round_half_even(&self, scale: u64) -> u64 {
        let n = self.num as u128 * scale as u128;
        let d = self.den as u128;
        let q = n / d;
        let r = n % d;
        let rounded = match (2 * r).cmp(&d) {
            Ordering::Less => q,
            Ordering::Greater => q + 1,
            Ordering::Equal => q + (q & 1),
        };
        rounded as u64
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Ratio::ZERO
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.num as u128 * other.den as u128).cmp(&(other.num as u128 * self.den as u128))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

fn gcd_u128(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

/// Count of pixels per intensity level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; INTENSITY_LEVELS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// An empty histogram.
    pub fn new() -> Self {
        Self {
            counts: [0; INTENSITY_LEVELS],
        }
    }

    /// Count the representative channel of every pixel of `image`.
    pub fn from_image(image: &Image) -> Self {
        let mut hist = Self::new();
        for p in image.pixels() {
            hist.add(p.value());
        }
        hist
    }

    /// Record one pixel at level `v`.
    #[inline]
    pub fn add(&mut self, v: u8) {
        self.counts[v as usize] += 1;
    }

    /// Number of pixels at level `v`; 0 for unobserved levels.
    #[inline]
    pub fn count(&self, v: u8) -> u64 {
        self.counts[v as usize]
    }

    /// All 256 bucket counts.
    pub fn counts(&self) -> &[u64; INTENSITY_LEVELS] {
        &self.counts
    }

    /// Total number of pixels counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Observed levels in ascending order, with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(v, &c)| (v as u8, c))
    }

    /// Number of observed levels.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no pixel has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Lowest and highest observed level.
    pub fn range(&self) -> Option<(u8, u8)> {
        let lo = self.iter().next()?.0;
        let hi = self.iter().last()?.0;
        Some((lo, hi))
    }

    /// Observed levels only, for plotting.
    pub fn to_map(&self) -> BTreeMap<u8, u64> {
        self.iter().collect()
    }

    /// `P[v] = count[v] / pixel_count` for every observed level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `pixel_count` is 0 or smaller
    /// than the number of pixels counted.
    pub fn probabilities(&self, pixel_count: u64) -> Result<BTreeMap<u8, Ratio>> {
        let total = self.total();
        if pixel_count == 0 || pixel_count < total {
            return Err(Error::InvalidParameter(format!(
                "pixel count {pixel_count} cannot hold {total} counted pixels"
            )));
        }
        self.iter()
            .map(|(v, c)| Ok((v, Ratio::new(c, pixel_count)?)))
            .collect()
    }
}

impl FromIterator<u8> for Histogram {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut hist = Self::new();
        for v in iter {
            hist.add(v);
        }
        hist
    }
}

impl Image {
    /// Histogram of the representative channel over the full image.
    pub fn build_histogram(&self) -> Histogram {
        Histogram::from_image(self)
    }

    /// Per-level probabilities of `histogram` relative to this image's size.
    pub fn probabilities(&self, histogram: &Histogram) -> Result<BTreeMap<u8, Ratio>> {
        histogram.probabilities(self.pixel_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pixel;

    #[test]
    fn test_ratio_reduces() {
        let r = Ratio::new(20, 25).unwrap();
        assert_eq!((r.numer(), r.denom()), (4, 5));
        assert_eq!(Ratio::new(0, 7).unwrap(), Ratio::ZERO);
        assert!(Ratio::new(1, 0).is_err());
    }

    #[test]
    fn test_ratio_add() {
        let third = Ratio::new(1, 3).unwrap();
        let sum = third
            .checked_add(third)
            .and_then(|s| s.checked_add(third))
            .unwrap();
        assert_eq!(sum, Ratio::ONE);

        let half = Ratio::new(1, 2).unwrap();
        assert_eq!(half.checked_add(third).unwrap(), Ratio::new(5, 6).unwrap());
    }

    #[test]
    fn test_ratio_order() {
        let a = Ratio::new(2, 3).unwrap();
        let b = Ratio::new(3, 4).unwrap();
        assert!(a < b);
        assert_eq!(a.max(b), b);
    }

    #[test]
    fn test_round_half_even() {
        // 0.8 * 255 = 204 exactly
        assert_eq!(Ratio::new(4, 5).unwrap().scale_round_half_even(255), 204);
        // 1/2 * 255 = 127.5 -> 128 (even)
        assert_eq!(Ratio::new(1, 2).unwrap().scale_round_half_even(255), 128);
        // 1/2 * 253 = 126.5 -> 126 (even)
        assert_eq!(Ratio::new(1, 2).unwrap().scale_round_half_even(253), 126);
        // 1/3 * 255 = 85 exactly
        assert_eq!(Ratio::new(1, 3).unwrap().scale_round_half_even(255), 85);
        // 1/6 * 255 = 42.5 -> 42
        assert_eq!(Ratio::new(1, 6).unwrap().scale_round_half_even(255), 42);
        // 1/10 * 255 = 25.5 -> 26
        assert_eq!(Ratio::new(1, 10).unwrap().scale_round_half_even(255), 26);
        assert_eq!(Ratio::ONE.scale_round_half_even(255), 255);
    }

    #[test]
    fn test_histogram_observed_only() {
        let hist: Histogram = [3u8, 3, 7, 200].into_iter().collect();
        assert_eq!(hist.total(), 4);
        assert_eq!(hist.len(), 3);
        assert_eq!(hist.count(3), 2);
        assert_eq!(hist.count(4), 0);
        assert_eq!(hist.range(), Some((3, 200)));
        let map = hist.to_map();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![3, 7, 200]);
    }

    #[test]
    fn test_histogram_reads_red_channel() {
        let img = Image::filled(2, 2, Pixel::rgb(9, 100, 200)).unwrap();
        let hist = img.build_histogram();
        assert_eq!(hist.count(9), 4);
        assert_eq!(hist.count(100), 0);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let img = Image::from_gray(3, 1, &[0, 1, 2]).unwrap();
        let hist = img.build_histogram();
        let probs = img.probabilities(&hist).unwrap();
        assert_eq!(probs.len(), 3);
        let sum = probs
            .values()
            .try_fold(Ratio::ZERO, |acc, &p| acc.checked_add(p))
            .unwrap();
        assert_eq!(sum, Ratio::ONE);
        assert!((probs[&1].to_f64() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_probabilities_rejects_bad_count() {
        let hist: Histogram = [1u8, 2, 3].into_iter().collect();
        assert!(hist.probabilities(0).is_err());
        assert!(hist.probabilities(2).is_err());
        assert!(hist.probabilities(3).is_ok());
    }
}
