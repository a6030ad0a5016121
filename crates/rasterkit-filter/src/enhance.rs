//! Histogram equalization and tone reproduction curve (TRC) mapping
//!
//! Equalization walks the observed levels in ascending order, accumulating
//! their exact probabilities, and maps each level to the cumulative value
//! scaled to `[0, 255]` with round-half-to-even. The resulting table is
//! applied with [`trc_map`].

use crate::{FilterError, FilterResult};
use rasterkit_core::histogram::LEVEL_SCALE;
use rasterkit_core::{Image, Ratio};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// A 256-entry lookup table mapping input levels to output levels.
pub type TrcLut = [u8; 256];

/// The table that leaves every level unchanged.
pub fn identity_trc() -> TrcLut {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = i as u8;
    }
    lut
}

/// Build the equalization table from per-level probabilities.
///
/// Level `v` maps to `round_half_even(C(v) * 255)` where `C(v)` is the sum
/// of the probabilities of all observed levels `<= v`. Unobserved levels
/// carry the running value, so the table is monotone non-decreasing.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if the cumulative sum
/// exceeds 1 or cannot be represented exactly.
pub fn equalize_mapping(probabilities: &BTreeMap<u8, Ratio>) -> FilterResult<TrcLut> {
    let mut lut = [0u8; 256];
    let mut cumulative = Ratio::ZERO;
    let mut current = 0u8;
    let mut observed = probabilities.iter().peekable();

    for (level, entry) in lut.iter_mut().enumerate() {
        if let Some((_, &p)) = observed.next_if(|&(&v, _)| v as usize == level) {
            cumulative = cumulative.checked_add(p).ok_or_else(|| {
                FilterError::InvalidParameters("cumulative probability overflow".into())
            })?;
            if cumulative > Ratio::ONE {
                return Err(FilterError::InvalidParameters(format!(
                    "cumulative probability {cumulative} exceeds 1"
                )));
            }
            current = cumulative.scale_round_half_even(LEVEL_SCALE) as u8;
            trace!(level, %cumulative, mapped = current, "equalize level");
        }
        *entry = current;
    }

    Ok(lut)
}

/// Equalization table for the current contents of `image`.
pub fn equalize_trc(image: &Image) -> FilterResult<TrcLut> {
    let histogram = image.build_histogram();
    let probabilities = image.probabilities(&histogram)?;
    equalize_mapping(&probabilities)
}

/// Rewrite every pixel to `lut[r]` in all three channels.
pub fn trc_map(image: &mut Image, lut: &TrcLut) {
    for p in image.pixels_mut() {
        let v = lut[p.value() as usize];
        p.r = v;
        p.g = v;
        p.b = v;
    }
}

/// Histogram-equalize `image` in place.
pub fn equalize(image: &mut Image) -> FilterResult<()> {
    debug!(
        width = image.width(),
        height = image.height(),
        "equalize"
    );
    let lut = equalize_trc(image)?;
    trc_map(image, &lut);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterkit_core::Pixel;

    fn probs(pairs: &[(u8, u64, u64)]) -> BTreeMap<u8, Ratio> {
        pairs
            .iter()
            .map(|&(v, n, d)| (v, Ratio::new(n, d).unwrap()))
            .collect()
    }

    #[test]
    fn test_identity_trc() {
        let lut = identity_trc();
        assert_eq!(lut[0], 0);
        assert_eq!(lut[200], 200);
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn test_mapping_two_levels() {
        let lut = equalize_mapping(&probs(&[(0, 4, 5), (255, 1, 5)])).unwrap();
        assert_eq!(lut[0], 204);
        assert_eq!(lut[100], 204);
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn test_mapping_ties_round_to_even() {
        // C = 1/2 -> 127.5 -> 128; C = 1 -> 255.
        let lut = equalize_mapping(&probs(&[(10, 1, 2), (20, 1, 2)])).unwrap();
        assert_eq!(lut[9], 0);
        assert_eq!(lut[10], 128);
        assert_eq!(lut[20], 255);

        // C = 1/6 -> 42.5 -> 42.
        let lut = equalize_mapping(&probs(&[(3, 1, 6), (4, 5, 6)])).unwrap();
        assert_eq!(lut[3], 42);
    }

    #[test]
    fn test_mapping_rejects_excess_probability() {
        assert!(equalize_mapping(&probs(&[(0, 2, 3), (1, 2, 3)])).is_err());
    }

    #[test]
    fn test_mapping_monotone() {
        let lut =
            equalize_mapping(&probs(&[(5, 1, 7), (50, 2, 7), (51, 1, 7), (250, 3, 7)])).unwrap();
        assert!(lut.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn test_equalize_image() {
        let mut values = vec![0u8; 20];
        values.extend([255u8; 5]);
        let mut img = Image::from_gray(5, 5, &values).unwrap();
        equalize(&mut img).unwrap();
        assert_eq!(img.get(0, 0).unwrap(), Pixel::gray(204));
        assert_eq!(img.get(4, 4).unwrap(), Pixel::gray(255));
    }

    #[test]
    fn test_trc_map_uses_red_channel() {
        let mut img = Image::filled(2, 1, Pixel::rgb(10, 200, 30)).unwrap();
        let mut lut = identity_trc();
        lut[10] = 99;
        trc_map(&mut img, &lut);
        assert_eq!(img.get(1, 0).unwrap(), Pixel::gray(99));
    }
}
