//! rasterkit-test - Regression test framework for rasterkit
//!
//! Supports three modes, selected with the `REGTEST_MODE` environment
//! variable:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files (default)
//! - **Display**: Run tests without comparison
//!
//! # Usage
//!
//! ```ignore
//! use rasterkit_test::{RegParams, impulse_image};
//!
//! let mut rp = RegParams::new("rank");
//! let mut img = impulse_image(5, 5, 2, 2, 255)?;
//! rasterkit_filter::median_filter(&mut img);
//! rp.compare_values(0.0, img.get(2, 2)?.value() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! The crate also provides small synthetic images so that tests do not
//! depend on external data files.

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use rasterkit_core::{Image, Pixel};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // rasterkit-test is at crates/rasterkit-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Path for a scratch file in the regout directory
pub fn regout_path(name: &str) -> String {
    let _ = std::fs::create_dir_all(regout_dir());
    format!("{}/{}", regout_dir(), name)
}

/// Grayscale image from row-major values
pub fn gray_image(width: u32, height: u32, values: &[u8]) -> TestResult<Image> {
    Ok(Image::from_gray(width, height, values)?)
}

/// Image with every pixel set to gray level `v`
pub fn constant_image(width: u32, height: u32, v: u8) -> TestResult<Image> {
    Ok(Image::filled(width, height, Pixel::gray(v))?)
}

/// Black image with a single pixel of level `v` at `(x, y)`
pub fn impulse_image(width: u32, height: u32, x: u32, y: u32, v: u8) -> TestResult<Image> {
    let mut img = Image::new(width, height)?;
    img.set(x, y, Pixel::gray(v))?;
    Ok(img)
}

/// Deterministic pseudo-random gray image
///
/// Uses a linear congruential sequence so that every run and every
/// platform sees the same pixels.
pub fn noise_image(width: u32, height: u32, seed: u32) -> TestResult<Image> {
    let mut state = seed;
    let values: Vec<u8> = (0..width as usize * height as usize)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) as u8
        })
        .collect();
    gray_image(width, height, &values)
}

/// Horizontal ramp: level `x * 255 / (width - 1)` in every row
pub fn ramp_image(width: u32, height: u32) -> TestResult<Image> {
    let span = width.saturating_sub(1).max(1);
    let mut values = Vec::with_capacity(width as usize * height as usize);
    for _ in 0..height {
        values.extend((0..width).map(|x| (x * 255 / span) as u8));
    }
    gray_image(width, height, &values)
}

/// RGB image whose channels vary independently with position
pub fn color_image(width: u32, height: u32) -> TestResult<Image> {
    let mut img = Image::new(width, height)?;
    for (x, y) in img.scan_row_major(None) {
        let p = Pixel::rgb(
            (x * 37 % 256) as u8,
            (y * 53 % 256) as u8,
            ((x + y) * 11 % 256) as u8,
        );
        img.set_unchecked(x, y, p);
    }
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let img = impulse_image(5, 5, 2, 2, 255).unwrap();
        assert_eq!(img.get(2, 2).unwrap(), Pixel::gray(255));
        assert_eq!(img.build_histogram().count(0), 24);

        let ramp = ramp_image(6, 2).unwrap();
        assert_eq!(ramp.get(0, 1).unwrap().value(), 0);
        assert_eq!(ramp.get(5, 1).unwrap().value(), 255);

        assert_eq!(noise_image(4, 4, 7).unwrap(), noise_image(4, 4, 7).unwrap());
        assert!(!color_image(4, 4).unwrap().is_grayscale());
        assert!(impulse_image(2, 2, 5, 5, 1).is_err());
    }
}
