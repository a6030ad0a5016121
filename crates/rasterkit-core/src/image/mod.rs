//! Image - the owned RGB pixel buffer
//!
//! `Image` owns a `width x height` grid of [`Pixel`]s stored row by row.
//! Every filter mutates an image in place; there is no undo. Callers that
//! need the previous state take a `clone()` before running an operation.
//!
//! # Representative channel
//!
//! Filters that do not keep colour read the red channel (see
//! [`Pixel::value`]) and write their result into all three channels.

mod access;
mod convert;
mod logical;

pub use convert::gray_value;
pub use logical::{DimensionPolicy, LogicalOp};

use crate::error::{Error, Result};
use crate::scan::{Region, Scan, ScanOrder};
use std::path::{Path, PathBuf};

/// An `(r, g, b)` triple of 8-bit intensities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    /// Black.
    pub const BLACK: Pixel = Pixel::gray(0);
    /// White.
    pub const WHITE: Pixel = Pixel::gray(255);

    /// Build a pixel from its three channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a pixel with the same value in every channel.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// The representative (red) channel.
    #[inline]
    pub const fn value(self) -> u8 {
        self.r
    }

    /// Whether all three channels hold the same value.
    #[inline]
    pub fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// Channels as a tuple.
    #[inline]
    pub fn channels(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Pixel {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<Pixel> for (u8, u8, u8) {
    fn from(p: Pixel) -> Self {
        p.channels()
    }
}

/// Owned RGB image.
///
/// # Examples
///
/// ```
/// use rasterkit_core::{Image, Pixel};
///
/// let mut img = Image::new(4, 3).unwrap();
/// img.set(1, 2, Pixel::gray(200)).unwrap();
/// assert_eq!(img.get(1, 2).unwrap(), Pixel::gray(200));
/// assert!(img.get(4, 0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<Pixel>,
    source: Option<PathBuf>,
}

impl Image {
    /// Create a black `width x height` image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Pixel::BLACK)
    }

    /// Create an image with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            data: vec![pixel; len],
            source: None,
        })
    }

    /// Wrap a row-major pixel vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero extent and
    /// [`Error::BufferLength`] when `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if pixels.len() != width as usize * height as usize {
            return Err(Error::BufferLength {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data: pixels,
            source: None,
        })
    }

    /// Build a grayscale-equivalent image from row-major intensities.
    pub fn from_gray(width: u32, height: u32, values: &[u8]) -> Result<Self> {
        let pixels = values.iter().map(|&v| Pixel::gray(v)).collect();
        Self::from_pixels(width, height, pixels)
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels, exact.
    ///
    /// This is the denominator of every histogram probability.
    #[inline]
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// The full-frame region.
    #[inline]
    pub fn region(&self) -> Region {
        Region::full(self.width, self.height)
    }

    /// Raw pixels in row-major storage order (`y * width + x`).
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.data
    }

    /// Mutable raw pixels.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.data
    }

    /// Representative channel of every pixel, in storage order.
    pub fn values(&self) -> Vec<u8> {
        self.data.iter().map(|p| p.value()).collect()
    }

    /// The file this image was decoded from, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Remember the file this image was decoded from.
    pub fn set_source_path(&mut self, path: Option<PathBuf>) {
        self.source = path;
    }

    /// Check whether two images have the same width and height.
    pub fn sizes_equal(&self, other: &Image) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Coordinates of `region` (full image when `None`), outer `x`, inner `y`.
    pub fn scan_row_major(&self, region: Option<Region>) -> Scan {
        region.unwrap_or_else(|| self.region()).scan(ScanOrder::RowMajor)
    }

    /// Coordinates of `region` (full image when `None`), outer `y`, inner `x`.
    pub fn scan_col_major(&self, region: Option<Region>) -> Scan {
        region
            .unwrap_or_else(|| self.region())
            .scan(ScanOrder::ColumnMajor)
    }

    /// Set every channel of every pixel to `v`.
    pub fn fill_gray(&mut self, v: u8) {
        self.data.fill(Pixel::gray(v));
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Images compare equal when their extents and pixels match; the
/// remembered source path is ignored.
impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.data == other.data
    }
}

impl Eq for Image {}
