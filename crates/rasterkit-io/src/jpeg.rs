//! JPEG image format support
//!
//! Decoding uses `jpeg-decoder` and converts every pixel format it reports
//! to RGB. Encoding uses `jpeg-encoder` and always writes RGB.

use crate::{IoError, IoResult};
use jpeg_decoder::PixelFormat;
use jpeg_encoder::{ColorType, Encoder};
use rasterkit_core::{Image, Pixel};
use std::io::{BufReader, Read, Write};
use tracing::trace;

/// Quality used by [`write_jpeg`].
pub const DEFAULT_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Image> {
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(reader));
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    trace!(width, height, pixel_format = ?info.pixel_format, "jpeg header");

    let pixels: Vec<Pixel> = match info.pixel_format {
        PixelFormat::L8 => data.iter().map(|&g| Pixel::gray(g)).collect(),
        // Big-endian samples; keep the high byte.
        PixelFormat::L16 => data.chunks_exact(2).map(|l| Pixel::gray(l[0])).collect(),
        PixelFormat::RGB24 => data
            .chunks_exact(3)
            .map(|c| Pixel::rgb(c[0], c[1], c[2]))
            .collect(),
        PixelFormat::CMYK32 => data.chunks_exact(4).map(cmyk_to_rgb).collect(),
    };

    Ok(Image::from_pixels(width, height, pixels)?)
}

fn cmyk_to_rgb(cmyk: &[u8]) -> Pixel {
    let k = 255 - cmyk[3] as u32;
    let channel = |c: u8| ((255 - c as u32) * k / 255) as u8;
    Pixel::rgb(channel(cmyk[0]), channel(cmyk[1]), channel(cmyk[2]))
}

/// Write a JPEG image with the given quality (1-100).
pub fn write_jpeg_with_quality<W: Write>(image: &Image, writer: W, quality: u8) -> IoResult<()> {
    let width = u16::try_from(image.width()).map_err(|_| {
        IoError::EncodeError(format!("JPEG width {} exceeds 65535", image.width()))
    })?;
    let height = u16::try_from(image.height()).map_err(|_| {
        IoError::EncodeError(format!("JPEG height {} exceeds 65535", image.height()))
    })?;

    let data: Vec<u8> = image
        .pixels()
        .iter()
        .flat_map(|p| [p.r, p.g, p.b])
        .collect();

    let encoder = Encoder::new(writer, quality.clamp(1, 100));
    encoder
        .encode(&data, width, height, ColorType::Rgb)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;

    Ok(())
}

/// Write a JPEG image at [`DEFAULT_QUALITY`].
pub fn write_jpeg<W: Write>(image: &Image, writer: W) -> IoResult<()> {
    write_jpeg_with_quality(image, writer, DEFAULT_QUALITY)
}
