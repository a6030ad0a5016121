//! PNM (Portable Any Map) format support
//!
//! Reads and writes binary PGM (P5) and PPM (P6). Samples with a maxval
//! other than 255 are rescaled to 8 bits, including big-endian 16-bit
//! samples; samples above maxval saturate at 255. ASCII variants (P2/P3) and bitmaps (P1/P4) are not supported.

use crate::{IoError, IoResult};
use rasterkit_core::{Image, Pixel};
use std::io::{Read, Write};
use tracing::trace;

/// Header fields of a binary PNM file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PnmHeader {
    channels: usize,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Cursor over the header bytes, skipping whitespace and `#` comments.
struct HeaderParser<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderParser<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn skip_separators(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn token(&mut self) -> IoResult<&'a [u8]> {
        self.skip_separators();
        let start = self.pos;
        while self
            .data
            .get(self.pos)
            .is_some_and(|b| !b.is_ascii_whitespace() && *b != b'#')
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(IoError::InvalidData("truncated PNM header".to_string()));
        }
        Ok(&self.data[start..self.pos])
    }

    fn number(&mut self, what: &str) -> IoResult<u32> {
        let tok = self.token()?;
        std::str::from_utf8(tok)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidData(format!("invalid PNM {}", what)))
    }

    fn header(&mut self) -> IoResult<PnmHeader> {
        let channels = match self.token()? {
            b"P5" => 1,
            b"P6" => 3,
            other => {
                return Err(IoError::UnsupportedFormat(format!(
                    "PNM variant {}",
                    String::from_utf8_lossy(other)
                )));
            }
        };
        let width = self.number("width")?;
        let height = self.number("height")?;
        let maxval = self.number("maxval")?;
        if maxval == 0 || maxval > 65535 {
            return Err(IoError::InvalidData(format!("PNM maxval {} out of range", maxval)));
        }
        // Exactly one whitespace byte separates the header from the raster.
        match self.data.get(self.pos) {
            Some(b) if b.is_ascii_whitespace() => self.pos += 1,
            _ => return Err(IoError::InvalidData("truncated PNM header".to_string())),
        }
        Ok(PnmHeader {
            channels,
            width,
            height,
            maxval,
        })
    }
}

/// Read a binary PNM image (P5/P6) from a reader.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Image> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let mut parser = HeaderParser::new(&data);
    let header = parser.header()?;
    trace!(?header, "pnm header");

    let bytes_per_sample = if header.maxval > 255 { 2 } else { 1 };
    let stride = header.channels * bytes_per_sample;
    let count = (header.width as usize)
        .checked_mul(header.height as usize)
        .ok_or_else(|| IoError::InvalidData("PNM dimensions overflow".to_string()))?;
    let raster_len = count
        .checked_mul(stride)
        .ok_or_else(|| IoError::InvalidData("PNM dimensions overflow".to_string()))?;
    let raster = &data[parser.pos..];
    if raster.len() < raster_len {
        return Err(IoError::InvalidData(format!(
            "PNM raster has {} bytes, expected {}",
            raster.len(),
            raster_len
        )));
    }

    let scale = |s: &[u8]| -> u8 {
        if bytes_per_sample == 2 {
            let v = u16::from_be_bytes([s[0], s[1]]) as u32;
            (v * 255 / header.maxval).min(255) as u8
        } else {
            (s[0] as u32 * 255 / header.maxval).min(255) as u8
        }
    };

    let pixels = raster[..raster_len]
        .chunks_exact(stride)
        .map(|px| {
            if header.channels == 1 {
                Pixel::gray(scale(px))
            } else {
                let b = bytes_per_sample;
                Pixel::rgb(scale(px), scale(&px[b..]), scale(&px[2 * b..]))
            }
        })
        .collect();

    Ok(Image::from_pixels(header.width, header.height, pixels)?)
}

/// Write an image as binary PNM.
///
/// Grayscale-equivalent images are written as P5, all others as P6.
pub fn write_pnm<W: Write>(image: &Image, mut writer: W) -> IoResult<()> {
    let gray = image.is_grayscale();
    let magic = if gray { "P5" } else { "P6" };
    write!(writer, "{}\n{} {}\n255\n", magic, image.width(), image.height())?;

    let data: Vec<u8> = if gray {
        image.values()
    } else {
        image
            .pixels()
            .iter()
            .flat_map(|p| [p.r, p.g, p.b])
            .collect()
    };
    writer.write_all(&data)?;
    writer.flush()?;
    Ok(())
}
