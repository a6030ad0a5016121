//! rasterkit-io - Image file I/O
//!
//! Reads and writes PNG, JPEG and binary PNM. Every decoded image is
//! converted to 8-bit RGB; alpha and higher bit depths are dropped.
//!
//! Each codec sits behind a Cargo feature (`png-format`, `jpeg`, `pnm`), all
//! enabled by default. Requesting a disabled format returns
//! [`IoError::UnsupportedFormat`].

mod error;
pub mod format;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use rasterkit_core::Image;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;
use tracing::debug;

/// Read an image from a file.
///
/// The format is detected from the file header, falling back to the
/// extension. The returned image remembers `path` as its source.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    debug!(path = %path.display(), ?format, "read image");

    let file = File::open(path)?;
    let mut image = read_image_format(BufReader::new(file), format)?;
    image.set_source_path(Some(path.to_path_buf()));
    Ok(image)
}

/// Decode an image held in memory.
pub fn read_image_mem(data: &[u8]) -> IoResult<Image> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

fn read_image_format<R>(reader: R, format: ImageFormat) -> IoResult<Image>
where
    R: std::io::BufRead + std::io::Seek,
{
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        #[allow(unreachable_patterns)]
        other => {
            let _ = reader;
            Err(disabled(other))
        }
    }
}

/// Write an image to a file in the given format.
pub fn write_image<P: AsRef<Path>>(image: &Image, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    debug!(
        path = %path.display(),
        ?format,
        width = image.width(),
        height = image.height(),
        "write image"
    );
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_format(image, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Write an image to a file, choosing the format from its extension.
pub fn write_image_auto<P: AsRef<Path>>(image: &Image, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).ok_or_else(|| {
        IoError::UnsupportedFormat(format!("no format for extension of {}", path.display()))
    })?;
    write_image(image, path, format)
}

/// Encode an image into memory.
pub fn write_image_mem(image: &Image, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(image, &mut buffer, format)?;
    Ok(buffer)
}

fn write_image_format<W: Write>(image: &Image, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(image, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(image, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(image, writer),
        #[allow(unreachable_patterns)]
        other => {
            let _ = writer;
            Err(disabled(other))
        }
    }
}

#[allow(dead_code)]
fn disabled(format: ImageFormat) -> IoError {
    IoError::UnsupportedFormat(format!(
        "{} support is not enabled",
        format.extension()
    ))
}
