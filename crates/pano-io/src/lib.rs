//! # pano-io
//!
//! Image file I/O for panorama reprojection.
//!
//! Files are decoded into [`pano_core::Image`] with `f32` samples in
//! `[0, 1]`, and encoded back to 8-bit PNG or JPEG with rounding
//! quantisation.
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | 8/16-bit, gray/RGB/RGBA/palette | 8-bit | `png` |
//! | JPEG   | RGB, gray, CMYK | RGB/gray, quality | `jpeg` |
//! | BMP    | 8-bit RGB/RGBA, palette | 8-bit | `bmp` |
//!
//! # Example
//!
//! ```rust,ignore
//! use pano_io::{read, write};
//!
//! let image = read("pano.jpg")?;
//! write("copy.png", &image)?;
//! ```

pub mod convert;
pub mod detect;
mod error;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

#[cfg(feature = "bmp")]
pub mod bmp;

pub use detect::Format;
pub use error::{IoError, IoResult};

use std::path::Path;

use pano_core::Image;
use tracing::{debug, trace};

/// Default JPEG quality used by [`write`].
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Reads an image file, detecting format from magic bytes then extension.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    trace!(path = %path.display(), ?format, "read");

    let image = match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path)?,
        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path)?,
        #[cfg(feature = "bmp")]
        Format::Bmp => bmp::read(path)?,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot decode {:?} ({})",
                other,
                path.display()
            )));
        }
    };

    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        channels = image.channels(),
        "decoded"
    );
    Ok(image)
}

/// Writes an image; format comes from the extension.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    write_with_quality(path, image, DEFAULT_JPEG_QUALITY)
}

/// Writes an image with an explicit JPEG quality (1-100, ignored for PNG).
pub fn write_with_quality<P: AsRef<Path>>(path: P, image: &Image, quality: u8) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    trace!(path = %path.display(), ?format, quality, "write");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),
        #[cfg(feature = "jpeg")]
        Format::Jpeg => {
            jpeg::write_with_options(path, image, &jpeg::JpegWriterOptions { quality })
        }
        #[cfg(feature = "bmp")]
        Format::Bmp => bmp::write(path, image),
        other => Err(IoError::UnsupportedFormat(format!(
            "cannot encode {:?} ({})",
            other,
            path.display()
        ))),
    }
}
