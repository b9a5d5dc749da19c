//! Format detection from magic bytes and file extensions.

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Image formats recognised by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// Windows bitmap.
    Bmp,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from file path (magic bytes, then extension).
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();

        let format = Self::from_magic_bytes(path)?;
        if format != Format::Unknown {
            return Ok(format);
        }

        Ok(Self::from_extension(path))
    }

    /// Detects format from file extension only (case-insensitive).
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("png") => Format::Png,
            Some("jpg") | Some("jpeg") => Format::Jpeg,
            Some("bmp") => Format::Bmp,
            _ => Format::Unknown,
        }
    }

    /// Detects format from the first bytes of a file.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut header = [0u8; 8];
        let mut file = File::open(path.as_ref())?;
        let n = file.read(&mut header)?;
        Ok(Self::from_header(&header[..n]))
    }

    /// Detects format from a byte slice.
    pub fn from_header(header: &[u8]) -> Self {
        if header.starts_with(&[0x89, b'P', b'N', b'G']) {
            Format::Png
        } else if header.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Format::Jpeg
        } else if header.starts_with(b"BM") {
            Format::Bmp
        } else {
            Format::Unknown
        }
    }

    /// True when this crate can decode and encode the format.
    pub fn is_supported(self) -> bool {
        match self {
            #[cfg(feature = "png")]
            Format::Png => true,
            #[cfg(feature = "jpeg")]
            Format::Jpeg => true,
            #[cfg(feature = "bmp")]
            Format::Bmp => true,
            _ => false,
        }
    }

    /// True for extensions a batch scan should pick up.
    pub fn is_image_extension<P: AsRef<Path>>(path: P) -> bool {
        Self::from_extension(path) != Format::Unknown
    }
}
