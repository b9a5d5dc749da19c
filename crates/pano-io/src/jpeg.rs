//! JPEG format support.
//!
//! Decodes RGB, grayscale (8 and 16 bit) and CMYK JPEGs to RGB. Encoding
//! drops alpha and takes a quality setting.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use pano_core::Image;

use crate::convert::{gray_to_rgb, image_from_u16, image_from_u8, to_u8};
use crate::{IoError, IoResult};

/// Options for writing JPEG files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegWriterOptions {
    /// Quality level 1-100. Higher = better quality, larger files.
    pub quality: u8,
}

impl Default for JpegWriterOptions {
    fn default() -> Self {
        Self {
            quality: crate::DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Reads a JPEG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let file = File::open(path.as_ref())?;
    decode(file)
}

/// Decodes a JPEG held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<Image> {
    decode(data)
}

fn decode<R: Read>(reader: R) -> IoResult<Image> {
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(reader));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    if width == 0 || height == 0 {
        return Err(IoError::DecodeError(format!("empty image {width}x{height}")));
    }

    match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => image_from_u8(width, height, 3, &pixels),
        jpeg_decoder::PixelFormat::L8 => image_from_u8(width, height, 3, &gray_to_rgb(&pixels)),
        jpeg_decoder::PixelFormat::L16 => {
            let gray: Vec<u16> = pixels
                .chunks_exact(2)
                .map(|l16| u16::from_be_bytes([l16[0], l16[1]]))
                .collect();
            image_from_u16(width, height, 3, &gray_to_rgb(&gray))
        }
        jpeg_decoder::PixelFormat::CMYK32 => {
            let rgb = cmyk_to_rgb(&pixels);
            Ok(Image::from_data(width, height, 3, rgb)?)
        }
    }
}

/// Naive CMYK to RGB, no colour management.
fn cmyk_to_rgb(pixels: &[u8]) -> Vec<f32> {
    pixels
        .chunks_exact(4)
        .flat_map(|cmyk| {
            let [c, m, y, k] = [cmyk[0], cmyk[1], cmyk[2], cmyk[3]].map(|v| v as f32 / 255.0);
            [(1.0 - c) * (1.0 - k), (1.0 - m) * (1.0 - k), (1.0 - y) * (1.0 - k)]
        })
        .collect()
}

/// Writes an image to a JPEG file with default options.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    write_with_options(path, image, &JpegWriterOptions::default())
}

/// Writes an image to a JPEG file.
pub fn write_with_options<P: AsRef<Path>>(
    path: P,
    image: &Image,
    options: &JpegWriterOptions,
) -> IoResult<()> {
    let buffer = write_to_memory(image, options)?;
    std::fs::write(path.as_ref(), buffer)?;
    Ok(())
}

/// Encodes an image into an in-memory JPEG.
pub fn write_to_memory(image: &Image, options: &JpegWriterOptions) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType, Encoder};

    let (width, height) = image.dimensions();
    let (w16, h16) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(IoError::EncodeError(format!(
                "{width}x{height} exceeds the JPEG limit of 65535"
            )));
        }
    };

    let u8_data = to_u8(image);
    let (color_type, pixel_data) = match image.channels() {
        1 => (ColorType::Luma, u8_data),
        3 => (ColorType::Rgb, u8_data),
        // Strip alpha
        4 => (
            ColorType::Rgb,
            u8_data
                .chunks_exact(4)
                .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
                .collect(),
        ),
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {n}"))),
    };

    let quality = options.quality.clamp(1, 100);
    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, quality);
    encoder
        .encode(&pixel_data, w16, h16, color_type)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(width: u32, height: u32, channels: u32, value: f32) -> Image {
        Image::from_data(width, height, channels, vec![value; (width * height * channels) as usize])
            .unwrap()
    }

    #[test]
    fn test_flat_colour_survives() {
        let img = flat(16, 16, 3, 0.5);
        let bytes = write_to_memory(&img, &JpegWriterOptions::default()).unwrap();
        let loaded = read_from_memory(&bytes).unwrap();
        assert_eq!(loaded.dimensions(), (16, 16));
        assert_eq!(loaded.channels(), 3);
        for &v in loaded.data() {
            assert!((v - 0.5).abs() < 0.03, "sample {v}");
        }
    }

    #[test]
    fn test_alpha_is_stripped() {
        let img = flat(8, 8, 4, 1.0);
        let bytes = write_to_memory(&img, &JpegWriterOptions::default()).unwrap();
        assert_eq!(read_from_memory(&bytes).unwrap().channels(), 3);
    }

    #[test]
    fn test_quality_changes_size() {
        let mut img = Image::new(64, 64, 3);
        for (i, v) in img.data_mut().iter_mut().enumerate() {
            *v = ((i * 37) % 255) as f32 / 255.0;
        }
        let low = write_to_memory(&img, &JpegWriterOptions { quality: 10 }).unwrap();
        let high = write_to_memory(&img, &JpegWriterOptions { quality: 100 }).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_cmyk_conversion() {
        let rgb = cmyk_to_rgb(&[0, 255, 255, 0, 0, 0, 0, 255]);
        assert_eq!(rgb, vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_oversized_rejected() {
        let img = Image::new(70_000, 1, 1);
        assert!(matches!(
            write_to_memory(&img, &JpegWriterOptions::default()),
            Err(IoError::EncodeError(_))
        ));
    }
}
