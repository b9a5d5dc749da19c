//! BMP format support.
//!
//! Decoding and encoding go through the `image` crate's BMP codec. Reads
//! yield RGB, or RGBA when the file carries alpha. Writes are 8-bit.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::{DynamicImage, ImageFormat};
use pano_core::Image;

use crate::convert::{image_from_u8, to_u8};
use crate::{IoError, IoResult};

/// Reads a BMP file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let data = std::fs::read(path.as_ref())?;
    read_from_memory(&data)
}

/// Decodes a BMP held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<Image> {
    let decoded = image::load_from_memory_with_format(data, ImageFormat::Bmp)
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    if decoded.color().has_alpha() {
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        image_from_u8(width, height, 4, rgba.as_raw())
    } else {
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        image_from_u8(width, height, 3, rgb.as_raw())
    }
}

/// Writes an image to a BMP file as 8-bit samples.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    encode(&mut writer, image)?;
    writer.flush()?;
    Ok(())
}

/// Encodes an image into an in-memory BMP.
pub fn write_to_memory(image: &Image) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    encode(&mut buffer, image)?;
    Ok(buffer)
}

fn encode<W: Write>(writer: &mut W, image: &Image) -> IoResult<()> {
    let dyn_img = to_dynamic(image)?;
    dyn_img
        .write_with_encoder(BmpEncoder::new(writer))
        .map_err(|e| IoError::EncodeError(e.to_string()))
}

/// Wraps 8-bit samples in the matching `DynamicImage` variant.
fn to_dynamic(image: &Image) -> IoResult<DynamicImage> {
    let (width, height) = image.dimensions();
    let data = to_u8(image);
    let wrong_len = || IoError::EncodeError("sample count does not match dimensions".into());

    match image.channels() {
        1 => image::GrayImage::from_raw(width, height, data)
            .map(DynamicImage::ImageLuma8)
            .ok_or_else(wrong_len),
        3 => image::RgbImage::from_raw(width, height, data)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(wrong_len),
        4 => image::RgbaImage::from_raw(width, height, data)
            .map(DynamicImage::ImageRgba8)
            .ok_or_else(wrong_len),
        n => Err(IoError::EncodeError(format!("unsupported channel count: {n}"))),
    }
}
