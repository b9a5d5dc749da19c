//! PNG format support.
//!
//! Reads 8-bit and 16-bit PNGs of any colour type into an `f32`
//! [`Image`]. Grayscale expands to RGB, palette images expand through the
//! decoder. Writing always produces 8-bit samples.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

use pano_core::Image;

use crate::convert::{gray_alpha_to_rgba, gray_to_rgb, image_from_u16, image_from_u8, to_u8};
use crate::{IoError, IoResult};

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Decodes a PNG held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<Image> {
    decode(Cursor::new(data))
}

fn decode<R: std::io::BufRead + std::io::Seek>(reader: R) -> IoResult<Image> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let (width, height) = (info.width, info.height);
    if width == 0 || height == 0 {
        return Err(IoError::DecodeError(format!("empty image {width}x{height}")));
    }
    let bytes = &buf[..info.buffer_size()];

    match info.bit_depth {
        png::BitDepth::Eight => {
            let (channels, data) = expand_color(info.color_type, bytes.to_vec())?;
            image_from_u8(width, height, channels, &data)
        }
        png::BitDepth::Sixteen => {
            let (channels, data) = expand_color(info.color_type, bytes_to_u16(bytes))?;
            image_from_u16(width, height, channels, &data)
        }
        depth => Err(IoError::UnsupportedBitDepth(format!("{depth:?}"))),
    }
}

/// Maps decoded samples onto RGB or RGBA.
fn expand_color<T: Copy>(color: png::ColorType, data: Vec<T>) -> IoResult<(u32, Vec<T>)> {
    match color {
        png::ColorType::Rgb => Ok((3, data)),
        png::ColorType::Rgba => Ok((4, data)),
        png::ColorType::Grayscale => Ok((3, gray_to_rgb(&data))),
        png::ColorType::GrayscaleAlpha => Ok((4, gray_alpha_to_rgba(&data))),
        png::ColorType::Indexed => Err(IoError::UnsupportedBitDepth(
            "indexed colour was not expanded".into(),
        )),
    }
}

/// Writes an image to a PNG file as 8-bit samples.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    encode(&mut writer, image)?;
    writer.flush()?;
    Ok(())
}

/// Encodes an image into an in-memory PNG.
pub fn write_to_memory(image: &Image) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    encode(&mut buffer, image)?;
    Ok(buffer)
}

fn encode<W: Write>(writer: W, image: &Image) -> IoResult<()> {
    let color_type = match image.channels() {
        1 => png::ColorType::Grayscale,
        2 => png::ColorType::GrayscaleAlpha,
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {n}"))),
    };

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(&to_u8(image))
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

/// Converts big-endian byte slice to u16 vector.
fn bytes_to_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32, channels: u32) -> Image {
        let mut img = Image::new(width, height, channels);
        for y in 0..height {
            for x in 0..width {
                for (c, v) in img.pixel_mut(x, y).iter_mut().enumerate() {
                    *v = ((x * 8 + y * 3 + c as u32 * 40) % 256) as f32 / 255.0;
                }
            }
        }
        img
    }

    #[test]
    fn test_rgb_is_lossless_at_8_bits() {
        let img = gradient(32, 16, 3);
        let bytes = write_to_memory(&img).unwrap();
        let loaded = read_from_memory(&bytes).unwrap();
        assert_eq!(loaded, img);
    }

    #[test]
    fn test_gray_expands_to_rgb() {
        let img = Image::from_data(2, 1, 1, vec![0.0, 1.0]).unwrap();
        let loaded = read_from_memory(&write_to_memory(&img).unwrap()).unwrap();
        assert_eq!(loaded.channels(), 3);
        assert_eq!(loaded.data(), &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_sixteen_bit_decode() {
        let mut buffer = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buffer, 2, 1);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Sixteen);
            let mut w = encoder.write_header().unwrap();
            w.write_image_data(&[0x00, 0x00, 0xFF, 0xFF]).unwrap();
        }
        let loaded = read_from_memory(&buffer).unwrap();
        assert_eq!(loaded.dimensions(), (2, 1));
        assert_eq!(loaded.pixel(1, 0), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_unsupported_channels() {
        let img = Image::new(2, 2, 5);
        assert!(matches!(write_to_memory(&img), Err(IoError::EncodeError(_))));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        assert!(matches!(
            read_from_memory(b"not a png"),
            Err(IoError::DecodeError(_))
        ));
    }
}
