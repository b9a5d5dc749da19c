//! Sample conversion between codec integers and `f32`.

use pano_core::Image;

use crate::IoResult;

/// Builds an image from 8-bit samples, mapping `0..=255` to `[0, 1]`.
pub fn image_from_u8(width: u32, height: u32, channels: u32, data: &[u8]) -> IoResult<Image> {
    let samples = data.iter().map(|&v| v as f32 / 255.0).collect();
    Ok(Image::from_data(width, height, channels, samples)?)
}

/// Builds an image from 16-bit samples, mapping `0..=65535` to `[0, 1]`.
pub fn image_from_u16(width: u32, height: u32, channels: u32, data: &[u16]) -> IoResult<Image> {
    let samples = data.iter().map(|&v| v as f32 / 65535.0).collect();
    Ok(Image::from_data(width, height, channels, samples)?)
}

/// Quantises samples to 8 bits with rounding; out-of-range values clamp.
pub fn to_u8(image: &Image) -> Vec<u8> {
    image
        .data()
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect()
}

/// Expands one-channel samples to three (gray to RGB).
pub(crate) fn gray_to_rgb<T: Copy>(data: &[T]) -> Vec<T> {
    data.iter().flat_map(|&g| [g, g, g]).collect()
}

/// Expands gray+alpha samples to RGBA.
pub(crate) fn gray_alpha_to_rgba<T: Copy>(data: &[T]) -> Vec<T> {
    data.chunks_exact(2)
        .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_roundtrip_exact() {
        let bytes: Vec<u8> = (0..=255).collect();
        let img = image_from_u8(256, 1, 1, &bytes).unwrap();
        assert_eq!(to_u8(&img), bytes);
    }

    #[test]
    fn test_to_u8_clamps() {
        let img = Image::from_data(3, 1, 1, vec![-0.5, 0.5, 2.0]).unwrap();
        assert_eq!(to_u8(&img), vec![0, 128, 255]);
    }

    #[test]
    fn test_u16_scale() {
        let img = image_from_u16(2, 1, 1, &[0, 65535]).unwrap();
        assert_eq!(img.data(), &[0.0, 1.0]);
    }

    #[test]
    fn test_gray_expansion() {
        assert_eq!(gray_to_rgb(&[1u8, 2]), vec![1, 1, 1, 2, 2, 2]);
        assert_eq!(gray_alpha_to_rgba(&[7u8, 9]), vec![7, 7, 7, 9]);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert!(image_from_u8(2, 2, 3, &[0; 5]).is_err());
    }
}
