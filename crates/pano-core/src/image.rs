//! Interleaved image buffer.
//!
//! # Memory Layout
//!
//! Pixels are stored **row-major**, top-to-bottom, channels interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! Samples are `f32`, nominally in `[0, 1]`. Codecs in `pano-io` quantise
//! on the way in and out.
//!
//! An image may be empty (zero width or height); such a buffer is a valid
//! value but not a valid panorama, see [`crate::Equirect`].

use crate::{Error, Result};

/// Owned interleaved `f32` image.
///
/// # Example
///
/// ```rust
/// use pano_core::Image;
///
/// let mut img = Image::new(4, 2, 3);
/// img.pixel_mut(1, 0).copy_from_slice(&[1.0, 0.5, 0.25]);
/// assert_eq!(img.pixel(1, 0), &[1.0, 0.5, 0.25]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    channels: u32,
    data: Vec<f32>,
}

impl Image {
    /// Creates a zero-filled image.
    ///
    /// # Panics
    ///
    /// Panics if `channels` is zero.
    pub fn new(width: u32, height: u32, channels: u32) -> Self {
        assert!(channels > 0, "image needs at least one channel");
        let len = width as usize * height as usize * channels as usize;
        Self {
            width,
            height,
            channels,
            data: vec![0.0; len],
        }
    }

    /// Wraps existing samples.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if `channels` is zero or the sample
    ///   count overflows `usize`
    /// - [`Error::BufferSize`] if `data.len() != width * height * channels`
    pub fn from_data(width: u32, height: u32, channels: u32, data: Vec<f32>) -> Result<Self> {
        if channels == 0 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                channels,
                "channel count must be > 0",
            ));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(channels as usize))
            .ok_or_else(|| {
                Error::invalid_dimensions(width, height, channels, "sample count overflows")
            })?;
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
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

    /// Samples per pixel.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Larger of width and height.
    #[inline]
    pub fn max_dimension(&self) -> u32 {
        self.width.max(self.height)
    }

    /// True when the image holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable raw interleaved samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the image, returning its samples.
    #[inline]
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Samples of the pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[f32] {
        let idx = self.index(x, y);
        &self.data[idx..idx + self.channels as usize]
    }

    /// Mutable samples of the pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [f32] {
        let idx = self.index(x, y);
        let ch = self.channels as usize;
        &mut self.data[idx..idx + ch]
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for image {}x{}",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * self.channels as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let img = Image::new(3, 2, 4);
        assert_eq!(img.data().len(), 3 * 2 * 4);
        assert!(img.data().iter().all(|&v| v == 0.0));
        assert_eq!(img.max_dimension(), 3);
    }

    #[test]
    fn test_from_data_length_mismatch() {
        let err = Image::from_data(2, 2, 3, vec![0.0; 11]).unwrap_err();
        assert!(matches!(err, Error::BufferSize { expected: 12, got: 11 }));
    }

    #[test]
    fn test_from_data_zero_channels() {
        assert!(matches!(
            Image::from_data(2, 2, 0, Vec::new()),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_empty_image_allowed() {
        let img = Image::from_data(0, 10, 3, Vec::new()).unwrap();
        assert!(img.is_empty());
    }

    #[test]
    fn test_pixel_layout_row_major() {
        let data: Vec<f32> = (0..12).map(|v| v as f32).collect();
        let img = Image::from_data(2, 2, 3, data).unwrap();
        assert_eq!(img.pixel(0, 0), &[0.0, 1.0, 2.0]);
        assert_eq!(img.pixel(1, 0), &[3.0, 4.0, 5.0]);
        assert_eq!(img.pixel(0, 1), &[6.0, 7.0, 8.0]);
    }

    #[test]
    #[should_panic]
    fn test_pixel_out_of_bounds_panics() {
        let img = Image::new(2, 2, 1);
        let _ = img.pixel(2, 0);
    }
}
