//! Equirectangular panorama view.
//!
//! A pixel at `(row, col)` of a `width x height` panorama represents the
//! direction with
//!
//! ```text
//! lon = 2π · (col / width − 0.5)     // [-π, π)
//! lat = π  · (0.5 − row / height)    // (-π/2, π/2]
//! ```
//!
//! The 2:1 aspect ratio is conventional and not enforced.

use std::f64::consts::PI;

use crate::{Error, Image, Result};

/// Borrowed view of an [`Image`] known to be a non-empty panorama.
#[derive(Debug, Clone, Copy)]
pub struct Equirect<'a> {
    image: &'a Image,
}

impl<'a> Equirect<'a> {
    /// Validates that `image` can serve as a panorama source.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] when width or height is zero.
    pub fn new(image: &'a Image) -> Result<Self> {
        if image.is_empty() {
            return Err(Error::invalid_dimensions(
                image.width(),
                image.height(),
                image.channels(),
                "panorama must have non-zero width and height",
            ));
        }
        Ok(Self { image })
    }

    /// Underlying image.
    #[inline]
    pub fn image(&self) -> &'a Image {
        self.image
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Longitude and latitude (radians) represented by pixel `(row, col)`.
    ///
    /// ```rust
    /// use pano_core::{Equirect, Image};
    ///
    /// let img = Image::new(8, 4, 3);
    /// let pano = Equirect::new(&img).unwrap();
    /// let (lon, lat) = pano.lon_lat(2.0, 4.0);
    /// assert!(lon.abs() < 1e-12 && lat.abs() < 1e-12);
    /// ```
    #[inline]
    pub fn lon_lat(&self, row: f64, col: f64) -> (f64, f64) {
        let lon = 2.0 * PI * (col / self.width() as f64 - 0.5);
        let lat = PI * (0.5 - row / self.height() as f64);
        (lon, lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rejects_empty() {
        let img = Image::from_data(0, 0, 3, Vec::new()).unwrap();
        assert!(Equirect::new(&img).is_err());
    }

    #[test]
    fn test_lon_lat_corners() {
        let img = Image::new(360, 180, 3);
        let pano = Equirect::new(&img).unwrap();

        let (lon, lat) = pano.lon_lat(0.0, 0.0);
        assert_abs_diff_eq!(lon, -PI, epsilon = 1e-12);
        assert_abs_diff_eq!(lat, PI / 2.0, epsilon = 1e-12);

        let (lon, lat) = pano.lon_lat(180.0, 270.0);
        assert_abs_diff_eq!(lon, PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(lat, -PI / 2.0, epsilon = 1e-12);
    }
}
