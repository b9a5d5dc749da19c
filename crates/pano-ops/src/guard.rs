//! Size guards for projection inputs and outputs.
//!
//! Panorama captures can be arbitrarily large (gigapixel stitches are
//! common). Every per-pixel grid in this crate is sized from either the
//! source or a requested output, so both are capped before any allocation:
//!
//! - the source is downsampled with area averaging until its larger side is
//!   at most `max_dimension` ([`cap_image`])
//! - requested cube faces are capped at half of `max_dimension`
//! - requested perspective outputs are scaled down, keeping aspect, so their
//!   larger side is at most `max_dimension`
//!
//! Capping is not an error. Every clamp is returned to the caller as a
//! [`SizeAdjustment`] so batch front ends can report it.
//!
//! # Example
//!
//! ```rust
//! use pano_core::Image;
//! use pano_ops::guard::{cap_dimension, cap_image};
//!
//! assert_eq!(cap_dimension(9000, 8000), 8000);
//!
//! let img = Image::new(400, 200, 3);
//! let capped = cap_image(&img, 100).unwrap();
//! assert_eq!(capped.dimensions(), (100, 50));
//! ```

use std::borrow::Cow;
use std::fmt;

use pano_core::Image;
use tracing::debug;

use crate::resize::resize_area;
use crate::{OpsError, OpsResult};

/// Default cap on the larger image side.
pub const DEFAULT_MAX_DIMENSION: u32 = 16_000;

/// `min(requested, max)`.
#[inline]
pub fn cap_dimension(requested: u32, max: u32) -> u32 {
    requested.min(max)
}

/// Scales `(width, height)` down so the larger side equals `max`.
///
/// The larger side is set to `max` exactly, the other side is scaled by the
/// same factor, truncated, and kept at least 1. Sizes already within `max`
/// are returned unchanged.
pub fn capped_size(width: u32, height: u32, max: u32) -> (u32, u32) {
    let larger = width.max(height);
    if larger <= max {
        return (width, height);
    }
    let scale = max as f64 / larger as f64;
    let shrink = |v: u32| ((v as f64 * scale) as u32).clamp(1, max);
    if width >= height {
        (max, shrink(height))
    } else {
        (shrink(width), max)
    }
}

/// Downsamples `image` so that its larger side is at most `max`.
///
/// Returns the input borrowed, untouched, when it already fits.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] when `max` is zero.
pub fn cap_image(image: &Image, max: u32) -> OpsResult<Cow<'_, Image>> {
    if max == 0 {
        return Err(OpsError::InvalidParameter(
            "max dimension must be > 0".into(),
        ));
    }
    let (w, h) = image.dimensions();
    let (new_w, new_h) = capped_size(w, h, max);
    if (new_w, new_h) == (w, h) {
        return Ok(Cow::Borrowed(image));
    }

    debug!(from_w = w, from_h = h, to_w = new_w, to_h = new_h, "downsampling oversized image");
    let data = resize_area(
        image.data(),
        w as usize,
        h as usize,
        image.channels() as usize,
        new_w as usize,
        new_h as usize,
    )?;
    Ok(Cow::Owned(Image::from_data(new_w, new_h, image.channels(), data)?))
}

/// What a [`SizeAdjustment`] applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    /// The source panorama.
    Source,
    /// Requested cube face edge.
    FaceSize,
    /// Requested perspective output size.
    OutputSize,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Subject::Source => "source image",
            Subject::FaceSize => "face size",
            Subject::OutputSize => "output size",
        })
    }
}

/// Record of one clamp applied by a [`SizeGuard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeAdjustment {
    /// What was clamped.
    pub subject: Subject,
    /// Size before clamping, `(width, height)`.
    pub requested: (u32, u32),
    /// Size actually used.
    pub applied: (u32, u32),
}

impl fmt::Display for SizeAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} clamped from {}x{} to {}x{}",
            self.subject, self.requested.0, self.requested.1, self.applied.0, self.applied.1
        )
    }
}

/// Size policy handed explicitly to the projectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeGuard {
    max_dimension: u32,
}

impl Default for SizeGuard {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

impl SizeGuard {
    /// Creates a guard capping the larger image side at `max_dimension`.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] when `max_dimension` is zero.
    pub fn new(max_dimension: u32) -> OpsResult<Self> {
        if max_dimension == 0 {
            return Err(OpsError::InvalidParameter(
                "max dimension must be > 0".into(),
            ));
        }
        Ok(Self { max_dimension })
    }

    /// Configured cap.
    #[inline]
    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    /// Largest cube face edge this guard admits.
    #[inline]
    pub fn face_limit(&self) -> u32 {
        (self.max_dimension / 2).max(1)
    }

    /// `min(requested, max_dimension)`.
    #[inline]
    pub fn cap_dimension(&self, requested: u32) -> u32 {
        cap_dimension(requested, self.max_dimension)
    }

    /// Downsamples `image` if needed, see [`cap_image`].
    pub fn cap_image<'a>(&self, image: &'a Image) -> OpsResult<Cow<'a, Image>> {
        cap_image(image, self.max_dimension)
    }

    /// Caps the source panorama, recording the clamp in `adjustments`.
    pub(crate) fn cap_source<'a>(
        &self,
        image: &'a Image,
        adjustments: &mut Vec<SizeAdjustment>,
    ) -> OpsResult<Cow<'a, Image>> {
        let capped = self.cap_image(image)?;
        if let Cow::Owned(owned) = &capped {
            adjustments.push(SizeAdjustment {
                subject: Subject::Source,
                requested: image.dimensions(),
                applied: owned.dimensions(),
            });
        }
        Ok(capped)
    }

    /// Caps a cube face edge at [`face_limit`](Self::face_limit).
    pub(crate) fn cap_face(&self, requested: u32, adjustments: &mut Vec<SizeAdjustment>) -> u32 {
        let applied = cap_dimension(requested, self.face_limit());
        if applied != requested {
            adjustments.push(SizeAdjustment {
                subject: Subject::FaceSize,
                requested: (requested, requested),
                applied: (applied, applied),
            });
        }
        applied
    }

    /// Caps a perspective output size, keeping its aspect ratio.
    pub(crate) fn cap_output(
        &self,
        requested: (u32, u32),
        adjustments: &mut Vec<SizeAdjustment>,
    ) -> (u32, u32) {
        let applied = capped_size(requested.0, requested.1, self.max_dimension);
        if applied != requested {
            adjustments.push(SizeAdjustment {
                subject: Subject::OutputSize,
                requested,
                applied,
            });
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_dimension() {
        assert_eq!(cap_dimension(100, 200), 100);
        assert_eq!(cap_dimension(200, 200), 200);
        assert_eq!(cap_dimension(300, 200), 200);
    }

    #[test]
    fn test_capped_size() {
        assert_eq!(capped_size(4000, 2000, 1000), (1000, 500));
        assert_eq!(capped_size(2000, 4000, 1000), (500, 1000));
        assert_eq!(capped_size(300, 100, 1000), (300, 100));
        // 3x1 -> 2: 1 * 2/3 truncates to 0, kept at 1
        assert_eq!(capped_size(3, 1, 2), (2, 1));
        assert_eq!(capped_size(1001, 333, 1000), (1000, 332));
    }

    #[test]
    fn test_cap_image_borrowed_when_fits() {
        let img = Image::new(64, 32, 3);
        let capped = cap_image(&img, 64).unwrap();
        assert!(matches!(capped, Cow::Borrowed(_)));
        assert_eq!(*capped, img);
    }

    #[test]
    fn test_cap_image_downsamples() {
        let img = Image::from_data(80, 40, 3, vec![0.5; 80 * 40 * 3]).unwrap();
        let capped = cap_image(&img, 20).unwrap();
        assert_eq!(capped.dimensions(), (20, 10));
        assert_eq!(capped.channels(), 3);
        assert!(capped.data().iter().all(|v| (v - 0.5).abs() < 1e-6));
    }

    #[test]
    fn test_cap_image_zero_max() {
        let img = Image::new(4, 4, 1);
        assert!(matches!(cap_image(&img, 0), Err(OpsError::InvalidParameter(_))));
    }

    #[test]
    fn test_guard_records_adjustments() {
        let guard = SizeGuard::new(100).unwrap();
        let mut adj = Vec::new();

        assert_eq!(guard.cap_face(80, &mut adj), 50);
        assert_eq!(guard.cap_face(40, &mut adj), 40);
        assert_eq!(guard.cap_output((400, 100), &mut adj), (100, 25));
        assert_eq!(adj.len(), 2);
        assert_eq!(adj[0].subject, Subject::FaceSize);
        assert_eq!(adj[1].to_string(), "output size clamped from 400x100 to 100x25");
    }

    #[test]
    fn test_guard_rejects_zero() {
        assert!(SizeGuard::new(0).is_err());
        assert_eq!(SizeGuard::new(1).unwrap().face_limit(), 1);
        assert_eq!(SizeGuard::default().max_dimension(), DEFAULT_MAX_DIMENSION);
    }
}
