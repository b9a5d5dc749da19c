//! Equirectangular to perspective (rectilinear) projection.
//!
//! A virtual pinhole camera sits at the sphere centre with its image plane at
//! unit distance (`z = 1`). The plane spans `±tan(fov_h / 2)` horizontally
//! and `±tan(fov_v / 2)` vertically, one sample per output pixel.
//!
//! Each plane point is normalised to a unit ray and rotated:
//!
//! 1. heading (yaw) about the vertical Y axis
//!    `x' = x·cos h + z·sin h`, `z' = -x·sin h + z·cos h`
//! 2. then pitch about the X axis
//!    `y'' = y'·cos p - z'·sin p`, `z'' = y'·sin p + z'·cos p`
//!
//! The order is fixed; swapping it changes every view with both angles
//! non-zero. The ray maps to the source with
//!
//! ```text
//! lon = atan2(x'', z'')     u = (lon / 2π + 0.5) · width
//! lat = asin(y'')           v = (lat / π  + 0.5) · height
//! ```
//!
//! and is read with bilinear sampling; coordinates outside the source read
//! as black.

use std::f64::consts::{PI, TAU};

use glam::DVec3;
use pano_core::{Equirect, Image};
use tracing::{debug, trace};

use crate::grid::Grid;
use crate::guard::{SizeAdjustment, SizeGuard};
use crate::remap::remap;
use crate::sample::Interpolation;
use crate::{OpsError, OpsResult};

/// Parameters of one perspective view. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveParams {
    /// Horizontal field of view, `0 < fov_h < 180`.
    pub fov_h: f64,
    /// Vertical field of view, `0 < fov_v < 180`.
    pub fov_v: f64,
    /// Yaw; 0 looks at the panorama centre, positive turns toward +X.
    pub heading: f64,
    /// Pitch about the camera's horizontal axis.
    pub pitch: f64,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl Default for PerspectiveParams {
    fn default() -> Self {
        Self {
            fov_h: 100.0,
            fov_v: 55.0,
            heading: 0.0,
            pitch: 0.0,
            width: 1920,
            height: 1080,
        }
    }
}

impl PerspectiveParams {
    /// Creates parameters from explicit values.
    pub fn new(fov_h: f64, fov_v: f64, heading: f64, pitch: f64, width: u32, height: u32) -> Self {
        Self {
            fov_h,
            fov_v,
            heading,
            pitch,
            width,
            height,
        }
    }

    /// Same view, different orientation.
    pub fn with_orientation(self, heading: f64, pitch: f64) -> Self {
        Self {
            heading,
            pitch,
            ..self
        }
    }

    /// Same view, different output size.
    pub fn with_size(self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    /// Checks ranges.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] when a field of view is not strictly
    /// inside `(0, 180)`, an angle is not finite, or a size is zero.
    pub fn validate(&self) -> OpsResult<()> {
        for (name, fov) in [("fov_h", self.fov_h), ("fov_v", self.fov_v)] {
            if !(fov > 0.0 && fov < 180.0) {
                return Err(OpsError::InvalidParameter(format!(
                    "{} must be in (0, 180) degrees, got {}",
                    name, fov
                )));
            }
        }
        for (name, angle) in [("heading", self.heading), ("pitch", self.pitch)] {
            if !angle.is_finite() {
                return Err(OpsError::InvalidParameter(format!(
                    "{} must be finite, got {}",
                    name, angle
                )));
            }
        }
        if self.width == 0 || self.height == 0 {
            return Err(OpsError::InvalidParameter(format!(
                "output size must be > 0, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Camera orientation: heading, then pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRotation {
    sin_h: f64,
    cos_h: f64,
    sin_p: f64,
    cos_p: f64,
}

impl ViewRotation {
    /// Rotation for `heading` and `pitch` in degrees.
    pub fn new(heading: f64, pitch: f64) -> Self {
        let (sin_h, cos_h) = heading.to_radians().sin_cos();
        let (sin_p, cos_p) = pitch.to_radians().sin_cos();
        Self {
            sin_h,
            cos_h,
            sin_p,
            cos_p,
        }
    }

    /// Yaw about Y.
    #[inline]
    pub fn apply_heading(&self, d: DVec3) -> DVec3 {
        DVec3::new(
            d.x * self.cos_h + d.z * self.sin_h,
            d.y,
            -d.x * self.sin_h + d.z * self.cos_h,
        )
    }

    /// Pitch about X.
    #[inline]
    pub fn apply_pitch(&self, d: DVec3) -> DVec3 {
        DVec3::new(
            d.x,
            d.y * self.cos_p - d.z * self.sin_p,
            d.y * self.sin_p + d.z * self.cos_p,
        )
    }

    /// Full camera rotation.
    #[inline]
    pub fn apply(&self, d: DVec3) -> DVec3 {
        self.apply_pitch(self.apply_heading(d))
    }
}

/// Source coordinate `(u, v)` for unit ray `d` in a `src_w x src_h` panorama.
///
/// `d.y` is clamped into `[-1, 1]` before `asin` to absorb rounding.
#[inline]
pub fn ray_source_coordinate(d: DVec3, src_w: u32, src_h: u32) -> (f64, f64) {
    let lon = d.x.atan2(d.z);
    let lat = d.y.clamp(-1.0, 1.0).asin();
    let u = (lon / TAU + 0.5) * src_w as f64;
    let v = (lat / PI + 0.5) * src_h as f64;
    (u, v)
}

/// Precomputed image plane and rotation for one view.
#[derive(Debug, Clone)]
pub struct Camera {
    grid: Grid,
    rotation: ViewRotation,
}

impl Camera {
    /// Builds the camera for validated `params`.
    ///
    /// # Errors
    ///
    /// See [`PerspectiveParams::validate`].
    pub fn new(params: &PerspectiveParams) -> OpsResult<Self> {
        params.validate()?;
        let half_w = (params.fov_h / 2.0).to_radians().tan();
        let half_h = (params.fov_v / 2.0).to_radians().tan();
        Ok(Self {
            grid: Grid::symmetric(params.width, params.height, half_w, half_h),
            rotation: ViewRotation::new(params.heading, params.pitch),
        })
    }

    /// Output width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.grid.width() as u32
    }

    /// Output height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.grid.height() as u32
    }

    /// Rotated unit ray through output pixel `(col, row)`.
    #[inline]
    pub fn direction(&self, col: u32, row: u32) -> DVec3 {
        let (x, y) = self.grid.at(col, row);
        self.rotation.apply(DVec3::new(x, y, 1.0).normalize())
    }

    /// Source coordinate sampled by output pixel `(col, row)`.
    #[inline]
    pub fn source_coordinate(&self, col: u32, row: u32, src_w: u32, src_h: u32) -> (f64, f64) {
        ray_source_coordinate(self.direction(col, row), src_w, src_h)
    }
}

/// A rendered view plus any size clamps applied on the way.
#[derive(Debug, Clone)]
pub struct PerspectiveView {
    image: Image,
    adjustments: Vec<SizeAdjustment>,
}

impl PerspectiveView {
    /// Rendered view.
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Size clamps applied by the guard. Empty when nothing was clamped.
    pub fn adjustments(&self) -> &[SizeAdjustment] {
        &self.adjustments
    }

    /// Consumes the view, returning the image.
    pub fn into_image(self) -> Image {
        self.image
    }
}

/// Renders one perspective view of an equirectangular panorama.
///
/// The source is capped by `guard`, and an output size larger than the cap
/// is scaled down keeping its aspect ratio; both are reported through
/// [`PerspectiveView::adjustments`].
///
/// # Errors
///
/// - [`OpsError::InvalidInput`] if `equirect` is empty
/// - [`OpsError::InvalidParameter`] if `params` fails validation
///
/// # Example
///
/// ```rust
/// use pano_core::Image;
/// use pano_ops::perspective::{perspective_project, PerspectiveParams};
/// use pano_ops::SizeGuard;
///
/// let pano = Image::new(128, 64, 3);
/// let params = PerspectiveParams::new(90.0, 60.0, 90.0, 0.0, 32, 24);
/// let view = perspective_project(&pano, &params, &SizeGuard::default()).unwrap();
/// assert_eq!(view.image().dimensions(), (32, 24));
/// ```
pub fn perspective_project(
    equirect: &Image,
    params: &PerspectiveParams,
    guard: &SizeGuard,
) -> OpsResult<PerspectiveView> {
    trace!(
        width = equirect.width(),
        height = equirect.height(),
        fov_h = params.fov_h,
        fov_v = params.fov_v,
        heading = params.heading,
        pitch = params.pitch,
        out_w = params.width,
        out_h = params.height,
        "perspective::perspective_project"
    );

    Equirect::new(equirect).map_err(|e| OpsError::InvalidInput(e.to_string()))?;
    params.validate()?;

    let mut adjustments = Vec::new();
    let source = guard.cap_source(equirect, &mut adjustments)?;
    let (out_w, out_h) = guard.cap_output((params.width, params.height), &mut adjustments);
    for adj in &adjustments {
        debug!(%adj, "perspective input clamped");
    }

    let camera = Camera::new(&params.with_size(out_w, out_h))?;
    let (w, h) = source.dimensions();
    let image = remap(&source, out_w, out_h, Interpolation::Bilinear, |col, row| {
        camera.source_coordinate(col, row, w, h)
    });

    Ok(PerspectiveView { image, adjustments })
}
