//! Equirectangular to cubemap projection.
//!
//! Produces six square faces. Each face fixes one cube axis to ±1 and maps
//! the two free axes from a shared `[-1, 1]` grid:
//!
//! | face   | X  | Y  | Z  |
//! |--------|----|----|----|
//! | left   | 1  | -y | -x |
//! | back   | -x | -y | -1 |
//! | right  | -1 | -y | x  |
//! | front  | x  | -y | 1  |
//! | top    | x  | 1  | y  |
//! | bottom | x  | -1 | -y |
//!
//! A cube direction maps to the source with
//!
//! ```text
//! theta = atan2(Z, X)
//! phi   = atan2(Y, sqrt(X² + Z²))
//! u     = (width  - 1) · (0.5 + theta / 2π)
//! v     = (height - 1) · (0.5 - phi / π)
//! ```
//!
//! and is read with nearest-neighbour sampling (truncate, clamp). Faces are
//! returned unmirrored; mirroring for a particular viewer is up to the
//! caller (see [`crate::transform::flip_h`]).

use std::f64::consts::{PI, TAU};
use std::fmt;

use glam::DVec3;
use pano_core::{Equirect, Image};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::grid::Grid;
use crate::guard::{SizeAdjustment, SizeGuard};
use crate::remap::remap;
use crate::sample::Interpolation;
use crate::{OpsError, OpsResult};

/// One face of the cube, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    /// +X face.
    Left,
    /// -Z face.
    Back,
    /// -X face.
    Right,
    /// +Z face.
    Front,
    /// +Y face.
    Top,
    /// -Y face.
    Bottom,
}

impl CubeFace {
    /// All faces in output order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Left,
        CubeFace::Back,
        CubeFace::Right,
        CubeFace::Front,
        CubeFace::Top,
        CubeFace::Bottom,
    ];

    /// Position in [`CubeFace::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase face name, used in output file names.
    pub fn name(self) -> &'static str {
        match self {
            CubeFace::Left => "left",
            CubeFace::Back => "back",
            CubeFace::Right => "right",
            CubeFace::Front => "front",
            CubeFace::Top => "top",
            CubeFace::Bottom => "bottom",
        }
    }

    /// Cube-surface direction for grid coordinate `(x, y)`, both in `[-1, 1]`.
    ///
    /// Not normalised; only its angles matter.
    #[inline]
    pub fn direction(self, x: f64, y: f64) -> DVec3 {
        match self {
            CubeFace::Left => DVec3::new(1.0, -y, -x),
            CubeFace::Back => DVec3::new(-x, -y, -1.0),
            CubeFace::Right => DVec3::new(-1.0, -y, x),
            CubeFace::Front => DVec3::new(x, -y, 1.0),
            CubeFace::Top => DVec3::new(x, 1.0, y),
            CubeFace::Bottom => DVec3::new(x, -1.0, -y),
        }
    }
}

impl fmt::Display for CubeFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source coordinate `(u, v)` sampled by `face` at grid point `(x, y)` of a
/// `src_w x src_h` panorama.
///
/// ```rust
/// use pano_ops::cubemap::{face_source_coordinate, CubeFace};
///
/// // Centre of the left face looks along +X: longitude 0
/// let (u, v) = face_source_coordinate(CubeFace::Left, 0.0, 0.0, 101, 51);
/// assert!((u - 50.0).abs() < 1e-9 && (v - 25.0).abs() < 1e-9);
/// ```
#[inline]
pub fn face_source_coordinate(face: CubeFace, x: f64, y: f64, src_w: u32, src_h: u32) -> (f64, f64) {
    let d = face.direction(x, y);
    let theta = d.z.atan2(d.x);
    let phi = d.y.atan2(d.x.hypot(d.z));

    let u = (src_w as f64 - 1.0) * (0.5 + theta / TAU);
    let v = (src_h as f64 - 1.0) * (0.5 - phi / PI);
    (u, v)
}

/// Six projected faces plus any size clamps applied on the way.
#[derive(Debug, Clone)]
pub struct Cubemap {
    faces: Vec<(CubeFace, Image)>,
    adjustments: Vec<SizeAdjustment>,
}

impl Cubemap {
    /// Faces in [`CubeFace::ALL`] order.
    pub fn faces(&self) -> &[(CubeFace, Image)] {
        &self.faces
    }

    /// Image for one face.
    pub fn face(&self, face: CubeFace) -> &Image {
        &self.faces[face.index()].1
    }

    /// Size clamps applied by the guard. Empty when nothing was clamped.
    pub fn adjustments(&self) -> &[SizeAdjustment] {
        &self.adjustments
    }

    /// Edge length of every face.
    pub fn face_size(&self) -> u32 {
        self.faces.first().map_or(0, |(_, img)| img.width())
    }

    /// Consumes the cubemap, returning the faces in order.
    pub fn into_faces(self) -> Vec<(CubeFace, Image)> {
        self.faces
    }
}

/// Projects an equirectangular panorama onto six `face_size x face_size` faces.
///
/// The source is first capped by `guard`, and `face_size` is capped at
/// [`SizeGuard::face_limit`]. Both clamps are reported through
/// [`Cubemap::adjustments`].
///
/// # Errors
///
/// - [`OpsError::InvalidInput`] if `equirect` is empty
/// - [`OpsError::InvalidParameter`] if `face_size` is zero
///
/// # Example
///
/// ```rust
/// use pano_core::Image;
/// use pano_ops::cubemap::{cubemap_project, CubeFace};
/// use pano_ops::SizeGuard;
///
/// let pano = Image::new(64, 32, 3);
/// let cube = cubemap_project(&pano, 16, &SizeGuard::default()).unwrap();
/// assert_eq!(cube.faces().len(), 6);
/// assert_eq!(cube.face(CubeFace::Top).dimensions(), (16, 16));
/// ```
pub fn cubemap_project(equirect: &Image, face_size: u32, guard: &SizeGuard) -> OpsResult<Cubemap> {
    trace!(
        width = equirect.width(),
        height = equirect.height(),
        face_size,
        "cubemap::cubemap_project"
    );

    Equirect::new(equirect).map_err(|e| OpsError::InvalidInput(e.to_string()))?;
    if face_size == 0 {
        return Err(OpsError::InvalidParameter("face size must be > 0".into()));
    }

    let mut adjustments = Vec::new();
    let source = guard.cap_source(equirect, &mut adjustments)?;
    let size = guard.cap_face(face_size, &mut adjustments);
    for adj in &adjustments {
        debug!(%adj, "cubemap input clamped");
    }
    debug!(
        source_w = source.width(),
        source_h = source.height(),
        face_size = size,
        "projecting cube faces"
    );

    let grid = Grid::unit_square(size);
    let project_face = |face: &CubeFace| {
        let face = *face;
        let (w, h) = source.dimensions();
        let img = remap(&source, size, size, Interpolation::Nearest, |col, row| {
            let (x, y) = grid.at(col, row);
            face_source_coordinate(face, x, y, w, h)
        });
        (face, img)
    };

    #[cfg(feature = "parallel")]
    let faces: Vec<(CubeFace, Image)> = CubeFace::ALL.par_iter().map(project_face).collect();
    #[cfg(not(feature = "parallel"))]
    let faces: Vec<(CubeFace, Image)> = CubeFace::ALL.iter().map(project_face).collect();

    Ok(Cubemap { faces, adjustments })
}
