//! # pano-ops
//!
//! Reprojection of full-sphere (equirectangular) panoramas.
//!
//! Two independent, stateless projectors share one input type
//! ([`pano_core::Image`]) and one size policy ([`SizeGuard`]):
//!
//! - [`cubemap`] - six square cube faces, nearest-neighbour sampling
//! - [`perspective`] - one rectilinear view at any heading / pitch / FOV,
//!   bilinear sampling with a black border
//!
//! Every call is a pure function of its inputs: no caches, no globals, and
//! identical inputs give bit-identical outputs. With the `parallel` feature
//! (on by default) output rows and cube faces are computed on the rayon pool.
//!
//! # Modules
//!
//! - [`guard`] - Caps on source and output sizes
//! - [`resize`] - Area-averaging downscale used by the guard
//! - [`grid`] - Shared sampling grids
//! - [`sample`] - Nearest and bilinear sampling policies
//! - [`remap`] - Per-pixel inverse mapping driver
//! - [`transform`] - Output orientation helpers
//!
//! # Example
//!
//! ```rust
//! use pano_core::Image;
//! use pano_ops::{cubemap_project, perspective_project, PerspectiveParams, SizeGuard};
//!
//! let pano = Image::new(256, 128, 3);
//! let guard = SizeGuard::default();
//!
//! let cube = cubemap_project(&pano, 64, &guard)?;
//! assert_eq!(cube.faces().len(), 6);
//!
//! let params = PerspectiveParams::default().with_size(64, 36).with_orientation(90.0, 0.0);
//! let view = perspective_project(&pano, &params, &guard)?;
//! assert_eq!(view.image().dimensions(), (64, 36));
//! # Ok::<(), pano_ops::OpsError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod cubemap;
pub mod grid;
pub mod guard;
pub mod perspective;
pub mod remap;
pub mod resize;
pub mod sample;
pub mod transform;

pub use cubemap::{cubemap_project, CubeFace, Cubemap};
pub use error::{OpsError, OpsResult};
pub use guard::{SizeAdjustment, SizeGuard};
pub use perspective::{perspective_project, PerspectiveParams, PerspectiveView};
pub use sample::Interpolation;
