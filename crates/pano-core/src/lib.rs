//! # pano-core
//!
//! Core types shared by the panorama reprojection crates.
//!
//! - [`Image`] - Interleaved `f32` pixel buffer, row-major, origin top-left
//! - [`Equirect`] - Validated view treating an [`Image`] as a full-sphere panorama
//! - [`Error`], [`Result`] - Buffer and dimension errors
//!
//! ## Crate Structure
//!
//! ```text
//! pano-core (this crate)
//!    ^
//!    |
//!    +-- pano-ops (size guard, cubemap and perspective projection)
//!    +-- pano-io (PNG / JPEG decode and encode)
//!    +-- pano-cli (batch front end)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod equirect;
pub mod error;
pub mod image;

pub use equirect::Equirect;
pub use error::{Error, Result};
pub use image::Image;
