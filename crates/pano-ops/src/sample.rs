//! Pixel sampling policies.
//!
//! The two projectors deliberately use different policies:
//!
//! - cube faces: [`Interpolation::Nearest`], truncate then clamp to the edge
//! - perspective views: [`Interpolation::Bilinear`], taps outside the source
//!   read as zero (constant black border)
//!
//! Neither wraps horizontally; longitude wrap-around comes from `atan2`.

use pano_core::Image;

/// Interpolation used when reading a source image at a fractional coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Truncate to integer, clamp into the image.
    Nearest,
    /// Four-tap bilinear, zero outside the image.
    Bilinear,
}

impl Interpolation {
    /// Samples `src` at `(u, v)` (column, row) into `out`.
    ///
    /// `out` must hold exactly `src.channels()` values.
    #[inline]
    pub fn sample(self, src: &Image, u: f64, v: f64, out: &mut [f32]) {
        match self {
            Interpolation::Nearest => sample_nearest_clamped(src, u, v, out),
            Interpolation::Bilinear => sample_bilinear_zero(src, u, v, out),
        }
    }
}

/// Nearest-neighbour lookup: truncates toward zero, then clamps to
/// `[0, width-1] x [0, height-1]`.
///
/// Non-finite coordinates saturate like any other out-of-range value.
///
/// # Panics
///
/// Panics if `src` is empty.
#[inline]
pub fn sample_nearest_clamped(src: &Image, u: f64, v: f64, out: &mut [f32]) {
    let x = (u.trunc() as i64).clamp(0, src.width() as i64 - 1) as u32;
    let y = (v.trunc() as i64).clamp(0, src.height() as i64 - 1) as u32;
    out.copy_from_slice(src.pixel(x, y));
}

/// Bilinear lookup with a constant zero border.
///
/// Each of the four taps that falls outside the image contributes zero, so
/// coordinates within one pixel of an edge fade toward black and coordinates
/// further out are black.
#[inline]
pub fn sample_bilinear_zero(src: &Image, u: f64, v: f64, out: &mut [f32]) {
    out.fill(0.0);
    if !(u.is_finite() && v.is_finite()) {
        return;
    }

    let x0 = u.floor();
    let y0 = v.floor();
    let fx = (u - x0) as f32;
    let fy = (v - y0) as f32;
    let x0 = x0 as i64;
    let y0 = y0 as i64;
    let w = src.width() as i64;
    let h = src.height() as i64;

    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];

    for (x, y, weight) in taps {
        if weight == 0.0 || x < 0 || y < 0 || x >= w || y >= h {
            continue;
        }
        let px = src.pixel(x as u32, y as u32);
        for (o, &p) in out.iter_mut().zip(px) {
            *o += p * weight;
        }
    }
}
