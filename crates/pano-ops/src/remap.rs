//! Inverse-mapping driver.
//!
//! Every projection here is a remap: for each destination pixel a coordinate
//! function yields the source coordinate, which is then sampled. Pixels are
//! independent, so rows are filled in parallel when the `parallel` feature is
//! enabled. Sequential and parallel runs produce identical output.

use pano_core::Image;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::sample::Interpolation;

/// Fills `dst` row by row, `row_len` samples per row.
#[cfg(feature = "parallel")]
pub(crate) fn fill_rows<F>(dst: &mut [f32], row_len: usize, fill: F)
where
    F: Fn(usize, &mut [f32]) + Sync,
{
    dst.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| fill(y, row));
}

/// Fills `dst` row by row, `row_len` samples per row (single-threaded fallback).
#[cfg(not(feature = "parallel"))]
pub(crate) fn fill_rows<F>(dst: &mut [f32], row_len: usize, fill: F)
where
    F: Fn(usize, &mut [f32]) + Sync,
{
    dst.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| fill(y, row));
}

/// Builds a `width x height` image by sampling `src` at `coord_fn(col, row)`.
///
/// `coord_fn` returns `(u, v)`: a fractional column and row in `src`, which
/// may lie outside the image. Out-of-range handling belongs to
/// `interpolation`.
///
/// # Panics
///
/// Panics if `src` is empty and `width * height > 0`.
///
/// # Example
///
/// ```rust
/// use pano_core::Image;
/// use pano_ops::remap::remap;
/// use pano_ops::sample::Interpolation;
///
/// let src = Image::from_data(2, 1, 1, vec![0.0, 1.0]).unwrap();
/// // Horizontal mirror as a remap
/// let dst = remap(&src, 2, 1, Interpolation::Nearest, |x, _| (1.0 - x as f64, 0.0));
/// assert_eq!(dst.data(), &[1.0, 0.0]);
/// ```
pub fn remap<F>(src: &Image, width: u32, height: u32, interpolation: Interpolation, coord_fn: F) -> Image
where
    F: Fn(u32, u32) -> (f64, f64) + Sync,
{
    let ch = src.channels() as usize;
    let mut dst = Image::new(width, height, src.channels());
    if width == 0 || height == 0 {
        return dst;
    }

    fill_rows(dst.data_mut(), width as usize * ch, |y, row| {
        for (x, px) in row.chunks_exact_mut(ch).enumerate() {
            let (u, v) = coord_fn(x as u32, y as u32);
            interpolation.sample(src, u, v, px);
        }
    });

    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_remap() {
        let data: Vec<f32> = (0..24).map(|v| v as f32 / 24.0).collect();
        let src = Image::from_data(4, 2, 3, data).unwrap();
        let dst = remap(&src, 4, 2, Interpolation::Bilinear, |x, y| (x as f64, y as f64));
        assert_eq!(dst, src);
    }

    #[test]
    fn test_output_size_independent_of_source() {
        let src = Image::new(4, 2, 3);
        let dst = remap(&src, 7, 5, Interpolation::Nearest, |_, _| (0.0, 0.0));
        assert_eq!(dst.dimensions(), (7, 5));
        assert_eq!(dst.channels(), 3);
    }

    #[test]
    fn test_zero_sized_output() {
        let src = Image::new(4, 2, 3);
        let dst = remap(&src, 0, 5, Interpolation::Nearest, |_, _| (0.0, 0.0));
        assert!(dst.is_empty());
    }
}
