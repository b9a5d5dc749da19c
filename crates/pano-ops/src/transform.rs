//! Orientation transforms applied to projected output.
//!
//! Projection results are returned in the canonical orientation. Some
//! viewers expect cube faces mirrored left-right; that convention belongs to
//! whoever writes the faces, which uses [`flip_h`].

use pano_core::Image;

use crate::remap::fill_rows;

/// Flips an image horizontally (left-right mirror).
///
/// # Example
///
/// ```rust
/// use pano_core::Image;
/// use pano_ops::transform::flip_h;
///
/// let src = Image::from_data(2, 1, 3, vec![
///     1.0, 0.0, 0.0, // Left pixel (red)
///     0.0, 1.0, 0.0, // Right pixel (green)
/// ]).unwrap();
/// let flipped = flip_h(&src);
/// assert_eq!(flipped.pixel(0, 0), &[0.0, 1.0, 0.0]);
/// assert_eq!(flipped.pixel(1, 0), &[1.0, 0.0, 0.0]);
/// ```
pub fn flip_h(src: &Image) -> Image {
    let (width, height) = src.dimensions();
    let ch = src.channels() as usize;
    let row_len = width as usize * ch;
    let mut dst = Image::new(width, height, src.channels());
    if row_len == 0 {
        return dst;
    }

    let data = src.data();
    fill_rows(dst.data_mut(), row_len, |y, row| {
        let src_row = &data[y * row_len..(y + 1) * row_len];
        for (dst_px, src_px) in row.chunks_exact_mut(ch).zip(src_row.chunks_exact(ch).rev()) {
            dst_px.copy_from_slice(src_px);
        }
    });

    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_twice_is_identity() {
        let data: Vec<f32> = (0..5 * 3 * 2).map(|v| v as f32).collect();
        let img = Image::from_data(5, 3, 2, data).unwrap();
        assert_eq!(flip_h(&flip_h(&img)), img);
    }

    #[test]
    fn test_flip_odd_width_keeps_centre() {
        let img = Image::from_data(3, 1, 1, vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(flip_h(&img).data(), &[3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_flip_empty() {
        let img = Image::from_data(0, 4, 3, Vec::new()).unwrap();
        assert!(flip_h(&img).is_empty());
    }
}
