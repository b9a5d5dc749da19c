//! Area-averaging resize.
//!
//! Each destination pixel covers a rectangular footprint of the source; its
//! value is the coverage-weighted mean of every source pixel the footprint
//! overlaps. For downscaling this is the quality-preserving choice (no
//! aliasing, no ringing), which is all [`crate::guard`] needs.
//!
//! The filter is separable: a horizontal pass followed by a vertical pass.
//!
//! # Example
//!
//! ```rust
//! use pano_ops::resize::resize_area;
//!
//! let src = vec![0.0f32, 1.0, 0.0, 1.0]; // 4x1, one channel
//! let dst = resize_area(&src, 4, 1, 1, 2, 1).unwrap();
//! assert_eq!(dst, vec![0.5, 0.5]);
//! ```

use crate::remap::fill_rows;
use crate::{OpsError, OpsResult};

/// Source span contributing to one destination sample.
#[derive(Debug, Clone)]
struct Contribution {
    start: usize,
    weights: Vec<f32>,
}

/// Computes per-destination coverage weights along one axis.
fn area_contributions(src_len: usize, dst_len: usize) -> Vec<Contribution> {
    let scale = src_len as f64 / dst_len as f64;

    (0..dst_len)
        .map(|i| {
            let lo = i as f64 * scale;
            let hi = ((i + 1) as f64 * scale).min(src_len as f64);
            let start = (lo.floor() as usize).min(src_len - 1);
            let end = (hi.ceil() as usize).clamp(start + 1, src_len);

            let mut weights: Vec<f32> = (start..end)
                .map(|j| {
                    let overlap = hi.min((j + 1) as f64) - lo.max(j as f64);
                    overlap.max(0.0) as f32
                })
                .collect();

            let total: f32 = weights.iter().sum();
            if total > 0.0 {
                weights.iter_mut().for_each(|w| *w /= total);
            } else {
                weights.iter_mut().for_each(|w| *w = 0.0);
                weights[0] = 1.0;
            }

            Contribution { start, weights }
        })
        .collect()
}

/// Resizes interleaved f32 samples with area averaging.
///
/// # Arguments
///
/// * `src` - Source samples, `src_w * src_h * channels` long
/// * `src_w`, `src_h` - Source dimensions
/// * `channels` - Samples per pixel
/// * `dst_w`, `dst_h` - Destination dimensions
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] when any dimension is zero or `src` has
/// the wrong length.
pub fn resize_area(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    dst_h: usize,
) -> OpsResult<Vec<f32>> {
    if src_w == 0 || src_h == 0 || channels == 0 {
        return Err(OpsError::InvalidParameter(format!(
            "source must be non-empty, got {}x{}x{}",
            src_w, src_h, channels
        )));
    }
    if dst_w == 0 || dst_h == 0 {
        return Err(OpsError::InvalidParameter(
            "destination size must be > 0".into(),
        ));
    }
    let expected = src_w * src_h * channels;
    if src.len() != expected {
        return Err(OpsError::InvalidParameter(format!(
            "expected {} samples, got {}",
            expected,
            src.len()
        )));
    }

    let temp = resize_horizontal(src, src_w, src_h, channels, dst_w);
    Ok(resize_vertical(&temp, dst_w, src_h, channels, dst_h))
}

/// Horizontal pass: `src_w x src_h` -> `dst_w x src_h`.
fn resize_horizontal(src: &[f32], src_w: usize, src_h: usize, channels: usize, dst_w: usize) -> Vec<f32> {
    let contribs = area_contributions(src_w, dst_w);
    let mut dst = vec![0.0f32; dst_w * src_h * channels];

    fill_rows(&mut dst, dst_w * channels, |y, row| {
        let src_row = &src[y * src_w * channels..(y + 1) * src_w * channels];
        for (x, contrib) in contribs.iter().enumerate() {
            let out = &mut row[x * channels..(x + 1) * channels];
            for (k, &w) in contrib.weights.iter().enumerate() {
                let idx = (contrib.start + k) * channels;
                for c in 0..channels {
                    out[c] += src_row[idx + c] * w;
                }
            }
        }
    });

    dst
}

/// Vertical pass: `width x src_h` -> `width x dst_h`.
fn resize_vertical(src: &[f32], width: usize, src_h: usize, channels: usize, dst_h: usize) -> Vec<f32> {
    let contribs = area_contributions(src_h, dst_h);
    let row_len = width * channels;
    let mut dst = vec![0.0f32; row_len * dst_h];

    fill_rows(&mut dst, row_len, |y, row| {
        let contrib = &contribs[y];
        for (k, &w) in contrib.weights.iter().enumerate() {
            let src_row = &src[(contrib.start + k) * row_len..(contrib.start + k + 1) * row_len];
            for (o, &s) in row.iter_mut().zip(src_row) {
                *o += s * w;
            }
        }
    });

    dst
}
