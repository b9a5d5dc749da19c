//! Sampling grids.
//!
//! Both projectors evaluate a regular 2D grid of plane coordinates, one
//! sample per output pixel. The grid is separable (a meshgrid of two axes),
//! so only the axes are stored.

/// `n` evenly spaced samples over `[start, end]`.
///
/// Matches the usual `linspace` convention: `n == 1` yields `[start]`,
/// `n == 0` yields nothing, and the last sample is exactly `end`.
///
/// ```rust
/// use pano_ops::grid::linspace;
///
/// assert_eq!(linspace(-1.0, 1.0, 5), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
/// assert_eq!(linspace(-1.0, 1.0, 1), vec![-1.0]);
/// ```
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}

/// Read-only 2D coordinate grid, shared by every face or view of one call.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Grid {
    /// Grid spanning `[-x_extent, x_extent] x [-y_extent, y_extent]`.
    pub fn symmetric(width: u32, height: u32, x_extent: f64, y_extent: f64) -> Self {
        Self {
            xs: linspace(-x_extent, x_extent, width as usize),
            ys: linspace(-y_extent, y_extent, height as usize),
        }
    }

    /// `size x size` grid over `[-1, 1]` on both axes (cube face plane).
    pub fn unit_square(size: u32) -> Self {
        Self::symmetric(size, size, 1.0, 1.0)
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.xs.len()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.ys.len()
    }

    /// Plane coordinate `(x, y)` at column `col`, row `row`.
    #[inline]
    pub fn at(&self, col: u32, row: u32) -> (f64, f64) {
        (self.xs[col as usize], self.ys[row as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_empty() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_linspace_endpoints_exact() {
        let xs = linspace(-0.3, 0.7, 7);
        assert_eq!(xs[0], -0.3);
        assert_eq!(xs[6], 0.7);
        assert_eq!(xs.len(), 7);
    }

    #[test]
    fn test_linspace_odd_has_zero_center() {
        let xs = linspace(-1.0, 1.0, 9);
        assert_eq!(xs[4], 0.0);
    }

    #[test]
    fn test_grid_axes() {
        let g = Grid::symmetric(3, 5, 2.0, 1.0);
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 5);
        assert_eq!(g.at(0, 0), (-2.0, -1.0));
        assert_eq!(g.at(2, 4), (2.0, 1.0));
        assert_eq!(g.at(1, 2), (0.0, 0.0));
    }
}
