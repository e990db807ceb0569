//! Rectangular grid topology with optional wraparound per axis.
//!
//! Wrapping only the columns turns the grid into a cylinder: the first and
//! last column are neighbours, the first and last row are not. Wrapping both
//! axes gives a torus.

use serde::{Deserialize, Serialize};

/// A position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row coordinate (0 to height-1).
    pub row: usize,
    /// Column coordinate (0 to width-1).
    pub col: usize,
}

impl GridPosition {
    /// Convert from linear (row-major) index to 2D position.
    #[inline]
    pub fn from_linear(index: usize, width: usize) -> Self {
        Self {
            row: index / width,
            col: index % width,
        }
    }
}

/// Shape of the grid plus which axes wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridTopology {
    width: usize,
    height: usize,
    wrap_rows: bool,
    wrap_columns: bool,
}

impl GridTopology {
    /// Create a topology for a `width` x `height` grid.
    pub fn new(width: usize, height: usize, wrap_rows: bool, wrap_columns: bool) -> Self {
        Self {
            width,
            height,
            wrap_rows,
            wrap_columns,
        }
    }

    /// Cylinder wrapping around the width axis only.
    pub fn cylinder(width: usize, height: usize) -> Self {
        Self::new(width, height, false, true)
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.width * self.height
    }

    /// Convert linear index to 2D position.
    #[inline]
    pub fn to_2d(&self, index: usize) -> GridPosition {
        GridPosition::from_linear(index, self.width)
    }

    #[inline]
    fn axis_distance(a: usize, b: usize, size: usize, wrap: bool) -> f64 {
        let direct = a.abs_diff(b);
        let d = if wrap { direct.min(size - direct) } else { direct };
        d as f64
    }

    /// Euclidean distance between two positions, wrapping where configured.
    #[inline]
    pub fn distance_2d(&self, p1: GridPosition, p2: GridPosition) -> f64 {
        let dr = Self::axis_distance(p1.row, p2.row, self.height, self.wrap_rows);
        let dc = Self::axis_distance(p1.col, p2.col, self.width, self.wrap_columns);
        (dr * dr + dc * dc).sqrt()
    }

    /// Euclidean distance between two node indices.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distance_2d(self.to_2d(i), self.to_2d(j))
    }
}
