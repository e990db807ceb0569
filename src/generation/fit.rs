//! Shrinking the requested grid to what the sample count can populate.

use log::info;
use serde::{Deserialize, Serialize};

/// Grid footprint in nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
}

impl GridSize {
    /// Creates a footprint.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of nodes.
    #[inline]
    pub fn total(&self) -> usize {
        self.width * self.height
    }

    fn too_sparse(&self, num_samples: usize) -> bool {
        2 * self.total() > num_samples && self.total() > 4
    }

    /// Shrinks the footprint until every node can expect two samples, or the
    /// grid is down to four nodes.
    ///
    /// Height goes first, one row at a time. Once a single row is left, width
    /// drops by four columns per step but never below four.
    pub fn fit(self, num_samples: usize) -> GridSize {
        let mut size = self;

        while size.too_sparse(num_samples) {
            if size.height > 1 {
                size.height -= 1;
            } else {
                size.width = size.width.saturating_sub(4).max(4);
            }
        }

        if size != self {
            info!(
                "Grid fitted from {}x{} to {}x{} for {} samples",
                self.width, self.height, size.width, size.height, num_samples
            );
        }
        size
    }
}
