//! Pitch grid
//!
//! Uniform grid over the pitch bounds, stored row-major:
//! - col runs along X (length), row runs along Y (width)
//! - `values[row * cols + col]` is the value at the cell center
//! - dimensions are `ceil(length / resolution)` × `ceil(width / resolution)`
//!
//! Every field in the crate (control, value) is a [`PitchGrid`], so cell
//! indexing, bounds checks and the neutral fallback for lookups that miss
//! the grid exist in one place only.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::pitch::PitchBounds;

/// A cell index in (col,row). Both are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellIndex {
    pub col: usize,
    pub row: usize,
}

/// Grid geometry: bounds, cell size and derived dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub bounds: PitchBounds,
    /// Cell size in meters
    pub resolution: f32,
    pub cols: usize,
    pub rows: usize,
}

impl GridSpec {
    /// Build a grid spec, clamping unusable resolutions to `min_resolution`
    /// and coarsening cells until the grid fits in `max_cells`.
    pub fn new(bounds: PitchBounds, resolution: f32, min_resolution: f32, max_cells: usize) -> Self {
        let mut resolution = if resolution.is_finite() && resolution >= min_resolution {
            resolution
        } else {
            log::warn!(
                "grid resolution {resolution} is below the minimum; using {min_resolution:.2}m cells"
            );
            min_resolution
        };

        let (length, width) = (bounds.length() as f64, bounds.width() as f64);
        let max_cells = max_cells.max(1) as f64;
        let cells = |res: f64| (length / res).ceil().max(1.0) * (width / res).ceil().max(1.0);
        if cells(resolution as f64) > max_cells {
            let requested = resolution;
            resolution = ((length * width / max_cells).sqrt() as f32).max(resolution);
            while cells(resolution as f64) > max_cells {
                resolution *= 1.01;
            }
            log::warn!(
                "grid at {requested}m exceeds {max_cells} cells; using {resolution:.3}m cells"
            );
        }

        let cols = ((length / resolution as f64).ceil() as usize).max(1);
        let rows = ((width / resolution as f64).ceil() as usize).max(1);
        Self { bounds, resolution, cols, rows }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn index(&self, cell: CellIndex) -> usize {
        cell.row * self.cols + cell.col
    }

    #[inline]
    pub fn cell_at(&self, index: usize) -> CellIndex {
        CellIndex { col: index % self.cols, row: index / self.cols }
    }

    /// Cell center in meters
    #[inline]
    pub fn cell_center(&self, cell: CellIndex) -> (f32, f32) {
        (
            self.bounds.x_min + (cell.col as f32 + 0.5) * self.resolution,
            self.bounds.y_min + (cell.row as f32 + 0.5) * self.resolution,
        )
    }

    /// Floor a position into its cell, `None` when outside the grid.
    ///
    /// A point exactly on the far pitch edge maps to the last cell.
    pub fn cell_of(&self, x: f32, y: f32) -> Option<CellIndex> {
        let col = Self::axis_index(x, self.bounds.x_min, self.bounds.x_max, self.resolution, self.cols)?;
        let row = Self::axis_index(y, self.bounds.y_min, self.bounds.y_max, self.resolution, self.rows)?;
        Some(CellIndex { col, row })
    }

    #[inline]
    fn axis_index(v: f32, min: f32, max: f32, resolution: f32, count: usize) -> Option<usize> {
        let f = (v - min) / resolution;
        if !(f >= 0.0) {
            return None;
        }
        let i = f.floor() as usize;
        if i < count {
            Some(i)
        } else if v <= max {
            Some(count - 1)
        } else {
            None
        }
    }
}

/// Scalar grid over the pitch, stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchGrid {
    #[serde(flatten)]
    pub spec: GridSpec,
    pub values: Vec<f32>, // len = cols*rows
}

impl PitchGrid {
    /// Evaluate `f` at every cell center.
    ///
    /// Cells are independent, so large grids are filled in parallel; the
    /// result is always in row-major order.
    pub fn build<F>(spec: GridSpec, parallel_threshold: usize, f: F) -> Self
    where
        F: Fn(f32, f32) -> f32 + Sync,
    {
        let eval = |i: usize| {
            let (x, y) = spec.cell_center(spec.cell_at(i));
            f(x, y)
        };
        let values: Vec<f32> = if spec.len() > parallel_threshold {
            (0..spec.len()).into_par_iter().map(eval).collect()
        } else {
            (0..spec.len()).map(eval).collect()
        };
        Self { spec, values }
    }

    /// Derive a same-shape grid from this one, cell for cell.
    pub fn map<F>(&self, parallel_threshold: usize, f: F) -> Self
    where
        F: Fn(f32, f32, f32) -> f32 + Sync,
    {
        let spec = self.spec;
        let eval = |(i, v): (usize, &f32)| {
            let (x, y) = spec.cell_center(spec.cell_at(i));
            f(x, y, *v)
        };
        let values: Vec<f32> = if spec.len() > parallel_threshold {
            self.values.par_iter().enumerate().map(eval).collect()
        } else {
            self.values.iter().enumerate().map(eval).collect()
        };
        Self { spec, values }
    }

    #[inline]
    pub fn get(&self, cell: CellIndex) -> f32 {
        self.values[self.spec.index(cell)]
    }

    /// Value of the cell containing `(x, y)`, `None` outside the grid.
    #[inline]
    pub fn lookup(&self, x: f32, y: f32) -> Option<f32> {
        self.spec.cell_of(x, y).map(|c| self.get(c))
    }

    /// Value of the cell containing `(x, y)`, `neutral` outside the grid.
    #[inline]
    pub fn lookup_or(&self, x: f32, y: f32, neutral: f32) -> f32 {
        self.lookup(x, y).unwrap_or(neutral)
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.spec.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.spec.rows
    }

    #[inline]
    pub fn resolution(&self) -> f32 {
        self.spec.resolution
    }

    #[inline]
    pub fn bounds(&self) -> PitchBounds {
        self.spec.bounds
    }

    pub fn min_value(&self) -> f32 {
        self.values.iter().cloned().fold(f32::INFINITY, f32::min)
    }

    pub fn max_value(&self) -> f32 {
        self.values.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn mean_value(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f32>() / self.values.len() as f32
    }

    /// Row-major 2-D copy (`rows[row][col]`) for presentation layers.
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.values.chunks(self.spec.cols).map(|r| r.to_vec()).collect()
    }
}
