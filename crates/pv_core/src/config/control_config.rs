//! Spatial control field parameters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Logistic steepness applied to time advantage (default: 4.0)
    pub influence_steepness: f32,
    /// Control reported when nobody has influence or a lookup misses the grid
    pub neutral_control: f32,
    /// Grids with more cells than this are generated in parallel
    pub parallel_cell_threshold: usize,
    /// Smallest accepted grid cell size (m)
    pub min_resolution_m: f32,
    /// Cell budget per grid; coarser cells are used above it
    pub max_grid_cells: usize,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            influence_steepness: 4.0,
            neutral_control: 0.5,
            parallel_cell_threshold: 512,
            min_resolution_m: 0.25,
            max_grid_cells: 250_000,
        }
    }
}
