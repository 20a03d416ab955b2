//! Formation line clustering parameters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinesConfig {
    /// Iteration cap for the 1-D clustering (default: 50)
    pub max_iterations: usize,
    /// Stop when no centroid moves further than this (default: 0.5m)
    pub convergence_m: f32,
}

impl Default for LinesConfig {
    fn default() -> Self {
        Self { max_iterations: 50, convergence_m: 0.5 }
    }
}
