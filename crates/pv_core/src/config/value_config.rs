//! Progression and shot value parameters

use serde::{Deserialize, Serialize};

/// One linear segment of the progression curve over normalized attack progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressionBand {
    pub start: f32,
    pub end: f32,
    pub value_start: f32,
    pub value_end: f32,
}

impl ProgressionBand {
    const fn new(start: f32, end: f32, value_start: f32, value_end: f32) -> Self {
        Self { start, end, value_start, value_end }
    }

    #[inline]
    pub fn value(&self, t: f32) -> f32 {
        self.value_start + (self.value_end - self.value_start) * (t - self.start) / (self.end - self.start)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueConfig {
    // === Progression ===
    /// Contiguous bands covering [0, 1], slopes increasing band by band
    pub progression_bands: Vec<ProgressionBand>,
    /// Value lost at the touchline relative to the center line (default: 0.25)
    pub corridor_penalty: f32,

    // === Shot quality ===
    /// Distance decay length (default: 12m)
    pub shot_decay_m: f32,
    /// Lateral angle variance in deg² (default: 150)
    pub shot_angle_variance: f32,
    pub shot_max_quality: f32,
    /// Floor, and the quality beyond the cutoff
    pub shot_baseline: f32,
    /// Beyond this distance only the baseline remains (default: 30m)
    pub shot_cutoff_m: f32,
}

impl Default for ValueConfig {
    fn default() -> Self {
        Self {
            progression_bands: vec![
                ProgressionBand::new(0.00, 0.28, 0.05, 0.10), // deep defensive
                ProgressionBand::new(0.28, 0.50, 0.10, 0.19), // defensive third
                ProgressionBand::new(0.50, 0.67, 0.20, 0.40), // deep middle
                ProgressionBand::new(0.67, 0.82, 0.40, 0.62), // attacking middle
                ProgressionBand::new(0.82, 0.95, 0.65, 0.88), // attacking third
                ProgressionBand::new(0.95, 1.00, 0.90, 0.99), // final zone
            ],
            corridor_penalty: 0.25,

            shot_decay_m: 12.0,
            shot_angle_variance: 150.0,
            shot_max_quality: 0.8,
            shot_baseline: 0.01,
            shot_cutoff_m: 30.0,
        }
    }
}
