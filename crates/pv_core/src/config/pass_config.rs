//! Pass evaluation parameters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassConfig {
    // === Interception ===
    /// Logistic steepness on (ball time - interceptor time) (default: 5.0)
    pub interception_steepness: f32,
    /// Perpendicular distance decay length (default: 3m)
    pub perpendicular_decay_m: f32,
    /// Weight of generic long-pass risk (default: 0.1)
    pub long_pass_risk_weight: f32,
    /// Distance scale of generic long-pass risk (default: 40m)
    pub long_pass_risk_scale_m: f32,
    /// Cap on total interception probability (default: 0.95)
    pub max_interception: f32,
    /// Interceptor may arrive this late and still win the ball (default: 0.3s)
    pub turnover_grace_s: f32,

    // === Risk tiers ===
    pub high_risk_threshold: f32,
    pub medium_risk_threshold: f32,

    // === Direction multiplier ===
    /// Net advance beyond which a pass is "strongly" forward/backward (default: 10m)
    pub strong_direction_m: f32,
    /// Multiplier gained per meter inside the mild band
    pub mild_slope_per_m: f32,
    /// Largest forward bonus (default: 1.5)
    pub max_forward_multiplier: f32,
    /// Advance beyond the strong threshold at which the bonus saturates
    pub forward_saturation_m: f32,
    /// Multiplier lost per meter beyond the strong backward threshold
    pub strong_backward_slope_per_m: f32,
    /// Backward penalty floor (default: 0.3)
    pub min_backward_multiplier: f32,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            interception_steepness: 5.0,
            perpendicular_decay_m: 3.0,
            long_pass_risk_weight: 0.1,
            long_pass_risk_scale_m: 40.0,
            max_interception: 0.95,
            turnover_grace_s: 0.3,

            high_risk_threshold: 0.5,
            medium_risk_threshold: 0.25,

            strong_direction_m: 10.0,
            mild_slope_per_m: 0.02,
            max_forward_multiplier: 1.5,
            forward_saturation_m: 30.0,
            strong_backward_slope_per_m: 0.025,
            min_backward_multiplier: 0.3,
        }
    }
}
