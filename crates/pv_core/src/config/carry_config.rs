//! Carry evaluation parameters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarryConfig {
    // === Pressure bands (nearest opponent distance) ===
    /// Beyond this, pressure is negligible (default: 6m)
    pub pressure_far_m: f32,
    /// Moderate band upper edge (default: 3m)
    pub pressure_moderate_m: f32,
    /// Close band upper edge (default: 1.5m)
    pub pressure_close_m: f32,
    /// Pressure at the outer edge of the moderate band (default: 0.3)
    pub moderate_pressure: f32,
    /// Pressure at the outer edge of the close band (default: 0.7)
    pub close_pressure: f32,
    /// Pressure floor once an opponent is inside the close radius
    pub tight_pressure: f32,
    /// Extra pressure reached at zero distance
    pub tight_pressure_ramp: f32,
    /// Extra pressure per additional opponent inside the close radius
    pub extra_close_opponent_pressure: f32,

    // === Turnover ===
    /// Turnover rate at full pressure per window (default: 0.3)
    pub base_turnover_rate: f32,
    /// Window the base rate refers to (default: 0.25s)
    pub turnover_window_s: f32,
    /// Horizon for turnover compounding and position projection (default: 1.0s)
    pub horizon_s: f32,
    /// Above this speed the carrier is harder to stop but riskier (default: 6 m/s)
    pub fast_speed_mps: f32,
    pub fast_speed_factor: f32,
    /// Below this speed the carrier is an easy pressing target (default: 2 m/s)
    pub slow_speed_mps: f32,
    pub slow_speed_factor: f32,
    /// Cosine beyond which the run counts as toward/away from the presser
    pub heading_cos: f32,
    /// Scale when running at the nearest opponent
    pub toward_opponent_factor: f32,
    /// Scale when running away from the nearest opponent
    pub away_from_opponent_factor: f32,
    pub max_turnover: f32,
}

impl Default for CarryConfig {
    fn default() -> Self {
        Self {
            pressure_far_m: 6.0,
            pressure_moderate_m: 3.0,
            pressure_close_m: 1.5,
            moderate_pressure: 0.3,
            close_pressure: 0.7,
            tight_pressure: 0.85,
            tight_pressure_ramp: 0.1,
            extra_close_opponent_pressure: 0.05,

            base_turnover_rate: 0.3,
            turnover_window_s: 0.25,
            horizon_s: 1.0,
            fast_speed_mps: 6.0,
            fast_speed_factor: 1.1,
            slow_speed_mps: 2.0,
            slow_speed_factor: 1.2,
            heading_cos: 0.5,
            toward_opponent_factor: 1.3,
            away_from_opponent_factor: 0.8,
            max_turnover: 0.95,
        }
    }
}
