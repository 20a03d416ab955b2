//! Action likelihood heuristics

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikelihoodConfig {
    // === Shoot ===
    /// Inside this distance shooting is near-certain to be considered
    pub six_yard_m: f32,
    pub six_yard_probability: f32,
    /// Penalty-area scale distance
    pub box_m: f32,
    pub box_edge_probability: f32,
    /// Exponential decay length outside the box
    pub outside_box_decay_m: f32,
    /// Beyond this distance shooting is near-zero
    pub max_shot_m: f32,
    pub long_range_probability: f32,
    /// Pressure reduces shooting by up to this fraction
    pub shot_pressure_penalty: f32,

    // === Carry ===
    /// Speed at which the momentum term saturates
    pub carry_full_speed_mps: f32,
    pub carry_base: f32,
    pub carry_speed_weight: f32,
    /// Look-ahead distance along the carrier's velocity (default: 5m)
    pub carry_lookahead_m: f32,
    pub carry_space_weight: f32,
    /// Pressure above which carrying is discouraged
    pub high_pressure: f32,
    pub high_pressure_factor: f32,
    /// Normalized attack progress of the defensive third
    pub defensive_third: f32,
    pub defensive_third_factor: f32,

    // === Pass ===
    pub min_pass_probability: f32,
}

impl Default for LikelihoodConfig {
    fn default() -> Self {
        Self {
            six_yard_m: 5.5,
            six_yard_probability: 0.6,
            box_m: 16.5,
            box_edge_probability: 0.25,
            outside_box_decay_m: 4.0,
            max_shot_m: 25.0,
            long_range_probability: 0.005,
            shot_pressure_penalty: 0.5,

            carry_full_speed_mps: 7.0,
            carry_base: 0.1,
            carry_speed_weight: 0.35,
            carry_lookahead_m: 5.0,
            carry_space_weight: 0.2,
            high_pressure: 0.6,
            high_pressure_factor: 0.6,
            defensive_third: 1.0 / 3.0,
            defensive_third_factor: 0.7,

            min_pass_probability: 0.15,
        }
    }
}
