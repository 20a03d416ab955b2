//! # Engine Configuration
//!
//! Every tuning constant of the models lives here so that alternate rulesets
//! or calibration sweeps can substitute values without touching algorithm
//! code.
//!
//! ## Usage
//! ```rust
//! use pv_core::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let small = EngineConfig::small_sided();
//! assert!(small.pitch.length() < config.pitch.length());
//! ```

mod carry_config;
mod control_config;
mod kinematics_config;
mod likelihood_config;
mod lines_config;
mod pass_config;
mod value_config;

pub use carry_config::CarryConfig;
pub use control_config::ControlConfig;
pub use kinematics_config::{KinematicsConfig, RoleSpeedTable};
pub use likelihood_config::LikelihoodConfig;
pub use lines_config::LinesConfig;
pub use pass_config::PassConfig;
pub use value_config::{ProgressionBand, ValueConfig};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::pitch::PitchBounds;

/// Finest grid cell any config may request (m)
pub const MIN_RESOLUTION_FLOOR_M: f32 = 0.05;

/// Full engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub pitch: PitchBounds,
    /// Grid cell size (m) suggested to hosts that do not pick their own
    #[serde(default = "default_resolution")]
    pub default_resolution_m: f32,
    #[serde(default)]
    pub kinematics: KinematicsConfig,
    #[serde(default)]
    pub control: ControlConfig,
    #[serde(default)]
    pub value: ValueConfig,
    #[serde(default)]
    pub pass: PassConfig,
    #[serde(default)]
    pub carry: CarryConfig,
    #[serde(default)]
    pub lines: LinesConfig,
    #[serde(default)]
    pub likelihood: LikelihoodConfig,
}

fn default_resolution() -> f32 {
    2.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pitch: PitchBounds::standard(),
            default_resolution_m: default_resolution(),
            kinematics: KinematicsConfig::default(),
            control: ControlConfig::default(),
            value: ValueConfig::default(),
            pass: PassConfig::default(),
            carry: CarryConfig::default(),
            lines: LinesConfig::default(),
            likelihood: LikelihoodConfig::default(),
        }
    }
}

impl EngineConfig {
    /// 11-a-side football on a 105m × 68m pitch (default)
    pub fn standard() -> Self {
        Self::default()
    }

    /// Small-sided games: 60m × 40m pitch, shorter passes, slower top speed
    pub fn small_sided() -> Self {
        let mut cfg = Self::default();
        cfg.pitch = PitchBounds::centered(60.0, 40.0);
        cfg.default_resolution_m = 1.0;
        cfg.kinematics.base_max_speed_mps = 5.0;
        cfg.kinematics.ball_speed_mps = 12.0;
        cfg.pass.long_pass_risk_scale_m = 25.0;
        cfg.likelihood.max_shot_m = 20.0;
        cfg.value.shot_cutoff_m = 20.0;
        cfg.value.shot_decay_m = 9.0;
        cfg
    }

    /// Paused playback: finer grid, nothing else changes
    pub fn static_analysis() -> Self {
        let mut cfg = Self::default();
        cfg.default_resolution_m = 0.5;
        cfg
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> CoreResult<()> {
        fn positive(name: &str, v: f32) -> CoreResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(CoreError::InvalidConfig(format!("{name} must be > 0, got {v}")))
            }
        }
        fn probability(name: &str, v: f32) -> CoreResult<()> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(CoreError::InvalidConfig(format!("{name} must be in [0, 1], got {v}")))
            }
        }

        if !(self.pitch.length().is_finite()
            && self.pitch.width().is_finite()
            && self.pitch.length() > 0.0
            && self.pitch.width() > 0.0)
        {
            return Err(CoreError::InvalidConfig(format!(
                "pitch must have positive size, got {:.2} x {:.2}",
                self.pitch.length(),
                self.pitch.width()
            )));
        }
        positive("default_resolution_m", self.default_resolution_m)?;

        let k = &self.kinematics;
        if !(k.reaction_time_s.is_finite() && k.reaction_time_s >= 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "reaction_time_s must be >= 0, got {}",
                k.reaction_time_s
            )));
        }
        positive("acceleration_mps2", k.acceleration_mps2)?;
        positive("base_max_speed_mps", k.base_max_speed_mps)?;
        positive("ball_speed_mps", k.ball_speed_mps)?;
        for m in k.role_speed.all() {
            positive("role speed multiplier", m)?;
        }

        positive("influence_steepness", self.control.influence_steepness)?;
        probability("neutral_control", self.control.neutral_control)?;
        if !(self.control.min_resolution_m >= MIN_RESOLUTION_FLOOR_M && self.control.min_resolution_m.is_finite()) {
            return Err(CoreError::InvalidConfig(format!(
                "min_resolution_m must be >= {MIN_RESOLUTION_FLOOR_M}, got {}",
                self.control.min_resolution_m
            )));
        }
        if self.control.max_grid_cells == 0 {
            return Err(CoreError::InvalidConfig("max_grid_cells must be >= 1".to_string()));
        }

        let v = &self.value;
        let contiguous = v.progression_bands.first().is_some_and(|b| b.start == 0.0)
            && v.progression_bands.last().is_some_and(|b| b.end == 1.0)
            && v.progression_bands.iter().all(|b| b.start < b.end)
            && v.progression_bands.windows(2).all(|w| w[0].end == w[1].start);
        if !contiguous {
            return Err(CoreError::InvalidConfig(
                "progression_bands must cover [0, 1] in contiguous ascending bands".to_string(),
            ));
        }
        for b in &v.progression_bands {
            probability("progression band value", b.value_start)?;
            probability("progression band value", b.value_end)?;
        }
        probability("corridor_penalty", v.corridor_penalty)?;
        positive("shot_decay_m", v.shot_decay_m)?;
        positive("shot_angle_variance", v.shot_angle_variance)?;
        positive("shot_cutoff_m", v.shot_cutoff_m)?;
        probability("shot_max_quality", v.shot_max_quality)?;
        probability("shot_baseline", v.shot_baseline)?;

        let p = &self.pass;
        positive("interception_steepness", p.interception_steepness)?;
        positive("perpendicular_decay_m", p.perpendicular_decay_m)?;
        positive("long_pass_risk_scale_m", p.long_pass_risk_scale_m)?;
        probability("max_interception", p.max_interception)?;
        probability("long_pass_risk_weight", p.long_pass_risk_weight)?;
        if p.medium_risk_threshold > p.high_risk_threshold {
            return Err(CoreError::InvalidConfig(format!(
                "medium_risk_threshold ({}) must not exceed high_risk_threshold ({})",
                p.medium_risk_threshold, p.high_risk_threshold
            )));
        }
        if !(p.min_backward_multiplier > 0.0 && p.min_backward_multiplier <= 1.0) {
            return Err(CoreError::InvalidConfig(format!(
                "min_backward_multiplier must be in (0, 1], got {}",
                p.min_backward_multiplier
            )));
        }
        if p.max_forward_multiplier < 1.0 {
            return Err(CoreError::InvalidConfig(format!(
                "max_forward_multiplier must be >= 1, got {}",
                p.max_forward_multiplier
            )));
        }

        let c = &self.carry;
        if !(c.pressure_close_m < c.pressure_moderate_m && c.pressure_moderate_m < c.pressure_far_m) {
            return Err(CoreError::InvalidConfig(format!(
                "pressure bands must be increasing, got {} / {} / {}",
                c.pressure_close_m, c.pressure_moderate_m, c.pressure_far_m
            )));
        }
        if !(0.0 <= c.moderate_pressure && c.moderate_pressure <= c.close_pressure && c.close_pressure <= c.tight_pressure)
            || c.tight_pressure > 1.0
        {
            return Err(CoreError::InvalidConfig(format!(
                "pressure levels must be ascending in [0, 1], got {} / {} / {}",
                c.moderate_pressure, c.close_pressure, c.tight_pressure
            )));
        }
        probability("tight_pressure_ramp", c.tight_pressure_ramp)?;
        probability("extra_close_opponent_pressure", c.extra_close_opponent_pressure)?;
        probability("heading_cos", c.heading_cos)?;
        positive("turnover_window_s", c.turnover_window_s)?;
        positive("horizon_s", c.horizon_s)?;
        probability("base_turnover_rate", c.base_turnover_rate)?;
        probability("max_turnover", c.max_turnover)?;

        if self.lines.max_iterations == 0 {
            return Err(CoreError::InvalidConfig("lines.max_iterations must be >= 1".to_string()));
        }
        positive("convergence_m", self.lines.convergence_m)?;

        probability("min_pass_probability", self.likelihood.min_pass_probability)?;
        positive("max_shot_m", self.likelihood.max_shot_m)?;
        Ok(())
    }

    /// Load from JSON string and validate.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

// ========== Tests ==========
