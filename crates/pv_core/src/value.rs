//! Possession value field
//!
//! ```text
//! value = progression(x, y) × (control - 0.5) × 2      ∈ [-1, 1]
//! ```
//!
//! Positive where the possessing side controls space worth progressing
//! into, negative where the opponent controls it. Shot quality is a separate
//! location model used only for the shoot action.

use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, ValueConfig};
use crate::control::{ControlField, ControlModel};
use crate::grid::PitchGrid;
use crate::likelihood::ActionLikelihood;
use crate::pitch::{distance, PitchBounds};
use crate::snapshot::PossessionSnapshot;

/// Location-only possession progression potential in [0, 1].
pub fn progression_potential(cfg: &ValueConfig, pitch: &PitchBounds, x: f32, y: f32, attacking_right: bool) -> f32 {
    let t = pitch.attack_progress(x, attacking_right).clamp(0.0, 1.0);

    let base = match cfg.progression_bands.iter().find(|b| t <= b.end) {
        Some(band) => band.value(t),
        None => cfg.progression_bands.last().map_or(0.0, |b| b.value_end),
    };

    let corridor = 1.0 - cfg.corridor_penalty * pitch.lateral_fraction(y);
    (base * corridor).clamp(0.0, 1.0)
}

/// Shot geometry and quality from one location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotEvaluation {
    /// Scoring chance proxy, 0.01 to 0.8 with default tuning
    pub quality: f32,
    /// Distance to the attacked goal center
    pub distance_m: f32,
    /// Angle off the goal's central axis, degrees
    pub angle_deg: f32,
}

/// Evaluate a shot from `(x, y)` at the attacked goal.
pub fn evaluate_shot(cfg: &ValueConfig, pitch: &PitchBounds, x: f32, y: f32, attacking_right: bool) -> ShotEvaluation {
    let goal = pitch.attack_goal(attacking_right);
    let dist = distance((x, y), goal);
    let depth = (goal.0 - x).abs();
    let lateral = (y - goal.1).abs();
    let angle_deg = lateral.atan2(depth).to_degrees();

    let quality = if dist > cfg.shot_cutoff_m {
        cfg.shot_baseline
    } else {
        let decay = (-dist / cfg.shot_decay_m).exp();
        let angle = (-(angle_deg * angle_deg) / (2.0 * cfg.shot_angle_variance)).exp();
        (cfg.shot_max_quality * decay * angle).max(cfg.shot_baseline)
    };

    ShotEvaluation { quality, distance_m: dist, angle_deg }
}

/// Shot quality in [baseline, max quality]. Only used for the shoot action.
#[inline]
pub fn shot_quality(cfg: &ValueConfig, pitch: &PitchBounds, x: f32, y: f32, attacking_right: bool) -> f32 {
    evaluate_shot(cfg, pitch, x, y, attacking_right).quality
}

/// Signed value from a control probability.
#[inline]
pub fn value_from_control(progression: f32, control: f32) -> f32 {
    (progression * (control - 0.5) * 2.0).clamp(-1.0, 1.0)
}

/// Possession value per cell, in [-1, 1], plus the control field it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueField {
    #[serde(flatten)]
    pub grid: PitchGrid,
    pub min: f32,
    pub max: f32,
    pub control: ControlField,
}

impl ValueField {
    /// Value at `(x, y)`; 0.0 (neutral) outside the grid.
    #[inline]
    pub fn value_at(&self, x: f32, y: f32) -> f32 {
        self.grid.lookup_or(x, y, 0.0)
    }

    #[inline]
    pub fn control_at(&self, x: f32, y: f32) -> f32 {
        self.control.control_at(x, y)
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.grid.values
    }
}

/// Per-action values fed into the decomposition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionValues {
    pub best_pass: f32,
    pub carry: f32,
    pub shot: f32,
}

/// `P(pass)·pass + P(carry)·carry + P(shoot)·shot`.
///
/// Probabilities are used as given; normalising them is the caller's job.
pub fn decomposed_value(likelihood: &ActionLikelihood, values: &ActionValues) -> f32 {
    likelihood.pass * values.best_pass + likelihood.carry * values.carry + likelihood.shoot * values.shot
}

/// Progression × control model.
#[derive(Debug, Clone, Copy)]
pub struct ValueModel<'a> {
    config: &'a EngineConfig,
}

impl<'a> ValueModel<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn control(&self) -> ControlModel<'a> {
        ControlModel::new(self.config)
    }

    #[inline]
    pub fn pitch(&self) -> &PitchBounds {
        &self.config.pitch
    }

    #[inline]
    pub fn progression(&self, x: f32, y: f32, attacking_right: bool) -> f32 {
        progression_potential(&self.config.value, &self.config.pitch, x, y, attacking_right)
    }

    #[inline]
    pub fn shot(&self, x: f32, y: f32, attacking_right: bool) -> ShotEvaluation {
        evaluate_shot(&self.config.value, &self.config.pitch, x, y, attacking_right)
    }

    /// Value at `(x, y)` computed from scratch (control evaluated directly).
    pub fn value_at(&self, snapshot: &PossessionSnapshot, x: f32, y: f32) -> f32 {
        let control = self.control().control_at_snapshot(snapshot, x, y);
        value_from_control(self.progression(x, y, snapshot.attacking_right), control)
    }

    /// This side's loss if the opponent wins the ball at `(x, y)`.
    ///
    /// Evaluated from scratch on the role-swapped snapshot and negated.
    pub fn turnover_value_at(&self, snapshot: &PossessionSnapshot, x: f32, y: f32) -> f32 {
        let swapped = snapshot.role_swapped(x, y);
        -self.value_at(&swapped, x, y)
    }

    /// Value at `(x, y)` reading control from a prebuilt field.
    pub fn value_with_control(&self, field: &ControlField, attacking_right: bool, x: f32, y: f32) -> f32 {
        value_from_control(self.progression(x, y, attacking_right), field.control_at(x, y))
    }

    /// Build the control field, then map each cell to a value.
    pub fn generate_value_field(&self, snapshot: &PossessionSnapshot, resolution: f32) -> ValueField {
        let control = self.control().generate_for(snapshot, resolution);
        self.value_field_from_control(control, snapshot.attacking_right)
    }

    /// Value field derived cell-for-cell from an existing control field.
    pub fn value_field_from_control(&self, control: ControlField, attacking_right: bool) -> ValueField {
        let grid = control.grid.map(self.config.control.parallel_cell_threshold, |x, y, c| {
            value_from_control(self.progression(x, y, attacking_right), c)
        });
        let min = grid.min_value();
        let max = grid.max_value();
        log::debug!("value field {}x{}: min={:.3} max={:.3}", grid.cols(), grid.rows(), min, max);
        ValueField { grid, min, max, control }
    }
}
