//! Action likelihood model
//!
//! Heuristic (non-learned) probabilities that the carrier shoots, carries
//! or passes next:
//! - shoot: distance bands to the attacked goal × angle × (1 - pressure penalty)
//! - carry: speed term plus a space bonus from control 5 m ahead, damped
//!   under high pressure and in the defensive third
//! - pass: `max(floor, 1 - shoot - carry)`
//!
//! The three are renormalised to sum to 1.

use serde::{Deserialize, Serialize};

use crate::carry::CarryEvaluator;
use crate::config::{EngineConfig, LikelihoodConfig};
use crate::control::{ControlField, ControlModel};
use crate::pitch::distance;
use crate::snapshot::{Mover, PossessionSnapshot};

/// Below this speed the look-ahead follows the attack direction instead
const MIN_HEADING_SPEED: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Shoot,
    Carry,
    Pass,
}

/// Shoot/carry/pass probabilities, summing to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionLikelihood {
    pub shoot: f32,
    pub carry: f32,
    pub pass: f32,
}

impl ActionLikelihood {
    /// Scale to sum to 1. An all-zero input becomes a certain pass.
    pub fn normalized(self) -> Self {
        let total = self.shoot + self.carry + self.pass;
        if !(total > 0.0) {
            return Self { shoot: 0.0, carry: 0.0, pass: 1.0 };
        }
        Self { shoot: self.shoot / total, carry: self.carry / total, pass: self.pass / total }
    }

    pub fn most_likely(&self) -> ActionKind {
        if self.shoot >= self.carry && self.shoot >= self.pass {
            ActionKind::Shoot
        } else if self.carry >= self.pass {
            ActionKind::Carry
        } else {
            ActionKind::Pass
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LikelihoodModel<'a> {
    config: &'a EngineConfig,
}

impl<'a> LikelihoodModel<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    #[inline]
    fn cfg(&self) -> &'a LikelihoodConfig {
        &self.config.likelihood
    }

    /// Raw shoot propensity before normalisation.
    pub fn shoot_score(&self, carrier: &Mover, attacking_right: bool, pressure: f32) -> f32 {
        let cfg = self.cfg();
        let goal = self.config.pitch.attack_goal(attacking_right);
        let d = distance(carrier.position(), goal);

        let by_distance = if d <= cfg.six_yard_m {
            cfg.six_yard_probability
        } else if d <= cfg.box_m {
            let t = (d - cfg.six_yard_m) / (cfg.box_m - cfg.six_yard_m);
            cfg.six_yard_probability + (cfg.box_edge_probability - cfg.six_yard_probability) * t
        } else if d <= cfg.max_shot_m {
            (cfg.box_edge_probability * (-(d - cfg.box_m) / cfg.outside_box_decay_m).exp())
                .max(cfg.long_range_probability)
        } else {
            cfg.long_range_probability
        };

        // cos of the angle off the goal's central axis
        let angle = if d > f32::EPSILON { (goal.0 - carrier.x).abs() / d } else { 1.0 };
        let pressure_factor = 1.0 - cfg.shot_pressure_penalty * pressure.clamp(0.0, 1.0);
        (by_distance * angle * pressure_factor).clamp(0.0, 1.0)
    }

    /// Point `carry_lookahead_m` ahead along the carrier's velocity (or the
    /// attack direction when standing still).
    pub fn lookahead_point(&self, carrier: &Mover, attacking_right: bool) -> (f32, f32) {
        let ahead = self.cfg().carry_lookahead_m;
        let speed = carrier.speed();
        let (ux, uy) = if speed > MIN_HEADING_SPEED {
            (carrier.vx / speed, carrier.vy / speed)
        } else if attacking_right {
            (1.0, 0.0)
        } else {
            (-1.0, 0.0)
        };
        (carrier.x + ux * ahead, carrier.y + uy * ahead)
    }

    /// Raw carry propensity before normalisation, given control ahead.
    pub fn carry_score(&self, carrier: &Mover, attacking_right: bool, pressure: f32, control_ahead: f32) -> f32 {
        let cfg = self.cfg();
        let speed_term = (carrier.speed() / cfg.carry_full_speed_mps).min(1.0);
        let mut score = cfg.carry_base + cfg.carry_speed_weight * speed_term + cfg.carry_space_weight * control_ahead;

        if pressure > cfg.high_pressure {
            score *= cfg.high_pressure_factor;
        }
        if self.config.pitch.attack_progress(carrier.x, attacking_right) < cfg.defensive_third {
            score *= cfg.defensive_third_factor;
        }
        score.clamp(0.0, 1.0)
    }

    fn combine(&self, carrier: &Mover, snapshot: &PossessionSnapshot, control_ahead: f32) -> ActionLikelihood {
        let pressure = CarryEvaluator::new(self.config).pressure_score(carrier, &snapshot.opponent);
        let shoot = self.shoot_score(carrier, snapshot.attacking_right, pressure);
        let carry = self.carry_score(carrier, snapshot.attacking_right, pressure, control_ahead);
        let pass = (1.0 - shoot - carry).max(self.cfg().min_pass_probability);
        ActionLikelihood { shoot, carry, pass }.normalized()
    }

    /// Likelihoods with control ahead computed directly.
    pub fn evaluate(&self, carrier: &Mover, snapshot: &PossessionSnapshot) -> ActionLikelihood {
        let (ax, ay) = self.lookahead_point(carrier, snapshot.attacking_right);
        let control = ControlModel::new(self.config).control_at_snapshot(snapshot, ax, ay);
        self.combine(carrier, snapshot, control)
    }

    /// Likelihoods reading control ahead from a prebuilt field.
    pub fn evaluate_with_field(
        &self,
        carrier: &Mover,
        snapshot: &PossessionSnapshot,
        field: &ControlField,
    ) -> ActionLikelihood {
        let (ax, ay) = self.lookahead_point(carrier, snapshot.attacking_right);
        self.combine(carrier, snapshot, field.control_at(ax, ay))
    }
}
