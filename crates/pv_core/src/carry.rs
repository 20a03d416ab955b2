//! Carry evaluator
//!
//! Short-horizon continuation of the carrier's current run: where it ends up,
//! what that point is worth, and the chance of being dispossessed on the way.

use serde::{Deserialize, Serialize};

use crate::config::{CarryConfig, EngineConfig};
use crate::pass::PassOption;
use crate::pitch::PitchBounds;
use crate::snapshot::{Mover, MoverId, PossessionSnapshot};
use crate::value::{ValueField, ValueModel};

/// Below this speed the heading is not meaningful
const MIN_HEADING_SPEED: f32 = 0.1;

/// Carry outcome for the ball carrier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarryEvaluation {
    pub carrier: MoverId,
    pub current_position: (f32, f32),
    pub current_value: f32,
    pub projected_position: (f32, f32),
    pub projected_value: f32,
    pub pressure: f32,
    pub turnover_probability: f32,
    /// Negated opponent value if dispossessed at the current position
    pub turnover_value: f32,
    /// `(1 - p) × projected + p × turnover`
    pub carry_value: f32,
    pub value_added: f32,
}

/// Carry against the best available pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarryComparison {
    pub pass_recommended: bool,
    pub best_value: f32,
    pub carry_value: f32,
    pub best_pass_value: Option<f32>,
    pub best_receiver: Option<MoverId>,
}

/// Nearest opponent and its distance.
fn nearest_opponent<'m>(carrier: &Mover, opponents: &'m [Mover]) -> Option<(&'m Mover, f32)> {
    opponents
        .iter()
        .map(|o| (o, carrier.distance_to(o.x, o.y)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

#[derive(Debug, Clone, Copy)]
pub struct CarryEvaluator<'a> {
    config: &'a EngineConfig,
}

impl<'a> CarryEvaluator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    #[inline]
    fn cfg(&self) -> &'a CarryConfig {
        &self.config.carry
    }

    #[inline]
    pub fn value_model(&self) -> ValueModel<'a> {
        ValueModel::new(self.config)
    }

    /// Pressure on the carrier in [0, 1] from the nearest opponent.
    ///
    /// | nearest distance | pressure                                 |
    /// |------------------|------------------------------------------|
    /// | ≥ 6 m            | 0                                        |
    /// | 3–6 m            | 0 → 0.3                                  |
    /// | 1.5–3 m          | 0.3 → 0.7                                |
    /// | < 1.5 m          | 0.85 → 0.95, +0.05 per extra close opponent |
    pub fn pressure_score(&self, carrier: &Mover, opponents: &[Mover]) -> f32 {
        let cfg = self.cfg();
        let Some((_, d)) = nearest_opponent(carrier, opponents) else {
            return 0.0;
        };

        let score = if d >= cfg.pressure_far_m {
            0.0
        } else if d >= cfg.pressure_moderate_m {
            cfg.moderate_pressure * (cfg.pressure_far_m - d) / (cfg.pressure_far_m - cfg.pressure_moderate_m)
        } else if d >= cfg.pressure_close_m {
            cfg.moderate_pressure
                + (cfg.close_pressure - cfg.moderate_pressure) * (cfg.pressure_moderate_m - d)
                    / (cfg.pressure_moderate_m - cfg.pressure_close_m)
        } else {
            let close = opponents
                .iter()
                .filter(|o| carrier.distance_to(o.x, o.y) < cfg.pressure_close_m)
                .count();
            cfg.tight_pressure
                + cfg.tight_pressure_ramp * (cfg.pressure_close_m - d) / cfg.pressure_close_m
                + cfg.extra_close_opponent_pressure * close.saturating_sub(1) as f32
        };
        score.clamp(0.0, 1.0)
    }

    /// Probability of losing the ball within `horizon_s`, in [0, max_turnover].
    pub fn turnover_probability(&self, carrier: &Mover, opponents: &[Mover], horizon_s: f32) -> f32 {
        let cfg = self.cfg();
        if horizon_s <= 0.0 {
            return 0.0;
        }
        let mut base = self.pressure_score(carrier, opponents) * cfg.base_turnover_rate;

        let speed = carrier.speed();
        if speed > cfg.fast_speed_mps {
            base *= cfg.fast_speed_factor;
        } else if speed < cfg.slow_speed_mps {
            base *= cfg.slow_speed_factor;
        }

        if speed > MIN_HEADING_SPEED {
            if let Some((opp, d)) = nearest_opponent(carrier, opponents) {
                if d > f32::EPSILON {
                    let cos = (carrier.vx * (opp.x - carrier.x) + carrier.vy * (opp.y - carrier.y)) / (speed * d);
                    if cos > cfg.heading_cos {
                        base *= cfg.toward_opponent_factor;
                    } else if cos < -cfg.heading_cos {
                        base *= cfg.away_from_opponent_factor;
                    }
                }
            }
        }

        let base = base.clamp(0.0, 1.0);
        let p = 1.0 - (1.0 - base).powf(horizon_s / cfg.turnover_window_s);
        p.clamp(0.0, cfg.max_turnover)
    }

    /// Straight-line extrapolation, clamped to `bounds`.
    pub fn project_position(&self, carrier: &Mover, horizon_s: f32, bounds: &PitchBounds) -> (f32, f32) {
        bounds.clamp_position(carrier.x + carrier.vx * horizon_s, carrier.y + carrier.vy * horizon_s)
    }

    fn evaluate_from(
        &self,
        carrier: &Mover,
        snapshot: &PossessionSnapshot,
        field: Option<&ValueField>,
    ) -> CarryEvaluation {
        let model = self.value_model();
        let horizon = self.cfg().horizon_s;
        let current = carrier.position();
        let projected = self.project_position(carrier, horizon, model.pitch());

        let (current_value, projected_value) = match field {
            Some(f) => (f.value_at(current.0, current.1), f.value_at(projected.0, projected.1)),
            None => {
                let moved = snapshot.with_ball_at(projected.0, projected.1);
                (
                    model.value_at(snapshot, current.0, current.1),
                    model.value_at(&moved, projected.0, projected.1),
                )
            }
        };

        let pressure = self.pressure_score(carrier, &snapshot.opponent);
        let turnover_probability = self.turnover_probability(carrier, &snapshot.opponent, horizon);
        let turnover_value = model.turnover_value_at(snapshot, current.0, current.1);
        let carry_value = (1.0 - turnover_probability) * projected_value + turnover_probability * turnover_value;

        CarryEvaluation {
            carrier: carrier.id,
            current_position: current,
            current_value,
            projected_position: projected,
            projected_value,
            pressure,
            turnover_probability,
            turnover_value,
            carry_value,
            value_added: carry_value - current_value,
        }
    }

    /// Evaluate carrying on, computing every value from scratch.
    pub fn evaluate(&self, carrier: &Mover, snapshot: &PossessionSnapshot) -> CarryEvaluation {
        self.evaluate_from(carrier, snapshot, None)
    }

    /// Evaluate carrying on, reading current/projected values from a prebuilt field.
    pub fn evaluate_with_field(
        &self,
        carrier: &Mover,
        snapshot: &PossessionSnapshot,
        field: &ValueField,
    ) -> CarryEvaluation {
        self.evaluate_from(carrier, snapshot, Some(field))
    }
}

/// Compare the carry against the pass with the highest expected value.
pub fn compare_with_passes(carry: &CarryEvaluation, options: &[PassOption]) -> CarryComparison {
    let best = options.iter().max_by(|a, b| a.expected_value.total_cmp(&b.expected_value));
    let pass_recommended = best.is_some_and(|p| p.expected_value > carry.carry_value);
    let best_value = best.map_or(carry.carry_value, |p| p.expected_value.max(carry.carry_value));

    CarryComparison {
        pass_recommended,
        best_value,
        carry_value: carry.carry_value,
        best_pass_value: best.map(|p| p.expected_value),
        best_receiver: best.map(|p| p.receiver),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass::PassEvaluator;
    use crate::snapshot::{Ball, Role};

    fn mover(id: u32, x: f32, y: f32) -> Mover {
        Mover::new(id, Role::CentralMidfielder, x, y)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_pressure_bands() {
        let cfg = EngineConfig::default();
        let eval = CarryEvaluator::new(&cfg);
        let c = mover(1, 0.0, 0.0);

        assert_eq!(eval.pressure_score(&c, &[]), 0.0);
        assert_eq!(eval.pressure_score(&c, &[mover(2, 10.0, 0.0)]), 0.0);
        assert_eq!(eval.pressure_score(&c, &[mover(2, 6.0, 0.0)]), 0.0);
        assert!(approx(eval.pressure_score(&c, &[mover(2, 4.5, 0.0)]), 0.15));
        assert!(approx(eval.pressure_score(&c, &[mover(2, 3.0, 0.0)]), 0.3));
        assert!(approx(eval.pressure_score(&c, &[mover(2, 2.25, 0.0)]), 0.5));
        assert!(approx(eval.pressure_score(&c, &[mover(2, 1.5, 0.0)]), 0.7));
        assert!(approx(eval.pressure_score(&c, &[mover(2, 0.0, 0.0)]), 0.95));
    }

    #[test]
    fn test_pressure_extra_close_opponents() {
        let cfg = EngineConfig::default();
        let eval = CarryEvaluator::new(&cfg);
        let c = mover(1, 0.0, 0.0);
        let one = eval.pressure_score(&c, &[mover(2, 0.75, 0.0)]);
        let two = eval.pressure_score(&c, &[mover(2, 0.75, 0.0), mover(3, -1.0, 0.0)]);
        assert!(approx(one, 0.9));
        assert!(approx(two, 0.95));
        let crowd: Vec<Mover> = (0..6).map(|i| mover(10 + i, 0.2 * i as f32, 0.1)).collect();
        assert_eq!(eval.pressure_score(&c, &crowd), 1.0);
    }

    #[test]
    fn test_pressure_levels_follow_config() {
        let mut cfg = EngineConfig::default();
        cfg.carry.moderate_pressure = 0.2;
        cfg.carry.close_pressure = 0.6;
        cfg.carry.tight_pressure = 0.8;
        let eval = CarryEvaluator::new(&cfg);
        let c = mover(1, 0.0, 0.0);
        assert!(approx(eval.pressure_score(&c, &[mover(2, 3.0, 0.0)]), 0.2));
        assert!(approx(eval.pressure_score(&c, &[mover(2, 1.5, 0.0)]), 0.6));
        assert!(approx(eval.pressure_score(&c, &[mover(2, 0.0, 0.0)]), 0.9));
    }

    #[test]
    fn test_turnover_horizon_compounds() {
        let cfg = EngineConfig::default();
        let eval = CarryEvaluator::new(&cfg);
        let c = mover(1, 0.0, 0.0);
        let opp = [mover(2, 2.25, 0.0)];

        // pressure 0.5 → base 0.15, stationary → ×1.2
        let window = eval.turnover_probability(&c, &opp, 0.25);
        assert!(approx(window, 0.18));
        let second = eval.turnover_probability(&c, &opp, 1.0);
        assert!(approx(second, 1.0 - 0.82f32.powi(4)));
        assert_eq!(eval.turnover_probability(&c, &opp, 0.0), 0.0);
        assert_eq!(eval.turnover_probability(&c, &[], 1.0), 0.0);
    }

    #[test]
    fn test_turnover_heading_and_speed() {
        let cfg = EngineConfig::default();
        let eval = CarryEvaluator::new(&cfg);
        let opp = [mover(2, 2.25, 0.0)];
        let toward = mover(1, 0.0, 0.0).with_velocity(4.0, 0.0);
        let away = mover(1, 0.0, 0.0).with_velocity(-4.0, 0.0);
        let across = mover(1, 0.0, 0.0).with_velocity(0.0, 4.0);

        let t = eval.turnover_probability(&toward, &opp, 0.25);
        let a = eval.turnover_probability(&away, &opp, 0.25);
        let x = eval.turnover_probability(&across, &opp, 0.25);
        assert!(approx(t, 0.15 * 1.3));
        assert!(approx(a, 0.15 * 0.8));
        assert!(approx(x, 0.15));

        let sprint = mover(1, 0.0, 0.0).with_velocity(0.0, 7.0);
        assert!(approx(eval.turnover_probability(&sprint, &opp, 0.25), 0.15 * 1.1));
    }

    #[test]
    fn test_turnover_capped() {
        let cfg = EngineConfig::default();
        let eval = CarryEvaluator::new(&cfg);
        let c = mover(1, 0.0, 0.0);
        let crowd: Vec<Mover> = (0..5).map(|i| mover(10 + i, 0.1 * i as f32, 0.0)).collect();
        let p = eval.turnover_probability(&c, &crowd, 30.0);
        assert_eq!(p, 0.95);
    }

    #[test]
    fn test_projection_clamped_to_pitch() {
        let cfg = EngineConfig::default();
        let eval = CarryEvaluator::new(&cfg);
        let runner = mover(1, 50.0, 30.0).with_velocity(6.0, 8.0);
        assert_eq!(eval.project_position(&runner, 1.0, &cfg.pitch), (52.5, 34.0));
        let slow = mover(1, 0.0, 0.0).with_velocity(2.0, -1.0);
        assert_eq!(eval.project_position(&slow, 0.5, &cfg.pitch), (1.0, -0.5));
    }

    #[test]
    fn test_unpressed_carry_keeps_projected_value() {
        let cfg = EngineConfig::default();
        let eval = CarryEvaluator::new(&cfg);
        let carrier = mover(1, 10.0, 0.0).with_velocity(5.0, 0.0);
        let snap = PossessionSnapshot::new(vec![carrier], vec![mover(2, -40.0, 20.0)], Ball::at(10.0, 0.0), true);
        let carry = eval.evaluate(&carrier, &snap);
        assert_eq!(carry.turnover_probability, 0.0);
        assert_eq!(carry.projected_position, (15.0, 0.0));
        assert!(approx(carry.carry_value, carry.projected_value));
        assert!(carry.projected_value > carry.current_value);
        assert!(approx(carry.value_added, carry.carry_value - carry.current_value));
    }

    #[test]
    fn test_carry_value_identity_under_pressure() {
        let cfg = EngineConfig::default();
        let eval = CarryEvaluator::new(&cfg);
        let carrier = mover(1, 20.0, 5.0).with_velocity(3.0, 0.0);
        let snap = PossessionSnapshot::new(
            vec![carrier, mover(3, 0.0, -10.0)],
            vec![mover(2, 22.0, 5.0), mover(4, 30.0, 0.0)],
            Ball::at(20.0, 5.0),
            true,
        );
        let field = eval.value_model().generate_value_field(&snap, 2.0);
        let carry = eval.evaluate_with_field(&carrier, &snap, &field);
        let p = carry.turnover_probability;
        assert!(p > 0.0);
        assert!(approx(carry.carry_value, (1.0 - p) * carry.projected_value + p * carry.turnover_value));
        assert!(approx(carry.current_value, field.value_at(20.0, 5.0)));
        let expected_turnover = eval.value_model().turnover_value_at(&snap, 20.0, 5.0);
        assert!(approx(carry.turnover_value, expected_turnover));
    }

    #[test]
    fn test_compare_with_passes() {
        let cfg = EngineConfig::default();
        let carrier = mover(1, 0.0, 0.0);
        let snap = PossessionSnapshot::new(
            vec![carrier, mover(2, 25.0, 0.0), mover(3, -20.0, 0.0)],
            vec![],
            Ball::at(0.0, 0.0),
            true,
        );
        let carry = CarryEvaluator::new(&cfg).evaluate(&carrier, &snap);
        let options = PassEvaluator::new(&cfg).rank_options(&carrier, &snap.team, &snap);

        let cmp = compare_with_passes(&carry, &options);
        // Unpressed forward receiver 25 m upfield beats a stationary carry
        assert!(cmp.pass_recommended);
        assert_eq!(cmp.best_receiver, Some(MoverId(2)));
        assert!(cmp.best_value >= cmp.carry_value);

        let alone = compare_with_passes(&carry, &[]);
        assert!(!alone.pass_recommended);
        assert_eq!(alone.best_value, carry.carry_value);
        assert!(alone.best_receiver.is_none());
    }
}
