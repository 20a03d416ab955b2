//! Pass Evaluator
//!
//! For a passer/receiver pair:
//! - interception probability from opponents near the passing lane
//! - receiver value (value at the receiver with the ball relocated there),
//!   scaled by a direction multiplier favouring forward passes
//! - turnover value: the negated value the opponent would hold at the most
//!   likely interception point
//!
//! ```text
//! EV          = success × adjusted_receiver_value + (1 - success) × turnover_value
//! value_added = EV - value at the passer
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, PassConfig};
use crate::pitch::distance;
use crate::snapshot::{Mover, MoverId, PossessionSnapshot};
use crate::value::{ValueField, ValueModel};

/// Interception risk bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

/// Where and by whom a pass would most likely be lost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnoverEstimate {
    /// Interception point (receiver location when nobody can cut the lane)
    pub point: (f32, f32),
    pub interceptor: Option<MoverId>,
    /// `true` when an opponent can reach the lane before the ball passes
    pub in_flight: bool,
    /// Negated value of the opponent's possession at `point`
    pub value: f32,
}

/// One evaluated pass option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassOption {
    pub receiver: MoverId,
    pub receiver_position: (f32, f32),
    pub distance_m: f32,
    pub interception_probability: f32,
    pub success_probability: f32,
    /// Value at the receiver before direction scaling
    pub receiver_value: f32,
    pub direction_multiplier: f32,
    /// Direction-adjusted reward
    pub adjusted_value: f32,
    pub turnover: TurnoverEstimate,
    pub expected_value: f32,
    pub value_added: f32,
    pub risk: RiskTier,
}

impl PassOption {
    #[inline]
    pub fn turnover_value(&self) -> f32 {
        self.turnover.value
    }
}

/// An opponent whose projection falls on the passing lane.
#[derive(Debug, Clone, Copy)]
struct LaneThreat {
    id: MoverId,
    perpendicular_m: f32,
    point: (f32, f32),
    ball_time: f32,
    opponent_time: f32,
}

#[derive(Clone, Copy)]
enum ValueSource<'f> {
    Direct,
    Field(&'f ValueField),
}

/// Pass option evaluator.
#[derive(Debug, Clone, Copy)]
pub struct PassEvaluator<'a> {
    config: &'a EngineConfig,
}

impl<'a> PassEvaluator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    #[inline]
    fn cfg(&self) -> &'a PassConfig {
        &self.config.pass
    }

    #[inline]
    pub fn value_model(&self) -> ValueModel<'a> {
        ValueModel::new(self.config)
    }

    /// Opponents whose projection onto passer→receiver lies within the segment.
    fn lane_threats(&self, from: (f32, f32), to: (f32, f32), opponents: &[Mover]) -> Vec<LaneThreat> {
        let len = distance(from, to);
        if len <= f32::EPSILON {
            return Vec::new();
        }
        let dir = ((to.0 - from.0) / len, (to.1 - from.1) / len);
        let icp = self.value_model().control().interceptor();

        opponents
            .iter()
            .filter_map(|opp| {
                let rel = (opp.x - from.0, opp.y - from.1);
                let along = rel.0 * dir.0 + rel.1 * dir.1;
                if !(0.0..=len).contains(&along) {
                    return None;
                }
                let perpendicular_m = (rel.0 * dir.1 - rel.1 * dir.0).abs();
                let point = (from.0 + dir.0 * along, from.1 + dir.1 * along);
                Some(LaneThreat {
                    id: opp.id,
                    perpendicular_m,
                    point,
                    ball_time: icp.ball_travel_time_from(from, point),
                    opponent_time: icp.time_to_intercept(opp, point.0, point.1),
                })
            })
            .collect()
    }

    /// Probability the pass is cut out, in [0, max_interception].
    ///
    /// The single most dangerous interceptor dominates; a small distance
    /// term models generic long-pass risk.
    pub fn interception_probability(&self, passer: &Mover, receiver: &Mover, opponents: &[Mover]) -> f32 {
        let cfg = self.cfg();
        let threat = self
            .lane_threats(passer.position(), receiver.position(), opponents)
            .iter()
            .map(|t| {
                let time_edge = t.ball_time - t.opponent_time;
                let p = 1.0 / (1.0 + (-cfg.interception_steepness * time_edge).exp());
                p * (-t.perpendicular_m / cfg.perpendicular_decay_m).exp()
            })
            .fold(0.0_f32, f32::max);

        let pass_len = distance(passer.position(), receiver.position());
        let long_pass = cfg.long_pass_risk_weight * (1.0 - (-pass_len / cfg.long_pass_risk_scale_m).exp());

        (threat + long_pass).clamp(0.0, cfg.max_interception)
    }

    /// Most likely loss point of the pass and what it is worth.
    ///
    /// Picks the opponent with the earliest feasible interception on the lane
    /// (arriving no later than the ball plus a grace period). Without one,
    /// the opponent nearest the receiver wins it at the receiver's feet.
    pub fn turnover(&self, passer: &Mover, receiver: &Mover, snapshot: &PossessionSnapshot) -> TurnoverEstimate {
        let grace = self.cfg().turnover_grace_s;
        let in_flight = self
            .lane_threats(passer.position(), receiver.position(), &snapshot.opponent)
            .into_iter()
            .filter(|t| t.opponent_time <= t.ball_time + grace)
            .min_by(|a, b| a.opponent_time.total_cmp(&b.opponent_time));

        let (point, interceptor, in_flight) = match in_flight {
            Some(t) => (t.point, Some(t.id), true),
            None => {
                let nearest = snapshot.opponent.iter().min_by(|a, b| {
                    a.distance_to(receiver.x, receiver.y).total_cmp(&b.distance_to(receiver.x, receiver.y))
                });
                (receiver.position(), nearest.map(|m| m.id), false)
            }
        };

        TurnoverEstimate { point, interceptor, in_flight, value: self.turnover_value_at(snapshot, point) }
    }

    #[inline]
    fn turnover_value_at(&self, snapshot: &PossessionSnapshot, point: (f32, f32)) -> f32 {
        self.value_model().turnover_value_at(snapshot, point.0, point.1)
    }

    /// Turnover value of a pass.
    #[inline]
    pub fn turnover_value(&self, passer: &Mover, receiver: &Mover, snapshot: &PossessionSnapshot) -> f32 {
        self.turnover(passer, receiver, snapshot).value
    }

    /// Reward multiplier from net advance (m) along the attack axis.
    pub fn direction_multiplier(&self, advance: f32) -> f32 {
        let cfg = self.cfg();
        let strong = cfg.strong_direction_m;
        let mild_edge = cfg.mild_slope_per_m * strong;

        if advance > strong {
            let ramp = ((advance - strong) / cfg.forward_saturation_m).min(1.0);
            let start = 1.0 + mild_edge;
            start + (cfg.max_forward_multiplier - start).max(0.0) * ramp
        } else if advance >= -strong {
            1.0 + cfg.mild_slope_per_m * advance
        } else {
            let steep = cfg.strong_backward_slope_per_m * (-advance - strong);
            (1.0 - mild_edge - steep).max(cfg.min_backward_multiplier)
        }
    }

    pub fn risk_tier(&self, interception: f32) -> RiskTier {
        let cfg = self.cfg();
        if interception > cfg.high_risk_threshold {
            RiskTier::High
        } else if interception > cfg.medium_risk_threshold {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    fn evaluate_from(
        &self,
        passer: &Mover,
        receiver: &Mover,
        snapshot: &PossessionSnapshot,
        source: ValueSource<'_>,
    ) -> PassOption {
        let model = self.value_model();
        let interception = self.interception_probability(passer, receiver, &snapshot.opponent);
        let success = 1.0 - interception;

        let (receiver_value, current_value) = match source {
            ValueSource::Direct => {
                let at_receiver = snapshot.with_ball_at(receiver.x, receiver.y);
                (
                    model.value_at(&at_receiver, receiver.x, receiver.y),
                    model.value_at(snapshot, passer.x, passer.y),
                )
            }
            ValueSource::Field(field) => {
                (field.value_at(receiver.x, receiver.y), field.value_at(passer.x, passer.y))
            }
        };

        let advance = snapshot.attack_axis(receiver.x) - snapshot.attack_axis(passer.x);
        let direction_multiplier = self.direction_multiplier(advance);
        let adjusted_value = receiver_value * direction_multiplier;

        let turnover = self.turnover(passer, receiver, snapshot);
        let expected_value = success * adjusted_value + interception * turnover.value;

        PassOption {
            receiver: receiver.id,
            receiver_position: receiver.position(),
            distance_m: distance(passer.position(), receiver.position()),
            interception_probability: interception,
            success_probability: success,
            receiver_value,
            direction_multiplier,
            adjusted_value,
            turnover,
            expected_value,
            value_added: expected_value - current_value,
            risk: self.risk_tier(interception),
        }
    }

    /// Evaluate one pass computing every value from scratch.
    pub fn evaluate(&self, passer: &Mover, receiver: &Mover, snapshot: &PossessionSnapshot) -> PassOption {
        self.evaluate_from(passer, receiver, snapshot, ValueSource::Direct)
    }

    /// Evaluate one pass reading possession values from a prebuilt field.
    pub fn evaluate_with_field(
        &self,
        passer: &Mover,
        receiver: &Mover,
        snapshot: &PossessionSnapshot,
        field: &ValueField,
    ) -> PassOption {
        self.evaluate_from(passer, receiver, snapshot, ValueSource::Field(field))
    }

    fn rank_from(
        &self,
        carrier: &Mover,
        teammates: &[Mover],
        snapshot: &PossessionSnapshot,
        source: ValueSource<'_>,
    ) -> Vec<PassOption> {
        let mut options: Vec<PassOption> = teammates
            .iter()
            .filter(|m| m.id != carrier.id)
            .map(|receiver| self.evaluate_from(carrier, receiver, snapshot, source))
            .collect();
        // Stable: equal value-added keeps input order
        options.sort_by(|a, b| b.value_added.total_cmp(&a.value_added));
        log::trace!("ranked {} pass options for {}", options.len(), carrier.id);
        options
    }

    /// All pass options for `carrier`, best value-added first.
    pub fn rank_options(&self, carrier: &Mover, teammates: &[Mover], snapshot: &PossessionSnapshot) -> Vec<PassOption> {
        self.rank_from(carrier, teammates, snapshot, ValueSource::Direct)
    }

    /// [`Self::rank_options`] reading values from a prebuilt field.
    pub fn rank_options_with_field(
        &self,
        carrier: &Mover,
        teammates: &[Mover],
        snapshot: &PossessionSnapshot,
        field: &ValueField,
    ) -> Vec<PassOption> {
        self.rank_from(carrier, teammates, snapshot, ValueSource::Field(field))
    }
}
