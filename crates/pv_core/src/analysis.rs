//! # Possession analysis
//!
//! One call per instant: build the value field once, then reuse it for pass
//! ranking, the carry, action likelihood and the decomposed value. Formation
//! lines of the opponent give the carrier's zone and whether the best pass
//! breaks a line.
//!
//! ## Usage
//! ```rust
//! use pv_core::analysis::PossessionAnalyzer;
//! use pv_core::config::EngineConfig;
//! use pv_core::snapshot::{Ball, Mover, PossessionSnapshot, Role};
//!
//! let config = EngineConfig::default();
//! let snapshot = PossessionSnapshot::new(
//!     vec![Mover::new(1, Role::CentralMidfielder, 0.0, 0.0), Mover::new(2, Role::Striker, 20.0, 5.0)],
//!     vec![Mover::new(10, Role::CentreBack, 15.0, 0.0)],
//!     Ball::at(0.0, 0.0),
//!     true,
//! );
//! let analysis = PossessionAnalyzer::new(&config).analyze(&snapshot, None, 4.0).unwrap();
//! assert_eq!(analysis.pass_options.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::carry::{compare_with_passes, CarryComparison, CarryEvaluation, CarryEvaluator};
use crate::config::EngineConfig;
use crate::error::{CoreError, CoreResult};
use crate::likelihood::{ActionKind, ActionLikelihood, LikelihoodModel};
use crate::lines::{FormationLines, LineBreak, LineDetector, LineZone};
use crate::pass::{PassEvaluator, PassOption};
use crate::snapshot::{Mover, MoverId, PossessionSnapshot};
use crate::value::{decomposed_value, ActionValues, ShotEvaluation, ValueField, ValueModel};

/// Grid metadata and range, for colour normalisation by a presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    pub cols: usize,
    pub rows: usize,
    pub resolution: f32,
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

impl FieldSummary {
    pub fn of(field: &ValueField) -> Self {
        Self {
            cols: field.grid.cols(),
            rows: field.grid.rows(),
            resolution: field.grid.resolution(),
            min: field.min,
            max: field.max,
            mean: field.grid.mean_value(),
        }
    }
}

/// Everything the engine says about one instant of possession.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossessionAnalysis {
    pub carrier: MoverId,
    pub carrier_position: (f32, f32),
    pub field: FieldSummary,
    pub current_value: f32,
    pub current_control: f32,
    /// Best value-added first
    pub pass_options: Vec<PassOption>,
    pub carry: CarryEvaluation,
    pub comparison: CarryComparison,
    pub shot: ShotEvaluation,
    pub likelihood: ActionLikelihood,
    pub action_values: ActionValues,
    pub decomposed_value: f32,
    pub formation_lines: FormationLines,
    pub carrier_zone: LineZone,
    /// Line break of the top-ranked pass
    pub best_pass_break: Option<LineBreak>,
    pub recommended: ActionKind,
}

#[derive(Debug, Clone, Copy)]
pub struct PossessionAnalyzer<'a> {
    config: &'a EngineConfig,
}

impl<'a> PossessionAnalyzer<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// The named carrier, or the possessing mover nearest the ball.
    pub fn resolve_carrier<'s>(
        &self,
        snapshot: &'s PossessionSnapshot,
        carrier: Option<MoverId>,
    ) -> CoreResult<&'s Mover> {
        match carrier {
            Some(id) => snapshot.find_team(id).ok_or(CoreError::UnknownCarrier { id }),
            None => snapshot.ball_carrier().ok_or(CoreError::NoCarrier),
        }
    }

    /// Build the value field at `resolution`, then analyse.
    pub fn analyze(
        &self,
        snapshot: &PossessionSnapshot,
        carrier: Option<MoverId>,
        resolution: f32,
    ) -> CoreResult<PossessionAnalysis> {
        let field = ValueModel::new(self.config).generate_value_field(snapshot, resolution);
        self.analyze_with_field(snapshot, carrier, &field)
    }

    /// Analyse against a prebuilt value field.
    pub fn analyze_with_field(
        &self,
        snapshot: &PossessionSnapshot,
        carrier: Option<MoverId>,
        field: &ValueField,
    ) -> CoreResult<PossessionAnalysis> {
        let carrier = self.resolve_carrier(snapshot, carrier)?;
        let pos = carrier.position();

        let pass_options = PassEvaluator::new(self.config).rank_options_with_field(
            carrier,
            &snapshot.team,
            snapshot,
            field,
        );
        let carry = CarryEvaluator::new(self.config).evaluate_with_field(carrier, snapshot, field);
        let comparison = compare_with_passes(&carry, &pass_options);
        let shot = ValueModel::new(self.config).shot(pos.0, pos.1, snapshot.attacking_right);
        let likelihood = LikelihoodModel::new(self.config).evaluate_with_field(carrier, snapshot, &field.control);

        let action_values = ActionValues {
            best_pass: comparison.best_pass_value.unwrap_or(0.0),
            carry: carry.carry_value,
            shot: shot.quality,
        };
        let decomposed = decomposed_value(&likelihood, &action_values);

        let formation_lines = LineDetector::new(&self.config.lines).detect(&snapshot.opponent, snapshot.attacking_right);
        let carrier_zone = formation_lines.zone_of(pos.0);
        let best_pass_break = pass_options
            .first()
            .map(|p| formation_lines.line_break_analysis(pos, p.receiver_position));

        let recommended = recommend(&action_values, comparison.best_pass_value.is_some());
        log::debug!(
            "carrier {} at ({:.1}, {:.1}): {} pass options, carry {:.3}, shot {:.3} -> {:?}",
            carrier.id,
            pos.0,
            pos.1,
            pass_options.len(),
            carry.carry_value,
            shot.quality,
            recommended
        );

        Ok(PossessionAnalysis {
            carrier: carrier.id,
            carrier_position: pos,
            field: FieldSummary::of(field),
            current_value: field.value_at(pos.0, pos.1),
            current_control: field.control_at(pos.0, pos.1),
            pass_options,
            carry,
            comparison,
            shot,
            likelihood,
            action_values,
            decomposed_value: decomposed,
            formation_lines,
            carrier_zone,
            best_pass_break,
            recommended,
        })
    }
}

/// Highest-valued action; ties prefer pass, then carry.
fn recommend(values: &ActionValues, has_pass: bool) -> ActionKind {
    let mut best = (ActionKind::Carry, values.carry);
    if has_pass && values.best_pass >= best.1 {
        best = (ActionKind::Pass, values.best_pass);
    }
    if values.shot > best.1 {
        best = (ActionKind::Shoot, values.shot);
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Ball, Role};

    fn snapshot() -> PossessionSnapshot {
        PossessionSnapshot::new(
            vec![
                Mover::new(1, Role::CentralMidfielder, -5.0, 0.0).with_velocity(2.0, 0.0),
                Mover::new(2, Role::Striker, 25.0, 4.0),
                Mover::new(3, Role::FullBack, -15.0, -25.0),
                Mover::new(4, Role::Winger, 10.0, 25.0),
            ],
            vec![
                Mover::new(10, Role::Striker, 0.0, 3.0),
                Mover::new(11, Role::CentralMidfielder, 8.0, -4.0),
                Mover::new(12, Role::CentralMidfielder, 10.0, 8.0),
                Mover::new(13, Role::CentreBack, 30.0, 0.0),
                Mover::new(14, Role::CentreBack, 31.0, 12.0),
            ],
            Ball::at(-5.0, 0.0),
            true,
        )
    }

    #[test]
    fn test_analyze_resolves_ball_carrier() {
        let cfg = EngineConfig::default();
        let analysis = PossessionAnalyzer::new(&cfg).analyze(&snapshot(), None, 3.0).unwrap();
        assert_eq!(analysis.carrier, MoverId(1));
        assert_eq!(analysis.pass_options.len(), 3);
        assert!(analysis
            .pass_options
            .windows(2)
            .all(|w| w[0].value_added >= w[1].value_added));
        let l = analysis.likelihood;
        assert!((l.shoot + l.carry + l.pass - 1.0).abs() < 1e-6);
        assert_eq!(analysis.field.cols, 35);
        assert_eq!(analysis.formation_lines.assignment.len(), 5);
    }

    #[test]
    fn test_decomposed_value_matches_parts() {
        let cfg = EngineConfig::default();
        let a = PossessionAnalyzer::new(&cfg).analyze(&snapshot(), Some(MoverId(1)), 3.0).unwrap();
        let expected = a.likelihood.pass * a.action_values.best_pass
            + a.likelihood.carry * a.action_values.carry
            + a.likelihood.shoot * a.action_values.shot;
        assert!((a.decomposed_value - expected).abs() < 1e-6);
        assert_eq!(a.action_values.best_pass, a.pass_options.iter().map(|p| p.expected_value).fold(f32::MIN, f32::max));
    }

    #[test]
    fn test_unknown_and_missing_carrier() {
        let cfg = EngineConfig::default();
        let analyzer = PossessionAnalyzer::new(&cfg);
        let err = analyzer.analyze(&snapshot(), Some(MoverId(10)), 3.0).unwrap_err();
        assert!(matches!(err, CoreError::UnknownCarrier { id } if id == MoverId(10)));

        let empty = PossessionSnapshot::new(vec![], vec![], Ball::at(0.0, 0.0), true);
        assert!(matches!(analyzer.analyze(&empty, None, 3.0), Err(CoreError::NoCarrier)));
    }

    #[test]
    fn test_lone_carrier_has_no_pass() {
        let cfg = EngineConfig::default();
        let snap = PossessionSnapshot::new(
            vec![Mover::new(1, Role::Winger, 0.0, 0.0).with_velocity(6.0, 0.0)],
            vec![],
            Ball::at(0.0, 0.0),
            true,
        );
        let a = PossessionAnalyzer::new(&cfg).analyze(&snap, None, 5.0).unwrap();
        assert!(a.pass_options.is_empty());
        assert!(a.best_pass_break.is_none());
        assert!(!a.comparison.pass_recommended);
        assert_eq!(a.recommended, ActionKind::Carry);
        // No defenders: every line sits at halfway
        assert_eq!(a.formation_lines.lines, [0.0, 0.0, 0.0]);
        assert_eq!(a.carrier_zone, LineZone::BeyondThirdLine);
    }

    #[test]
    fn test_recommend() {
        let v = ActionValues { best_pass: 0.3, carry: 0.2, shot: 0.1 };
        assert_eq!(recommend(&v, true), ActionKind::Pass);
        assert_eq!(recommend(&v, false), ActionKind::Carry);
        let v = ActionValues { best_pass: 0.3, carry: 0.2, shot: 0.5 };
        assert_eq!(recommend(&v, true), ActionKind::Shoot);
    }

    #[test]
    fn test_analysis_serializes() {
        let cfg = EngineConfig::default();
        let a = PossessionAnalyzer::new(&cfg).analyze(&snapshot(), None, 5.0).unwrap();
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["carrier"], 1);
        assert!(json["pass_options"].is_array());
        assert!(json["recommended"].is_string());
    }
}
