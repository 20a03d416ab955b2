//! # pv_core - Spatial Possession Value Engine
//!
//! Per-instant valuation of a team-sport possession from mover positions,
//! velocities and the ball.
//!
//! ## Features
//! - Time-to-intercept kinematics and a probabilistic control field
//! - Possession value surface (progression × control), signed in [-1, 1]
//! - Pass, carry and shot evaluation with turnover costs
//! - Formation line detection (1-D k-means) and line-break zoning
//! - Heuristic shoot/carry/pass likelihoods
//! - JSON API for host integration
//!
//! All models are closed-form and deterministic; grid generation is
//! parallelised across cells.

// Config presets start from Default and override a few fields
#![allow(clippy::field_reassign_with_default)]
// Loop style - can fix incrementally
#![allow(clippy::needless_range_loop)]

pub mod analysis;
pub mod api;
pub mod carry;
pub mod config;
pub mod control;
pub mod error;
pub mod grid;
pub mod kinematics;
pub mod likelihood;
pub mod lines;
pub mod pass;
pub mod pitch;
pub mod snapshot;
pub mod value;

pub use analysis::{PossessionAnalysis, PossessionAnalyzer};
pub use api::{analyze_json, field_json, AnalyzeRequest, SCHEMA_VERSION};
pub use carry::{CarryComparison, CarryEvaluation, CarryEvaluator};
pub use config::EngineConfig;
pub use control::{ControlField, ControlModel};
pub use error::{CoreError, CoreResult};
pub use grid::{GridSpec, PitchGrid};
pub use kinematics::Interceptor;
pub use likelihood::{ActionKind, ActionLikelihood, LikelihoodModel};
pub use lines::{FormationLines, LineDetector, LineZone};
pub use pass::{PassEvaluator, PassOption, RiskTier};
pub use pitch::PitchBounds;
pub use snapshot::{Ball, Mover, MoverId, PossessionSnapshot, Role};
pub use value::{ShotEvaluation, ValueField, ValueModel};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_empty_snapshot_is_neutral_everywhere() {
        let cfg = EngineConfig::default();
        let model = ControlModel::new(&cfg);
        let snap = PossessionSnapshot::new(vec![], vec![], Ball::at(0.0, 0.0), true);
        let field = model.generate_for(&snap, 5.0);
        assert!(field.values().iter().all(|&c| c == 0.5));
        let value = ValueModel::new(&cfg).value_field_from_control(field, true);
        assert!(value.values().iter().all(|&v| v == 0.0));
    }
}
