//! Spatial control field
//!
//! Control at a point is the probability that the possessing side gets
//! there first. Each mover's time advantage over the ball
//! (`ball_time - time_to_intercept`) is squashed with a logistic and summed
//! per side:
//!
//! ```text
//! influence = 1 / (1 + e^(-k · advantage))      k = 4 by default
//! control   = Σ team / (Σ team + Σ opponent)
//! ```
//!
//! When neither side has any influence the point is neutral (0.5).

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::grid::{GridSpec, PitchGrid};
use crate::kinematics::Interceptor;
use crate::pitch::PitchBounds;
use crate::snapshot::{Ball, Mover, PossessionSnapshot};

/// Control probability per cell, in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlField {
    #[serde(flatten)]
    pub grid: PitchGrid,
    /// Returned for lookups outside the grid
    pub neutral: f32,
}

impl ControlField {
    /// Control at `(x, y)` read from the cell that contains it.
    ///
    /// Outside the grid this is the neutral value, never an error.
    #[inline]
    pub fn control_at(&self, x: f32, y: f32) -> f32 {
        self.grid.lookup_or(x, y, self.neutral)
    }

    #[inline]
    pub fn spec(&self) -> &GridSpec {
        &self.grid.spec
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.grid.values
    }
}

/// Time-to-intercept based territory model.
#[derive(Debug, Clone, Copy)]
pub struct ControlModel<'a> {
    config: &'a EngineConfig,
}

impl<'a> ControlModel<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn interceptor(&self) -> Interceptor<'a> {
        Interceptor::new(&self.config.kinematics)
    }

    #[inline]
    pub fn neutral(&self) -> f32 {
        self.config.control.neutral_control
    }

    /// Logistic influence of a time advantage (seconds).
    #[inline]
    pub fn influence(&self, advantage: f32) -> f32 {
        1.0 / (1.0 + (-self.config.control.influence_steepness * advantage).exp())
    }

    fn side_influence(&self, movers: &[Mover], ball_time: f32, x: f32, y: f32) -> f32 {
        let icp = self.interceptor();
        movers
            .iter()
            .map(|m| self.influence(ball_time - icp.time_to_intercept(m, x, y)))
            .sum()
    }

    /// Probability that `team` reaches `(x, y)` before `opponent`.
    pub fn control_at(&self, x: f32, y: f32, team: &[Mover], opponent: &[Mover], ball: &Ball) -> f32 {
        let ball_time = self.interceptor().ball_travel_time(ball, x, y);
        let team_sum = self.side_influence(team, ball_time, x, y);
        let opp_sum = self.side_influence(opponent, ball_time, x, y);

        let total = team_sum + opp_sum;
        if total == 0.0 {
            return self.neutral();
        }
        (team_sum / total).clamp(0.0, 1.0)
    }

    /// [`Self::control_at`] for the possessing side of a snapshot.
    #[inline]
    pub fn control_at_snapshot(&self, snapshot: &PossessionSnapshot, x: f32, y: f32) -> f32 {
        self.control_at(x, y, &snapshot.team, &snapshot.opponent, &snapshot.ball)
    }

    /// Evaluate control at every cell center of a grid over `bounds`.
    ///
    /// `resolution` (m per cell) is the caller's latency/fidelity trade-off.
    pub fn generate_control_field(
        &self,
        team: &[Mover],
        opponent: &[Mover],
        ball: &Ball,
        bounds: PitchBounds,
        resolution: f32,
    ) -> ControlField {
        let cfg = &self.config.control;
        let spec = GridSpec::new(bounds, resolution, cfg.min_resolution_m, cfg.max_grid_cells);
        let grid = PitchGrid::build(spec, cfg.parallel_cell_threshold, |x, y| {
            self.control_at(x, y, team, opponent, ball)
        });
        log::debug!(
            "control field {}x{} @ {:.2}m: {} team / {} opponent movers, min={:.3} max={:.3}",
            spec.cols,
            spec.rows,
            spec.resolution,
            team.len(),
            opponent.len(),
            grid.min_value(),
            grid.max_value()
        );
        ControlField { grid, neutral: self.neutral() }
    }

    /// Control field of a snapshot over the configured pitch.
    pub fn generate_for(&self, snapshot: &PossessionSnapshot, resolution: f32) -> ControlField {
        self.generate_control_field(
            &snapshot.team,
            &snapshot.opponent,
            &snapshot.ball,
            self.config.pitch,
            resolution,
        )
    }
}
