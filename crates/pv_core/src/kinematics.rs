//! Kinematic interceptor
//!
//! Minimum time for a mover to reach a point under:
//! 1. a constant reaction delay (no movement credited)
//! 2. constant acceleration from the velocity component aimed at the target
//! 3. cruising at the role-scaled speed cap for the remaining distance
//!
//! Everything is closed-form (`d = v₀t + ½at²`), no iteration.

use crate::config::KinematicsConfig;
use crate::pitch::distance;
use crate::snapshot::{Ball, Mover};

/// Time-to-arrival model for movers and the ball.
#[derive(Debug, Clone, Copy)]
pub struct Interceptor<'a> {
    cfg: &'a KinematicsConfig,
}

impl<'a> Interceptor<'a> {
    pub fn new(cfg: &'a KinematicsConfig) -> Self {
        Self { cfg }
    }

    /// Seconds for `mover` to reach `(tx, ty)`.
    ///
    /// Zero inside the arrival radius (no reaction delay charged); otherwise
    /// at least the reaction delay. Non-decreasing in distance for a fixed
    /// velocity state.
    pub fn time_to_intercept(&self, mover: &Mover, tx: f32, ty: f32) -> f32 {
        let dx = tx - mover.x;
        let dy = ty - mover.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < self.cfg.arrival_radius_m {
            return 0.0;
        }

        let v_max = self.cfg.max_speed(mover.role);
        let accel = self.cfg.acceleration_mps2;

        // Only the velocity component toward the target helps; moving away
        // is treated as starting from rest.
        let v0 = ((mover.vx * dx + mover.vy * dy) / dist).clamp(0.0, v_max);

        self.cfg.reaction_time_s + Self::travel_time(dist, v0, v_max, accel)
    }

    /// Accelerate-then-cruise time over `dist`, starting at `v0`.
    #[inline]
    fn travel_time(dist: f32, v0: f32, v_max: f32, accel: f32) -> f32 {
        let t_accel = (v_max - v0) / accel;
        let d_accel = v0 * t_accel + 0.5 * accel * t_accel * t_accel;

        if dist <= d_accel {
            // Target reached while still accelerating: ½at² + v₀t - d = 0
            (-v0 + (v0 * v0 + 2.0 * accel * dist).sqrt()) / accel
        } else {
            t_accel + (dist - d_accel) / v_max
        }
    }

    /// Straight-line ball flight time from the ball's current position.
    #[inline]
    pub fn ball_travel_time(&self, ball: &Ball, x: f32, y: f32) -> f32 {
        self.ball_travel_time_from(ball.position(), (x, y))
    }

    /// Straight-line ball flight time between two points (no drag, no curve).
    #[inline]
    pub fn ball_travel_time_from(&self, from: (f32, f32), to: (f32, f32)) -> f32 {
        distance(from, to) / self.cfg.ball_speed_mps
    }
}
