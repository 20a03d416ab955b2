//! Time-to-intercept motion model parameters

use serde::{Deserialize, Serialize};

use crate::snapshot::Role;

/// Reaction + bounded-acceleration + capped-speed motion parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicsConfig {
    /// Delay before a mover starts accelerating (default: 0.7s)
    pub reaction_time_s: f32,
    /// Constant acceleration toward the target (default: 3.5 m/s²)
    pub acceleration_mps2: f32,
    /// Top speed before role scaling (default: 5.5 m/s)
    pub base_max_speed_mps: f32,
    /// Distance under which a mover has already arrived (default: 0.5m)
    pub arrival_radius_m: f32,
    /// Straight-line ball speed (default: 15 m/s)
    pub ball_speed_mps: f32,
    /// Per-role top speed multipliers
    #[serde(default)]
    pub role_speed: RoleSpeedTable,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            reaction_time_s: 0.7,
            acceleration_mps2: 3.5,
            base_max_speed_mps: 5.5,
            arrival_radius_m: 0.5,
            ball_speed_mps: 15.0,
            role_speed: RoleSpeedTable::default(),
        }
    }
}

impl KinematicsConfig {
    /// Role-scaled speed cap
    #[inline]
    pub fn max_speed(&self, role: Role) -> f32 {
        self.base_max_speed_mps * self.role_speed.multiplier(role)
    }
}

/// Top speed multiplier per role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSpeedTable {
    pub goalkeeper: f32,
    pub centre_back: f32,
    pub full_back: f32,
    pub defensive_midfielder: f32,
    pub central_midfielder: f32,
    pub attacking_midfielder: f32,
    pub winger: f32,
    pub striker: f32,
    /// Used when the role tag is not recognised
    pub unknown: f32,
}

impl Default for RoleSpeedTable {
    fn default() -> Self {
        Self {
            goalkeeper: 0.85,
            centre_back: 0.93,
            full_back: 1.0,
            defensive_midfielder: 0.94,
            central_midfielder: 0.96,
            attacking_midfielder: 0.98,
            winger: 1.04,
            striker: 1.02,
            unknown: 0.95,
        }
    }
}

impl RoleSpeedTable {
    pub fn multiplier(&self, role: Role) -> f32 {
        match role {
            Role::Goalkeeper => self.goalkeeper,
            Role::CentreBack => self.centre_back,
            Role::FullBack => self.full_back,
            Role::DefensiveMidfielder => self.defensive_midfielder,
            Role::CentralMidfielder => self.central_midfielder,
            Role::AttackingMidfielder => self.attacking_midfielder,
            Role::Winger => self.winger,
            Role::Striker => self.striker,
            Role::Unknown => self.unknown,
        }
    }

    pub(crate) fn all(&self) -> [f32; 9] {
        [
            self.goalkeeper,
            self.centre_back,
            self.full_back,
            self.defensive_midfielder,
            self.central_midfielder,
            self.attacking_midfielder,
            self.winger,
            self.striker,
            self.unknown,
        ]
    }
}
