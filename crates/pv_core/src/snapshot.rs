//! Possession snapshot: the immutable per-instant input of every model.
//!
//! A snapshot is built once by the host (ingestion is out of scope here) and
//! threaded by reference through every computation. The only derived
//! snapshots are [`PossessionSnapshot::with_ball_at`] and
//! [`PossessionSnapshot::role_swapped`], both of which return new values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pitch::{attack_axis, distance};

/// Stable identity of a mover within a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoverId(pub u32);

impl MoverId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for MoverId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Positional role, used only to look up a speed multiplier.
///
/// Parsed from short tags ("GK", "CB", "ST", ...). Anything unrecognised is
/// [`Role::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Goalkeeper,
    CentreBack,
    FullBack,
    DefensiveMidfielder,
    CentralMidfielder,
    AttackingMidfielder,
    Winger,
    Striker,
    #[default]
    Unknown,
}

impl Role {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "GK" | "G" => Role::Goalkeeper,
            "CB" | "LCB" | "RCB" | "SW" => Role::CentreBack,
            "LB" | "RB" | "LWB" | "RWB" | "FB" => Role::FullBack,
            "DM" | "CDM" | "DMC" => Role::DefensiveMidfielder,
            "CM" | "LCM" | "RCM" | "MC" => Role::CentralMidfielder,
            "AM" | "CAM" | "AMC" => Role::AttackingMidfielder,
            "LW" | "RW" | "LM" | "RM" | "W" => Role::Winger,
            "ST" | "CF" | "FW" | "LS" | "RS" => Role::Striker,
            _ => Role::Unknown,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Role::Goalkeeper => "GK",
            Role::CentreBack => "CB",
            Role::FullBack => "FB",
            Role::DefensiveMidfielder => "DM",
            Role::CentralMidfielder => "CM",
            Role::AttackingMidfielder => "AM",
            Role::Winger => "W",
            Role::Striker => "ST",
            Role::Unknown => "UNK",
        }
    }
}

impl From<String> for Role {
    fn from(tag: String) -> Self {
        Role::from_tag(&tag)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.tag().to_string()
    }
}

/// A point entity with position and velocity (meters, m/s).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub id: MoverId,
    #[serde(default)]
    pub role: Role,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub vx: f32,
    #[serde(default)]
    pub vy: f32,
}

impl Mover {
    pub fn new(id: u32, role: Role, x: f32, y: f32) -> Self {
        Self { id: MoverId(id), role, x, y, vx: 0.0, vy: 0.0 }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    #[inline]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    #[inline]
    pub fn velocity(&self) -> (f32, f32) {
        (self.vx, self.vy)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }

    #[inline]
    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        distance(self.position(), (x, y))
    }
}

/// Ball location. Height is carried for the host's benefit; the models are planar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
}

impl Ball {
    pub fn at(x: f32, y: f32) -> Self {
        Self { x, y, z: None }
    }

    #[inline]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// Immutable per-instant aggregate of both sides, the ball and attack direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossessionSnapshot {
    /// Movers of the possessing side
    pub team: Vec<Mover>,
    /// Movers of the opposing side
    pub opponent: Vec<Mover>,
    pub ball: Ball,
    /// Possessing side attacks toward +X
    pub attacking_right: bool,
}

impl PossessionSnapshot {
    pub fn new(team: Vec<Mover>, opponent: Vec<Mover>, ball: Ball, attacking_right: bool) -> Self {
        Self { team, opponent, ball, attacking_right }
    }

    /// Same instant with the ball relocated.
    pub fn with_ball_at(&self, x: f32, y: f32) -> Self {
        Self {
            team: self.team.clone(),
            opponent: self.opponent.clone(),
            ball: Ball { x, y, z: None },
            attacking_right: self.attacking_right,
        }
    }

    /// The opponent's view after winning the ball at `(x, y)`.
    ///
    /// Sides are exchanged, the ball is relocated and the attack direction is
    /// flipped. Applying it twice (at the same point) restores the sides.
    pub fn role_swapped(&self, x: f32, y: f32) -> Self {
        Self {
            team: self.opponent.clone(),
            opponent: self.team.clone(),
            ball: Ball { x, y, z: None },
            attacking_right: !self.attacking_right,
        }
    }

    /// Look up a mover of either side.
    pub fn find(&self, id: MoverId) -> Option<&Mover> {
        self.team.iter().chain(self.opponent.iter()).find(|m| m.id == id)
    }

    /// Look up a mover of the possessing side.
    pub fn find_team(&self, id: MoverId) -> Option<&Mover> {
        self.team.iter().find(|m| m.id == id)
    }

    /// Possessing-side movers other than `id`, in input order.
    pub fn teammates_of(&self, id: MoverId) -> impl Iterator<Item = &Mover> + '_ {
        self.team.iter().filter(move |m| m.id != id)
    }

    /// Possessing-side mover nearest the ball.
    pub fn ball_carrier(&self) -> Option<&Mover> {
        let ball = self.ball.position();
        self.team
            .iter()
            .min_by(|a, b| distance(a.position(), ball).total_cmp(&distance(b.position(), ball)))
    }

    /// Along-attack-axis coordinate for the possessing side.
    #[inline]
    pub fn attack_axis(&self, x: f32) -> f32 {
        attack_axis(x, self.attacking_right)
    }

    pub fn is_empty(&self) -> bool {
        self.team.is_empty() && self.opponent.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PossessionSnapshot {
        PossessionSnapshot::new(
            vec![Mover::new(1, Role::CentralMidfielder, 0.0, 0.0), Mover::new(2, Role::Striker, 20.0, 5.0)],
            vec![Mover::new(11, Role::CentreBack, 25.0, 0.0)],
            Ball::at(0.5, 0.0),
            true,
        )
    }

    #[test]
    fn test_role_from_tag() {
        assert_eq!(Role::from_tag("gk"), Role::Goalkeeper);
        assert_eq!(Role::from_tag(" RWB "), Role::FullBack);
        assert_eq!(Role::from_tag("CF"), Role::Striker);
        assert_eq!(Role::from_tag("libero"), Role::Unknown);
    }

    #[test]
    fn test_role_swapped_exchanges_sides() {
        let snap = sample();
        let swapped = snap.role_swapped(10.0, 3.0);
        assert_eq!(swapped.team, snap.opponent);
        assert_eq!(swapped.opponent, snap.team);
        assert_eq!(swapped.ball.position(), (10.0, 3.0));
        assert!(!swapped.attacking_right);

        let back = swapped.role_swapped(0.5, 0.0);
        assert_eq!(back.team, snap.team);
        assert_eq!(back.attacking_right, snap.attacking_right);
    }

    #[test]
    fn test_with_ball_at_keeps_movers() {
        let snap = sample();
        let moved = snap.with_ball_at(20.0, 5.0);
        assert_eq!(moved.team, snap.team);
        assert_eq!(moved.ball.position(), (20.0, 5.0));
        assert_eq!(moved.attacking_right, snap.attacking_right);
    }

    #[test]
    fn test_ball_carrier_is_nearest_teammate() {
        let snap = sample();
        assert_eq!(snap.ball_carrier().map(|m| m.id), Some(MoverId(1)));
        let empty = PossessionSnapshot::new(vec![], vec![], Ball::at(0.0, 0.0), true);
        assert!(empty.ball_carrier().is_none());
    }

    #[test]
    fn test_teammates_excludes_self() {
        let snap = sample();
        let ids: Vec<_> = snap.teammates_of(MoverId(1)).map(|m| m.id).collect();
        assert_eq!(ids, vec![MoverId(2)]);
    }

    #[test]
    fn test_snapshot_json_roundtrip_with_defaults() {
        let json = r#"{
            "team": [{"id": 7, "role": "ST", "x": 1.0, "y": 2.0}],
            "opponent": [],
            "ball": {"x": 1.0, "y": 2.0},
            "attacking_right": false
        }"#;
        let snap: PossessionSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.team[0].role, Role::Striker);
        assert_eq!(snap.team[0].vx, 0.0);
        assert!(snap.ball.z.is_none());
        let out = serde_json::to_string(&snap).unwrap();
        assert!(out.contains("\"role\":\"ST\""));
    }
}
