//! Pitch geometry
//!
//! Coordinates are meters on a pitch centered at the origin:
//! - X: length axis, -52.5 (left goal line) to +52.5 (right goal line)
//! - Y: width axis, -34 to +34 (touchlines)
//!
//! Attack direction is always expressed as `attacking_right`:
//! - `true`: the possessing side attacks the goal at `x_max`
//! - `false`: the possessing side attacks the goal at `x_min`

use serde::{Deserialize, Serialize};

/// Standard field dimensions (meters)
pub mod field {
    /// Field length in meters
    pub const LENGTH_M: f32 = 105.0;
    /// Field width in meters
    pub const WIDTH_M: f32 = 68.0;
    /// Half length (goal line X for a centered pitch)
    pub const HALF_LENGTH_M: f32 = LENGTH_M * 0.5;
    /// Half width (touchline Y for a centered pitch)
    pub const HALF_WIDTH_M: f32 = WIDTH_M * 0.5;
    /// Penalty area depth from goal line
    pub const PENALTY_AREA_LENGTH_M: f32 = 16.5;
    /// Goal area ("six-yard box") depth from goal line
    pub const GOAL_AREA_LENGTH_M: f32 = 5.5;
}

/// Goal dimensions
pub mod goal {
    /// Goal width in meters (FIFA standard)
    pub const WIDTH_M: f32 = 7.32;
    /// Goal half-width
    pub const HALF_WIDTH_M: f32 = 3.66;
}

/// Rectangular pitch bounds in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl PitchBounds {
    /// Standard 105m × 68m pitch centered at the origin
    pub fn standard() -> Self {
        Self::centered(field::LENGTH_M, field::WIDTH_M)
    }

    /// Pitch of the given size centered at the origin
    pub fn centered(length: f32, width: f32) -> Self {
        Self {
            x_min: -length * 0.5,
            x_max: length * 0.5,
            y_min: -width * 0.5,
            y_max: width * 0.5,
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.y_max - self.y_min
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        (self.y_min + self.y_max) * 0.5
    }

    /// Check if position is within bounds (inclusive)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    /// Clamp position to bounds
    pub fn clamp_position(&self, x: f32, y: f32) -> (f32, f32) {
        (x.clamp(self.x_min, self.x_max), y.clamp(self.y_min, self.y_max))
    }

    /// Center of the goal the possessing side attacks
    #[inline]
    pub fn attack_goal(&self, attacking_right: bool) -> (f32, f32) {
        let x = if attacking_right { self.x_max } else { self.x_min };
        (x, self.center_y())
    }

    /// Normalized along-attack-axis position.
    ///
    /// 0.0 = own goal line, 1.0 = opponent goal line. Not clamped.
    #[inline]
    pub fn attack_progress(&self, x: f32, attacking_right: bool) -> f32 {
        let len = self.length().max(f32::EPSILON);
        if attacking_right {
            (x - self.x_min) / len
        } else {
            (self.x_max - x) / len
        }
    }

    /// Lateral distance from the center line as a fraction of half-width (0..=1).
    #[inline]
    pub fn lateral_fraction(&self, y: f32) -> f32 {
        let half = (self.width() * 0.5).max(f32::EPSILON);
        ((y - self.center_y()).abs() / half).min(1.0)
    }
}

impl Default for PitchBounds {
    fn default() -> Self {
        Self::standard()
    }
}

/// Signed along-attack-axis coordinate: grows toward the attacked goal.
#[inline]
pub fn attack_axis(x: f32, attacking_right: bool) -> f32 {
    if attacking_right {
        x
    } else {
        -x
    }
}

#[inline]
pub(crate) fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_bounds() {
        let b = PitchBounds::standard();
        assert_eq!(b.x_min, -52.5);
        assert_eq!(b.x_max, 52.5);
        assert_eq!(b.y_min, -34.0);
        assert_eq!(b.y_max, 34.0);
        assert!((b.length() - 105.0).abs() < 1e-4);
        assert!((b.width() - 68.0).abs() < 1e-4);
    }

    #[test]
    fn test_attack_progress_direction() {
        let b = PitchBounds::standard();
        assert!((b.attack_progress(-52.5, true) - 0.0).abs() < 1e-6);
        assert!((b.attack_progress(52.5, true) - 1.0).abs() < 1e-6);
        assert!((b.attack_progress(52.5, false) - 0.0).abs() < 1e-6);
        assert!((b.attack_progress(-52.5, false) - 1.0).abs() < 1e-6);
        assert!((b.attack_progress(0.0, false) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_attack_goal() {
        let b = PitchBounds::standard();
        assert_eq!(b.attack_goal(true), (52.5, 0.0));
        assert_eq!(b.attack_goal(false), (-52.5, 0.0));
    }

    #[test]
    fn test_lateral_fraction_saturates() {
        let b = PitchBounds::standard();
        assert_eq!(b.lateral_fraction(0.0), 0.0);
        assert!((b.lateral_fraction(17.0) - 0.5).abs() < 1e-6);
        assert_eq!(b.lateral_fraction(-80.0), 1.0);
    }

    #[test]
    fn test_clamp_position() {
        let b = PitchBounds::standard();
        assert_eq!(b.clamp_position(60.0, -40.0), (52.5, -34.0));
        assert!(b.contains(0.0, 0.0));
        assert!(!b.contains(53.0, 0.0));
    }
}
