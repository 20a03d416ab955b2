//! Formation line detector
//!
//! Clusters the defending side's along-attack-axis coordinates into three
//! pressure lines with a 1-D k-means, then zones any point relative to them.
//!
//! Coordinates are along the possessing side's attack axis (`x` attacking
//! right, `-x` attacking left), so line 1 is always the line the attack
//! meets first.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::LinesConfig;
use crate::pitch::attack_axis;
use crate::snapshot::{Mover, MoverId};

/// Number of pressure lines reported
pub const LINE_COUNT: usize = 3;

/// Iterative assign/update clustering of scalars.
///
/// Centroids start evenly spaced over the value range; iteration stops when
/// no centroid moves more than `tolerance` or after `max_iterations`.
/// With fewer values than `k` the sorted input is returned as-is.
/// The result is always ascending.
pub fn cluster_1d(positions: &[f32], k: usize, max_iterations: usize, tolerance: f32) -> Vec<f32> {
    if k == 0 {
        return Vec::new();
    }
    if positions.len() < k {
        let mut sorted = positions.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        return sorted;
    }

    let lo = positions.iter().cloned().fold(f32::INFINITY, f32::min);
    let hi = positions.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let mut centroids: Vec<f32> = if k == 1 {
        vec![(lo + hi) * 0.5]
    } else {
        (0..k).map(|i| lo + (hi - lo) * i as f32 / (k - 1) as f32).collect()
    };

    for iteration in 0..max_iterations {
        let mut sums = vec![0.0_f32; k];
        let mut counts = vec![0_usize; k];
        for &p in positions {
            let c = nearest_index(&centroids, p);
            sums[c] += p;
            counts[c] += 1;
        }

        let mut shift = 0.0_f32;
        for i in 0..k {
            // Empty cluster keeps its centroid
            if counts[i] > 0 {
                let next = sums[i] / counts[i] as f32;
                shift = shift.max((next - centroids[i]).abs());
                centroids[i] = next;
            }
        }
        if shift < tolerance {
            log::trace!("cluster_1d converged after {} iterations", iteration + 1);
            break;
        }
    }

    centroids.sort_by(|a, b| a.total_cmp(b));
    centroids
}

/// Index of the nearest value; ties go to the lower index.
fn nearest_index(centroids: &[f32], p: f32) -> usize {
    let mut best = 0;
    let mut best_d = f32::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = (p - c).abs();
        if d < best_d {
            best = i;
            best_d = d;
        }
    }
    best
}

/// Which pressure line a defender belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LineRank {
    First,
    Second,
    Third,
}

impl LineRank {
    pub fn from_index(i: usize) -> Self {
        match i {
            0 => LineRank::First,
            1 => LineRank::Second,
            _ => LineRank::Third,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Band between consecutive lines, ordered along the attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LineZone {
    BeforeFirstLine,
    BetweenFirstAndSecond,
    BetweenSecondAndThird,
    BeyondThirdLine,
}

impl LineZone {
    fn from_crossed(crossed: usize) -> Self {
        match crossed {
            0 => LineZone::BeforeFirstLine,
            1 => LineZone::BetweenFirstAndSecond,
            2 => LineZone::BetweenSecondAndThird,
            _ => LineZone::BeyondThirdLine,
        }
    }

    /// 1..=4 along the attack
    pub fn index(&self) -> u8 {
        *self as u8 + 1
    }

    /// Phase of play the zone corresponds to
    pub fn phase(&self) -> &'static str {
        match self {
            LineZone::BeforeFirstLine => "build-up",
            LineZone::BetweenFirstAndSecond => "progression",
            LineZone::BetweenSecondAndThird => "chance creation",
            LineZone::BeyondThirdLine => "finishing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreakDirection {
    Forward,
    Backward,
    Lateral,
}

/// Movement between two points relative to the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineBreak {
    pub from_zone: LineZone,
    pub to_zone: LineZone,
    pub direction: BreakDirection,
    pub lines_crossed: u8,
}

/// Three ascending pressure lines plus each defender's line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationLines {
    /// Along-attack-axis positions, `lines[0] <= lines[1] <= lines[2]`
    pub lines: [f32; LINE_COUNT],
    pub attacking_right: bool,
    pub assignment: BTreeMap<MoverId, LineRank>,
}

impl FormationLines {
    #[inline]
    pub fn line(&self, rank: LineRank) -> f32 {
        self.lines[rank.index()]
    }

    /// Zone of a point; zones span the full pitch width.
    pub fn zone_of(&self, x: f32) -> LineZone {
        let a = attack_axis(x, self.attacking_right);
        LineZone::from_crossed(self.lines.iter().filter(|&&l| l <= a).count())
    }

    pub fn line_break_analysis(&self, from: (f32, f32), to: (f32, f32)) -> LineBreak {
        let from_zone = self.zone_of(from.0);
        let to_zone = self.zone_of(to.0);
        let (fi, ti) = (from_zone.index(), to_zone.index());
        let direction = if ti > fi {
            BreakDirection::Forward
        } else if ti < fi {
            BreakDirection::Backward
        } else {
            BreakDirection::Lateral
        };
        LineBreak { from_zone, to_zone, direction, lines_crossed: fi.abs_diff(ti) }
    }
}

/// Detects a defending side's pressure lines.
#[derive(Debug, Clone, Copy)]
pub struct LineDetector<'a> {
    cfg: &'a LinesConfig,
}

impl<'a> LineDetector<'a> {
    pub fn new(cfg: &'a LinesConfig) -> Self {
        Self { cfg }
    }

    /// Cluster `defenders` into three lines along the attack axis.
    ///
    /// Fewer than three defenders repeat the deepest-known line; no
    /// defenders at all puts every line at the halfway mark.
    pub fn detect(&self, defenders: &[Mover], attacking_right: bool) -> FormationLines {
        let axis: Vec<f32> = defenders.iter().map(|m| attack_axis(m.x, attacking_right)).collect();
        let centroids = cluster_1d(&axis, LINE_COUNT, self.cfg.max_iterations, self.cfg.convergence_m);

        let mut lines = [0.0_f32; LINE_COUNT];
        match centroids.last() {
            Some(&last) => {
                for (i, line) in lines.iter_mut().enumerate() {
                    *line = centroids.get(i).copied().unwrap_or(last);
                }
            }
            None => log::debug!("no defenders; formation lines default to halfway"),
        }

        let assignment = defenders
            .iter()
            .zip(&axis)
            .map(|(m, &a)| (m.id, LineRank::from_index(nearest_index(&lines, a))))
            .collect();

        FormationLines { lines, attacking_right, assignment }
    }
}
