//! Projectile/target hit detection
//!
//! Pure functions over the current projectile and target list. Applying the
//! outcome (scoring, removal, respawn, game over) is the tick's job, so
//! resolving twice without stepping gives the same answer.

use glam::Vec2;

use super::projectile::Projectile;
use super::state::{Playfield, Target, TargetKind};

/// Outcome of checking the projectile against the world for one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing touched, still on screen
    InFlight,
    /// Scored a normal or golden target at `index`
    Hit { index: usize, kind: TargetKind },
    /// Touched a decoy at `index`
    WrongTarget { index: usize },
    /// Left the playfield or shrank to the floor without hitting anything
    Lost,
}

/// Circle overlap test (strict, touching edges do not count)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    (a - b).length() < ra + rb
}

/// Index of the target the projectile hits, newest first
///
/// Only the first overlap is reported even if several targets overlap.
pub fn find_hit(projectile: &Projectile, targets: &[Target]) -> Option<usize> {
    let radius = projectile.collision_radius();
    targets
        .iter()
        .rposition(|t| circles_overlap(projectile.pos, radius, t.pos, t.radius))
}

/// Decide what happens to the projectile this step
pub fn resolve(projectile: &Projectile, targets: &[Target], field: &Playfield) -> Resolution {
    if let Some(index) = find_hit(projectile, targets) {
        return match targets[index].kind() {
            TargetKind::Wrong => Resolution::WrongTarget { index },
            kind => Resolution::Hit { index, kind },
        };
    }

    if !field.contains(projectile.pos) || projectile.is_spent() {
        return Resolution::Lost;
    }

    Resolution::InFlight
}
