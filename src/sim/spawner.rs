//! Procedural target spawning
//!
//! Stateless per call: the RNG is the only memory. Targets enter just off a
//! side edge and drift across; lower targets (greater depth) are bigger and
//! faster.

use rand::Rng;

use super::state::{Playfield, Target};
use crate::consts::*;
use crate::lerp;

/// Create 1-2 new targets without exceeding `MAX_TARGETS` in total
///
/// `existing` is the live population; it is read only for its size and to
/// keep golden targets unique.
pub fn spawn_targets<R: Rng>(
    rng: &mut R,
    field: &Playfield,
    existing: &[Target],
) -> Vec<Target> {
    let room = MAX_TARGETS.saturating_sub(existing.len());
    if room == 0 {
        return Vec::new();
    }

    let count = rng.random_range(1..=2usize).min(room);
    let mut golden_live = existing.iter().any(Target::is_golden);
    let mut spawned = Vec::with_capacity(count);

    for _ in 0..count {
        let target = spawn_one(rng, field, golden_live);
        golden_live |= target.is_golden();
        log::debug!(
            "Spawned {:?} target at y={:.0} r={:.1} vx={:.2}",
            target.kind(),
            target.pos.y,
            target.radius,
            target.vx
        );
        spawned.push(target);
    }

    spawned
}

fn spawn_one<R: Rng>(rng: &mut R, field: &Playfield, golden_live: bool) -> Target {
    let min_y = SPAWN_TOP_MARGIN;
    let max_y = (field.height - SPAWN_BOTTOM_MARGIN).max(min_y + 1.0);
    let roll_y = |rng: &mut R| rng.random::<f32>() * (max_y - min_y) + min_y;

    // Keep clear of the launch height; best effort, the last roll wins
    let launch_y = field.launch_origin().y;
    let mut y = roll_y(&mut *rng);
    for _ in 0..SPAWN_RETRIES {
        if (launch_y - y).abs() >= LAUNCH_CLEARANCE {
            break;
        }
        y = roll_y(&mut *rng);
    }

    let depth = (y / field.height).clamp(0.0, 1.0);
    let radius = lerp(TARGET_MIN_RADIUS, TARGET_MAX_RADIUS, depth);
    let speed = lerp(TARGET_MIN_SPEED, TARGET_MAX_SPEED, depth);

    let dir = if rng.random::<f32>() < 0.5 { -1.0 } else { 1.0 };
    let start_x = if dir > 0.0 {
        -radius - EDGE_SLACK
    } else {
        field.width + radius + EDGE_SLACK
    };

    let golden = !golden_live && rng.random::<f32>() < GOLDEN_CHANCE;
    let wrong = rng.random::<f32>() < WRONG_CHANCE;
    let speed_mult = if golden { GOLDEN_SPEED_MULT } else { 1.0 };

    Target::new(
        glam::Vec2::new(start_x, y),
        radius,
        dir * speed * speed_mult,
        golden,
        wrong,
    )
}
