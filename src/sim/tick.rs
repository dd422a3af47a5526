//! Per-frame simulation step
//!
//! The host calls `tick` once per animation frame with the wall time elapsed
//! since the previous frame. Elapsed time is converted to frame units
//! (`TICK_RATE` per second) for movement and gravity.

use super::collision::{Resolution, resolve};
use super::session::Session;
use super::state::{GameEvent, GameOverReason, Phase};
use crate::consts::*;
use crate::highscores::BestScoreStore;

/// Longest frame gap simulated in one call (ms); longer stalls are truncated
pub const MAX_FRAME_GAP_MS: f64 = 100.0;

/// Convert elapsed wall time to simulation frames
pub fn frame_scale(elapsed_ms: f64) -> f32 {
    let ms = if elapsed_ms.is_finite() {
        elapsed_ms.clamp(0.0, MAX_FRAME_GAP_MS)
    } else {
        0.0
    };
    TICK_RATE * ms as f32 / 1000.0
}

/// Advance the session by one frame
///
/// Does nothing unless the session is playing.
pub fn tick(session: &mut Session, elapsed_ms: f64, store: &mut impl BestScoreStore) {
    if session.phase != Phase::Playing {
        return;
    }
    let frames = frame_scale(elapsed_ms);

    advance_targets(session, frames);
    advance_projectile(session, frames, store);
}

/// Move targets, drop the ones that drifted off screen and top up
fn advance_targets(session: &mut Session, frames: f32) {
    let width = session.field.width;
    for target in &mut session.targets {
        target.advance(frames);
    }

    let before = session.targets.len();
    session.targets.retain(|t| !t.has_exited(width));
    let removed = before - session.targets.len();

    if removed > 0 && session.targets.len() < MAX_TARGETS {
        session.spawn();
    }
}

fn advance_projectile(session: &mut Session, frames: f32, store: &mut impl BestScoreStore) {
    let Some(projectile) = session.projectile.as_mut() else {
        return;
    };
    projectile.step(frames);
    let pos = projectile.pos;

    match resolve(projectile, &session.targets, &session.field) {
        Resolution::InFlight => return,
        Resolution::Hit { index, kind } => {
            let points = kind.points();
            session.hits += 1;
            session.score += points;
            store.set_best_if_higher(session.mode, session.score);
            session.targets.remove(index);
            session.projectile = None;
            log::debug!("Hit {:?} for {} (score {})", kind, points, session.score);
            session.push_event(GameEvent::TargetHit { kind, points, pos });
            session.spawn();
        }
        Resolution::WrongTarget { .. } => {
            session.projectile = None;
            session.push_event(GameEvent::WrongTargetHit { pos });
            session.game_over(GameOverReason::WrongTarget, store);
        }
        Resolution::Lost => {
            session.projectile = None;
            session.misses += 1;
            session.push_event(GameEvent::ProjectileLost);
        }
    }

    if session.projectile.is_none() && session.ammo.is_exhausted() {
        session.game_over(GameOverReason::OutOfAmmo, store);
    }
}
