//! Snowball Toss entry point
//!
//! The game itself ships as a wasm module (see `platform::web`). Natively this
//! runs a seeded autoplay session so the simulation can be watched in the log.

#[cfg(not(target_arch = "wasm32"))]
use glam::Vec2;
#[cfg(not(target_arch = "wasm32"))]
use snowball_toss::{BestScoreStore, BestScores};
#[cfg(not(target_arch = "wasm32"))]
use snowball_toss::consts::*;
#[cfg(not(target_arch = "wasm32"))]
use snowball_toss::sim::{AmmoMode, Phase, Playfield, Session, TargetKind, effective_gravity, tick};

#[cfg(not(target_arch = "wasm32"))]
const DISPLAY_FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after five minutes of game time
#[cfg(not(target_arch = "wasm32"))]
const MAX_DEMO_FRAMES: u32 = 60 * 300;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Snowball Toss (native) starting autoplay demo...");

    let mut scores = BestScores::load();
    let mut session = Session::new(Playfield::new(800.0, 600.0), 0x5EED);
    session.start(AmmoMode::Sixteen);

    let mut now = 0.0;
    let mut frames = 0;
    while session.phase() == Phase::Playing && frames < MAX_DEMO_FRAMES {
        if session.projectile().is_none() {
            throw_at_nearest(&mut session, now);
        }
        tick(&mut session, DISPLAY_FRAME_MS, &mut scores);
        for event in session.drain_events() {
            log::info!("{:?}", event);
        }
        now += DISPLAY_FRAME_MS;
        frames += 1;
    }

    println!(
        "Run over after {:.1}s: score {} ({} hits, {} misses), best {}",
        now / 1000.0,
        session.final_score(),
        session.hits(),
        session.misses(),
        scores.best(AmmoMode::Sixteen)
    );
}

/// Flick toward the closest safe on-screen target, leading it and aiming high
/// to cancel the drop at full power
#[cfg(not(target_arch = "wasm32"))]
fn throw_at_nearest(session: &mut Session, now: f64) {
    let origin = session.launch_origin();
    let width = session.playfield().width;
    let Some(target) = session
        .targets()
        .iter()
        .filter(|t| t.kind() != TargetKind::Wrong && t.pos.x > 0.0 && t.pos.x < width)
        .min_by(|a, b| {
            a.pos
                .distance(origin)
                .partial_cmp(&b.pos.distance(origin))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    else {
        return;
    };

    let flight = target.pos.distance(origin) / MAX_FLICK_SPEED;
    let aim = target.pos
        + Vec2::new(
            target.vx * flight,
            -0.5 * effective_gravity(MAX_FLICK_SPEED) * flight * flight,
        );
    let dir = (aim - origin).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }

    if session.press(origin, now) {
        session.drag_to(origin + dir * 30.0, now + 5.0);
        session.release(origin + dir * 60.0, now + 10.0);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
