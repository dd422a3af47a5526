//! Thrown projectile motion
//!
//! Gravity is scaled by launch speed so soft throws float. Position and
//! velocity integrate over elapsed frames, but the visual shrink is applied
//! once per step regardless of elapsed time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Downward acceleration for a throw of the given launch speed
///
/// Ranges from 40% of `GRAVITY` for a standstill to 100% at max flick speed.
pub fn effective_gravity(launch_speed: f32) -> f32 {
    let ratio = (launch_speed / MAX_FLICK_SPEED).clamp(0.0, 1.0);
    GRAVITY * (MIN_GRAVITY_FACTOR + (1.0 - MIN_GRAVITY_FACTOR) * ratio)
}

/// Unit direction from the launch point toward the release point
fn aim_direction(origin: Vec2, aim: Vec2) -> Vec2 {
    let d = aim - origin;
    Vec2::from_angle(d.y.atan2(d.x))
}

/// The single in-flight projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Speed at release
    launch_speed: f32,
    /// Visual diameter, shrinks toward `PROJECTILE_MIN_SIZE`
    pub size: f32,
    /// Size lost per step
    shrink_rate: f32,
}

impl Projectile {
    /// Throw from `origin` toward `aim` at `speed` units/frame
    pub fn launch(origin: Vec2, aim: Vec2, speed: f32) -> Self {
        Self {
            pos: origin,
            vel: aim_direction(origin, aim) * speed,
            launch_speed: speed,
            size: PROJECTILE_START_SIZE,
            shrink_rate: SHRINK_BASE + SHRINK_SPEED_BONUS * (speed / MAX_FLICK_SPEED),
        }
    }

    pub fn launch_speed(&self) -> f32 {
        self.launch_speed
    }

    pub fn shrink_rate(&self) -> f32 {
        self.shrink_rate
    }

    /// Advance by `frames` of game time
    pub fn step(&mut self, frames: f32) {
        let g = effective_gravity(self.launch_speed) * frames;
        self.vel.y += g;
        self.pos += self.vel * frames;
        self.size = (self.size - self.shrink_rate).max(PROJECTILE_MIN_SIZE);
    }

    /// Radius used for hit tests
    pub fn collision_radius(&self) -> f32 {
        if self.size.is_finite() && self.size > 0.0 {
            self.size / 2.0
        } else {
            PROJECTILE_FALLBACK_RADIUS
        }
    }

    /// Shrunk all the way down without hitting anything
    pub fn is_spent(&self) -> bool {
        self.size <= PROJECTILE_MIN_SIZE
    }
}

/// Dotted path shown while aiming
///
/// Steps one nominal frame per dot with the same scaled gravity a real throw
/// would get. The launch point itself is not included.
pub fn trajectory_preview(origin: Vec2, aim: Vec2, speed: f32) -> Vec<Vec2> {
    let g = effective_gravity(speed);
    let mut step = aim_direction(origin, aim) * speed;
    let mut pos = origin;
    let mut points = Vec::with_capacity(PREVIEW_POINTS);
    for _ in 0..PREVIEW_POINTS {
        step.y += g;
        pos += step;
        points.push(pos);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gravity_scales_with_speed() {
        assert!((effective_gravity(0.0) - 0.2).abs() < 1e-6);
        assert!((effective_gravity(MAX_FLICK_SPEED) - GRAVITY).abs() < 1e-6);
        assert!((effective_gravity(12.0) - 0.35).abs() < 1e-6);
        // Clamped past the cap
        assert!((effective_gravity(100.0) - GRAVITY).abs() < 1e-6);
    }

    #[test]
    fn test_launch_direction_and_shrink_rate() {
        let origin = Vec2::new(400.0, 570.0);
        let p = Projectile::launch(origin, Vec2::new(400.0, 470.0), 12.0);
        assert!(p.vel.x.abs() < 1e-4);
        assert!((p.vel.y + 12.0).abs() < 1e-4);
        assert_eq!(p.size, PROJECTILE_START_SIZE);
        assert!((p.shrink_rate() - 0.25).abs() < 1e-6);
        assert_eq!(p.launch_speed(), 12.0);
    }

    #[test]
    fn test_launch_parameters_survive_flight() {
        let mut p = Projectile::launch(Vec2::ZERO, Vec2::new(1.0, -1.0), 18.0);
        let (speed, rate) = (p.launch_speed(), p.shrink_rate());
        for _ in 0..200 {
            p.step(1.5);
        }
        assert_eq!(p.launch_speed(), speed);
        assert_eq!(p.shrink_rate(), rate);
        assert_eq!(p.size, PROJECTILE_MIN_SIZE);
    }

    #[test]
    fn test_step_integrates_scaled_time() {
        let mut p = Projectile::launch(Vec2::ZERO, Vec2::new(1.0, 0.0), MAX_FLICK_SPEED);
        p.step(2.0);
        // vy = 0.5 * 2, then pos += vel * 2
        assert!((p.vel.y - 1.0).abs() < 1e-5);
        assert!((p.pos.x - 48.0).abs() < 1e-4);
        assert!((p.pos.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_shrink_is_per_step_not_per_frame() {
        let mut a = Projectile::launch(Vec2::ZERO, Vec2::X, 12.0);
        let mut b = a.clone();
        a.step(0.0);
        b.step(5.0);
        assert_eq!(a.size, b.size);
        assert!((a.size - (PROJECTILE_START_SIZE - 0.25)).abs() < 1e-5);
    }

    #[test]
    fn test_collision_radius_fallback() {
        let mut p = Projectile::launch(Vec2::ZERO, Vec2::X, 10.0);
        assert_eq!(p.collision_radius(), 25.0);
        p.size = f32::NAN;
        assert_eq!(p.collision_radius(), PROJECTILE_FALLBACK_RADIUS);
    }

    #[test]
    fn test_spent_after_enough_steps() {
        let mut p = Projectile::launch(Vec2::ZERO, Vec2::X, MAX_FLICK_SPEED);
        // 40 units at 0.4 per step
        for _ in 0..99 {
            p.step(0.0);
        }
        assert!(!p.is_spent());
        p.step(0.0);
        p.step(0.0);
        assert!(p.is_spent());
        assert_eq!(p.size, PROJECTILE_MIN_SIZE);
    }

    #[test]
    fn test_preview_matches_gravity() {
        let pts = trajectory_preview(Vec2::ZERO, Vec2::new(0.0, -1.0), MIN_FLICK_SPEED);
        assert_eq!(pts.len(), PREVIEW_POINTS);
        let g = effective_gravity(MIN_FLICK_SPEED);
        assert!((pts[0].y - (-MIN_FLICK_SPEED + g)).abs() < 1e-4);
        // Arcs back down
        assert!(pts[PREVIEW_POINTS - 1].y > pts[10].y);
    }

    proptest! {
        #[test]
        fn prop_size_never_below_floor(
            speed in 0.0f32..MAX_FLICK_SPEED,
            frames in prop::collection::vec(0.0f32..20.0, 1..400),
        ) {
            let mut p = Projectile::launch(Vec2::ZERO, Vec2::new(1.0, -1.0), speed);
            for f in frames {
                p.step(f);
                prop_assert!(p.size >= PROJECTILE_MIN_SIZE);
            }
        }
    }
}
