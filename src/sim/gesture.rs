//! Flick velocity estimation from pointer samples
//!
//! A drag records timestamped positions. On release, velocity is measured over
//! roughly the last `FLICK_WINDOW_MS` of movement so that a quick snap at the
//! end of a slow drag still throws hard.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One timestamped pointer position captured during a drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    pub pos: Vec2,
    /// Monotonic timestamp in milliseconds
    pub t_ms: f64,
}

/// Bounded, oldest-first buffer of drag samples
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    samples: VecDeque<GestureSample>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(MAX_SAMPLES + 1),
        }
    }

    /// Record a sample and evict anything past the count cap or retention window
    pub fn add_sample(&mut self, pos: Vec2, t_ms: f64) {
        self.samples.push_back(GestureSample { pos, t_ms });
        if self.samples.len() > MAX_SAMPLES {
            self.samples.pop_front();
        }
        let cutoff = t_ms - SAMPLE_RETENTION_MS;
        while self.samples.front().is_some_and(|s| s.t_ms < cutoff) {
            self.samples.pop_front();
        }
    }

    /// Estimated release velocity in units/frame, clamped to `MAX_FLICK_SPEED`
    ///
    /// Returns `None` with fewer than two samples. A motionless gesture yields
    /// `Some(Vec2::ZERO)`.
    pub fn estimate_velocity(&self) -> Option<Vec2> {
        let n = self.samples.len();
        if n < 2 {
            return None;
        }
        let end = self.samples[n - 1];

        // Walk back until the gap reaches the flick window, but always use at
        // least the previous sample.
        let mut start_idx = n - 2;
        while start_idx > 0 && end.t_ms - self.samples[start_idx].t_ms < FLICK_WINDOW_MS {
            start_idx -= 1;
        }
        let start = self.samples[start_idx];

        let dt = (end.t_ms - start.t_ms).max(1.0) as f32;
        let vel = (end.pos - start.pos) / dt * FRAME_MS;

        let speed = vel.length();
        if speed == 0.0 || !speed.is_finite() {
            return Some(Vec2::ZERO);
        }
        let clamped = speed.min(MAX_FLICK_SPEED);
        Some(vel * (clamped / speed))
    }

    /// Magnitude of the estimate, zero when there is none
    pub fn flick_speed(&self) -> f32 {
        self.estimate_velocity().map_or(0.0, |v| v.length())
    }

    /// Flick speed as a fraction of the cap, for the power meter
    pub fn power_ratio(&self) -> f32 {
        (self.flick_speed() / MAX_FLICK_SPEED).clamp(0.0, 1.0)
    }

    pub fn last(&self) -> Option<&GestureSample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_needs_two_samples() {
        let mut g = GestureTracker::new();
        assert_eq!(g.estimate_velocity(), None);
        g.add_sample(Vec2::new(10.0, 10.0), 0.0);
        assert_eq!(g.estimate_velocity(), None);
        assert_eq!(g.flick_speed(), 0.0);
    }

    #[test]
    fn test_two_samples_uses_both() {
        let mut g = GestureTracker::new();
        g.add_sample(Vec2::new(0.0, 0.0), 1000.0);
        g.add_sample(Vec2::new(0.0, -10.0), 1016.67);
        let v = g.estimate_velocity().unwrap();
        // 10 units over one nominal frame
        assert!(approx(v.x, 0.0));
        assert!(approx(v.y, -10.0));
    }

    #[test]
    fn test_same_timestamp_is_finite_and_clamped() {
        let mut g = GestureTracker::new();
        g.add_sample(Vec2::new(0.0, 0.0), 500.0);
        g.add_sample(Vec2::new(30.0, 40.0), 500.0);
        let v = g.estimate_velocity().unwrap();
        assert!(v.is_finite());
        assert!(approx(v.length(), MAX_FLICK_SPEED));
        // Direction preserved (3:4:5)
        assert!(approx(v.x / v.y, 0.75));
    }

    #[test]
    fn test_zero_motion_returns_zero() {
        let mut g = GestureTracker::new();
        g.add_sample(Vec2::new(5.0, 5.0), 0.0);
        g.add_sample(Vec2::new(5.0, 5.0), 20.0);
        assert_eq!(g.estimate_velocity(), Some(Vec2::ZERO));
    }

    #[test]
    fn test_window_ignores_old_slow_drag() {
        let mut g = GestureTracker::new();
        // Slow drag for a while, then a snap in the last 130ms
        g.add_sample(Vec2::new(0.0, 0.0), 0.0);
        g.add_sample(Vec2::new(0.0, -1.0), 50.0);
        g.add_sample(Vec2::new(0.0, -2.0), 100.0);
        g.add_sample(Vec2::new(0.0, -62.0), 160.0);
        g.add_sample(Vec2::new(0.0, -122.0), 230.0);
        // Start walks back to t=100 (gap 130 >= 120)
        let v = g.estimate_velocity().unwrap();
        let expected = -120.0 / 130.0 * FRAME_MS;
        assert!(approx(v.y, expected.max(-MAX_FLICK_SPEED)));
    }

    #[test]
    fn test_retention_window_evicts_old_samples() {
        let mut g = GestureTracker::new();
        g.add_sample(Vec2::ZERO, 0.0);
        g.add_sample(Vec2::ZERO, 100.0);
        g.add_sample(Vec2::ZERO, 250.0);
        // 0.0 is older than 250 - 200
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn test_count_cap() {
        let mut g = GestureTracker::new();
        for i in 0..100 {
            g.add_sample(Vec2::new(i as f32, 0.0), i as f64 * 0.5);
        }
        assert_eq!(g.len(), MAX_SAMPLES);
        assert_eq!(g.last().unwrap().pos.x, 99.0);
    }

    proptest! {
        #[test]
        fn prop_speed_never_exceeds_cap(
            points in prop::collection::vec((-2000.0f32..2000.0, -2000.0f32..2000.0, 0.0f64..50.0), 0..60)
        ) {
            let mut g = GestureTracker::new();
            let mut t = 0.0;
            for (x, y, dt) in points {
                t += dt;
                g.add_sample(Vec2::new(x, y), t);
            }
            if let Some(v) = g.estimate_velocity() {
                prop_assert!(v.is_finite());
                prop_assert!(v.length() <= MAX_FLICK_SPEED + 1e-3);
            }
            prop_assert!(g.len() <= MAX_SAMPLES);
        }
    }
}
