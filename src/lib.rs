//! Snowball Toss - flick-to-throw target arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gesture, projectile, targets, session)
//! - `highscores`: Per-mode best score persistence
//! - `settings`: Player preferences
//! - `platform`: Browser bindings (wasm32 only)

pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::{BestScoreStore, BestScores};
pub use settings::Settings;

/// Game configuration constants
///
/// Distances are playfield units (CSS pixels on the web build). Velocities
/// are units per simulation frame, where one frame is 1/90 s of game time.
pub mod consts {
    /// Frame units advanced per second of elapsed wall time
    pub const TICK_RATE: f32 = 90.0;
    /// Nominal display frame used to convert per-ms flick speed to per-frame
    pub const FRAME_MS: f32 = 16.67;

    /// Base downward acceleration (units/frame²)
    pub const GRAVITY: f32 = 0.5;
    /// Fraction of base gravity applied to the slowest possible throw
    pub const MIN_GRAVITY_FACTOR: f32 = 0.4;

    /// Flick speed cap (units/frame)
    pub const MAX_FLICK_SPEED: f32 = 24.0;
    /// Releases slower than this cancel the throw
    pub const MIN_FLICK_SPEED: f32 = 4.0;
    /// Look-back window for flick velocity estimation (ms)
    pub const FLICK_WINDOW_MS: f64 = 120.0;
    /// Gesture samples older than this are discarded (ms)
    pub const SAMPLE_RETENTION_MS: f64 = 200.0;
    /// Hard cap on retained gesture samples
    pub const MAX_SAMPLES: usize = 40;

    /// Launch point sits this fraction of the playfield height above the bottom
    pub const LAUNCH_OFFSET_RATIO: f32 = 0.05;
    /// A press must land within this distance of the launch point to start a drag
    pub const PRESS_RADIUS: f32 = 30.0;

    /// Projectile visual size at release
    pub const PROJECTILE_START_SIZE: f32 = 50.0;
    /// Projectile visual size never shrinks below this
    pub const PROJECTILE_MIN_SIZE: f32 = 10.0;
    /// Collision radius used when the projectile has no usable size
    pub const PROJECTILE_FALLBACK_RADIUS: f32 = 15.0;
    /// Shrink per frame for the slowest throw
    pub const SHRINK_BASE: f32 = 0.1;
    /// Extra shrink per frame at max flick speed
    pub const SHRINK_SPEED_BONUS: f32 = 0.3;

    /// Live target population cap
    pub const MAX_TARGETS: usize = 4;
    pub const TARGET_MIN_RADIUS: f32 = 16.0;
    pub const TARGET_MAX_RADIUS: f32 = 38.0;
    pub const TARGET_MIN_SPEED: f32 = 2.0;
    pub const TARGET_MAX_SPEED: f32 = 2.7;
    /// Speed multiplier for golden targets
    pub const GOLDEN_SPEED_MULT: f32 = 1.5;
    pub const GOLDEN_CHANCE: f32 = 0.20;
    pub const WRONG_CHANCE: f32 = 0.10;
    /// Spawn band: top margin
    pub const SPAWN_TOP_MARGIN: f32 = 40.0;
    /// Spawn band: bottom margin
    pub const SPAWN_BOTTOM_MARGIN: f32 = 60.0;
    /// Targets try to keep this vertical distance from the launch height
    pub const LAUNCH_CLEARANCE: f32 = 120.0;
    pub const SPAWN_RETRIES: u32 = 10;
    /// Off-screen slack for spawn placement and exit detection
    pub const EDGE_SLACK: f32 = 2.0;

    pub const POINTS_NORMAL: u64 = 1;
    pub const POINTS_GOLDEN: u64 = 3;

    /// Dots in the aim preview
    pub const PREVIEW_POINTS: usize = 25;

    /// Undrained events kept per session; the oldest are dropped past this
    pub const MAX_QUEUED_EVENTS: usize = 256;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
