//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through `tick` and input timestamps
//! - Seeded RNG only
//! - Stable target order (oldest first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod gesture;
pub mod projectile;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Resolution, circles_overlap, find_hit, resolve};
pub use gesture::{GestureSample, GestureTracker};
pub use projectile::{Projectile, effective_gravity, trajectory_preview};
pub use session::{AimPreview, Session};
pub use spawner::spawn_targets;
pub use state::{
    Ammo, AmmoMode, GameEvent, GameOverReason, Phase, Playfield, Target, TargetKind,
};
pub use tick::{MAX_FRAME_GAP_MS, frame_scale, tick};
