//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Title menu, nothing running yet
    MenuInitial,
    /// Pause menu over a frozen run
    MenuPaused,
    /// Run ended
    MenuGameOver,
    /// Active gameplay
    Playing,
}

impl Phase {
    /// Whether a menu overlay is showing (simulation frozen, input refused)
    pub fn is_menu(self) -> bool {
        !matches!(self, Phase::Playing)
    }
}

/// Ammo rule selected on the start menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AmmoMode {
    Sixteen,
    ThirtyTwo,
    #[default]
    Unlimited,
}

impl AmmoMode {
    pub const ALL: [AmmoMode; 3] = [AmmoMode::Sixteen, AmmoMode::ThirtyTwo, AmmoMode::Unlimited];

    /// Key used for menus and best-score storage
    pub fn key(self) -> &'static str {
        match self {
            AmmoMode::Sixteen => "16",
            AmmoMode::ThirtyTwo => "32",
            AmmoMode::Unlimited => "∞",
        }
    }

    /// Parse a mode key; anything unrecognised falls back to unlimited ammo
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "16" => AmmoMode::Sixteen,
            "32" => AmmoMode::ThirtyTwo,
            _ => AmmoMode::Unlimited,
        }
    }

    pub fn starting_ammo(self) -> Ammo {
        match self {
            AmmoMode::Sixteen => Ammo::Limited(16),
            AmmoMode::ThirtyTwo => Ammo::Limited(32),
            AmmoMode::Unlimited => Ammo::Unlimited,
        }
    }
}

/// Remaining launches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ammo {
    Limited(u32),
    Unlimited,
}

impl Ammo {
    /// Spend one launch (no-op when unlimited or already empty)
    pub fn consume(&mut self) {
        if let Ammo::Limited(n) = self {
            *n = n.saturating_sub(1);
        }
    }

    /// True only for a finite mode that has run dry
    pub fn is_exhausted(self) -> bool {
        self == Ammo::Limited(0)
    }

    pub fn remaining(self) -> Option<u32> {
        match self {
            Ammo::Limited(n) => Some(n),
            Ammo::Unlimited => None,
        }
    }
}

/// Effective target category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    Normal,
    Golden,
    /// Decoy: hitting it ends the run
    Wrong,
}

impl TargetKind {
    /// Points awarded for a hit (wrong targets never score)
    pub fn points(self) -> u64 {
        match self {
            TargetKind::Normal => POINTS_NORMAL,
            TargetKind::Golden => POINTS_GOLDEN,
            TargetKind::Wrong => 0,
        }
    }
}

/// A circular target drifting horizontally across the playfield
///
/// Golden and wrong are rolled independently, so both flags may be set. Such a
/// target is fast like a golden one but behaves as wrong when hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
    pub radius: f32,
    /// Horizontal velocity (units/frame, sign is direction)
    pub vx: f32,
    golden: bool,
    wrong: bool,
}

impl Target {
    pub fn new(pos: Vec2, radius: f32, vx: f32, golden: bool, wrong: bool) -> Self {
        Self {
            pos,
            radius,
            vx,
            golden,
            wrong,
        }
    }

    pub fn is_golden(&self) -> bool {
        self.golden
    }

    pub fn is_wrong(&self) -> bool {
        self.wrong
    }

    /// Category used for scoring; wrong takes precedence over golden
    pub fn kind(&self) -> TargetKind {
        if self.wrong {
            TargetKind::Wrong
        } else if self.golden {
            TargetKind::Golden
        } else {
            TargetKind::Normal
        }
    }

    /// Move by `vx` scaled to elapsed frames
    pub fn advance(&mut self, frames: f32) {
        self.pos.x += self.vx * frames;
    }

    /// Fully past the edge it was heading toward
    pub fn has_exited(&self, width: f32) -> bool {
        (self.vx > 0.0 && self.pos.x - self.radius > width + EDGE_SLACK)
            || (self.vx < 0.0 && self.pos.x + self.radius < -EDGE_SLACK)
    }
}

/// Playfield bounds, updated on resize
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Where throws start: horizontally centred, just above the bottom edge
    pub fn launch_origin(&self) -> Vec2 {
        Vec2::new(
            self.width / 2.0,
            self.height - self.height * LAUNCH_OFFSET_RATIO,
        )
    }

    /// Inclusive bounds check on `[0, width] × [0, height]`
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    WrongTarget,
    OutOfAmmo,
}

/// Notable things that happened since the last drain, for UI/audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: Phase, to: Phase },
    Launched { speed: f32 },
    LaunchCancelled { speed: f32 },
    TargetHit { kind: TargetKind, points: u64, pos: Vec2 },
    WrongTargetHit { pos: Vec2 },
    ProjectileLost,
    GameOver { reason: GameOverReason, final_score: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_keys() {
        for mode in AmmoMode::ALL {
            assert_eq!(AmmoMode::from_key(mode.key()), mode);
        }
        assert_eq!(AmmoMode::from_key("64"), AmmoMode::Unlimited);
        assert_eq!(AmmoMode::from_key(""), AmmoMode::Unlimited);
        assert_eq!(AmmoMode::Sixteen.starting_ammo(), Ammo::Limited(16));
        assert_eq!(AmmoMode::ThirtyTwo.starting_ammo(), Ammo::Limited(32));
    }

    #[test]
    fn test_ammo_consume() {
        let mut ammo = Ammo::Limited(1);
        ammo.consume();
        assert!(ammo.is_exhausted());
        ammo.consume();
        assert_eq!(ammo, Ammo::Limited(0));

        let mut free = Ammo::Unlimited;
        free.consume();
        assert!(!free.is_exhausted());
        assert_eq!(free.remaining(), None);
    }

    #[test]
    fn test_wrong_beats_golden() {
        let t = Target::new(Vec2::ZERO, 20.0, 3.0, true, true);
        assert_eq!(t.kind(), TargetKind::Wrong);
        assert_eq!(t.kind().points(), 0);
        assert!(t.is_golden());
    }

    #[test]
    fn test_target_exit() {
        let mut t = Target::new(Vec2::new(790.0, 100.0), 20.0, 2.0, false, false);
        assert!(!t.has_exited(800.0));
        t.pos.x = 823.0;
        assert!(t.has_exited(800.0));

        let t = Target::new(Vec2::new(-23.0, 100.0), 20.0, -2.0, false, false);
        assert!(t.has_exited(800.0));
    }

    #[test]
    fn test_launch_origin() {
        let field = Playfield::new(800.0, 600.0);
        let origin = field.launch_origin();
        assert_eq!(origin, Vec2::new(400.0, 570.0));
        assert!(field.contains(origin));
        assert!(!field.contains(Vec2::new(-0.1, 10.0)));
        assert!(field.contains(Vec2::new(800.0, 600.0)));
    }
}
