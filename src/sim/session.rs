//! Session state machine
//!
//! Owns everything that changes during play: phase, ammo, score, the target
//! population and the projectile slot. Menu transitions and pointer input are
//! handled here between ticks; per-frame advancement lives in `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::gesture::GestureTracker;
use super::projectile::{Projectile, trajectory_preview};
use super::spawner::spawn_targets;
use super::state::{Ammo, AmmoMode, GameEvent, GameOverReason, Phase, Playfield, Target};
use crate::consts::*;
use crate::highscores::BestScoreStore;

/// What to draw while the player is aiming
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AimPreview {
    /// Current drag point
    pub cursor: Vec2,
    /// Flick speed as a fraction of the cap
    pub power: f32,
    /// Predicted path; empty while a projectile is already in flight
    pub path: Vec<Vec2>,
}

/// One play session
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) field: Playfield,
    pub(crate) phase: Phase,
    pub(crate) mode: AmmoMode,
    pub(crate) ammo: Ammo,
    pub(crate) score: u64,
    pub(crate) hits: u32,
    pub(crate) misses: u32,
    /// Score at the moment the last run ended
    pub(crate) final_score: u64,
    /// Live targets, oldest first
    pub(crate) targets: Vec<Target>,
    pub(crate) projectile: Option<Projectile>,
    pub(crate) gesture: GestureTracker,
    /// Latest drag position, `Some` while a drag is active
    pub(crate) drag: Option<Vec2>,
    /// Queued for the host, which drains it every frame; capped at
    /// `MAX_QUEUED_EVENTS`
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl Session {
    /// Create a session on the title menu
    ///
    /// Targets are spawned right away but stay frozen until a run starts.
    pub fn new(field: Playfield, seed: u64) -> Self {
        let mut session = Self {
            field,
            phase: Phase::MenuInitial,
            mode: AmmoMode::default(),
            ammo: AmmoMode::default().starting_ammo(),
            score: 0,
            hits: 0,
            misses: 0,
            final_score: 0,
            targets: Vec::with_capacity(MAX_TARGETS),
            projectile: None,
            gesture: GestureTracker::new(),
            drag: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        session.reset();
        session
    }

    // === Read access for the UI ===

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> AmmoMode {
        self.mode
    }

    pub fn ammo(&self) -> Ammo {
        self.ammo
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn final_score(&self) -> u64 {
        self.final_score
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        self.projectile.as_ref()
    }

    pub fn playfield(&self) -> Playfield {
        self.field
    }

    pub fn launch_origin(&self) -> Vec2 {
        self.field.launch_origin()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Power meter and dotted path for the current drag, if any
    pub fn aim_preview(&self) -> Option<AimPreview> {
        let cursor = self.drag?;
        let speed = self.gesture.flick_speed();
        let path = if self.projectile.is_none() {
            trajectory_preview(self.launch_origin(), cursor, speed)
        } else {
            Vec::new()
        };
        Some(AimPreview {
            cursor,
            power: self.gesture.power_ratio(),
            path,
        })
    }

    // === Menu transitions ===

    /// Start a fresh run in `mode` from any menu
    pub fn start(&mut self, mode: AmmoMode) -> bool {
        if !self.phase.is_menu() {
            log::warn!("Ignoring start while {:?}", self.phase);
            return false;
        }
        self.mode = mode;
        self.ammo = mode.starting_ammo();
        self.reset();
        log::info!("Starting run in mode {}", mode.key());
        self.set_phase(Phase::Playing);
        true
    }

    /// Start from a menu key; unknown keys select unlimited ammo
    pub fn start_key(&mut self, key: &str) -> bool {
        self.start(AmmoMode::from_key(key))
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Playing {
            log::debug!("Ignoring pause while {:?}", self.phase);
            return false;
        }
        self.cancel_drag();
        self.set_phase(Phase::MenuPaused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::MenuPaused {
            log::debug!("Ignoring resume while {:?}", self.phase);
            return false;
        }
        self.set_phase(Phase::Playing);
        true
    }

    /// Abandon the run and return to the title menu
    pub fn exit(&mut self) {
        self.reset();
        self.set_phase(Phase::MenuInitial);
    }

    /// Pause button / Escape: pause while playing, otherwise get back into play
    ///
    /// From the pause menu this resumes. From the title or game-over menu it
    /// starts a new run in the current mode.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Playing => self.pause(),
            Phase::MenuPaused => self.resume(),
            Phase::MenuInitial | Phase::MenuGameOver => self.start(self.mode),
        }
    }

    /// Playfield resized; entities keep their coordinates
    pub fn resize(&mut self, width: f32, height: f32) {
        self.field = Playfield::new(width, height);
    }

    // === Pointer input ===

    /// Begin a drag if the press lands on the launch point
    pub fn press(&mut self, pos: Vec2, t_ms: f64) -> bool {
        if self.phase != Phase::Playing || self.ammo.is_exhausted() {
            return false;
        }
        if pos.distance(self.launch_origin()) > PRESS_RADIUS {
            return false;
        }
        self.gesture.clear();
        self.gesture.add_sample(pos, t_ms);
        self.drag = Some(pos);
        true
    }

    /// Pointer moved while held
    pub fn drag_to(&mut self, pos: Vec2, t_ms: f64) {
        if self.phase != Phase::Playing || self.drag.is_none() {
            return;
        }
        if self.ammo.is_exhausted() {
            self.cancel_drag();
            return;
        }
        self.gesture.add_sample(pos, t_ms);
        self.drag = Some(pos);
    }

    /// Pointer released; throws if the flick was fast enough
    ///
    /// Returns the launch speed when a projectile was created.
    pub fn release(&mut self, pos: Vec2, t_ms: f64) -> Option<f32> {
        if self.phase != Phase::Playing || self.drag.is_none() {
            self.cancel_drag();
            return None;
        }
        self.gesture.add_sample(pos, t_ms);
        let speed = self.gesture.flick_speed();
        self.cancel_drag();
        self.try_launch(pos, speed)
    }

    /// Create the projectile toward `aim` unless `speed` is below the minimum
    pub(crate) fn try_launch(&mut self, aim: Vec2, speed: f32) -> Option<f32> {
        if speed < MIN_FLICK_SPEED {
            log::debug!("Flick too slow ({:.2}), throw cancelled", speed);
            self.push_event(GameEvent::LaunchCancelled { speed });
            return None;
        }
        if self.projectile.is_some() {
            log::debug!("Replacing in-flight projectile");
        }
        self.projectile = Some(Projectile::launch(self.launch_origin(), aim, speed));
        self.ammo.consume();
        log::debug!("Launched at {:.2} (ammo {:?})", speed, self.ammo);
        self.push_event(GameEvent::Launched { speed });
        Some(speed)
    }

    fn cancel_drag(&mut self) {
        self.drag = None;
        self.gesture.clear();
    }

    // === Internals shared with tick ===

    /// Clear the board and score, then spawn a fresh set of targets
    pub(crate) fn reset(&mut self) {
        self.score = 0;
        self.hits = 0;
        self.misses = 0;
        self.projectile = None;
        self.targets.clear();
        self.cancel_drag();
        self.spawn();
    }

    /// One spawner call; tops the population up by 1-2 targets
    pub(crate) fn spawn(&mut self) {
        let spawned = spawn_targets(&mut self.rng, &self.field, &self.targets);
        self.targets.extend(spawned);
    }

    /// End the run, recording the best score first
    pub(crate) fn game_over(&mut self, reason: GameOverReason, store: &mut impl BestScoreStore) {
        if self.phase != Phase::Playing {
            return;
        }
        if store.set_best_if_higher(self.mode, self.score) {
            log::info!("New best for mode {}: {}", self.mode.key(), self.score);
        }
        self.final_score = self.score;
        if reason == GameOverReason::WrongTarget {
            self.score = 0;
            self.misses = 0;
        }
        log::info!(
            "Game over ({:?}), final score {}",
            reason,
            self.final_score
        );
        self.push_event(GameEvent::GameOver {
            reason,
            final_score: self.final_score,
        });
        self.cancel_drag();
        self.set_phase(Phase::MenuGameOver);
    }

    /// Queue an event, dropping the oldest once the host falls behind
    pub(crate) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_QUEUED_EVENTS {
            let excess = self.events.len() + 1 - MAX_QUEUED_EVENTS;
            self.events.drain(..excess);
        }
        self.events.push(event);
    }

    fn set_phase(&mut self, to: Phase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.push_event(GameEvent::PhaseChanged { from, to });
    }
}
