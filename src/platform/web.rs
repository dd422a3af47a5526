//! Browser bindings
//!
//! JavaScript owns the canvas, DOM menus and `requestAnimationFrame`; it
//! forwards pointer and menu events here and reads back JSON snapshots to draw.

use glam::Vec2;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::highscores::{BestScoreStore, BestScores};
use crate::settings::Settings;
use crate::sim::{AmmoMode, Phase, Playfield, Session, tick};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Snowball Toss (web) starting...");
}

/// Monotonic milliseconds, falling back to wall clock
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or_else(js_sys::Date::now, |p| p.now())
}

/// Scoreboard and menu text data
#[derive(Serialize)]
struct Hud {
    phase: Phase,
    mode: &'static str,
    /// `None` renders as ∞
    ammo: Option<u32>,
    score: u64,
    hits: u32,
    final_score: u64,
    best: u64,
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    scores: BestScores,
    settings: Settings,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let session = Session::new(Playfield::new(width, height), seed);
        WebGame {
            session,
            scores: BestScores::load(),
            settings,
        }
    }

    pub fn on_press_at(&mut self, x: f32, y: f32) -> bool {
        self.session.press(Vec2::new(x, y), now_ms())
    }

    pub fn on_move_at(&mut self, x: f32, y: f32) {
        self.session.drag_to(Vec2::new(x, y), now_ms());
    }

    /// Returns true if a throw was made
    pub fn on_release_at(&mut self, x: f32, y: f32) -> bool {
        self.session.release(Vec2::new(x, y), now_ms()).is_some()
    }

    pub fn on_tick(&mut self, elapsed_ms: f64) {
        tick(&mut self.session, elapsed_ms, &mut self.scores);
    }

    pub fn on_start(&mut self, mode_key: &str) -> bool {
        let started = self.session.start_key(mode_key);
        if started {
            self.settings.remember_mode(self.session.mode());
        }
        started
    }

    pub fn on_pause_toggle(&mut self) -> bool {
        self.session.toggle_pause()
    }

    pub fn on_resume(&mut self) -> bool {
        self.session.resume()
    }

    pub fn on_exit(&mut self) {
        self.session.exit();
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.session.resize(width, height);
    }

    /// Mode preselected on the start menu
    pub fn preferred_mode(&self) -> String {
        self.settings.mode.key().to_string()
    }

    pub fn best_score(&self, mode_key: &str) -> f64 {
        self.scores.best(AmmoMode::from_key(mode_key)) as f64
    }

    pub fn launch_x(&self) -> f32 {
        self.session.launch_origin().x
    }

    pub fn launch_y(&self) -> f32 {
        self.session.launch_origin().y
    }

    pub fn targets_json(&self) -> String {
        serde_json::to_string(self.session.targets()).unwrap_or_else(|_| "[]".to_string())
    }

    /// `null` when nothing is in flight
    pub fn projectile_json(&self) -> String {
        serde_json::to_string(&self.session.projectile()).unwrap_or_else(|_| "null".to_string())
    }

    pub fn hud_json(&self) -> String {
        let mode = self.session.mode();
        let hud = Hud {
            phase: self.session.phase(),
            mode: mode.key(),
            ammo: self.session.ammo().remaining(),
            score: self.session.score(),
            hits: self.session.hits(),
            final_score: self.session.final_score(),
            best: self.scores.best(mode),
        };
        serde_json::to_string(&hud).unwrap_or_else(|_| "{}".to_string())
    }

    /// Aim overlay, trimmed to what the player has enabled
    pub fn aim_json(&self) -> String {
        let preview = self.session.aim_preview().map(|mut p| {
            if !self.settings.trajectory_preview {
                p.path.clear();
            }
            if !self.settings.power_meter {
                p.power = 0.0;
            }
            p
        });
        serde_json::to_string(&preview).unwrap_or_else(|_| "null".to_string())
    }

    /// Events since the last call, for sounds and effects
    pub fn events_json(&mut self) -> String {
        serde_json::to_string(&self.session.drain_events()).unwrap_or_else(|_| "[]".to_string())
    }
}
