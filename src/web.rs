//! Browser bindings
//!
//! A thin `wasm_bindgen` wrapper around `BallPaddleSimulator`. The page owns
//! the animation loop and the canvas; it calls `step` once per tick and reads
//! state back as JSON.

use wasm_bindgen::prelude::*;

use crate::config::SimConfig;
use crate::highscores::HighScore;
use crate::settings::Settings;
use crate::sim::{BallPaddleSimulator, GameEvent, PaddleInput, TickInput};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Arcade Pong starting...");
}

#[wasm_bindgen]
pub struct WasmSimulator {
    sim: BallPaddleSimulator,
    high_score: HighScore,
}

#[wasm_bindgen]
impl WasmSimulator {
    /// New match using saved settings and `seed` for effects
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WasmSimulator {
        let mut config = SimConfig {
            seed,
            ..SimConfig::default()
        };
        Settings::load().apply(&mut config);

        WasmSimulator {
            sim: BallPaddleSimulator::new(config),
            high_score: HighScore::load(),
        }
    }

    /// Advance one tick; returns the tick's events as a JSON array
    pub fn step(
        &mut self,
        left_up: bool,
        left_down: bool,
        right_up: bool,
        right_down: bool,
        pause: bool,
        toggle_ai: bool,
    ) -> String {
        let input = TickInput {
            left: PaddleInput {
                up: left_up,
                down: left_down,
            },
            right: PaddleInput {
                up: right_up,
                down: right_down,
            },
            pause,
            toggle_ai,
        };
        let events = self.sim.step(&input).1;
        if events.iter().any(|e| matches!(e, GameEvent::MatchOver { .. })) {
            self.record_rally();
        }

        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("Failed to serialize events: {e}");
            "[]".to_string()
        })
    }

    /// Start a new match; an abandoned match still counts toward the best rally
    pub fn reset(&mut self) {
        self.record_rally();
        self.sim.reset();
    }

    /// Full simulation state as JSON (effects excluded)
    pub fn state_json(&self) -> String {
        serde_json::to_string(self.sim.state()).unwrap_or_else(|e| {
            log::warn!("Failed to serialize state: {e}");
            "{}".to_string()
        })
    }

    pub fn best_rally(&self) -> u32 {
        self.high_score.best_rally
    }
}

impl WasmSimulator {
    fn record_rally(&mut self) {
        let longest = self.sim.state().longest_rally;
        if self.high_score.submit(longest) {
            log::info!("New best rally: {longest}");
            if let Err(e) = self.high_score.save() {
                log::warn!("Could not save high score: {e}");
            }
        }
    }
}
