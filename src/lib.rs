//! Arcade Pong - deterministic ball-and-paddle simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `driver`: Fixed-timestep accumulator that feeds the simulation
//! - `config`: Data-driven tuning (`SimConfig`)
//! - `settings`: Persisted player preferences
//! - `highscores`: The persisted best-rally record
//! - `platform`: Browser/native storage abstraction

pub mod config;
pub mod driver;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{AiConfig, EffectsConfig, ServePolicy, SimConfig};
pub use driver::FixedStepDriver;
pub use error::{ConfigError, StorageError};
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};
pub use sim::{BallPaddleSimulator, GameEvent, GamePhase, Side, SimulationState, TickInput};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second); all per-tick speeds assume it
    pub const SIM_HZ: u32 = 120;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Longest frame the driver will account for (stall clamp)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 12;

    /// Playfield dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 1000.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    /// Distance of each paddle's left edge from its own side of the field
    pub const PADDLE_INSET: f32 = 50.0;
    /// Human paddle speed (pixels per tick)
    pub const PADDLE_SPEED: f32 = 5.0;
    /// Ticks a paddle stays highlighted after a hit
    pub const PADDLE_FLASH_TICKS: u32 = 10;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    /// Serve velocity components (pixels per tick, before multiplier)
    pub const SERVE_SPEED_X: f32 = 4.0;
    pub const SERVE_SPEED_Y: f32 = 4.0;
    /// Multiplier gained per side hit
    pub const SPEED_INCREMENT: f32 = 0.05;
    /// Multiplier ceiling
    pub const SPEED_CAP: f32 = 2.0;
    /// vy added for a hit at the very tip of the paddle
    pub const DEFLECTION_GAIN: f32 = 2.0;

    /// AI controller deadzone (pixels)
    pub const AI_DEADZONE: f32 = 5.0;

    /// Match rules
    pub const WINNING_SCORE: u32 = 7;
    /// "3, 2, 1" countdown before the first serve
    pub const COUNTDOWN_TICKS: u32 = 3 * SIM_HZ;
    /// Round pause after a goal
    pub const GOAL_PAUSE_TICKS: u32 = SIM_HZ;

    /// Visual effects
    pub const TRAIL_LENGTH: usize = 15;
    pub const PARTICLES_PER_HIT: usize = 15;
    pub const MAX_PARTICLES: usize = 256;
}
