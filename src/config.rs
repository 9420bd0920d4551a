//! Simulation tuning
//!
//! Defaults mirror `crate::consts`. Every struct is `#[serde(default)]`, so a
//! tuning file only needs the fields it changes.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{AiDifficulty, Side};

/// Which way the ball is served after a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServePolicy {
    /// Serve toward the side that conceded the point
    #[default]
    TowardConceder,
    /// Serve toward the side that just scored
    TowardScorer,
}

impl ServePolicy {
    pub fn serve_toward(&self, scorer: Side) -> Side {
        match self {
            ServePolicy::TowardConceder => scorer.opposite(),
            ServePolicy::TowardScorer => scorer,
        }
    }
}

/// AI opponent settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub enabled: bool,
    /// Paddle the AI drives
    pub side: Side,
    pub difficulty: AiDifficulty,
    /// No correction while the target is within this many pixels of the paddle center
    pub deadzone: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            side: Side::Right,
            difficulty: AiDifficulty::Medium,
            deadzone: AI_DEADZONE,
        }
    }
}

/// Visual effect queue sizes (never affect physics)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub enabled: bool,
    pub trail_length: usize,
    pub particles_per_hit: usize,
    pub max_particles: usize,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trail_length: TRAIL_LENGTH,
            particles_per_hit: PARTICLES_PER_HIT,
            max_particles: MAX_PARTICLES,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub field_width: f32,
    pub field_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_inset: f32,
    pub paddle_speed: f32,
    pub paddle_flash_ticks: u32,

    pub ball_radius: f32,
    pub serve_speed_x: f32,
    pub serve_speed_y: f32,
    pub speed_increment: f32,
    pub speed_cap: f32,
    pub deflection_gain: f32,

    pub winning_score: u32,
    pub countdown_ticks: u32,
    pub goal_pause_ticks: u32,
    /// Direction of the very first serve of a match
    pub opening_serve: Side,
    pub serve_policy: ServePolicy,

    pub ai: AiConfig,
    pub effects: EffectsConfig,

    /// Seed for the effect RNG
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_inset: PADDLE_INSET,
            paddle_speed: PADDLE_SPEED,
            paddle_flash_ticks: PADDLE_FLASH_TICKS,

            ball_radius: BALL_RADIUS,
            serve_speed_x: SERVE_SPEED_X,
            serve_speed_y: SERVE_SPEED_Y,
            speed_increment: SPEED_INCREMENT,
            speed_cap: SPEED_CAP,
            deflection_gain: DEFLECTION_GAIN,

            winning_score: WINNING_SCORE,
            countdown_ticks: COUNTDOWN_TICKS,
            goal_pause_ticks: GOAL_PAUSE_TICKS,
            opening_serve: Side::Right,
            serve_policy: ServePolicy::TowardConceder,

            ai: AiConfig::default(),
            effects: EffectsConfig::default(),

            seed: 12345,
        }
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_radius", self.ball_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if self.paddle_height >= self.field_height {
            return Err(ConfigError::Invalid(format!(
                "paddle_height {} must be smaller than field_height {}",
                self.paddle_height, self.field_height
            )));
        }
        if 2.0 * self.ball_radius >= self.field_height {
            return Err(ConfigError::Invalid("ball does not fit in the field".into()));
        }
        if self.paddle_inset < 0.0
            || self.paddle_inset + self.paddle_width >= self.field_width / 2.0
        {
            return Err(ConfigError::Invalid(format!(
                "paddle_inset {} puts paddles outside their half of the field",
                self.paddle_inset
            )));
        }
        if self.serve_speed_x <= 0.0 {
            return Err(ConfigError::Invalid("serve_speed_x must be positive".into()));
        }
        if self.speed_cap < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "speed_cap {} must be at least 1.0",
                self.speed_cap
            )));
        }
        if self.speed_increment < 0.0 {
            return Err(ConfigError::Invalid("speed_increment must not be negative".into()));
        }
        if self.winning_score == 0 {
            return Err(ConfigError::Invalid("winning_score must be at least 1".into()));
        }
        if self.paddle_speed < 0.0 || self.ai.deadzone < 0.0 {
            return Err(ConfigError::Invalid("speeds and deadzone must not be negative".into()));
        }
        Ok(())
    }

    /// Left edge x of a paddle
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_inset,
            Side::Right => self.field_width - self.paddle_inset,
        }
    }

    /// Largest legal paddle y (paddle y is its top edge)
    pub fn paddle_max_y(&self) -> f32 {
        self.field_height - self.paddle_height
    }

    /// Clamp paddle Y to arena bounds
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.paddle_max_y())
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.field_width / 2.0, self.field_height / 2.0)
    }

    /// Speed multiplier a freshly served ball starts with
    pub fn base_multiplier(&self) -> f32 {
        1.0f32.min(self.speed_cap)
    }

    /// Unscaled serve velocity heading toward `toward`
    pub fn serve_velocity(&self, toward: Side) -> Vec2 {
        Vec2::new(toward.sign() * self.serve_speed_x, self.serve_speed_y)
    }
}
