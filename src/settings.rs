//! Game settings and preferences
//!
//! Persisted separately from the high score through `platform::storage`.

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::consts::{MAX_PARTICLES, TRAIL_LENGTH};
use crate::error::StorageError;
use crate::platform::storage;
use crate::sim::AiDifficulty;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => MAX_PARTICLES / 4,
            QualityPreset::Medium => MAX_PARTICLES / 2,
            QualityPreset::High => MAX_PARTICLES,
        }
    }

    /// Trail length multiplier (1.0 = full)
    pub fn trail_quality(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.25,
            QualityPreset::Medium => 0.6,
            QualityPreset::High => 1.0,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Ball trails
    pub trails: bool,
    /// Hit sparks
    pub particles: bool,

    // === Opponent ===
    pub ai_enabled: bool,
    pub ai_difficulty: AiDifficulty,

    // === Accessibility ===
    /// Reduced motion (no particles)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::High,
            trails: true,
            particles: true,
            ai_enabled: false,
            ai_difficulty: AiDifficulty::Medium,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "settings";

    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops trails entirely
        if preset == QualityPreset::Low {
            self.trails = false;
        }
    }

    /// Effective particle cap (respects reduced_motion)
    pub fn max_particles(&self) -> usize {
        if !self.particles || self.reduced_motion {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Effective trail length
    pub fn trail_length(&self) -> usize {
        if !self.trails {
            0
        } else {
            (TRAIL_LENGTH as f32 * self.quality.trail_quality()).round() as usize
        }
    }

    /// Map preferences onto a simulation config
    pub fn apply(&self, config: &mut SimConfig) {
        config.effects.max_particles = self.max_particles();
        config.effects.trail_length = self.trail_length();
        config.ai.enabled = self.ai_enabled;
        config.ai.difficulty = self.ai_difficulty;
    }

    /// Load saved settings, falling back to defaults
    pub fn load() -> Self {
        match storage::load::<Self>(Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), StorageError> {
        storage::save(Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
