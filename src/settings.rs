//! Game settings and preferences
//!
//! Loaded from a JSON file next to the binary; a missing or broken file
//! falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{CAMERA_SPEED, PADDLE_SPEED};
use crate::error::Result;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
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

    /// Particle capacity of each celebration emitter
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }

    /// Celebration emission rate (particles per second)
    pub fn emission_rate(&self) -> f32 {
        match self {
            QualityPreset::Low => 50.0,
            QualityPreset::Medium => 200.0,
            QualityPreset::High => 600.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Goal celebration particles
    pub particles: bool,

    // === Controls ===
    /// Free-fly camera speed (units per second)
    pub camera_speed: f32,
    /// Mouse look multiplier (1.0 = default sensitivity)
    pub mouse_sensitivity: f32,
    /// Paddle speed (units per second)
    pub paddle_speed: f32,

    // === Gameplay ===
    /// Serve in a random diagonal after a goal instead of the fixed serve
    pub random_serve: bool,
    /// Seed for serves and particle jitter
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,

            camera_speed: CAMERA_SPEED,
            mouse_sensitivity: 1.0,
            paddle_speed: PADDLE_SPEED,

            random_serve: false,
            seed: 0x5eed,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap (0 when particles are off)
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, logging and falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!(QualityPreset::from_str("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::from_str("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_particles_off_caps_at_zero() {
        let mut settings = Settings::from_preset(QualityPreset::High);
        assert_eq!(settings.max_particles(), 2000);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "quality": "Low", "random_serve": true }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.random_serve);
        assert_eq!(settings.paddle_speed, PADDLE_SPEED);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            seed: 99,
            camera_speed: 5.0,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(crate::Error::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("air-hockey-settings-that-does-not-exist.json");
        assert!(matches!(
            Settings::load_from_path(&path),
            Err(crate::Error::Io(_))
        ));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }
}
