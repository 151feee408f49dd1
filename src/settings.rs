//! Simulation settings
//!
//! World size, frame rate and spawn parameters. Defaults reproduce the
//! reference toy; a JSON file can override any of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::frame_gravity;

/// Named presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SimPreset {
    /// 240 fps, 100 px per meter
    #[default]
    Reference,
    /// 60 fps, same scale (four times the per-frame gravity)
    Slow,
}

impl SimPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimPreset::Reference => "Reference",
            SimPreset::Slow => "Slow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reference" | "ref" => Some(SimPreset::Reference),
            "slow" => Some(SimPreset::Slow),
            _ => None,
        }
    }

    /// Frames per second for this preset
    pub fn fps(&self) -> u32 {
        match self {
            SimPreset::Reference => DEFAULT_FPS,
            SimPreset::Slow => 60,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset last applied; `fps` in the file is authoritative
    #[serde(skip)]
    pub preset: SimPreset,

    // === World ===
    /// Screen width in pixels (balls leaving past 0 or width are removed)
    pub width: f32,
    /// Screen height in pixels (the floor)
    pub height: f32,

    // === Timing ===
    pub fps: u32,
    pub pixels_per_meter: f32,

    // === Spawning ===
    pub spawn_radius: f32,
    pub spawn_mass: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: SimPreset::Reference,

            width: 1280.0,
            height: 720.0,

            fps: DEFAULT_FPS,
            pixels_per_meter: DEFAULT_PIXELS_PER_METER,

            spawn_radius: SPAWN_RADIUS,
            spawn_mass: SPAWN_MASS,
        }
    }
}

impl Settings {
    /// Create settings from a preset
    pub fn from_preset(preset: SimPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a preset (updates preset-dependent settings)
    pub fn apply_preset(&mut self, preset: SimPreset) {
        self.preset = preset;
        self.fps = preset.fps();
    }

    /// Settings for a given screen size
    pub fn with_bounds(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Per-frame downward acceleration in pixels/frame²
    pub fn gravity(&self) -> f32 {
        frame_gravity(self.pixels_per_meter, self.fps)
    }

    /// Check that every value gives a usable world
    pub fn validate(&self) -> Result<(), String> {
        if self.fps == 0 {
            return Err("fps must be at least 1".into());
        }
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("pixels_per_meter", self.pixels_per_meter),
            ("spawn_radius", self.spawn_radius),
            ("spawn_mass", self.spawn_mass),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be finite and > 0, got {}", name, value));
            }
        }
        Ok(())
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        settings
            .validate()
            .map_err(<serde_json::Error as serde::de::Error>::custom)?;
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring invalid settings in {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read settings {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
