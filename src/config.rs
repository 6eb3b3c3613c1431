//! Morph configuration.
//!
//! [`MorphConfig`] is owned by the UI collaborator and may change between any
//! two ticks. It can be saved to and loaded from JSON. The engine never uses
//! it directly: [`ConfigGuard`] turns each snapshot into [`TickSettings`],
//! replacing bad fields so nothing non-finite reaches the particle loop.

use crate::error::ConfigError;
use crate::silhouette::Silhouette;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

/// Multiplier applied to the interaction factor at the reference intensity.
pub const EXPANSION_BASE: f32 = 2.5;
/// Intensity at which the expansion multiplier equals [`EXPANSION_BASE`].
pub const REFERENCE_INTENSITY: f32 = 2.5;

/// Morph speed slider range offered by the UI.
pub const MORPH_SPEED_RANGE: RangeInclusive<f32> = 0.5..=10.0;
/// Interaction intensity slider range offered by the UI.
pub const INTENSITY_RANGE: RangeInclusive<f32> = 0.5..=8.0;
/// Color swatches offered by the UI.
pub const PALETTE: [&str; 6] = ["#ffffff", "#ff0055", "#00ccff", "#ffaa00", "#aa00ff", "#00ff66"];

fn default_particle_count() -> u32 {
    6000
}

fn default_color() -> String {
    "#00ccff".into()
}

fn default_particle_radius() -> f32 {
    0.035
}

fn default_morph_speed() -> f32 {
    4.0
}

fn default_intensity() -> f32 {
    REFERENCE_INTENSITY
}

/// User-facing configuration snapshot.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MorphConfig {
    #[serde(default = "default_particle_count")]
    pub particle_count: u32,
    /// Opaque to the engine; `#rrggbb` for [`MorphConfig::color_rgb`].
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub silhouette: Silhouette,
    /// Point sprite radius. Rendering only.
    #[serde(default = "default_particle_radius")]
    pub particle_radius: f32,
    /// Fraction of the remaining distance covered per second (clamped to 1 per tick).
    #[serde(default = "default_morph_speed")]
    pub morph_speed: f32,
    /// Scales how far the interaction factor expands the shape.
    #[serde(default = "default_intensity")]
    pub interaction_intensity: f32,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            particle_count: default_particle_count(),
            color: default_color(),
            silhouette: Silhouette::default(),
            particle_radius: default_particle_radius(),
            morph_speed: default_morph_speed(),
            interaction_intensity: default_intensity(),
        }
    }
}

impl MorphConfig {
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_silhouette(mut self, silhouette: Silhouette) -> Self {
        self.silhouette = silhouette;
        self
    }

    pub fn with_morph_speed(mut self, speed: f32) -> Self {
        self.morph_speed = speed;
        self
    }

    pub fn with_interaction_intensity(mut self, intensity: f32) -> Self {
        self.interaction_intensity = intensity;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Check every field, returning all problems found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut problems = Vec::new();
        if self.particle_count == 0 {
            problems.push(ConfigError::ZeroParticleCount);
        }
        for (field, value) in [
            ("particle_radius", self.particle_radius),
            ("morph_speed", self.morph_speed),
            ("interaction_intensity", self.interaction_intensity),
        ] {
            if let Err(e) = check_non_negative(field, value) {
                problems.push(e);
            }
        }
        problems
    }

    /// Parse [`color`](Self::color) as `#rrggbb` into 0..1 RGB.
    pub fn color_rgb(&self) -> Option<Vec3> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Vec3::new(
            channel(0)? as f32 / 255.0,
            channel(2)? as f32 / 255.0,
            channel(4)? as f32 / 255.0,
        ))
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if !value.is_finite() {
        Err(ConfigError::NonFinite { field, value })
    } else if value < 0.0 {
        Err(ConfigError::Negative { field, value })
    } else {
        Ok(value)
    }
}

/// Expansion multiplier per unit of interaction factor for `intensity`.
///
/// `EXPANSION_BASE × intensity / REFERENCE_INTENSITY`. At the default
/// intensity this is the plain base, giving `1 + 2.5·factor`.
pub fn expansion_gain(intensity: f32) -> f32 {
    EXPANSION_BASE * intensity / REFERENCE_INTENSITY
}

/// Sanitized values the engine reads for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickSettings {
    pub particle_count: usize,
    pub silhouette: Silhouette,
    pub morph_speed: f32,
    pub interaction_intensity: f32,
}

/// Remembers the last good value of each field and substitutes it for bad ones.
#[derive(Clone, Debug)]
pub struct ConfigGuard {
    particle_count: u32,
    interaction_intensity: f32,
    particle_radius: f32,
    last_rejected: Vec<&'static str>,
}

impl Default for ConfigGuard {
    fn default() -> Self {
        Self::new(&MorphConfig::default())
    }
}

impl ConfigGuard {
    /// Start from `initial`, keeping defaults for any of its bad fields.
    pub fn new(initial: &MorphConfig) -> Self {
        let defaults = MorphConfig::default();
        let mut guard = Self {
            particle_count: defaults.particle_count,
            interaction_intensity: defaults.interaction_intensity,
            particle_radius: defaults.particle_radius,
            last_rejected: Vec::new(),
        };
        guard.sanitize(initial, &mut Vec::new());
        guard
    }

    /// Produce this tick's settings. Rejected fields are appended to `rejected`.
    ///
    /// Bad `particle_count`, `interaction_intensity` and `particle_radius`
    /// fall back to their last good values. A bad `morph_speed` becomes 0,
    /// which freezes the buffer for this tick.
    pub fn sanitize(&mut self, config: &MorphConfig, rejected: &mut Vec<ConfigError>) -> TickSettings {
        let before = rejected.len();

        if config.particle_count == 0 {
            rejected.push(ConfigError::ZeroParticleCount);
        } else {
            self.particle_count = config.particle_count;
        }

        match check_non_negative("interaction_intensity", config.interaction_intensity) {
            Ok(v) => self.interaction_intensity = v,
            Err(e) => rejected.push(e),
        }

        match check_non_negative("particle_radius", config.particle_radius) {
            Ok(v) => self.particle_radius = v,
            Err(e) => rejected.push(e),
        }

        let morph_speed = match check_non_negative("morph_speed", config.morph_speed) {
            Ok(v) => v,
            Err(e) => {
                rejected.push(e);
                0.0
            }
        };

        // Only warn when the set of bad fields changes, not on every frame
        let fresh = &rejected[before..];
        if !fresh.iter().map(ConfigError::field).eq(self.last_rejected.iter().copied()) {
            for e in fresh {
                log::warn!("{}; using last good value", e);
            }
            self.last_rejected = fresh.iter().map(ConfigError::field).collect();
        }

        TickSettings {
            particle_count: self.particle_count as usize,
            silhouette: config.silhouette,
            morph_speed,
            interaction_intensity: self.interaction_intensity,
        }
    }

    /// Last accepted particle radius, for the renderer.
    pub fn particle_radius(&self) -> f32 {
        self.particle_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MorphConfig::default();
        assert_eq!(config.particle_count, 6000);
        assert_eq!(config.silhouette, Silhouette::Heart);
        assert_eq!(config.morph_speed, 4.0);
        assert_eq!(config.interaction_intensity, 2.5);
        assert!(config.validate().is_empty());
        assert!(MORPH_SPEED_RANGE.contains(&config.morph_speed));
        assert!(INTENSITY_RANGE.contains(&config.interaction_intensity));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MorphConfig =
            serde_json::from_str(r#"{ "particle_count": 100, "silhouette": "Saturn" }"#).unwrap();
        assert_eq!(config.particle_count, 100);
        assert_eq!(config.silhouette, Silhouette::RingedPlanet);
        assert_eq!(config.morph_speed, 4.0);
    }

    #[test]
    fn test_save_load() {
        let path = std::env::temp_dir().join(format!("zen-particles-{}.json", std::process::id()));
        let config = MorphConfig::default()
            .with_particle_count(321)
            .with_silhouette(Silhouette::SeatedFigure)
            .with_color("#ff0055");
        config.save(&path).unwrap();
        let loaded = MorphConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = MorphConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_color_rgb() {
        let rgb = MorphConfig::default().with_color("#ff0000").color_rgb().unwrap();
        assert_eq!(rgb, Vec3::new(1.0, 0.0, 0.0));
        assert!(MorphConfig::default().with_color("blue").color_rgb().is_none());
        assert!(MorphConfig::default().with_color("#12345").color_rgb().is_none());
        for swatch in PALETTE {
            assert!(MorphConfig::default().with_color(swatch).color_rgb().is_some());
        }
    }

    #[test]
    fn test_expansion_gain_reference() {
        // Documented assumption: configured intensity scales the 2.5 base
        // relative to the default intensity.
        assert_eq!(expansion_gain(REFERENCE_INTENSITY), EXPANSION_BASE);
        assert_eq!(expansion_gain(5.0), 5.0);
        assert_eq!(expansion_gain(0.0), 0.0);
    }

    #[test]
    fn test_guard_keeps_last_good() {
        let good = MorphConfig::default().with_particle_count(500).with_interaction_intensity(3.0);
        let mut guard = ConfigGuard::new(&good);

        let bad = good
            .clone()
            .with_particle_count(0)
            .with_interaction_intensity(f32::INFINITY);
        let mut rejected = Vec::new();
        let settings = guard.sanitize(&bad, &mut rejected);

        assert_eq!(settings.particle_count, 500);
        assert_eq!(settings.interaction_intensity, 3.0);
        assert_eq!(rejected.len(), 2);
    }

    #[test]
    fn test_guard_bad_speed_freezes() {
        let mut guard = ConfigGuard::default();
        let mut rejected = Vec::new();
        for speed in [f32::NAN, f32::NEG_INFINITY, -1.0] {
            let settings = guard.sanitize(&MorphConfig::default().with_morph_speed(speed), &mut rejected);
            assert_eq!(settings.morph_speed, 0.0);
        }
        assert_eq!(rejected.len(), 3);
    }

    #[test]
    fn test_validate_reports_each_field() {
        let mut config = MorphConfig::default().with_particle_count(0).with_morph_speed(f32::NAN);
        config.particle_radius = -0.1;
        let problems = config.validate();
        assert_eq!(problems.len(), 3);
    }
}
