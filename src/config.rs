//! Configuration types for GAUHATT.
//!
//! Every section defaults to the values the product ships with, so a JSON file
//! only needs the keys it wants to override.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::surface::Rgba;

/// Tuning for the leaf particle background.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Surface area (px²) per particle; count is `floor(w * h / area_per_particle)`.
    pub area_per_particle: f32,
    /// Velocity components are drawn from `(rand - 0.5) * velocity_spread`.
    pub velocity_spread: f32,
    /// Smallest base size.
    pub min_size: f32,
    /// Base size is drawn from `[min_size, min_size + size_spread)`.
    pub size_spread: f32,
    /// Rotation speed is drawn from `(rand - 0.5) * rotation_spread`.
    pub rotation_spread: f32,
    /// Pointer distance under which leaves grow and brighten.
    pub max_distance: f32,
    /// Extra size at zero pointer distance.
    pub size_gain: f32,
    /// Alpha of a leaf outside `max_distance`.
    pub ambient_alpha: f32,
    /// Alpha of a leaf right at `max_distance`.
    pub near_alpha: f32,
    /// Extra alpha at zero pointer distance.
    pub alpha_gain: f32,
    /// Pointer distance under which a link line is drawn.
    pub link_distance: f32,
    /// Link alpha at zero pointer distance.
    pub link_alpha: f32,
    pub link_width: f32,
    /// Leaves larger than this get a center vein.
    pub vein_threshold: f32,
    /// Leaf and link hue.
    pub color: [u8; 3],
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            area_per_particle: 25_000.0,
            velocity_spread: 0.4,
            min_size: 4.0,
            size_spread: 8.0,
            rotation_spread: 0.02,
            max_distance: 150.0,
            size_gain: 4.0,
            ambient_alpha: 0.25,
            near_alpha: 0.4,
            alpha_gain: 0.4,
            link_distance: 120.0,
            link_alpha: 0.2,
            link_width: 0.5,
            vein_threshold: 10.0,
            color: [76, 154, 42],
        }
    }
}

impl FieldConfig {
    /// Leaf hue, fully opaque.
    pub fn color(&self) -> Rgba {
        let [r, g, b] = self.color;
        Rgba::rgb(r, g, b)
    }
}

/// Settings for the authentication client and its mock.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    /// Simulated latency of every mock call.
    pub latency_ms: u64,
    /// The only code the mock accepts.
    pub otp_code: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.gauhatt.com/v1".into(),
            timeout_ms: 10_000,
            latency_ms: 1_000,
            otp_code: "123456".into(),
        }
    }
}

impl AuthConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub field: FieldConfig,
    pub auth: AuthConfig,
}

impl Config {
    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_values() {
        let config = Config::default();
        assert_eq!(config.field.area_per_particle, 25_000.0);
        assert_eq!(config.field.max_distance, 150.0);
        assert_eq!(config.field.link_distance, 120.0);
        assert_eq!(config.field.color, [76, 154, 42]);
        assert_eq!(config.auth.timeout(), Duration::from_secs(10));
        assert_eq!(config.auth.otp_code, "123456");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "field": { "max_distance": 90.0 } }"#).unwrap();
        assert_eq!(config.field.max_distance, 90.0);
        assert_eq!(config.field.ambient_alpha, 0.25);
        assert_eq!(config.auth, AuthConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("gauhatt-config-{}.json", std::process::id()));
        let mut config = Config::default();
        config.auth.latency_ms = 5;
        config.field.color = [1, 2, 3];

        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, config);
    }
}
