//! Tuning configuration
//!
//! Optional JSON file read once at startup; every field has a default so a
//! missing or partial file still yields a runnable setup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: u32,
    #[serde(default = "default_window_height")]
    pub height: u32,
    #[serde(default = "default_vsync")]
    pub vsync: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LampConfig {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default = "default_map_path")]
    pub map_path: String,
    /// Full day/night cycle length in seconds
    #[serde(default = "default_day_length")]
    pub day_length_seconds: f32,
    /// Town lamp placement in tile coordinates
    #[serde(default = "default_lamp")]
    pub lamp: LampConfig,
}

fn default_window_width() -> u32 {
    1280
}

fn default_window_height() -> u32 {
    720
}

fn default_vsync() -> bool {
    true
}

fn default_map_path() -> String {
    "data/maps/frontier_town.map".to_owned()
}

fn default_day_length() -> f32 {
    72.0
}

fn default_lamp() -> LampConfig {
    LampConfig { x: 11.0, y: 7.0 }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            vsync: default_vsync(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            map_path: default_map_path(),
            day_length_seconds: default_day_length(),
            lamp: default_lamp(),
        }
    }
}

impl Config {
    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }

    /// Load, falling back to defaults when the file is missing or malformed
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert!(config.window.vsync);
        assert_eq!(config.map_path, "data/maps/frontier_town.map");
        assert_eq!(config.day_length_seconds, 72.0);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "day_length_seconds": 120.0 }"#).unwrap();
        assert_eq!(config.day_length_seconds, 120.0);
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.lamp.x, 11.0);
    }

    #[test]
    fn test_round_trip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.window.height, config.window.height);
        assert_eq!(back.map_path, config.map_path);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = Config::load_or_default("no-such-config-file.json");
        assert_eq!(config.window.width, 1280);
    }
}
