//! Render configuration loading
//!
//! Uses RON (Rusty Object Notation) for human-readable config files. Every
//! field has a default, so a config file only needs to name what it changes.

use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};

/// Camera and image parameters, immutable for the renderer's lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Physical width of the image plane
    pub screen_width: f64,
    /// Physical height of the image plane; also the centering term for both
    /// pixel axes
    pub screen_height: f64,
    /// Distance from the eye to the image plane
    pub near_plane: f64,
    /// Pixels per physical unit
    pub scale: i32,
    /// Output image size in pixels
    pub image_width: i32,
    pub image_height: i32,
    /// Directional light
    pub light: (f64, f64, f64),
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            screen_width: 5.0,
            screen_height: 5.0,
            near_plane: 5.0,
            scale: 60,
            image_width: 400,
            image_height: 300,
            light: (-1.0, 0.0, 0.0),
        }
    }
}

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load a config from a RON string (for testing)
pub fn load_config_from_str(s: &str) -> Result<RenderConfig, ConfigError> {
    Ok(ron::from_str(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_scene() {
        let config = RenderConfig::default();
        assert_eq!(config.scale, 60);
        assert_eq!((config.image_width, config.image_height), (400, 300));
        assert!((config.near_plane - 5.0).abs() < 1e-9);
        assert_eq!(config.light, (-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = load_config_from_str("(scale: 2, image_width: 32, image_height: 32)").unwrap();
        assert_eq!(config.scale, 2);
        assert_eq!(config.image_width, 32);
        assert!((config.screen_height - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_bad_config_fails() {
        assert!(load_config_from_str("(scale: \"sixty\")").is_err());
    }
}
