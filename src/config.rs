//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{APP_NAME, CONFIG_DIR_ENV};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Canvas used when remapping overlays between normalized and pixel units.
///
/// Overlays whose name contains `landscape_marker` are mapped onto
/// `width x height`; every other overlay onto `height x width`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemapConfig {
    /// Landscape canvas width in pixels
    pub width: f64,
    /// Landscape canvas height in pixels
    pub height: f64,
    /// Substring identifying landscape overlays by name
    #[serde(default = "default_landscape_marker")]
    pub landscape_marker: String,
}

fn default_landscape_marker() -> String {
    "landscape".to_string()
}

impl Default for RemapConfig {
    fn default() -> Self {
        Self {
            width: 2560.0,
            height: 1440.0,
            landscape_marker: default_landscape_marker(),
        }
    }
}

/// Parameters of the portrait relayout.
///
/// Describes the device the overlay targets and the emulated screens that
/// are stacked at the top of a portrait canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortraitConfig {
    /// Device width in portrait orientation, pixels
    pub device_width: f64,
    /// Device height in portrait orientation, pixels
    pub device_height: f64,
    /// Width / height of one emulated screen
    pub screen_aspect: f64,
    /// Name prefix selecting portrait overlays
    #[serde(default = "default_name_prefix")]
    pub name_prefix: String,
    /// Name suffix excluding overlays from the relayout
    #[serde(default = "default_hidden_suffix")]
    pub hidden_suffix: String,
}

fn default_name_prefix() -> String {
    "portrait".to_string()
}

fn default_hidden_suffix() -> String {
    "-hidden".to_string()
}

impl Default for PortraitConfig {
    fn default() -> Self {
        Self {
            device_width: 1440.0,
            device_height: 2960.0,
            screen_aspect: 4.0 / 3.0,
            name_prefix: default_name_prefix(),
            hidden_suffix: default_hidden_suffix(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/LazyOverlay/config.toml`
/// - macOS: `~/Library/Application Support/LazyOverlay/config.toml`
/// - Windows: `%APPDATA%\LazyOverlay\config.toml`
///
/// `LAZYOVERLAY_CONFIG_DIR` overrides the directory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Coordinate remap canvas
    #[serde(default)]
    pub remap: RemapConfig,
    /// Portrait relayout parameters
    #[serde(default)]
    pub portrait: PortraitConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    ///
    /// - Linux: `~/.config/LazyOverlay/`
    /// - macOS: `~/Library/Application Support/LazyOverlay/`
    /// - Windows: `%APPDATA%\LazyOverlay\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        self.validate()?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - remap and device dimensions are positive
    /// - screen aspect is positive
    /// - name markers are not empty
    pub fn validate(&self) -> Result<()> {
        let positive = |value: f64| value.is_finite() && value > 0.0;

        if !positive(self.remap.width) || !positive(self.remap.height) {
            anyhow::bail!(
                "Remap dimensions must be positive, got {}x{}",
                self.remap.width,
                self.remap.height
            );
        }

        if self.remap.landscape_marker.is_empty() {
            anyhow::bail!("Landscape marker cannot be empty");
        }

        if !positive(self.portrait.device_width) || !positive(self.portrait.device_height) {
            anyhow::bail!(
                "Device dimensions must be positive, got {}x{}",
                self.portrait.device_width,
                self.portrait.device_height
            );
        }

        if !positive(self.portrait.screen_aspect) {
            anyhow::bail!(
                "Screen aspect must be positive, got {}",
                self.portrait.screen_aspect
            );
        }

        if self.portrait.name_prefix.is_empty() {
            anyhow::bail!("Portrait name prefix cannot be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert!((config.remap.width - 2560.0).abs() < f64::EPSILON);
        assert!((config.remap.height - 1440.0).abs() < f64::EPSILON);
        assert_eq!(config.remap.landscape_marker, "landscape");
        assert_eq!(config.portrait.name_prefix, "portrait");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::new();
        config.remap.width = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.portrait.screen_aspect = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.remap.landscape_marker.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::new();
        config.remap.width = 1920.0;
        config.remap.height = 1080.0;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(!temp_dir.path().join("config.toml.tmp").exists());
    }

    #[test]
    fn test_config_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(loaded, Config::new());
    }

    #[test]
    fn test_config_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[remap]\nwidth = 1280.0\nheight = 720.0\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!((loaded.remap.width - 1280.0).abs() < f64::EPSILON);
        assert_eq!(loaded.remap.landscape_marker, "landscape");
        assert_eq!(loaded.portrait, PortraitConfig::default());
    }

    #[test]
    fn test_config_load_rejects_invalid_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[remap]\nwidth = -5.0\nheight = 720.0\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
