//! Configuration management for the application.
//!
//! This module handles loading and saving application configuration in
//! TOML format with platform-specific directory resolution. The app
//! config is separate from the host's `karabiner.json` store, which is
//! handled by [`crate::writer`].

use crate::constants::DEFAULT_PROFILE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Override of the host's configuration store location
    /// (defaults to `~/.config/karabiner/karabiner.json` when unset)
    pub karabiner_config: Option<PathBuf>,
}

/// Profile write settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteConfig {
    /// Profile name rules are written to
    #[serde(default = "default_profile")]
    pub profile: String,
    /// Copy the existing store aside before overwriting
    #[serde(default = "default_backup")]
    pub backup: bool,
}

/// Default profile name for deserialization.
fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

/// Default backup setting (true) for deserialization.
const fn default_backup() -> bool {
    true
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            backup: true,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/KeyRig/config.toml`
/// - macOS: `~/Library/Application Support/KeyRig/config.toml`
/// - Windows: `%APPDATA%\KeyRig\config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Profile write settings
    #[serde(default)]
    pub write: WriteConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("KeyRig");

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
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }

    /// Saves configuration to the config file, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        let config_path = Self::config_file_path()?;
        fs::write(&config_path, content).context(format!(
            "Failed to write config file: {}",
            config_path.display()
        ))?;

        Ok(())
    }
}
