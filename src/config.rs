//! Configuration file handling.
//!
//! Stored as TOML at `<config dir>/readalong/config.toml`, or wherever
//! `READALONG_CONFIG` points. Missing fields fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::sync::SyncConfig;
use crate::timeindex::ValidationMode;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "READALONG_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sync: SyncConfig,
    pub index: IndexConfig,
    pub player: PlayerConfig,
}

/// TimeIndex loading options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// `trust` accepts data as delivered, `strict` fails on the first violation
    pub validation: ValidationMode,
}

/// Terminal player options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Minimum time between sync ticks
    pub frame_interval_ms: u64,
    /// Initial playback speed multiplier
    pub playback_rate: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            playback_rate: 1.0,
        }
    }
}

impl PlayerConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl Config {
    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("readalong").join("config.toml"))
    }

    /// Load from the default location, or defaults if no file exists.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        Ok(config)
    }

    /// Parse and validate TOML content.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Save to the default location, creating parent directories.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("Failed to write config: {:?}", path))?;
        Ok(())
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.sync.snap_threshold.is_finite() || self.sync.snap_threshold < 0.0 {
            bail!(
                "sync.snap_threshold must be >= 0 (got {})",
                self.sync.snap_threshold
            );
        }
        if !self.sync.seek_lead_in.is_finite() || self.sync.seek_lead_in < 0.0 {
            bail!(
                "sync.seek_lead_in must be >= 0 (got {})",
                self.sync.seek_lead_in
            );
        }
        if self.player.frame_interval_ms == 0 {
            bail!("player.frame_interval_ms must be at least 1");
        }
        if !self.player.playback_rate.is_finite() || self.player.playback_rate <= 0.0 {
            bail!(
                "player.playback_rate must be positive (got {})",
                self.player.playback_rate
            );
        }
        Ok(())
    }
}
