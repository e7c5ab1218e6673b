//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Default focus duration for tasks without one
//! - Recommendation refresh cadence
//! - Timer tick cadence
//! - Session reminder toggle
//!
//! Configuration is stored at `~/.config/studyflow/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

use super::data_dir;

/// Timer-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Minutes assumed for tasks that leave their duration unset.
    #[serde(default = "default_focus_minutes")]
    pub default_focus_minutes: u32,
    /// Seconds between countdown ticks.
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,
}

/// Recommendation-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Seconds between time-driven refreshes.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyflow/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub recommendation: RecommendationConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_focus_minutes: default_focus_minutes(),
            tick_secs: default_tick_secs(),
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

fn default_focus_minutes() -> u32 {
    60
}

fn default_tick_secs() -> u64 {
    1
}

fn default_refresh_secs() -> u64 {
    crate::recommend::REFRESH_INTERVAL_SECS
}

fn default_true() -> bool {
    true
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file does
    /// not exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let config =
            toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(config)
    }

    /// Persist the configuration.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let text = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, text).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_constants() {
        let config = Config::default();
        assert_eq!(config.timer.default_focus_minutes, 60);
        assert_eq!(config.timer.tick_secs, 1);
        assert_eq!(config.recommendation.refresh_secs, 60);
        assert!(config.notifications.enabled);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str("[timer]\ndefault_focus_minutes = 25\n").unwrap();
        assert_eq!(config.timer.default_focus_minutes, 25);
        assert_eq!(config.timer.tick_secs, 1);
        assert_eq!(config.recommendation.refresh_secs, 60);
    }

    #[test]
    fn toml_round_trip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.timer.default_focus_minutes, 60);
    }
}
