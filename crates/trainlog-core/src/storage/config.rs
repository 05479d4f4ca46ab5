//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Rest timer defaults (initial seconds, quick presets, extend step)
//! - Notification preferences (alarm enabled, volume, custom sound)
//!
//! Configuration is stored at `~/.config/trainlog/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Rest timer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Initial rest duration for a fresh session, in seconds.
    #[serde(default = "default_rest_secs")]
    pub rest_secs: u32,
    /// Quick preset buttons, in seconds.
    #[serde(default = "default_presets")]
    pub presets: Vec<u32>,
    /// The "+30s" extend step, in seconds.
    #[serde(default = "default_extend_secs")]
    pub extend_secs: u32,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_volume")]
    pub volume: u32,
    /// Path to a custom alarm sound file (optional).
    #[serde(default)]
    pub custom_sound: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/trainlog/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_rest_secs() -> u32 {
    60
}
fn default_presets() -> Vec<u32> {
    vec![30, 60, 90, 120]
}
fn default_extend_secs() -> u32 {
    30
}
fn default_true() -> bool {
    true
}
fn default_volume() -> u32 {
    50
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            rest_secs: default_rest_secs(),
            presets: default_presets(),
            extend_secs: default_extend_secs(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: default_volume(),
            custom_sound: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/trainlog"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.rest_secs, 60);
        assert_eq!(parsed.timer.presets, vec![30, 60, 90, 120]);
        assert_eq!(parsed.notifications.volume, 50);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.timer.extend_secs, 30);
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn partial_timer_section_keeps_other_defaults() {
        let parsed: Config = toml::from_str("[timer]\nrest_secs = 90\n").unwrap();
        assert_eq!(parsed.timer.rest_secs, 90);
        assert_eq!(parsed.timer.extend_secs, 30);
    }
}
