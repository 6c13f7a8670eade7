//! TOML-based application configuration.
//!
//! Stores the two duration settings and the notification preference at
//! `~/.config/focusring/config.toml`. Raw values are kept as written and
//! clamped when handed to the engine, so a hand-edited file can never put
//! the countdown outside its valid ranges.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::config_dir;
use crate::error::ConfigError;
use crate::timer::{Durations, DEFAULT_BREAK_MINUTES, DEFAULT_WORK_MINUTES};

/// Duration settings, minutes granularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationsSection {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: i64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: i64,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusring/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub durations: DurationsSection,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_work_minutes() -> i64 {
    i64::from(DEFAULT_WORK_MINUTES)
}
fn default_break_minutes() -> i64 {
    i64::from(DEFAULT_BREAK_MINUTES)
}
fn default_true() -> bool {
    true
}

impl Default for DurationsSection {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            durations: DurationsSection::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}

impl Config {
    /// Path of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults when no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if
    /// the default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
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
        self.save_to(&Self::path()?)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from disk, returning the defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Clamped durations for engine construction.
    pub fn durations(&self) -> Durations {
        Durations::new(self.durations.work_minutes, self.durations.break_minutes)
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "durations.work_minutes" => Some(self.durations.work_minutes.to_string()),
            "durations.break_minutes" => Some(self.durations.break_minutes.to_string()),
            "notifications.enabled" => Some(self.notifications.enabled.to_string()),
            _ => None,
        }
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be
    /// parsed, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "durations.work_minutes" => self.durations.work_minutes = parse_number(key, value)?,
            "durations.break_minutes" => self.durations.break_minutes = parse_number(key, value)?,
            "notifications.enabled" => {
                self.notifications.enabled = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("cannot parse '{value}' as bool"),
                })?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn parse_number(key: &str, value: &str) -> Result<i64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("cannot parse '{value}' as number"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Mode;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.durations.work_minutes, 25);
        assert_eq!(parsed.durations.break_minutes, 5);
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn missing_sections_fill_with_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.durations.work_minutes, 25);
        assert!(parsed.notifications.enabled);

        let parsed: Config = toml::from_str("[durations]\nwork_minutes = 40\n").unwrap();
        assert_eq!(parsed.durations.work_minutes, 40);
        assert_eq!(parsed.durations.break_minutes, 5);
    }

    #[test]
    fn durations_clamp_out_of_range_file_values() {
        let parsed: Config =
            toml::from_str("[durations]\nwork_minutes = 500\nbreak_minutes = 45\n").unwrap();
        let durations = parsed.durations();
        assert_eq!(durations.minutes(Mode::Work), 90);
        assert_eq!(durations.minutes(Mode::Break), 30);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("durations.work_minutes").as_deref(), Some("25"));
        assert_eq!(cfg.get("notifications.enabled").as_deref(), Some("true"));
        assert!(cfg.get("durations.missing_key").is_none());
    }

    #[test]
    fn apply_updates_known_keys() {
        let mut cfg = Config::default();
        cfg.apply("durations.break_minutes", "12").unwrap();
        assert_eq!(cfg.durations.break_minutes, 12);
        cfg.apply("notifications.enabled", "false").unwrap();
        assert!(!cfg.notifications.enabled);
    }

    #[test]
    fn apply_rejects_unknown_key_and_bad_value() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("durations.nope", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.apply("durations.work_minutes", "abc"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.durations.work_minutes, 25);
        assert!(path.exists());

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.durations.break_minutes, 5);
    }

    #[test]
    fn load_from_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
