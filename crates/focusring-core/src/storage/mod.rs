//! Configuration persistence.
//!
//! Only user settings are stored. Timer state deliberately is not: every
//! run starts from a fresh, idle engine.

mod config;

pub use config::{Config, DurationsSection, NotificationsConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/focusring[-dev]/` based on FOCUSRING_ENV.
///
/// Set FOCUSRING_ENV=dev to use a development config directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSRING_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focusring-dev")
    } else {
        base_dir.join("focusring")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
