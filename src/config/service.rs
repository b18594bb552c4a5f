//! Loading the configuration file.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::types::AppConfig;
use super::validation::validate_config;

/// Get the config directory path (`~/.config/mangobar`).
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("mangobar"))
}

/// Default location of `config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoDirFound)
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFailed)?;
    toml::from_str(&content).map_err(ConfigError::ParseFailed)
}

/// Load the config from `path`, or from the default location.
///
/// A missing file silently yields defaults. An unreadable or invalid file
/// logs a warning and also yields defaults. Validation warnings are logged.
pub fn load_config(path: Option<&Path>) -> AppConfig {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!("{}, using defaults", e);
                return AppConfig::default();
            }
        },
    };

    if !config_path.exists() {
        tracing::debug!("Config file not found at {:?}, using defaults", config_path);
        return AppConfig::default();
    }

    let config = match read_config(&config_path) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", config_path);
            config
        }
        Err(e) => {
            tracing::warn!("{} ({:?}), using defaults", e, config_path);
            AppConfig::default()
        }
    };

    for warning in validate_config(&config) {
        tracing::warn!("Config validation: {} - {}", warning.field, warning.message);
    }

    config
}
