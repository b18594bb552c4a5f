//! Configuration type definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bridge::{DEFAULT_POLL_INTERVAL, DEFAULT_TAG_COUNT};
use crate::mmsg::DEFAULT_TIMEOUT;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Monitor to track (e.g. `"DP-3"`). Unset means whichever monitor mmsg lists first.
    pub monitor: Option<String>,
    /// Name or path of the mmsg binary.
    pub mmsg_path: String,
    /// Milliseconds between refreshes.
    pub poll_interval_ms: u64,
    /// Milliseconds a single mmsg invocation may run before it is abandoned.
    pub command_timeout_ms: u64,
    /// Tag count assumed until mmsg reports one.
    pub default_tag_count: u32,
}

impl AppConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms.max(1))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            monitor: None,
            mmsg_path: "mmsg".to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            command_timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            default_tag_count: DEFAULT_TAG_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.monitor, None);
        assert_eq!(config.mmsg_path, "mmsg");
        assert_eq!(config.poll_interval(), Duration::from_millis(1000));
        assert_eq!(config.command_timeout(), Duration::from_secs(5));
        assert_eq!(config.default_tag_count, 9);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(r#"monitor = "DP-3""#).unwrap();
        assert_eq!(config.monitor.as_deref(), Some("DP-3"));
        assert_eq!(config.poll_interval_ms, 1000);
    }

    #[test]
    fn test_zero_durations_are_clamped() {
        let config = AppConfig {
            poll_interval_ms: 0,
            command_timeout_ms: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
        assert_eq!(config.command_timeout(), Duration::from_millis(1));
    }
}
