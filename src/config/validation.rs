//! Configuration validation utilities.
//!
//! Provides validation for configuration values, returning warnings for
//! non-fatal issues that should be logged but don't prevent startup.

use super::types::AppConfig;

/// Non-fatal validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    /// The field that has an issue.
    pub field: String,
    /// A description of the issue.
    pub message: String,
}

impl ValidationWarning {
    fn new(field: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
        }
    }
}

/// Validate the entire config, returning warnings for non-fatal issues.
///
/// This function checks for:
/// - Poll intervals so short that mmsg would be spawned continuously
/// - Timeouts longer than the poll interval (cycles will pile up)
/// - Tag counts outside what the tag masks can express
/// - Empty mmsg path or monitor name
pub fn validate_config(config: &AppConfig) -> Vec<ValidationWarning> {
    let mut warnings = vec![];

    if config.poll_interval_ms < 100 {
        warnings.push(ValidationWarning::new(
            "poll_interval_ms",
            format!(
                "Interval {}ms is below 100ms. mmsg will be spawned four times per cycle.",
                config.poll_interval_ms
            ),
        ));
    }

    if config.command_timeout_ms == 0 {
        warnings.push(ValidationWarning::new(
            "command_timeout_ms",
            "Timeout of 0ms will be treated as 1ms; every query will likely time out.".to_string(),
        ));
    } else if config.command_timeout_ms > config.poll_interval_ms.saturating_mul(10) {
        warnings.push(ValidationWarning::new(
            "command_timeout_ms",
            format!(
                "Timeout {}ms is much longer than the poll interval ({}ms). A hung mmsg will stall updates.",
                config.command_timeout_ms, config.poll_interval_ms
            ),
        ));
    }

    if config.default_tag_count == 0 || config.default_tag_count > 64 {
        warnings.push(ValidationWarning::new(
            "default_tag_count",
            format!(
                "Tag count {} is outside 1..=64 and will be clamped.",
                config.default_tag_count
            ),
        ));
    }

    if config.mmsg_path.trim().is_empty() {
        warnings.push(ValidationWarning::new(
            "mmsg_path",
            "mmsg path is empty. No compositor state will be available.".to_string(),
        ));
    }

    if let Some(monitor) = &config.monitor
        && monitor.trim().is_empty()
    {
        warnings.push(ValidationWarning::new(
            "monitor",
            "Monitor name is empty. Remove the key to follow the first monitor.".to_string(),
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let warnings = validate_config(&AppConfig::default());
        assert!(warnings.is_empty(), "Warnings: {:?}", warnings);
    }

    #[test]
    fn test_validate_short_interval() {
        let config = AppConfig {
            poll_interval_ms: 10,
            command_timeout_ms: 50,
            ..AppConfig::default()
        };
        let warnings = validate_config(&config);
        assert!(warnings.iter().any(|w| w.field == "poll_interval_ms"));
        assert!(!warnings.iter().any(|w| w.field == "command_timeout_ms"));
    }

    #[test]
    fn test_validate_long_timeout() {
        let config = AppConfig {
            poll_interval_ms: 200,
            command_timeout_ms: 5000,
            ..AppConfig::default()
        };
        let warnings = validate_config(&config);
        assert!(warnings.iter().any(|w| w.field == "command_timeout_ms"));
    }

    #[test]
    fn test_validate_tag_count() {
        for count in [0, 65] {
            let config = AppConfig {
                default_tag_count: count,
                ..AppConfig::default()
            };
            let warnings = validate_config(&config);
            assert!(warnings.iter().any(|w| w.field == "default_tag_count"));
        }
    }

    #[test]
    fn test_validate_empty_strings() {
        let config = AppConfig {
            monitor: Some("  ".to_string()),
            mmsg_path: String::new(),
            ..AppConfig::default()
        };
        let warnings = validate_config(&config);
        assert!(warnings.iter().any(|w| w.field == "monitor"));
        assert!(warnings.iter().any(|w| w.field == "mmsg_path"));
    }
}
