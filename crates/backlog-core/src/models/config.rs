//! Application configuration

use crate::messages::Locale;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub version: String,
    #[serde(default)]
    pub locale: Locale,
    pub log_level: String,
    pub keyring_service: String,
}

/// Per-invocation settings that take precedence over the config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub locale: Option<Locale>,
}

impl Config {
    /// Apply overrides, rejecting a result that no longer validates
    pub fn apply(&mut self, overrides: ConfigOverrides) -> Result<()> {
        if let Some(log_level) = overrides.log_level {
            self.log_level = log_level;
        }
        if let Some(locale) = overrides.locale {
            self.locale = locale;
        }
        self.validate()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(Error::Validation(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.log_level,
                valid_log_levels.join(", ")
            )));
        }

        if self.keyring_service.trim().is_empty() {
            return Err(Error::Validation(
                "Keyring service name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            locale: Locale::En,
            log_level: "info".to_string(),
            keyring_service: "backlog-link".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.locale, Locale::En);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config {
            log_level: "loud".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        config.log_level = "debug".to_string();
        config.keyring_service = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        config
            .apply(ConfigOverrides {
                log_level: Some("debug".to_string()),
                locale: Some(Locale::Ja),
            })
            .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.locale, Locale::Ja);

        let result = config.apply(ConfigOverrides {
            log_level: Some("chatty".to_string()),
            locale: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_locale_defaults_when_missing() {
        let json = r#"{"version":"1.0.0","log_level":"warn","keyring_service":"svc"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.locale, Locale::En);
    }
}
