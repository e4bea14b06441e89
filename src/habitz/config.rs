use crate::error::{HabitzError, Result};
use crate::model::DEFAULT_DESCRIPTION;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Configuration for habitz, stored in `<data dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HabitzConfig {
    /// Description given to habits added without one
    #[serde(default = "default_description")]
    pub default_description: String,

    /// Log level for the file log
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Ask before `reset` and `clear`
    #[serde(default = "default_confirm")]
    pub confirm_destructive: bool,
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_confirm() -> bool {
    true
}

impl Default for HabitzConfig {
    fn default() -> Self {
        Self {
            default_description: default_description(),
            log_level: default_log_level(),
            confirm_destructive: default_confirm(),
        }
    }
}

/// Keys accepted by the `config` command, in display order.
pub const CONFIG_KEYS: &[&str] = &["default-description", "log-level", "confirm-destructive"];

impl HabitzConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(HabitzError::Io)?;
        let config: HabitzConfig =
            serde_json::from_str(&content).map_err(HabitzError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(HabitzError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(HabitzError::Serialization)?;
        fs::write(config_path, content).map_err(HabitzError::Io)?;
        Ok(())
    }

    /// Current value of `key` as text.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "default-description" => Ok(self.default_description.clone()),
            "log-level" => Ok(self.log_level.clone()),
            "confirm-destructive" => Ok(self.confirm_destructive.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    /// Sets `key` from text, validating the value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default-description" => {
                let value = value.trim();
                if value.is_empty() {
                    let reason = "default-description cannot be empty";
                    return Err(HabitzError::Config(reason.into()));
                }
                self.default_description = value.to_string();
            }
            "log-level" => {
                let level = value.trim().to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(HabitzError::Config(format!(
                        "Unsupported log level `{}`; expected one of {}",
                        value,
                        LOG_LEVELS.join("|")
                    )));
                }
                self.log_level = level;
            }
            "confirm-destructive" => {
                self.confirm_destructive = parse_bool(value).ok_or_else(|| {
                    HabitzError::Config(format!("Expected true or false, got `{}`", value))
                })?;
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> HabitzError {
    HabitzError::Config(format!(
        "Unknown config key: {} (known keys: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = HabitzConfig::default();
        assert_eq!(config.default_description, DEFAULT_DESCRIPTION);
        assert_eq!(config.log_level, "info");
        assert!(config.confirm_destructive);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = HabitzConfig::load(dir.path()).unwrap();
        assert_eq!(config, HabitzConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut config = HabitzConfig::default();
        config.set("default-description", "tbd").unwrap();
        config.set("confirm-destructive", "no").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = HabitzConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.default_description, "tbd");
        assert!(!loaded.confirm_destructive);
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let dir = TempDir::new().unwrap();
        let partial = r#"{"log_level": "debug"}"#;
        fs::write(dir.path().join(CONFIG_FILENAME), partial).unwrap();

        let loaded = HabitzConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.log_level, "debug");
        assert_eq!(loaded.default_description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_set_validates() {
        let mut config = HabitzConfig::default();
        assert!(config.set("log-level", "loud").is_err());
        assert!(config.set("default-description", "  ").is_err());
        assert!(config.set("confirm-destructive", "maybe").is_err());
        assert!(config.set("colour", "red").is_err());

        config.set("log-level", "WARN").unwrap();
        assert_eq!(config.get("log-level").unwrap(), "warn");
    }
}
