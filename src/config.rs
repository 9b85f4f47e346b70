use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;
use crate::models::BodyProfile;
use crate::parser::{RecordParser, WhitespacePolicy};
use crate::report::Reporter;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Body measurements used for every record
    pub profile: BodyProfile,

    /// Record parsing preferences
    pub parser: ParserSettings,

    /// Logging output
    pub logging: LogConfig,
}

/// Record parsing preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Strict rejects padded fields, trim strips them
    pub whitespace: WhitespacePolicy,
}

impl TrackerConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: TrackerConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".stepmetrics")
            .join("config.toml")
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default() -> Self {
        let config_path = Self::default_config_path();
        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(
                    path = %config_path.display(),
                    error = %e,
                    "Using default configuration"
                );
                Self::default()
            }
        }
    }

    /// Check the profile is usable
    pub fn validate(&self) -> Result<()> {
        self.profile
            .validate()
            .with_context(|| "Invalid profile in configuration")?;
        Ok(())
    }

    /// Reporter for the configured parser mode and profile
    pub fn reporter(&self) -> Reporter {
        Reporter::new(RecordParser::new(self.parser.whitespace), self.profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogFormat, LogLevel};
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.profile, BodyProfile::new(84.6, 1.87));
        assert_eq!(config.parser.whitespace, WhitespacePolicy::Strict);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = TrackerConfig::default();
        config.profile = BodyProfile::new(70.0, 1.80);
        config.parser.whitespace = WhitespacePolicy::Trim;
        config.logging.format = LogFormat::Json;

        config.save_to_file(&config_path).unwrap();
        let loaded = TrackerConfig::load_from_file(&config_path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[parser]\nwhitespace = \"trim\"\n").unwrap();

        let loaded = TrackerConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.parser.whitespace, WhitespacePolicy::Trim);
        assert_eq!(loaded.profile, BodyProfile::default());
        assert_eq!(loaded.reporter().parser().policy(), WhitespacePolicy::Trim);
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[profile]\nweight_kg = -5.0\nheight_m = 1.8\n").unwrap();

        assert!(TrackerConfig::load_from_file(&config_path).is_err());
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(TrackerConfig::load_from_file(temp_dir.path().join("absent.toml")).is_err());
    }
}
