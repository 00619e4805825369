//! Configuration management for LazyForum.
//!
//! This module handles loading, saving, and managing user configuration
//! including forum profiles and application settings.

mod profile;
mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use profile::Profile;
pub use settings::Settings;

/// Errors that can occur when managing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The configuration directory could not be created.
    #[error("Could not create configuration directory: {0}")]
    CreateDirError(std::io::Error),

    /// The configuration file could not be read.
    #[error("Could not read configuration file: {0}")]
    ReadError(std::io::Error),

    /// The configuration file could not be written.
    #[error("Could not write configuration file: {0}")]
    WriteError(std::io::Error),

    /// The configuration file could not be parsed.
    #[error("Could not parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("Could not serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A configuration value failed validation.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The top-level configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Application settings.
    #[serde(default)]
    pub settings: Settings,

    /// Known forum profiles.
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// A missing file yields the default configuration rather than an
    /// error; first runs should not require a setup step.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load the configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }
        self.save_to(&path)
    }

    /// Save the configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(ConfigError::WriteError)
    }

    /// Validate all profiles and check for duplicate names.
    pub fn validate(&self) -> Result<()> {
        for profile in &self.profiles {
            profile.validate()?;
        }

        for (i, profile) in self.profiles.iter().enumerate() {
            if self.profiles[i + 1..].iter().any(|p| p.name == profile.name) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate profile name '{}'",
                    profile.name
                )));
            }
        }

        Ok(())
    }

    /// Find a profile by name.
    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Path to the configuration file in the platform config directory.
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("lazyforum").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.settings.max_tag_search_results = 8;
        config.profiles.push(Profile::new(
            "meta".to_string(),
            "https://meta.discourse.org".to_string(),
        ));

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded.settings.max_tag_search_results, 8);
        assert_eq!(loaded.profiles.len(), 1);
        assert_eq!(loaded.profile("meta").unwrap().url, "https://meta.discourse.org");
    }

    #[test]
    fn test_load_rejects_duplicate_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            settings: Settings::default(),
            profiles: vec![
                Profile::new("meta".to_string(), "https://a.example.com".to_string()),
                Profile::new("meta".to_string(), "https://b.example.com".to_string()),
            ],
        };
        config.save_to(&path).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not [valid toml").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ReadError(_))
        ));
    }

    #[test]
    fn test_profile_lookup_misses() {
        let config = Config::default();
        assert!(config.profile("ghost").is_none());
    }
}
