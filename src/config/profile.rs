//! Forum profile configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// A forum profile configuration.
///
/// Profiles store connection details for a forum instance. Browsing is
/// anonymous, so no credentials are stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// The name of this profile.
    ///
    /// Must be non-empty and unique across all profiles.
    pub name: String,

    /// The forum instance URL.
    ///
    /// Should be a valid HTTPS URL (e.g., "https://meta.discourse.org").
    pub url: String,
}

impl Profile {
    /// Create a new profile.
    pub fn new(name: String, url: String) -> Self {
        Self { name, url }
    }

    /// Validate this profile.
    ///
    /// Checks that the name is non-empty and whitespace-free, and that
    /// the URL is non-empty with a valid scheme.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if
    /// validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "profile name cannot be empty".to_string(),
            ));
        }

        if self.name.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "profile name '{}' cannot contain whitespace",
                self.name
            )));
        }

        if self.url.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': URL cannot be empty",
                self.name
            )));
        }

        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': URL must start with http:// or https://",
                self.name
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_creation() {
        let profile = Profile::new(
            "meta".to_string(),
            "https://meta.discourse.org".to_string(),
        );

        assert_eq!(profile.name, "meta");
        assert_eq!(profile.url, "https://meta.discourse.org");
    }

    #[test]
    fn test_valid_profile() {
        let profile = Profile::new(
            "meta".to_string(),
            "https://meta.discourse.org".to_string(),
        );
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let profile = Profile::new(String::new(), "https://forum.example.com".to_string());
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let profile = Profile::new(
            "my forum".to_string(),
            "https://forum.example.com".to_string(),
        );
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_empty_url_rejected() {
        let profile = Profile::new("meta".to_string(), String::new());
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_bad_scheme_rejected() {
        let profile = Profile::new("meta".to_string(), "ftp://forum.example.com".to_string());
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_http_scheme_accepted() {
        let profile = Profile::new("local".to_string(), "http://localhost:3000".to_string());
        assert!(profile.validate().is_ok());
    }
}
