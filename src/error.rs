//! Centralized error types for LazyForum.
//!
//! This module provides a unified error hierarchy for the application
//! with user-friendly error messages. All error types use `thiserror`
//! for ergonomic error handling.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The main application error type.
///
/// Aggregates all error types that can occur in LazyForum, providing
/// user-friendly messages while preserving the underlying error context
/// for debugging.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    ///
    /// Returns a message suitable for showing in the UI status line,
    /// without technical jargon or stack traces.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable."
                        .to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::Forbidden => {
                    "Access denied. The forum does not allow anonymous access to this resource."
                        .to_string()
                }
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(_) => {
                    "Forum server error. Please try again later.".to_string()
                }
                ApiError::Network(_) => {
                    "Connection failed. Please check your internet connection.".to_string()
                }
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from the forum. Please try again.".to_string()
                }
                ApiError::ConnectionFailed(_) => {
                    "Could not connect to the forum. Please check the URL and your network."
                        .to_string()
                }
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Check if this error is recoverable.
    ///
    /// Recoverable errors can be retried or the user can continue
    /// working; they are shown in the status line rather than aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Api(ApiError::RateLimited)
                | AppError::Api(ApiError::ServerError(_))
                | AppError::Api(ApiError::Network(_))
                | AppError::Api(ApiError::NotFound(_))
        )
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let config_err = ConfigError::NoConfigDir;
        let app_err: AppError = config_err.into();
        assert!(matches!(
            app_err,
            AppError::Config(ConfigError::NoConfigDir)
        ));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let api_err = ApiError::RateLimited;
        let app_err: AppError = api_err.into();
        assert!(matches!(app_err, AppError::Api(ApiError::RateLimited)));
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::Api(ApiError::NotFound("tags".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("tags"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_user_message_connection_failed() {
        let err = AppError::Api(ApiError::ConnectionFailed("network error".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("Could not connect to the forum"));
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "duplicate profile".to_string(),
        ));
        let msg = err.user_message();
        assert!(msg.contains("duplicate profile"));
    }

    #[test]
    fn test_is_recoverable_rate_limited() {
        let err = AppError::Api(ApiError::RateLimited);
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_is_not_recoverable_connection_failed() {
        // Startup validation failures abort instead of degrading.
        let err = AppError::Api(ApiError::ConnectionFailed("unreachable".to_string()));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_is_not_recoverable_config() {
        let err = AppError::Config(ConfigError::NoConfigDir);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("test error");
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.user_message(), "Terminal error: test error");
    }

    #[test]
    fn test_io_error_user_message() {
        let err = AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(err.user_message().contains("file operation failed"));
    }
}
