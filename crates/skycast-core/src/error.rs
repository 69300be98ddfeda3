//! Centralized error types for the Skycast application.
//!
//! Domain errors live in the crates that produce them; this module
//! aggregates them into [`AppError`] and exposes user-friendly messages
//! suitable for UI display while preserving the full error context for
//! logging.

use thiserror::Error;

use skycast_services::StorageError;
use skycast_weather::{LocationError, WeatherError};

/// Top-level application error type.
///
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("location error: {0}")]
    Location(#[from] LocationError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Weather(e) => e.user_message(),
            AppError::Location(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("failed to read config file: {0}")]
    Read(String),

    #[error("failed to parse config file: {0}")]
    Parse(String),

    #[error("failed to write config file: {0}")]
    Write(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Parse(_) | ConfigError::Invalid(_) => {
                "The configuration file is invalid. Fix or delete it and restart."
            }
            _ => "Configuration could not be loaded. Check file permissions and restart.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_messages_pass_through() {
        let err = AppError::from(WeatherError::ApiStatus {
            status: 401,
            body: String::new(),
        });
        assert!(err.user_message().contains("API key"));

        let err = AppError::from(WeatherError::NetworkUnavailable("refused".into()));
        assert!(err.user_message().contains("internet connection"));
    }

    #[test]
    fn location_messages_pass_through() {
        let err = AppError::from(LocationError::PermissionDenied);
        assert!(err.user_message().contains("denied"));
    }

    #[test]
    fn storage_failure_is_presented_as_empty_favorites() {
        let err = AppError::from(StorageError::Unavailable("disk".into()));
        assert!(err.user_message().contains("start empty"));
    }

    #[test]
    fn config_messages_distinguish_invalid_files() {
        assert!(ConfigError::Parse("bad toml".into())
            .user_message()
            .contains("invalid"));
        assert!(ConfigError::NoConfigDir.user_message().contains("Configuration"));
    }
}
