use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Weather API settings
    #[serde(default)]
    pub weather: WeatherSettings,

    /// Favorite-city refresh settings
    #[serde(default)]
    pub refresh: RefreshSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSettings {
    /// OpenWeatherMap API key. Can also be set via `SKYCAST_API_KEY`.
    #[serde(default)]
    pub api_key: String,

    /// API endpoint; only changed for testing.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Language for condition descriptions.
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    skycast_weather::client::DEFAULT_BASE_URL.to_string()
}

fn default_lang() -> String {
    "zh_cn".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            lang: default_lang(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSettings {
    /// Seconds between staleness checks (default: 5 minutes)
    #[serde(default = "default_tick_secs")]
    pub tick_interval_secs: u64,

    /// Maximum snapshot age in seconds before re-fetch (default: 10 minutes)
    #[serde(default = "default_staleness_secs")]
    pub staleness_threshold_secs: u64,
}

fn default_tick_secs() -> u64 {
    5 * 60
}

fn default_staleness_secs() -> u64 {
    10 * 60
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_secs(),
            staleness_threshold_secs: default_staleness_secs(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating defaults if it doesn't exist.
    ///
    /// `SKYCAST_API_KEY` in the environment overrides the file's API key.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::Read(e.to_string()))?;
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else {
            let config = Self::default();
            config.save()?;
            config
        };

        if let Ok(key) = std::env::var("SKYCAST_API_KEY") {
            if !key.is_empty() {
                config.weather.api_key = key;
            }
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write(e.to_string()))?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Write(e.to_string()))?;

        std::fs::write(&config_path, contents).map_err(|e| ConfigError::Write(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        match Url::parse(&self.weather.base_url) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        "weather.base_url",
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }
                if url.host().is_none() {
                    result.add_error("weather.base_url", "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error("weather.base_url", format!("Invalid URL: {}", e));
            }
        }

        if self.weather.api_key.is_empty() {
            result.add_warning(
                "weather.api_key",
                "No API key configured - weather requests will be rejected with 401",
            );
        }

        if self.weather.request_timeout_secs == 0 {
            result.add_error("weather.request_timeout_secs", "Timeout must be greater than 0");
        }

        if self.refresh.tick_interval_secs == 0 {
            result.add_warning("refresh.tick_interval_secs", "Favorite refresh disabled (0 seconds)");
        }

        result
    }

    /// Settings for constructing a [`skycast_weather::WeatherClient`].
    pub fn client_config(&self) -> skycast_weather::ClientConfig {
        skycast_weather::ClientConfig {
            base_url: self.weather.base_url.clone(),
            api_key: self.weather.api_key.clone(),
            lang: self.weather.lang.clone(),
            timeout: Duration::from_secs(self.weather.request_timeout_secs),
        }
    }

    /// Settings for the favorite-city refresh loop.
    pub fn refresh_config(&self) -> skycast_services::RefreshConfig {
        skycast_services::RefreshConfig {
            tick_interval: Duration::from_secs(self.refresh.tick_interval_secs),
            staleness_threshold: Duration::from_secs(self.refresh.staleness_threshold_secs),
        }
    }

    /// Path of the persisted favorites document.
    pub fn favorites_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("favorites.json"))
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("skycast"))
            .ok_or(ConfigError::NoConfigDir)
    }
}
