//! Skycast core: configuration, top-level error aggregation and logging
//! setup shared by the application.

pub mod config;
pub mod error;

pub use config::{Config, RefreshSettings, ValidationResult, WeatherSettings};
pub use error::{AppError, ConfigError};

/// Initialize logging. Call once at process start.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Skycast core initialized");
}
