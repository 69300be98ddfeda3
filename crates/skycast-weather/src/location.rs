//! Geolocation data and failure taxonomy.
//!
//! The position itself comes from an external source (browser API, platform
//! service); the core only consumes a one-shot coordinate pair and
//! classifies the three failure modes such sources report.

use serde::{Deserialize, Serialize};

/// A one-shot geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Geolocation source errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("location request timed out")]
    Timeout,
}

impl LocationError {
    /// User-facing message for this failure, suitable for direct display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "Location access was denied. Allow it or search by city name.",
            Self::PositionUnavailable => "Your current position could not be determined.",
            Self::Timeout => "The location request timed out. Please try again.",
        }
    }
}
