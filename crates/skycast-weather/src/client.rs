//! OpenWeatherMap client: current conditions and 5-day forecast, by city
//! name or coordinates.
//!
//! Every call is one fresh GET; no retries, no caching. Transport failures
//! are classified into [`WeatherError`] and propagate to the caller
//! unmodified, which maps them onto user-facing messages.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::normalize::normalize_city_name;
use crate::types::{ForecastSeries, WeatherSnapshot};

/// Production API endpoint. Tests point `base_url` at a local mock server.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Weather client errors, classified by transport outcome.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// A response arrived with a non-2xx status.
    #[error("weather API returned status {status}")]
    ApiStatus { status: u16, body: String },
    /// The request was sent but no response arrived (connect/timeout).
    #[error("no response from weather API: {0}")]
    NetworkUnavailable(String),
    /// The request could not be constructed or sent at all.
    #[error("could not send weather request: {0}")]
    RequestSetup(String),
    /// A 2xx body that does not match the expected shape.
    #[error("could not decode weather response: {0}")]
    Decode(String),
}

impl WeatherError {
    /// User-facing message for this failure, suitable for direct display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ApiStatus { status: 401, .. } => {
                "The API key is invalid or unauthorized. Check your OpenWeatherMap credential."
            }
            Self::ApiStatus { status: 404, .. } => {
                "No weather data found for that location. Check the spelling and try again."
            }
            Self::ApiStatus { status: 429, .. } => {
                "Too many requests to the weather service. Please wait a moment and try again."
            }
            Self::ApiStatus { .. } => "The weather service returned an error. Please try again later.",
            Self::NetworkUnavailable(_) => {
                "Unable to reach the weather service. Check your internet connection."
            }
            Self::RequestSetup(_) | Self::Decode(_) => {
                "The weather request failed unexpectedly. Please try again."
            }
        }
    }
}

/// Connection settings for [`WeatherClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// `appid` credential; invalid keys surface as HTTP 401.
    pub api_key: String,
    /// Language for human-readable condition descriptions.
    pub lang: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            lang: "zh_cn".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    config: ClientConfig,
}

impl WeatherClient {
    /// Build a client with a per-request timeout from the config.
    pub fn new(config: ClientConfig) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WeatherError::RequestSetup(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Current conditions by city name. The name is normalized first.
    pub async fn current_by_name(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let city = normalize_city_name(city);
        self.get_json("weather", &[("q", city.to_string())]).await
    }

    /// Current conditions by coordinates.
    pub async fn current_by_coords(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, WeatherError> {
        self.get_json("weather", &coord_params(lat, lon)).await
    }

    /// 5-day / 3-hour forecast by city name. The name is normalized first.
    pub async fn forecast_by_name(&self, city: &str) -> Result<ForecastSeries, WeatherError> {
        let city = normalize_city_name(city);
        self.get_json("forecast", &[("q", city.to_string())]).await
    }

    /// 5-day / 3-hour forecast by coordinates.
    pub async fn forecast_by_coords(&self, lat: f64, lon: f64) -> Result<ForecastSeries, WeatherError> {
        self.get_json("forecast", &coord_params(lat, lon)).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        location: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), resource);
        tracing::debug!(%url, "requesting weather data");

        let response = self
            .http
            .get(url)
            .query(location)
            .query(&[
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.config.lang.as_str()),
            ])
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::NetworkUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(WeatherError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| WeatherError::Decode(e.to_string()))
    }
}

fn coord_params(lat: f64, lon: f64) -> [(&'static str, String); 2] {
    [("lat", lat.to_string()), ("lon", lon.to_string())]
}

fn classify_transport(error: reqwest::Error) -> WeatherError {
    if error.is_builder() {
        WeatherError::RequestSetup(error.to_string())
    } else {
        // Sent (or attempted) but no usable response: connect, timeout, reset.
        WeatherError::NetworkUnavailable(error.to_string())
    }
}
