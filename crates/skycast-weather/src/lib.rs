//! Weather data access for Skycast
//!
//! Provides current conditions and 5-day forecasts via the OpenWeatherMap
//! API, city-name normalization for localized input, and the forecast
//! windowing used by the temperature chart.

pub mod client;
pub mod forecast;
pub mod location;
pub mod normalize;
pub mod types;

pub use client::{ClientConfig, WeatherClient, WeatherError};
pub use forecast::chart_series;
pub use location::{Coordinates, LocationError};
pub use normalize::normalize_city_name;
pub use types::{ChartPoint, ForecastSeries, WeatherSnapshot};
