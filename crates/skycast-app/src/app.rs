use std::sync::Arc;

use chrono::Utc;

use skycast_core::{AppError, Config, ConfigError};
use skycast_services::{FavoriteCity, FavoritesStore, JsonFileStore, RefreshConfig, RefreshHandle, RefreshLoop};
use skycast_weather::{chart_series, ChartPoint, Coordinates, WeatherClient, WeatherSnapshot};

/// Everything the display needs for one location: current conditions plus
/// the 48-hour temperature chart. An empty chart is the explicit
/// "no forecast data" state, not an error.
#[derive(Debug, Clone)]
pub struct CityWeather {
    pub current: WeatherSnapshot,
    pub chart: Vec<ChartPoint>,
}

/// Application state: one instance per process, owning the client, the
/// favorites store and the background refresh loop.
pub struct App {
    client: Arc<WeatherClient>,
    store: Arc<FavoritesStore>,
    refresh_config: RefreshConfig,
    refresh: Option<RefreshHandle>,
}

impl App {
    /// Load configuration and wire up the application.
    pub fn new() -> Result<Self, AppError> {
        let config = Config::load()?;

        let validation = config.validate();
        for warning in &validation.warnings {
            tracing::warn!("config warning: {}", warning);
        }
        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        let client = Arc::new(WeatherClient::new(config.client_config())?);
        let store = Arc::new(FavoritesStore::open(Box::new(JsonFileStore::new(
            Config::favorites_path()?,
        ))));

        Ok(Self::from_parts(client, store, config.refresh_config()))
    }

    /// Assemble an application from already-built parts. Used by tests and
    /// by hosts that manage configuration themselves.
    pub fn from_parts(
        client: Arc<WeatherClient>,
        store: Arc<FavoritesStore>,
        refresh_config: RefreshConfig,
    ) -> Self {
        Self {
            client,
            store,
            refresh_config,
            refresh: None,
        }
    }

    /// Start the background refresh loop. Calling twice is a no-op.
    pub fn start_refresh(&mut self) {
        if self.refresh.is_some() {
            return;
        }
        let refresh = RefreshLoop::new(
            Arc::clone(&self.store),
            Arc::clone(&self.client),
            self.refresh_config.clone(),
        );
        self.refresh = Some(refresh.spawn());
        tracing::info!("favorite refresh loop started");
    }

    /// Stop ticking; in-flight refreshes complete naturally.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.refresh.take() {
            handle.stop();
            tracing::info!("favorite refresh loop stopped");
        }
    }

    /// Fetch weather for a city by (possibly localized) name.
    ///
    /// A current-conditions failure blocks the result; a forecast failure
    /// degrades to an empty chart so current conditions still display.
    pub async fn search_city(&self, city: &str) -> Result<CityWeather, AppError> {
        let current = self.client.current_by_name(city).await?;
        let chart = match self.client.forecast_by_name(city).await {
            Ok(series) => chart_series(&series, Utc::now()),
            Err(e) => {
                tracing::warn!(city, error = %e, "forecast unavailable, showing current conditions only");
                Vec::new()
            }
        };
        Ok(CityWeather { current, chart })
    }

    /// Fetch weather for a one-shot geolocated position.
    pub async fn weather_at(&self, position: Coordinates) -> Result<CityWeather, AppError> {
        let Coordinates { latitude, longitude } = position;
        let current = self.client.current_by_coords(latitude, longitude).await?;
        let chart = match self.client.forecast_by_coords(latitude, longitude).await {
            Ok(series) => chart_series(&series, Utc::now()),
            Err(e) => {
                tracing::warn!(latitude, longitude, error = %e, "forecast unavailable, showing current conditions only");
                Vec::new()
            }
        };
        Ok(CityWeather { current, chart })
    }

    /// Add a city to favorites, optionally seeding it with an
    /// already-fetched snapshot.
    pub fn add_favorite(&self, name: &str, country: &str, snapshot: Option<WeatherSnapshot>) {
        self.store.add(name, country, snapshot);
    }

    pub fn remove_favorite(&self, name: &str) {
        self.store.remove(name);
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.store.is_favorite(name)
    }

    /// Favorite cities in insertion order.
    pub fn favorites(&self) -> Vec<FavoriteCity> {
        self.store.list()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use skycast_weather::{ClientConfig, WeatherError};
    use tempfile::tempdir;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CURRENT_BODY: &str = r#"{
        "name": "Beijing",
        "dt": 1700000000,
        "main": {"temp": 21.3, "feels_like": 20.9, "humidity": 40, "pressure": 1013},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "wind": {"speed": 3.2, "deg": 180},
        "sys": {"country": "CN", "sunrise": 1699999000, "sunset": 1700039000}
    }"#;

    fn forecast_body() -> String {
        let soon = Utc::now().timestamp() + 3600;
        format!(
            r#"{{
                "city": {{"name": "Beijing", "country": "CN"}},
                "list": [{{
                    "dt": {soon},
                    "main": {{"temp": 18.6, "feels_like": 18.0, "humidity": 52, "pressure": 1011}},
                    "weather": [{{"id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d"}}],
                    "wind": {{"speed": 2.1, "deg": 90}},
                    "dt_txt": ""
                }}]
            }}"#
        )
    }

    fn app_for(server: &MockServer, dir: &tempfile::TempDir) -> App {
        let client = Arc::new(
            WeatherClient::new(ClientConfig {
                base_url: server.uri(),
                api_key: "test-key".to_string(),
                ..ClientConfig::default()
            })
            .unwrap(),
        );
        let store = Arc::new(FavoritesStore::open(Box::new(JsonFileStore::new(
            dir.path().join("favorites.json"),
        ))));
        App::from_parts(client, store, RefreshConfig::default())
    }

    #[tokio::test]
    async fn search_returns_current_and_chart() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Beijing"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(CURRENT_BODY, "application/json"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(forecast_body(), "application/json"),
            )
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let app = app_for(&server, &dir);

        let weather = app.search_city("北京").await.unwrap();
        assert_eq!(weather.current.name, "Beijing");
        assert_eq!(weather.chart.len(), 1);
        assert_eq!(weather.chart[0].temperature, 18.6);
    }

    #[tokio::test]
    async fn forecast_failure_degrades_to_empty_chart() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(CURRENT_BODY, "application/json"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(500).set_body_raw("oops", "text/plain"))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let app = app_for(&server, &dir);

        let weather = app.search_city("Beijing").await.unwrap();
        assert_eq!(weather.current.sys.country, "CN");
        assert!(weather.chart.is_empty());
    }

    #[tokio::test]
    async fn current_failure_blocks_the_result_with_a_categorized_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404).set_body_raw(r#"{"message":"city not found"}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let app = app_for(&server, &dir);

        let err = app.search_city("Nowhere").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Weather(WeatherError::ApiStatus { status: 404, .. })
        ));
        assert!(err.user_message().contains("No weather data found"));
    }

    #[tokio::test]
    async fn weather_at_queries_by_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("lat", "39.9"))
            .and(query_param("lon", "116.4"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(CURRENT_BODY, "application/json"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(forecast_body(), "application/json"),
            )
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let app = app_for(&server, &dir);

        let weather = app
            .weather_at(Coordinates {
                latitude: 39.9,
                longitude: 116.4,
            })
            .await
            .unwrap();
        assert_eq!(weather.current.name, "Beijing");
    }

    #[tokio::test]
    async fn favorites_are_delegated_to_the_store() {
        let server = MockServer::start().await;
        let dir = tempdir().unwrap();
        let app = app_for(&server, &dir);

        app.add_favorite("Beijing", "CN", None);
        assert!(app.is_favorite("beijing"));
        assert_eq!(app.favorites().len(), 1);

        app.remove_favorite("BEIJING");
        assert!(!app.is_favorite("Beijing"));
    }
}
