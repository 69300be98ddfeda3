use serde::{Deserialize, Serialize};

/// Current conditions for one location, as returned by `GET /weather`.
///
/// Field names mirror the API response verbatim; the body is stored inside
/// a favorite city unchanged, so this type round-trips through serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Resolved location name.
    pub name: String,
    /// Observation time, epoch seconds.
    pub dt: i64,
    pub main: MainConditions,
    pub weather: Vec<ConditionInfo>,
    pub wind: Wind,
    pub sys: SysInfo,
}

impl WeatherSnapshot {
    /// Primary condition entry, when the API returned one.
    pub fn condition(&self) -> Option<&ConditionInfo> {
        self.weather.first()
    }
}

/// Temperature / humidity / pressure block shared by current and forecast
/// responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainConditions {
    /// Temperature in Celsius (`units=metric`).
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: u32,
}

/// One weather condition: code, group, localized description and icon id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionInfo {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Wind speed in m/s.
    pub speed: f64,
    /// Wind direction in degrees.
    #[serde(default)]
    pub deg: u16,
}

/// Country and sun times block of the current-weather response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SysInfo {
    pub country: String,
    /// Sunrise, epoch seconds.
    pub sunrise: i64,
    /// Sunset, epoch seconds.
    pub sunset: i64,
}

/// 5-day / 3-hour forecast, as returned by `GET /forecast`. Transient; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub city: ForecastCity,
    /// Entries in chronological order, one per 3-hour step.
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastCity {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Forecast time, epoch seconds.
    pub dt: i64,
    pub main: MainConditions,
    pub weather: Vec<ConditionInfo>,
    pub wind: Wind,
    /// Human-readable forecast time as sent by the API.
    #[serde(default)]
    pub dt_txt: String,
}

/// One point of the 48-hour temperature chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// X-axis label, 24-hour `HH:MM` in local time.
    pub time: String,
    /// Temperature in Celsius, rounded to one decimal.
    pub temperature: f64,
    /// Secondary date label shown under the axis.
    pub date: String,
}
