//! Forecast windowing: reduce a 5-day forecast series to the temperature
//! chart points for the next 48 hours.

use chrono::{DateTime, Local, Utc};

use crate::types::{ChartPoint, ForecastSeries};

const WINDOW_SECS: i64 = 48 * 3600;

/// Filter `series` to entries strictly within `(now, now + 48h]` and shape
/// them for charting: a local-time `HH:MM` label (used for both axis labels)
/// and the temperature rounded to one decimal.
///
/// Order is preserved from the input series, which the API sends in
/// chronological order; nothing is sorted here. An empty result is a valid
/// outcome — presentation renders it as an explicit "no forecast data"
/// state, not an error.
pub fn chart_series(series: &ForecastSeries, now: DateTime<Utc>) -> Vec<ChartPoint> {
    let now_ts = now.timestamp();

    series
        .list
        .iter()
        .filter(|entry| {
            let ahead = entry.dt - now_ts;
            ahead > 0 && ahead <= WINDOW_SECS
        })
        .filter_map(|entry| {
            let time = DateTime::from_timestamp(entry.dt, 0)?
                .with_timezone(&Local)
                .format("%H:%M")
                .to_string();
            Some(ChartPoint {
                date: time.clone(),
                time,
                temperature: round_one_decimal(entry.main.temp),
            })
        })
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::types::{ConditionInfo, ForecastCity, ForecastEntry, MainConditions, Wind};

    fn entry(dt: i64, temp: f64) -> ForecastEntry {
        ForecastEntry {
            dt,
            main: MainConditions {
                temp,
                feels_like: temp,
                humidity: 50,
                pressure: 1012,
            },
            weather: vec![ConditionInfo {
                id: 800,
                main: "Clear".to_string(),
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
            }],
            wind: Wind { speed: 1.0, deg: 0 },
            dt_txt: String::new(),
        }
    }

    fn series(entries: Vec<ForecastEntry>) -> ForecastSeries {
        ForecastSeries {
            city: ForecastCity {
                name: "Beijing".to_string(),
                country: "CN".to_string(),
            },
            list: entries,
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn keeps_only_entries_in_the_next_48_hours() {
        let h = 3600;
        let base = now().timestamp();
        let input = series(vec![
            entry(base - h, 10.0),      // past
            entry(base + h, 11.0),      // in window
            entry(base + 47 * h, 12.0), // in window
            entry(base + 49 * h, 13.0), // beyond
        ]);

        let points = chart_series(&input, now());
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].temperature, 11.0);
        assert_eq!(points[1].temperature, 12.0);
    }

    #[test]
    fn entry_exactly_at_now_is_excluded() {
        let input = series(vec![entry(now().timestamp(), 10.0)]);
        assert!(chart_series(&input, now()).is_empty());
    }

    #[test]
    fn entry_exactly_at_48_hours_is_included() {
        let input = series(vec![entry(now().timestamp() + WINDOW_SECS, 10.0)]);
        assert_eq!(chart_series(&input, now()).len(), 1);
    }

    #[test]
    fn empty_series_yields_empty_chart() {
        assert!(chart_series(&series(vec![]), now()).is_empty());
    }

    #[test]
    fn temperature_is_rounded_to_one_decimal() {
        let input = series(vec![entry(now().timestamp() + 3600, 21.37)]);
        let points = chart_series(&input, now());
        assert_eq!(points[0].temperature, 21.4);
    }

    #[test]
    fn labels_are_24_hour_clock_times() {
        let input = series(vec![entry(now().timestamp() + 3600, 21.0)]);
        let points = chart_series(&input, now());
        let label = &points[0].time;
        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
        assert_eq!(points[0].date, points[0].time);
    }

    #[test]
    fn preserves_input_order() {
        let base = now().timestamp();
        let input = series(vec![
            entry(base + 3 * 3600, 1.0),
            entry(base + 6 * 3600, 2.0),
            entry(base + 9 * 3600, 3.0),
        ]);
        let temps: Vec<f64> = chart_series(&input, now())
            .iter()
            .map(|p| p.temperature)
            .collect();
        assert_eq!(temps, vec![1.0, 2.0, 3.0]);
    }
}
