//! Background refresh of favorite-city snapshots.
//!
//! A periodic tick walks the favorites store and re-fetches any snapshot
//! that is missing or older than the staleness threshold. Each due favorite
//! is refreshed in its own task; a per-key in-flight set keeps a city from
//! being refreshed twice concurrently. Failures are logged and leave the
//! stored snapshot untouched, so staleness persists and the next tick
//! retries.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;

use skycast_weather::WeatherClient;

use crate::favorites::{FavoriteCity, FavoritesStore};

const DEFAULT_TICK_SECS: u64 = 5 * 60;
const DEFAULT_STALENESS_SECS: u64 = 10 * 60;

#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Period between staleness checks.
    pub tick_interval: Duration,
    /// Maximum snapshot age before a favorite is due for re-fetch.
    pub staleness_threshold: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(DEFAULT_TICK_SECS),
            staleness_threshold: Duration::from_secs(DEFAULT_STALENESS_SECS),
        }
    }
}

pub struct RefreshLoop {
    store: Arc<FavoritesStore>,
    client: Arc<WeatherClient>,
    config: RefreshConfig,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl RefreshLoop {
    pub fn new(store: Arc<FavoritesStore>, client: Arc<WeatherClient>, config: RefreshConfig) -> Self {
        Self {
            store,
            client,
            config,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Start ticking. The first check runs immediately, then once per
    /// interval, until the returned handle is stopped.
    pub fn spawn(self) -> RefreshHandle {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.config.tick_interval);
            loop {
                interval.tick().await;
                let started = self.trigger_due(Utc::now().timestamp_millis());
                if !started.is_empty() {
                    tracing::debug!(count = started.len(), "refreshing stale favorites");
                }
            }
        });

        RefreshHandle { handle }
    }

    /// Dispatch one refresh task per due favorite and return their handles.
    /// Favorites already being refreshed are skipped.
    fn trigger_due(&self, now_millis: i64) -> Vec<tokio::task::JoinHandle<()>> {
        let mut started = Vec::new();

        for city in self.store.list() {
            if !self.is_due(&city, now_millis) {
                continue;
            }
            if !self.in_flight.lock().insert(city.key.clone()) {
                continue;
            }

            let store = Arc::clone(&self.store);
            let client = Arc::clone(&self.client);
            let in_flight = Arc::clone(&self.in_flight);
            started.push(tokio::spawn(async move {
                match client.current_by_name(&city.name).await {
                    Ok(snapshot) => store.update_snapshot(&city.name, snapshot),
                    Err(e) => {
                        tracing::warn!(city = %city.name, error = %e, "favorite refresh failed");
                    }
                }
                in_flight.lock().remove(&city.key);
            }));
        }

        started
    }

    fn is_due(&self, city: &FavoriteCity, now_millis: i64) -> bool {
        let threshold = self.config.staleness_threshold.as_millis() as i64;
        city.snapshot.is_none() || now_millis - city.last_updated > threshold
    }
}

/// Handle to a running refresh loop. Stopping aborts only the ticking task;
/// refreshes already in flight complete or fail naturally.
pub struct RefreshHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl RefreshHandle {
    pub fn stop(&self) {
        self.handle.abort();
    }
}
