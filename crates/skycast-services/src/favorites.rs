//! Favorite cities: an ordered, case-insensitively keyed collection with
//! write-through persistence.
//!
//! The store owns the collection; presentation only ever sees clones from
//! [`FavoritesStore::list`]. Persistence is an injectable port so tests and
//! alternative backends stay decoupled from the file format.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use skycast_weather::WeatherSnapshot;

/// Normalized membership key for a city name. Applied at every store entry
/// point so lookups, inserts and removals agree on identity.
pub fn favorite_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// One favorite city with its last fetched snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteCity {
    /// Display name, as entered by the user.
    pub name: String,
    /// Normalized form of `name`; unique within the collection.
    pub key: String,
    pub country: String,
    /// Last fetched weather, absent until the first successful fetch.
    pub snapshot: Option<WeatherSnapshot>,
    /// Snapshot age reference, epoch milliseconds.
    pub last_updated: i64,
}

/// Durable-storage failures. Never fatal: a failed load falls back to an
/// empty collection, a failed save is logged and retried on the next
/// mutation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("favorites storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        "Saved cities could not be loaded. Your favorites will start empty."
    }
}

/// Persistence port for the favorites collection. The whole collection is
/// written on every mutation; there is no partial update.
pub trait FavoritesPersistence: Send + Sync {
    fn load(&self) -> Result<Vec<FavoriteCity>, StorageError>;
    fn save(&self, cities: &[FavoriteCity]) -> Result<(), StorageError>;
}

/// JSON-file persistence: one document holding the serialized collection.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl FavoritesPersistence for JsonFileStore {
    fn load(&self) -> Result<Vec<FavoriteCity>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        serde_json::from_str(&contents).map_err(|e| StorageError::Unavailable(e.to_string()))
    }

    fn save(&self, cities: &[FavoriteCity]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(cities)
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        fs::write(&self.path, json).map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

/// In-memory favorites collection with synchronous write-through saves.
///
/// All mutations take the lock for the full lookup-then-replace sequence,
/// which keeps the one-entry-per-key invariant under parallel callers.
pub struct FavoritesStore {
    cities: Mutex<Vec<FavoriteCity>>,
    persistence: Box<dyn FavoritesPersistence>,
}

impl FavoritesStore {
    /// Load the persisted collection, falling back to empty when the
    /// storage is absent or unreadable.
    pub fn open(persistence: Box<dyn FavoritesPersistence>) -> Self {
        let cities = persistence.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load favorites, starting empty");
            Vec::new()
        });

        Self {
            cities: Mutex::new(cities),
            persistence,
        }
    }

    /// Add a favorite, or refresh an existing one.
    ///
    /// When an entry with the same key exists its snapshot and timestamp are
    /// replaced and the stored name/country are preserved; otherwise a new
    /// entry is appended. Collection size is idempotent across repeated adds
    /// of the same name.
    pub fn add(&self, name: &str, country: &str, snapshot: Option<WeatherSnapshot>) {
        let key = favorite_key(name);
        let now = Utc::now().timestamp_millis();

        let mut cities = self.cities.lock();
        if let Some(existing) = cities.iter_mut().find(|c| c.key == key) {
            existing.snapshot = snapshot;
            existing.last_updated = now;
        } else {
            cities.push(FavoriteCity {
                name: name.trim().to_string(),
                key,
                country: country.to_string(),
                snapshot,
                last_updated: now,
            });
        }
        self.persist(&cities);
    }

    /// Remove any entry matching `name`; no-op when absent.
    pub fn remove(&self, name: &str) {
        let key = favorite_key(name);

        let mut cities = self.cities.lock();
        let before = cities.len();
        cities.retain(|c| c.key != key);
        if cities.len() != before {
            self.persist(&cities);
        }
    }

    /// Case-insensitive membership test.
    pub fn is_favorite(&self, name: &str) -> bool {
        let key = favorite_key(name);
        self.cities.lock().iter().any(|c| c.key == key)
    }

    /// Replace the snapshot and timestamp of an existing entry. Unlike
    /// [`add`](Self::add), an unknown name is a no-op and never creates an
    /// entry.
    pub fn update_snapshot(&self, name: &str, snapshot: WeatherSnapshot) {
        let key = favorite_key(name);

        let mut cities = self.cities.lock();
        if let Some(existing) = cities.iter_mut().find(|c| c.key == key) {
            existing.snapshot = Some(snapshot);
            existing.last_updated = Utc::now().timestamp_millis();
            self.persist(&cities);
        }
    }

    /// Current collection in insertion order.
    pub fn list(&self) -> Vec<FavoriteCity> {
        self.cities.lock().clone()
    }

    fn persist(&self, cities: &[FavoriteCity]) {
        if let Err(e) = self.persistence.save(cities) {
            tracing::warn!(error = %e, "failed to persist favorites");
        }
    }
}
