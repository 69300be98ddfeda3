//! Skycast services: the persisted favorites store and the background
//! refresh loop that keeps favorite snapshots fresh.

pub mod favorites;
pub mod refresh;

pub use favorites::{
    favorite_key, FavoriteCity, FavoritesPersistence, FavoritesStore, JsonFileStore, StorageError,
};
pub use refresh::{RefreshConfig, RefreshHandle, RefreshLoop};
