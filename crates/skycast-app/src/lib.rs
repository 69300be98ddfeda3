//! Skycast application wiring: connects configuration, the weather client,
//! the favorites store and the refresh loop, and exposes the operations a
//! presentation layer calls.

pub mod app;

pub use app::{App, CityWeather};
