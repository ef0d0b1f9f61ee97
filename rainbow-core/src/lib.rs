//! Core library for the `rainbow` weather dashboard.
//!
//! This crate defines:
//! - The OpenWeatherMap client and its normalized records
//! - Daily aggregation of the 3-hourly forecast
//! - The insight engine and display helpers
//! - Configuration & credentials handling
//!
//! It is used by `rainbow-cli`, but holds no terminal code so other front
//! ends can reuse it.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod format;
pub mod insights;
pub mod model;
pub mod provider;
pub mod units;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::WeatherError;
pub use insights::{Insight, STABLE_CONDITIONS_MESSAGE, derive_insights};
pub use model::{
    AirQuality, Alert, CitySuggestion, Coords, CurrentConditions, DailyForecastEntry, HourlyEntry,
    LocationQuery, Severity,
};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use units::{ThemePreference, Units};
