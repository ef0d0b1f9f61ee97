use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    error::WeatherError,
    model::{AirQuality, CitySuggestion, CurrentConditions, DailyForecastEntry, HourlyEntry, LocationQuery},
    provider::openweather::OpenWeatherProvider,
    units::Units,
};

pub mod openweather;

/// Source of normalized weather records.
///
/// Every call is one network round trip with no retry and no caching.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(
        &self,
        query: &LocationQuery,
        units: Units,
    ) -> Result<CurrentConditions, WeatherError>;

    /// Up to five days, oldest first.
    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
        units: Units,
    ) -> Result<Vec<DailyForecastEntry>, WeatherError>;

    /// Up to 24 entries at the provider's native cadence.
    async fn fetch_hourly(
        &self,
        query: &LocationQuery,
        units: Units,
    ) -> Result<Vec<HourlyEntry>, WeatherError>;

    async fn fetch_air_quality(&self, query: &LocationQuery) -> Result<AirQuality, WeatherError>;

    /// Best effort: any failure yields an empty list.
    async fn search_cities(&self, partial: &str) -> Vec<CitySuggestion>;
}

/// Construct the OpenWeather provider from config. A missing API key is not
/// an error here; it is reported by the first fetch.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    Box::new(OpenWeatherProvider::from_config(config))
}
