//! One search: the four datasets fetched together.

use serde::Serialize;

use crate::{
    error::WeatherError,
    insights::{Insight, derive_insights},
    model::{AirQuality, CurrentConditions, DailyForecastEntry, HourlyEntry, LocationQuery},
    provider::WeatherProvider,
    units::Units,
};

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub units: Units,
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecastEntry>,
    pub hourly: Vec<HourlyEntry>,
    pub air_quality: AirQuality,
}

impl Dashboard {
    pub fn insights(&self) -> Vec<Insight> {
        derive_insights(&self.current, &self.forecast)
    }
}

/// Fetch current, forecast, hourly and air quality concurrently.
///
/// Fails with the first error; nothing is returned for the other three. A
/// newer search does not cancel this one, so callers showing results must
/// drop responses for queries that are no longer current.
pub async fn load(
    provider: &dyn WeatherProvider,
    query: &LocationQuery,
    units: Units,
) -> Result<Dashboard, WeatherError> {
    tracing::info!(%query, %units, "Loading dashboard");

    let (current, forecast, hourly, air_quality) = tokio::try_join!(
        provider.fetch_current(query, units),
        provider.fetch_forecast(query, units),
        provider.fetch_hourly(query, units),
        provider.fetch_air_quality(query),
    )?;

    Ok(Dashboard { units, current, forecast, hourly, air_quality })
}
