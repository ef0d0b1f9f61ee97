use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::fmt;

use crate::{
    Config,
    error::WeatherError,
    forecast::{daily_forecast, hourly_entries},
    model::{
        AirQuality, Alert, CitySuggestion, Coords, CurrentConditions, DailyForecastEntry,
        ForecastSample, HourlyEntry, LocationQuery, is_night, visibility_km,
    },
    units::{Units, round_whole},
};

use super::WeatherProvider;

const DATA_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const GEO_BASE_URL: &str = "https://api.openweathermap.org/geo/1.0";

const SUGGESTION_LIMIT: usize = 5;
const MIN_SUGGESTION_QUERY_CHARS: usize = 2;

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: Option<String>,
    http: Client,
    data_url: String,
    geo_url: String,
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("data_url", &self.data_url)
            .field("geo_url", &self.geo_url)
            .finish()
    }
}

impl OpenWeatherProvider {
    /// A blank key is treated as missing.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            http: Client::new(),
            data_url: DATA_BASE_URL.to_string(),
            geo_url: GEO_BASE_URL.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.resolved_api_key())
    }

    /// Point the provider at other hosts, e.g. a local mock server.
    pub fn with_base_urls(mut self, data_url: &str, geo_url: &str) -> Self {
        self.data_url = data_url.trim_end_matches('/').to_string();
        self.geo_url = geo_url.trim_end_matches('/').to_string();
        self
    }

    fn api_key(&self) -> Result<&str, WeatherError> {
        self.api_key.as_deref().ok_or(WeatherError::Configuration)
    }

    /// Issue a GET and decode the body. A 404 becomes `NotFound` when the
    /// request was made on behalf of a location query.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        mut params: Vec<(&'static str, String)>,
        context: &'static str,
        query: Option<&LocationQuery>,
    ) -> Result<T, WeatherError> {
        params.push(("appid", self.api_key()?.to_string()));

        let res = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|source| WeatherError::Network { context, source })?;

        let status = res.status();
        tracing::debug!(endpoint = context, %status, "OpenWeather response");

        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Network { context, source })?;

        if status == StatusCode::NOT_FOUND {
            if let Some(query) = query {
                return Err(WeatherError::NotFound(query.to_string()));
            }
        }

        if !status.is_success() {
            return Err(WeatherError::HttpStatus { context, status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::InvalidResponse { context, reason: e.to_string() })
    }

    async fn forecast_samples(
        &self,
        query: &LocationQuery,
        units: Units,
    ) -> Result<Vec<ForecastSample>, WeatherError> {
        let mut params = location_params(query);
        params.push(("units", units.as_str().to_string()));

        let parsed: OwForecastResponse = self
            .get_json(format!("{}/forecast", self.data_url), params, "forecast", Some(query))
            .await?;

        parsed.list.into_iter().map(normalize_sample).collect()
    }

    async fn geocode(&self, name: &str, limit: usize) -> Result<Vec<OwGeoLocation>, WeatherError> {
        let params = vec![("q", name.to_string()), ("limit", limit.to_string())];
        self.get_json(format!("{}/direct", self.geo_url), params, "geocoding", None).await
    }

    async fn resolve_coords(&self, query: &LocationQuery) -> Result<Coords, WeatherError> {
        match query {
            LocationQuery::Coords(coords) => Ok(*coords),
            LocationQuery::City(name) => {
                let found = self.geocode(name, 1).await?;
                let first = found
                    .into_iter()
                    .next()
                    .ok_or_else(|| WeatherError::NotFound(name.clone()))?;
                Ok(Coords { lat: first.lat, lon: first.lon })
            }
        }
    }
}

fn location_params(query: &LocationQuery) -> Vec<(&'static str, String)> {
    match query {
        LocationQuery::City(name) => vec![("q", name.clone())],
        LocationQuery::Coords(c) => vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())],
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
    dew_point: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    speed: Option<f64>,
    deg: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: Option<OwWind>,
    /// Metres.
    visibility: Option<u32>,
    clouds: Option<OwClouds>,
    coord: Option<OwCoord>,
    uvi: Option<f64>,
    alerts: Option<Vec<Alert>>,
}

#[derive(Debug, Deserialize)]
struct OwForecastItem {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: Option<OwWind>,
    pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwAqi {
    aqi: u8,
}

#[derive(Debug, Deserialize)]
struct OwComponents {
    co: f64,
    no: f64,
    no2: f64,
    o3: f64,
    so2: f64,
    pm2_5: f64,
    pm10: f64,
    nh3: f64,
}

#[derive(Debug, Deserialize)]
struct OwPollution {
    main: OwAqi,
    components: OwComponents,
}

#[derive(Debug, Deserialize)]
struct OwAirResponse {
    list: Vec<OwPollution>,
}

#[derive(Debug, Deserialize)]
struct OwGeoLocation {
    name: String,
    country: String,
    state: Option<String>,
    lat: f64,
    lon: f64,
}

impl From<OwGeoLocation> for CitySuggestion {
    fn from(loc: OwGeoLocation) -> Self {
        CitySuggestion {
            name: loc.name,
            country: loc.country,
            state: loc.state,
            coords: Coords { lat: loc.lat, lon: loc.lon },
        }
    }
}

fn primary_weather(
    weather: Vec<OwWeather>,
    context: &'static str,
) -> Result<OwWeather, WeatherError> {
    weather.into_iter().next().ok_or_else(|| WeatherError::InvalidResponse {
        context,
        reason: "`weather` array is empty".to_string(),
    })
}

/// `now` is epoch seconds, the same base as sunrise and sunset.
fn normalize_current(raw: OwCurrentResponse, now: i64) -> Result<CurrentConditions, WeatherError> {
    let weather = primary_weather(raw.weather, "current weather")?;
    let wind = raw.wind.unwrap_or_default();

    Ok(CurrentConditions {
        name: raw.name,
        country: raw.sys.country,
        temp: round_whole(raw.main.temp),
        feels_like: round_whole(raw.main.feels_like),
        description: weather.description,
        main: weather.main,
        humidity: raw.main.humidity,
        pressure: raw.main.pressure,
        wind_speed: wind.speed.unwrap_or(0.0),
        wind_direction: wind.deg.unwrap_or(0),
        visibility: visibility_km(raw.visibility),
        icon: weather.icon,
        sunrise: raw.sys.sunrise,
        sunset: raw.sys.sunset,
        is_night: is_night(now, raw.sys.sunrise, raw.sys.sunset),
        coords: raw.coord.map(|c| Coords { lat: c.lat, lon: c.lon }),
        uv_index: raw.uvi,
        dew_point: raw.main.dew_point.map(round_whole),
        cloud_cover: Some(raw.clouds.and_then(|c| c.all).unwrap_or(0)),
        alerts: raw.alerts,
    })
}

fn normalize_sample(raw: OwForecastItem) -> Result<ForecastSample, WeatherError> {
    let weather = primary_weather(raw.weather, "forecast")?;
    let wind = raw.wind.unwrap_or_default();

    Ok(ForecastSample {
        dt: raw.dt,
        temp: raw.main.temp,
        feels_like: raw.main.feels_like,
        main: weather.main,
        description: weather.description,
        icon: weather.icon,
        humidity: raw.main.humidity,
        wind_speed: wind.speed.unwrap_or(0.0),
        wind_direction: wind.deg.unwrap_or(0),
        pressure: raw.main.pressure,
        pop: raw.pop.unwrap_or(0.0),
    })
}

fn normalize_air_quality(raw: OwAirResponse) -> Result<AirQuality, WeatherError> {
    let pollution = raw.list.into_iter().next().ok_or_else(|| WeatherError::InvalidResponse {
        context: "air pollution",
        reason: "`list` is empty".to_string(),
    })?;
    let c = pollution.components;

    Ok(AirQuality {
        aqi: pollution.main.aqi,
        co: c.co,
        no: c.no,
        no2: c.no2,
        o3: c.o3,
        so2: c.so2,
        pm2_5: c.pm2_5,
        pm10: c.pm10,
        nh3: c.nh3,
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_current(
        &self,
        query: &LocationQuery,
        units: Units,
    ) -> Result<CurrentConditions, WeatherError> {
        let mut params = location_params(query);
        params.push(("units", units.as_str().to_string()));

        let parsed: OwCurrentResponse = self
            .get_json(format!("{}/weather", self.data_url), params, "current weather", Some(query))
            .await?;

        normalize_current(parsed, Utc::now().timestamp())
    }

    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
        units: Units,
    ) -> Result<Vec<DailyForecastEntry>, WeatherError> {
        let samples = self.forecast_samples(query, units).await?;
        Ok(daily_forecast(&samples))
    }

    async fn fetch_hourly(
        &self,
        query: &LocationQuery,
        units: Units,
    ) -> Result<Vec<HourlyEntry>, WeatherError> {
        let samples = self.forecast_samples(query, units).await?;
        Ok(hourly_entries(&samples))
    }

    async fn fetch_air_quality(&self, query: &LocationQuery) -> Result<AirQuality, WeatherError> {
        self.api_key()?;
        let coords = self.resolve_coords(query).await?;

        let params = vec![("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())];
        let parsed: OwAirResponse = self
            .get_json(format!("{}/air_pollution", self.data_url), params, "air pollution", None)
            .await?;

        normalize_air_quality(parsed)
    }

    async fn search_cities(&self, partial: &str) -> Vec<CitySuggestion> {
        let partial = partial.trim();
        if partial.chars().count() < MIN_SUGGESTION_QUERY_CHARS || self.api_key.is_none() {
            return Vec::new();
        }

        match self.geocode(partial, SUGGESTION_LIMIT).await {
            Ok(found) => found.into_iter().take(SUGGESTION_LIMIT).map(CitySuggestion::from).collect(),
            Err(err) => {
                tracing::warn!(error = %err, query = partial, "City suggestion lookup failed");
                Vec::new()
            }
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
