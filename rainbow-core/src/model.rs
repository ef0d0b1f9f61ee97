use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::WeatherError, units::round_whole};

/// Geographic position, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

impl Coords {
    pub fn new(lat: f64, lon: f64) -> Result<Self, WeatherError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(WeatherError::InvalidCoordinates { lat, lon });
        }
        Ok(Self { lat, lon })
    }
}

/// What the user searched for.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coords(Coords),
}

impl LocationQuery {
    /// Coordinates win over a city name; `None` when neither is usable.
    pub fn from_parts(city: Option<&str>, coords: Option<Coords>) -> Option<Self> {
        if let Some(coords) = coords {
            return Some(Self::Coords(coords));
        }

        city.map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| Self::City(c.to_string()))
    }

    pub fn city(&self) -> Option<&str> {
        match self {
            Self::City(name) => Some(name),
            Self::Coords(_) => None,
        }
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::City(name) => f.write_str(name),
            Self::Coords(c) => write!(f, "{:.4}, {:.4}", c.lat, c.lon),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
    Extreme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub event: String,
    pub description: String,
    pub severity: Severity,
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    pub country: String,
    pub temp: i32,
    pub feels_like: i32,
    pub description: String,
    /// Condition group, e.g. "Clear" or "Rain".
    pub main: String,
    pub humidity: u8,
    /// hPa
    pub pressure: u32,
    pub wind_speed: f64,
    pub wind_direction: u16,
    /// Whole kilometres.
    pub visibility: u32,
    pub icon: String,
    pub sunrise: i64,
    pub sunset: i64,
    pub is_night: bool,
    pub coords: Option<Coords>,
    pub uv_index: Option<f64>,
    pub dew_point: Option<i32>,
    pub cloud_cover: Option<u8>,
    pub alerts: Option<Vec<Alert>>,
}

/// True outside the `[sunrise, sunset]` window, all in epoch seconds.
pub fn is_night(now: i64, sunrise: i64, sunset: i64) -> bool {
    now < sunrise || now > sunset
}

/// One decoded 3-hourly forecast sample, before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub dt: i64,
    pub temp: f64,
    pub feels_like: f64,
    pub main: String,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub wind_direction: u16,
    pub pressure: u32,
    /// Provider fraction in `[0, 1]`.
    pub pop: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempRange {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub date: NaiveDate,
    pub temp: TempRange,
    pub main: String,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub wind_direction: u16,
    pub pressure: u32,
    /// Whole percent, 0..=100.
    pub pop: u8,
    pub uv_index: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    pub time: DateTime<Utc>,
    pub temp: i32,
    pub feels_like: i32,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub wind_direction: u16,
    pub pop: u8,
    pub pressure: u32,
}

/// Pollutant concentrations are µg/m³.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    /// Provider ordinal, 1 (good) to 5 (very poor).
    pub aqi: u8,
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub nh3: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub name: String,
    pub country: String,
    pub state: Option<String>,
    pub coords: Coords,
}

impl CitySuggestion {
    /// "Paris, Île-de-France, FR" style label.
    pub fn label(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country),
            None => format!("{}, {}", self.name, self.country),
        }
    }
}

/// Visibility in metres to whole kilometres; absent means 10 km.
pub fn visibility_km(metres: Option<u32>) -> u32 {
    round_whole(f64::from(metres.unwrap_or(10_000)) / 1000.0).max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_reject_out_of_range() {
        assert!(Coords::new(48.85, 2.35).is_ok());
        assert!(Coords::new(-90.0, 180.0).is_ok());

        let err = Coords::new(91.0, 0.0).unwrap_err();
        assert!(matches!(err, WeatherError::InvalidCoordinates { .. }));
        assert!(Coords::new(0.0, -180.5).is_err());
    }

    #[test]
    fn coordinates_take_precedence_over_city() {
        let coords = Coords::new(40.71, -74.0).unwrap();
        let q = LocationQuery::from_parts(Some("Paris"), Some(coords));
        assert_eq!(q, Some(LocationQuery::Coords(coords)));
    }

    #[test]
    fn blank_city_without_coords_is_no_query() {
        assert_eq!(LocationQuery::from_parts(Some("   "), None), None);
        assert_eq!(LocationQuery::from_parts(None, None), None);
        assert_eq!(
            LocationQuery::from_parts(Some(" Oslo "), None),
            Some(LocationQuery::City("Oslo".into()))
        );
    }

    #[test]
    fn night_is_outside_daylight_window() {
        assert!(is_night(99, 100, 200));
        assert!(!is_night(100, 100, 200));
        assert!(!is_night(150, 100, 200));
        assert!(!is_night(200, 100, 200));
        assert!(is_night(201, 100, 200));
    }

    #[test]
    fn visibility_defaults_and_converts() {
        assert_eq!(visibility_km(Some(12_000)), 12);
        assert_eq!(visibility_km(None), 10);
        assert_eq!(visibility_km(Some(4_400)), 4);
        assert_eq!(visibility_km(Some(4_500)), 5);
    }

    #[test]
    fn severity_decodes_lowercase() {
        let s: Severity = serde_json::from_str("\"severe\"").unwrap();
        assert_eq!(s, Severity::Severe);
        assert!(serde_json::from_str::<Severity>("\"apocalyptic\"").is_err());
    }

    #[test]
    fn suggestion_label_includes_state_when_known() {
        let mut s = CitySuggestion {
            name: "Paris".into(),
            country: "US".into(),
            state: Some("Texas".into()),
            coords: Coords::new(33.66, -95.55).unwrap(),
        };
        assert_eq!(s.label(), "Paris, Texas, US");
        s.state = None;
        assert_eq!(s.label(), "Paris, US");
    }
}
