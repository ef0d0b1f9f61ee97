//! Display helpers shared by every front end: compass points, AQI and UV
//! bands, time strings and the backdrop chosen for the current conditions.

use chrono::{DateTime, TimeZone, Utc};

use crate::units::ThemePreference;

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Nearest of the 16 compass points for a bearing in degrees.
pub fn wind_direction(degrees: f64) -> &'static str {
    let idx = (degrees / 22.5).round() as i64;
    COMPASS[idx.rem_euclid(16) as usize]
}

/// Uppercase the first character of every word, leaving the rest untouched
/// ("light rain" -> "Light Rain").
pub fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for ch in s.chars() {
        let is_word = ch.is_alphanumeric() || ch == '_';
        if is_word && !in_word {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        in_word = is_word;
    }

    out
}

/// `HH:MM` for an epoch timestamp. Returns `--:--` for timestamps chrono
/// cannot represent.
pub fn format_time<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => dt.with_timezone(tz).format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

/// 12-hour clock label without minutes, e.g. `3 PM`.
pub fn format_hour<Tz: TimeZone>(time: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.with_timezone(tz).format("%-I %p").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiLevel {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
    Unknown,
}

impl AqiLevel {
    pub fn from_aqi(aqi: u8) -> Self {
        match aqi {
            1 => Self::Good,
            2 => Self::Fair,
            3 => Self::Moderate,
            4 => Self::Poor,
            5 => Self::VeryPoor,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
            Self::Unknown => "Unknown",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Good => "emerald",
            Self::Fair => "lime",
            Self::Moderate => "amber",
            Self::Poor => "orange",
            Self::VeryPoor => "red",
            Self::Unknown => "gray",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvLevel {
    pub fn from_index(uv_index: f64) -> Self {
        if uv_index <= 2.0 {
            Self::Low
        } else if uv_index <= 5.0 {
            Self::Moderate
        } else if uv_index <= 7.0 {
            Self::High
        } else if uv_index <= 10.0 {
            Self::VeryHigh
        } else {
            Self::Extreme
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Extreme => "Extreme",
        }
    }
}

/// Background gradient for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    ClearNight,
    ClearDay,
    CloudsDark,
    CloudsLight,
    Rain,
    Thunderstorm,
    SnowDark,
    SnowLight,
    MistDark,
    MistLight,
    DefaultDark,
    DefaultLight,
}

impl Backdrop {
    /// Pick a backdrop from the provider's condition group.
    pub fn select(condition: &str, is_night: bool, theme: ThemePreference) -> Self {
        let dark = theme == ThemePreference::Dark || (theme == ThemePreference::Auto && is_night);

        match condition.to_lowercase().as_str() {
            "clear" if dark || is_night => Self::ClearNight,
            "clear" => Self::ClearDay,
            "clouds" if dark => Self::CloudsDark,
            "clouds" => Self::CloudsLight,
            "rain" | "drizzle" => Self::Rain,
            "thunderstorm" => Self::Thunderstorm,
            "snow" if dark => Self::SnowDark,
            "snow" => Self::SnowLight,
            "mist" | "fog" | "haze" if dark => Self::MistDark,
            "mist" | "fog" | "haze" => Self::MistLight,
            _ if dark => Self::DefaultDark,
            _ => Self::DefaultLight,
        }
    }

    /// Gradient stops, top-left to bottom-right.
    pub fn gradient(&self) -> [&'static str; 3] {
        match self {
            Self::ClearNight => ["purple-900", "indigo-900", "pink-900"],
            Self::ClearDay => ["orange-400", "pink-500", "purple-600"],
            Self::CloudsDark => ["slate-800", "purple-900", "indigo-900"],
            Self::CloudsLight => ["teal-400", "cyan-500", "blue-600"],
            Self::Rain => ["indigo-700", "purple-800", "pink-900"],
            Self::Thunderstorm => ["purple-900", "indigo-900", "black"],
            Self::SnowDark => ["cyan-900", "blue-800", "purple-900"],
            Self::SnowLight => ["cyan-100", "blue-200", "purple-300"],
            Self::MistDark => ["emerald-700", "teal-800", "cyan-900"],
            Self::MistLight => ["emerald-300", "teal-400", "cyan-500"],
            Self::DefaultDark => ["violet-800", "purple-900", "indigo-900"],
            Self::DefaultLight => ["rose-400", "pink-500", "purple-600"],
        }
    }
}
