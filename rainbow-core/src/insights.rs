//! Plain-language observations derived from today's conditions and the daily
//! forecast.
//!
//! Thresholds are applied to values as delivered, in whichever unit system the
//! search used.

use std::fmt;

use crate::model::{CurrentConditions, DailyForecastEntry};

/// Shown by front ends when [`derive_insights`] returns nothing.
pub const STABLE_CONDITIONS_MESSAGE: &str =
    "Weather conditions are stable with no significant changes expected.";

const TREND_THRESHOLD: f64 = 5.0;
const PRECIPITATION_THRESHOLD: u8 = 70;
const WIND_THRESHOLD: f64 = 10.0;
const HUMIDITY_THRESHOLD: u8 = 80;
/// km
const VISIBILITY_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insight {
    WarmerTomorrow,
    CoolerTomorrow,
    Precipitation,
    Wind,
    Humidity,
    Visibility,
}

impl Insight {
    pub fn message(&self) -> &'static str {
        match self {
            Self::WarmerTomorrow => "Tomorrow will be significantly warmer than today",
            Self::CoolerTomorrow => "Tomorrow will be significantly cooler than today",
            Self::Precipitation => {
                "High chance of precipitation today - consider bringing an umbrella"
            }
            Self::Wind => "Windy conditions expected - secure loose outdoor items",
            Self::Humidity => {
                "High humidity levels - it may feel more uncomfortable than the temperature suggests"
            }
            Self::Visibility => "Reduced visibility conditions - drive carefully",
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Insights in fixed priority order: trend, precipitation, wind, humidity,
/// visibility. Each rule contributes at most one entry.
pub fn derive_insights(current: &CurrentConditions, forecast: &[DailyForecastEntry]) -> Vec<Insight> {
    let mut insights = Vec::new();

    if let Some(tomorrow) = forecast.get(1) {
        let delta = f64::from(tomorrow.temp.max - current.temp);
        if delta.abs() > TREND_THRESHOLD {
            insights.push(if delta > 0.0 {
                Insight::WarmerTomorrow
            } else {
                Insight::CoolerTomorrow
            });
        }
    }

    if forecast.first().is_some_and(|today| today.pop > PRECIPITATION_THRESHOLD) {
        insights.push(Insight::Precipitation);
    }

    if current.wind_speed > WIND_THRESHOLD {
        insights.push(Insight::Wind);
    }

    if current.humidity > HUMIDITY_THRESHOLD {
        insights.push(Insight::Humidity);
    }

    if current.visibility < VISIBILITY_THRESHOLD {
        insights.push(Insight::Visibility);
    }

    insights
}
