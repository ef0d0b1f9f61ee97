use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// Unit system requested from the provider.
///
/// The provider converts every value server-side, so nothing downstream
/// converts between systems: a wind speed is m/s under `Metric` and mph under
/// `Imperial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// Light/dark preference used when picking a backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    /// Follow day and night at the searched location.
    #[default]
    Auto,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::Auto => "auto",
        }
    }

    pub const fn all() -> &'static [ThemePreference] {
        &[ThemePreference::Light, ThemePreference::Dark, ThemePreference::Auto]
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ThemePreference {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "auto" => Ok(ThemePreference::Auto),
            _ => Err(anyhow::anyhow!("Unknown theme '{value}'. Supported: light, dark, auto.")),
        }
    }
}

/// Round half up, matching how the dashboard has always displayed values
/// (`-2.5` becomes `-2`, not `-3`).
pub fn round_whole(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Provider `pop` fraction to a whole percentage.
pub fn fraction_to_percent(fraction: f64) -> u8 {
    round_whole(fraction * 100.0).clamp(0, 100) as u8
}
