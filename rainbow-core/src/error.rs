//! Error taxonomy for provider calls.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error(
        "API key not configured.\n\
         Hint: run `rainbow configure` or set OPENWEATHER_API_KEY."
    )]
    Configuration,

    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("OpenWeather {context} request failed with status {status}: {body}")]
    HttpStatus {
        context: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to send request to OpenWeather ({context})")]
    Network {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected OpenWeather {context} response: {reason}")]
    InvalidResponse {
        context: &'static str,
        reason: String,
    },

    #[error("Coordinates out of range: lat {lat}, lon {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },
}

impl WeatherError {
    /// Short message for display next to an emptied dashboard.
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration => "API key not configured".to_string(),
            Self::NotFound(_) => "Location not found".to_string(),
            Self::HttpStatus { context, .. } | Self::Network { context, .. } => {
                format!("Failed to fetch {context} data")
            }
            Self::InvalidResponse { context, .. } => {
                format!("Received malformed {context} data")
            }
            Self::InvalidCoordinates { .. } => "Invalid coordinates".to_string(),
        }
    }

    /// Non-success HTTP status or network-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::HttpStatus { .. } | Self::Network { .. })
    }
}
