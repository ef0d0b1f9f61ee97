use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use rainbow_core::{
    Config, Coords, LocationQuery, ThemePreference, Units, dashboard, provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "rainbow", version, about = "Weather in full spectrum colors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and display preferences.
    Configure,

    /// Show the dashboard for a city or a coordinate pair.
    Show {
        /// City name, e.g. "Lisbon" or "Paris,FR".
        city: Option<String>,

        /// Latitude; takes precedence over the city together with --lon.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Override the configured unit system.
        #[arg(long, value_parser = parse_units)]
        units: Option<Units>,
    },

    /// List cities matching a partial name.
    Suggest {
        partial: String,
    },

    /// Manage favorite locations.
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },

    /// List recent searches.
    Recent,
}

#[derive(Debug, Subcommand)]
pub enum FavoriteAction {
    Add { city: String },
    Remove { city: String },
    List,
}

fn parse_units(s: &str) -> Result<Units, String> {
    Units::try_from(s).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => {
                configure(&mut config)?;
                config.save()?;
                println!("Configuration saved to {}", Config::config_file_path()?.display());
            }
            Command::Show { city, lat, lon, units } => {
                let coords = match (lat, lon) {
                    (Some(lat), Some(lon)) => Some(Coords::new(lat, lon)?),
                    _ => None,
                };
                let query = LocationQuery::from_parts(city.as_deref(), coords)
                    .ok_or_else(|| anyhow!("Either a city name or --lat/--lon is required"))?;
                let units = units.unwrap_or(config.units);
                tracing::debug!(?query, %units, "Resolved search");

                let provider = provider_from_config(&config);
                let dash = dashboard::load(provider.as_ref(), &query, units)
                    .await
                    .with_context(|| format!("Could not load weather for {query}"))?;

                print!("{}", render::dashboard(&dash, config.theme));

                if let Some(city) = query.city() {
                    config.record_search(city);
                    config.save()?;
                }
            }
            Command::Suggest { partial } => {
                let provider = provider_from_config(&config);
                let suggestions = provider.search_cities(&partial).await;
                tracing::debug!(count = suggestions.len(), "City suggestions");

                if suggestions.is_empty() {
                    println!("No suggestions for '{partial}'.");
                }
                for s in suggestions {
                    println!("{}  ({:.4}, {:.4})", s.label(), s.coords.lat, s.coords.lon);
                }
            }
            Command::Favorite { action } => match action {
                FavoriteAction::Add { city } => {
                    if config.add_favorite(&city) {
                        config.save()?;
                        println!("Added {city} to favorites.");
                    } else {
                        println!("{city} is already a favorite.");
                    }
                }
                FavoriteAction::Remove { city } => {
                    if config.remove_favorite(&city) {
                        config.save()?;
                        println!("Removed {city} from favorites.");
                    } else {
                        println!("{city} is not a favorite.");
                    }
                }
                FavoriteAction::List => print_list("Favorites", &config.favorites),
            },
            Command::Recent => print_list("Recent searches", &config.recent_searches),
        }

        Ok(())
    }
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !key.trim().is_empty() {
        config.set_api_key(key);
    }

    config.units = Select::new("Units:", Units::all().to_vec())
        .with_starting_cursor(Units::all().iter().position(|u| *u == config.units).unwrap_or(0))
        .prompt()
        .context("Failed to read unit system")?;

    config.theme = Select::new("Theme:", ThemePreference::all().to_vec())
        .with_starting_cursor(
            ThemePreference::all().iter().position(|t| *t == config.theme).unwrap_or(0),
        )
        .prompt()
        .context("Failed to read theme")?;

    Ok(())
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        println!("{title}: none");
        return;
    }
    println!("{title}:");
    for item in items {
        println!("  {item}");
    }
}
