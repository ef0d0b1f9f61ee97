use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::units::{ThemePreference, Units};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// How many recent searches are remembered.
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "metric"
/// theme = "auto"
/// favorites = ["Lisbon"]
/// recent_searches = ["Oslo", "Paris"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// OpenWeatherMap API key.
    pub api_key: Option<String>,
    pub units: Units,
    pub theme: ThemePreference,
    pub favorites: Vec<String>,
    /// Most recent first.
    pub recent_searches: Vec<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "rainbow-weather", "rainbow")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key to use, preferring the environment over the file.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key_with_override(std::env::var(API_KEY_ENV).ok())
    }

    /// Blank values on either side count as unset.
    pub fn api_key_with_override(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    pub fn is_favorite(&self, city: &str) -> bool {
        self.favorites.iter().any(|f| f == city)
    }

    /// Returns `false` if the city was already a favorite.
    pub fn add_favorite(&mut self, city: &str) -> bool {
        if self.is_favorite(city) {
            return false;
        }
        self.favorites.push(city.to_string());
        true
    }

    /// Returns `false` if the city was not a favorite.
    pub fn remove_favorite(&mut self, city: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|f| f != city);
        self.favorites.len() != before
    }

    /// Move `city` to the front of the recent list. Favorites are not
    /// recorded since they are already one keystroke away.
    pub fn record_search(&mut self, city: &str) {
        if city.is_empty() || self.is_favorite(city) {
            return;
        }

        self.recent_searches.retain(|s| s != city);
        self.recent_searches.insert(0, city.to_string());
        self.recent_searches.truncate(MAX_RECENT_SEARCHES);
    }
}
