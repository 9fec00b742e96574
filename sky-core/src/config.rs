use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use url::Url;

use crate::{model::Coordinate, settings::Preferences};

pub const DEFAULT_BASE_URL: &str = "https://api.darksky.net/forecast";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.darksky.net/forecast"
///
/// [location]
/// latitude = 37.7749
/// longitude = -122.4194
///
/// [preferences]
/// date_mode = "text"
/// temperature_mode = "celsius"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,

    /// Endpoint the API key is appended to.
    pub base_url: String,

    /// Used when no coordinate is given on the command line.
    pub location: Option<Coordinate>,

    pub preferences: Preferences,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            location: None,
            preferences: Preferences::default(),
        }
    }
}

impl Config {
    /// Base endpoint with the API key embedded as its last path segment.
    pub fn authenticated_url(&self) -> Result<Url> {
        let key = self.api_key.as_deref().filter(|k| !k.is_empty()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `sky configure` and enter your API key."
            )
        })?;

        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base URL in config: {}", self.base_url))?;

        url.path_segments_mut()
            .map_err(|_| anyhow!("Base URL cannot take path segments: {}", self.base_url))?
            .pop_if_empty()
            .push(key);

        Ok(url)
    }

    /// Default location, or an error hinting how to set one.
    pub fn default_location(&self) -> Result<Coordinate> {
        self.location.ok_or_else(|| {
            anyhow!(
                "No location given and no default location configured.\n\
                 Hint: pass LAT LON, or run `sky configure` to store a default."
            )
        })
    }

    /// Load config from the platform config dir, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Save config to the platform config dir and return the path written.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Load config from `path`, or return defaults if it doesn't exist yet.
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

    /// Save config, creating parent directories as needed.
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

    /// Platform default location of the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "sky", "sky-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
