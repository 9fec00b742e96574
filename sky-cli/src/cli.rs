use anyhow::{Context, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{Password, Text};
use sky_core::{Config, Coordinate, DateMode, TemperatureMode, WeatherRequestClient};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "sky", version, about = "Weather CLI")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key, endpoint and default location.
    Configure,

    /// Show weather for a coordinate.
    Show {
        /// Latitude; uses the configured default location if absent.
        #[arg(allow_negative_numbers = true, requires = "longitude")]
        latitude: Option<f64>,

        #[arg(allow_negative_numbers = true)]
        longitude: Option<f64>,
    },

    /// List display settings, or change one.
    Settings {
        #[command(subcommand)]
        change: Option<SettingsCommand>,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Date format.
    Date { mode: DateArg },
    /// Temperature unit.
    Temperature { mode: TemperatureArg },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateArg {
    Text,
    Digit,
}

impl From<DateArg> for DateMode {
    fn from(value: DateArg) -> Self {
        match value {
            DateArg::Text => DateMode::Text,
            DateArg::Digit => DateMode::Digit,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TemperatureArg {
    Celsius,
    Fahrenheit,
}

impl From<TemperatureArg> for TemperatureMode {
    fn from(value: TemperatureArg) -> Self {
        match value {
            TemperatureArg::Celsius => TemperatureMode::Celsius,
            TemperatureArg::Fahrenheit => TemperatureMode::Fahrenheit,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = self.config;
        debug!(path = ?path, "using config file");
        let mut cfg = match &path {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        match self.command {
            Command::Configure => {
                configure(&mut cfg)?;
                let saved = persist(&cfg, path.as_deref())?;
                println!("Configuration saved to {}", saved.display());
            }
            Command::Show { latitude, longitude } => {
                let coordinate = match (latitude, longitude) {
                    (Some(lat), Some(lon)) => Coordinate::new(lat, lon),
                    _ => cfg.default_location()?,
                };

                let client = WeatherRequestClient::from_config(&cfg)?;
                let record = client
                    .fetch(coordinate)
                    .await
                    .with_context(|| format!("Could not fetch weather for {coordinate}"))?;

                print!("{}", output::render_record(&record, &cfg.preferences, &Local));
            }
            Command::Settings { change: None } => {
                print!("{}", output::render_settings(&cfg.preferences));
            }
            Command::Settings { change: Some(SettingsCommand::Date { mode }) } => {
                let mode = DateMode::from(mode);
                if cfg.preferences.set_date_mode(mode) {
                    persist(&cfg, path.as_deref())?;
                    println!("Date format set to \"{}\"", mode.label());
                } else {
                    println!("Date format is already \"{}\"", mode.label());
                }
            }
            Command::Settings { change: Some(SettingsCommand::Temperature { mode }) } => {
                let mode = TemperatureMode::from(mode);
                if cfg.preferences.set_temperature_mode(mode) {
                    persist(&cfg, path.as_deref())?;
                    println!("Temperature unit set to {}", mode.label());
                } else {
                    println!("Temperature unit is already {}", mode.label());
                }
            }
        }

        Ok(())
    }
}

/// Save to `path`, or to the platform config file when none was given.
fn persist(cfg: &Config, path: Option<&Path>) -> anyhow::Result<PathBuf> {
    match path {
        Some(path) => {
            cfg.save_to(path)?;
            Ok(path.to_path_buf())
        }
        None => cfg.save(),
    }
}

/// Interactive prompts; validates the result before returning.
fn configure(cfg: &mut Config) -> anyhow::Result<()> {
    let key = Password::new("API key:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()?;
    if !key.trim().is_empty() {
        cfg.api_key = Some(key.trim().to_string());
    }

    let base_url = Text::new("Base URL:").with_default(&cfg.base_url).prompt()?;
    cfg.base_url = base_url.trim().to_string();

    let current = cfg.location.map(|c| c.to_string()).unwrap_or_default();
    let location = Text::new("Default location (LAT, LON):")
        .with_default(&current)
        .with_help_message("Leave empty for none")
        .prompt()?;
    cfg.location = parse_coordinate(&location)?;

    cfg.authenticated_url()?;
    Ok(())
}

/// Parse `"LAT, LON"`; empty input means no location.
fn parse_coordinate(input: &str) -> anyhow::Result<Option<Coordinate>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let (lat, lon) = input
        .split_once(',')
        .ok_or_else(|| anyhow!("Expected \"LAT, LON\", got '{input}'"))?;

    let latitude: f64 = lat.trim().parse().with_context(|| format!("Invalid latitude '{}'", lat.trim()))?;
    let longitude: f64 = lon.trim().parse().with_context(|| format!("Invalid longitude '{}'", lon.trim()))?;

    Ok(Some(Coordinate::new(latitude, longitude)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_coordinate_accepts_comma_space() {
        let c = parse_coordinate("37.7749, -122.4194").unwrap().unwrap();
        assert_eq!(c, Coordinate::new(37.7749, -122.4194));
    }

    #[test]
    fn parse_coordinate_empty_is_none() {
        assert!(parse_coordinate("   ").unwrap().is_none());
    }

    #[test]
    fn parse_coordinate_rejects_garbage() {
        assert!(parse_coordinate("somewhere").is_err());
        assert!(parse_coordinate("north, 3").is_err());
    }

    #[test]
    fn show_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["sky", "show", "37.7749", "-122.4194"]).unwrap();
        match cli.command {
            Command::Show { latitude, longitude } => {
                assert_eq!(latitude, Some(37.7749));
                assert_eq!(longitude, Some(-122.4194));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_requires_both_coordinates() {
        assert!(Cli::try_parse_from(["sky", "show", "37.7749"]).is_err());
    }

    #[test]
    fn settings_subcommands_parse() {
        let cli = Cli::try_parse_from(["sky", "--config", "/tmp/sky.toml", "settings", "temperature", "fahrenheit"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/sky.toml")));
        assert!(matches!(
            cli.command,
            Command::Settings { change: Some(SettingsCommand::Temperature { mode: TemperatureArg::Fahrenheit }) }
        ));
    }

    #[test]
    fn persist_writes_to_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config { api_key: Some("K".into()), ..Config::default() };

        let saved = persist(&cfg, Some(&path)).unwrap();

        assert_eq!(saved, path);
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[tokio::test]
    async fn settings_change_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path_arg = path.to_str().unwrap();

        Cli::try_parse_from(["sky", "--config", path_arg, "settings", "date", "digit"])
            .unwrap()
            .run()
            .await
            .unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.preferences.date_mode, DateMode::Digit);
    }

    #[tokio::test]
    async fn show_without_location_reports_hint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path_arg = path.to_str().unwrap();

        let err = Cli::try_parse_from(["sky", "--config", path_arg, "show"]).unwrap().run().await.unwrap_err();
        assert!(err.to_string().contains("no default location configured"));
    }
}
