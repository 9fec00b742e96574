//! Core library for the `sky` weather client.
//!
//! This crate defines:
//! - [`WeatherRequestClient`]: one GET per coordinate, mapped to a [`RequestOutcome`]
//! - The [`Transport`] seam the client issues requests through
//! - Configuration & display preferences
//!
//! It is used by `sky-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod settings;
pub mod transport;

pub use client::WeatherRequestClient;
pub use config::Config;
pub use error::{ConfigError, RequestError, RequestOutcome};
pub use model::{Coordinate, CurrentConditions, DailyForecast, DayConditions, WeatherRecord};
pub use settings::{DateMode, Preferences, Section, TemperatureMode};
pub use transport::{ReqwestTransport, Transport, TransportError, TransportResponse};
