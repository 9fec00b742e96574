//! Display preferences: how dates and temperatures are rendered.
//!
//! Preferences are grouped into settings sections, each offering a fixed set of
//! rows of which exactly one is active.

use chrono::{DateTime, Datelike, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateMode {
    /// `Mon, 22 February`
    #[default]
    Text,
    /// `M, 02/22`
    Digit,
}

impl DateMode {
    pub const fn all() -> &'static [DateMode] {
        &[DateMode::Text, DateMode::Digit]
    }

    /// Sample rendering shown next to the choice.
    pub fn label(&self) -> &'static str {
        match self {
            DateMode::Text => "Fri, 01 December",
            DateMode::Digit => "F, 12/01",
        }
    }

    pub fn format<Tz>(&self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self {
            DateMode::Text => at.format("%a, %d %B").to_string(),
            DateMode::Digit => {
                let weekday = at.weekday().to_string();
                let initial = weekday.chars().next().unwrap_or('?');
                format!("{initial}, {}", at.format("%m/%d"))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureMode {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureMode {
    pub const fn all() -> &'static [TemperatureMode] {
        &[TemperatureMode::Celsius, TemperatureMode::Fahrenheit]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureMode::Celsius => "Celsius",
            TemperatureMode::Fahrenheit => "Fahrenheit",
        }
    }

    /// Convert a Fahrenheit reading into this unit.
    pub fn convert(&self, fahrenheit: f64) -> f64 {
        match self {
            TemperatureMode::Celsius => (fahrenheit - 32.0) / 1.8,
            TemperatureMode::Fahrenheit => fahrenheit,
        }
    }

    pub fn format(&self, fahrenheit: f64) -> String {
        let unit = match self {
            TemperatureMode::Celsius => "°C",
            TemperatureMode::Fahrenheit => "°F",
        };
        format!("{:.1}{unit}", self.convert(fahrenheit))
    }
}

/// The user's active choice in every section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub date_mode: DateMode,
    pub temperature_mode: TemperatureMode,
}

impl Preferences {
    /// Returns `true` if the mode actually changed.
    pub fn set_date_mode(&mut self, mode: DateMode) -> bool {
        if self.date_mode == mode {
            return false;
        }
        self.date_mode = mode;
        true
    }

    /// Returns `true` if the mode actually changed.
    pub fn set_temperature_mode(&mut self, mode: TemperatureMode) -> bool {
        if self.temperature_mode == mode {
            return false;
        }
        self.temperature_mode = mode;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Date,
    Temperature,
}

/// One selectable row within a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRow {
    pub label: &'static str,
    pub checked: bool,
}

impl Section {
    pub const fn all() -> &'static [Section] {
        &[Section::Date, Section::Temperature]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Section::Date => "Date format",
            Section::Temperature => "Temperature unit",
        }
    }

    pub fn rows(&self, prefs: &Preferences) -> Vec<SettingRow> {
        match self {
            Section::Date => DateMode::all()
                .iter()
                .map(|m| SettingRow { label: m.label(), checked: *m == prefs.date_mode })
                .collect(),
            Section::Temperature => TemperatureMode::all()
                .iter()
                .map(|m| SettingRow { label: m.label(), checked: *m == prefs.temperature_mode })
                .collect(),
        }
    }
}
