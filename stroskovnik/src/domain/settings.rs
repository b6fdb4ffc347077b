use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use time::{
    format_description::BorrowedFormatItem,
    macros::{format_description, time},
    Time,
};

use super::{ClockTime, SettingsError};

/// Secondary work may fill at most a whole day.
const MAX_SECONDARY_PERCENT: f64 = 300.0;
/// Arrival may move at most half a day either way.
const MAX_SCATTERING_MINUTES: u32 = 12 * 60;

const HH_MM: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

time::serde::format_description!(hh_mm, Time, HH_MM);

/// User preferences, read as one snapshot right before every generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base arrival time, `HH:MM`.
    #[serde(with = "hh_mm")]
    pub arrival_time: Time,
    /// Arrival is moved by a random offset in `[-scattering, +scattering]` minutes.
    pub scattering_minutes: u32,
    pub enable_secondary: bool,
    pub secondary_name: String,
    /// Secondary hours as a percentage of an 8 hour day.
    pub secondary_percent: f64,
    pub secondary_include_breaks: bool,
    pub output_dir: PathBuf,
    /// TrueType font for the generated documents. Builtin Helvetica when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arrival_time: time!(09:00),
            scattering_minutes: 10,
            enable_secondary: false,
            secondary_name: String::new(),
            secondary_percent: 0.0,
            secondary_include_breaks: true,
            output_dir: PathBuf::from("output"),
            font_path: None,
        }
    }
}

/// The secondary engagement, present only when it will actually produce a schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryWork {
    pub name: String,
    pub percent: f64,
    pub include_breaks: bool,
}

impl Settings {
    pub fn base_arrival(&self) -> ClockTime {
        ClockTime::from(self.arrival_time)
    }

    /// Secondary work is generated only when enabled and with a positive percentage.
    pub fn secondary(&self) -> Option<SecondaryWork> {
        let percent = self.secondary_percent;
        if !self.enable_secondary || percent.is_nan() || percent <= 0.0 {
            return None;
        }
        Some(SecondaryWork {
            name: self.secondary_name.trim().to_string(),
            percent,
            include_breaks: self.secondary_include_breaks,
        })
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let percent = self.secondary_percent;
        if !percent.is_finite() || !(0.0..=MAX_SECONDARY_PERCENT).contains(&percent) {
            return Err(SettingsError::Invalid(format!(
                "secondary_percent must be between 0 and {}, got {}",
                MAX_SECONDARY_PERCENT, percent
            )));
        }
        if self.scattering_minutes > MAX_SCATTERING_MINUTES {
            return Err(SettingsError::Invalid(format!(
                "scattering_minutes must be at most {}, got {}",
                MAX_SCATTERING_MINUTES, self.scattering_minutes
            )));
        }
        Ok(())
    }
}

/// Parse an `HH:MM` arrival time.
pub fn parse_arrival_time(value: &str) -> Result<Time, SettingsError> {
    Time::parse(value.trim(), HH_MM)
        .map_err(|e| SettingsError::Invalid(format!("arrival time '{}': {}", value, e)))
}
