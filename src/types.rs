//! Shared value types and text-field helpers

use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

/// Display format used for every stored date (dd.MM.yyyy)
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Distance unit of a vehicle's odometer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    Mi,
}

impl DistanceUnit {
    pub fn label(&self) -> &'static str {
        match self {
            DistanceUnit::Km => "km",
            DistanceUnit::Mi => "mi",
        }
    }

    /// Parse a stored unit label
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "km" => Some(DistanceUnit::Km),
            "mi" => Some(DistanceUnit::Mi),
            _ => None,
        }
    }
}

impl std::fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Deserialize a unit label, mapping anything unrecognised to `None`
pub(crate) fn lenient_unit<'de, D>(deserializer: D) -> Result<Option<DistanceUnit>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(DistanceUnit::parse))
}

/// Deserialize null as default value
pub(crate) fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

/// Parse a string-typed numeric field.
///
/// Blank, unparseable and non-finite text is treated as absent.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a string-typed numeric field, falling back to zero
pub fn number_or_zero(value: &str) -> f64 {
    parse_number(value).unwrap_or(0.0)
}

/// Parse a display-formatted date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date in display format
pub fn today() -> String {
    format_date(Local::now().date_naive())
}

/// Empty or whitespace-only text becomes `None`
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
