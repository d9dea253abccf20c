//! Error types for automate

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Data directory not found")]
    DataDirNotFound,
}

/// Form validation errors. Each one blocks the save it was raised for.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} must not be blank")]
    Blank(&'static str),

    #[error("{field} must be a number greater than zero (got \"{value}\")")]
    NotPositive { field: &'static str, value: String },

    #[error("{field} must be a non-negative number (got \"{value}\")")]
    Negative { field: &'static str, value: String },

    #[error("Invalid odometer: new value {new} must be greater than the previous one ({previous})")]
    OdometerNotIncreasing { new: f64, previous: f64 },

    #[error("Invalid date \"{0}\", expected dd.MM.yyyy")]
    InvalidDate(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
