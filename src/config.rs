//! Configuration management for automate
//!
//! Config stored at: ~/.config/automate/config.json

use crate::cli::OutputFormat;
use crate::error::{ConfigError, Result};
use crate::types::DistanceUnit;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data directory override
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Unit preselected for new vehicles
    #[serde(default)]
    pub default_unit: DistanceUnit,

    /// Currency symbol used when printing prices
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_currency() -> String {
    "€".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            output_format: default_output_format(),
            default_unit: DistanceUnit::default(),
            currency: default_currency(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("automate");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Directory holding the record files
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::DataDirNotFound)?
            .join("automate");
        Ok(data_dir)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "AUTOmate Configuration")?;
        writeln!(f, "======================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data dir:       {}",
            self.data_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Default unit:   {}", self.default_unit)?;
        writeln!(f, "Currency:       {}", self.currency)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
