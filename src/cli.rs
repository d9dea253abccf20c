//! CLI definition using clap

use crate::types::DistanceUnit;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Parser)]
#[command(name = "automate")]
#[command(version)]
#[command(about = "Track vehicles, fuel refills and maintenance")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the record files. Uses config value if not specified.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage vehicles
    #[command(subcommand)]
    Vehicle(VehicleCommand),

    /// Log and inspect fuel refills
    #[command(subcommand)]
    Fuel(FuelCommand),

    /// Log and inspect maintenance
    #[command(subcommand)]
    Maintenance(MaintenanceCommand),

    /// Render the screen for a route (e.g. "fuel_overview/<vehicle-id>")
    Open {
        /// Route string
        #[arg(default_value = "vehicles")]
        route: String,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default distance unit for new vehicles
        #[arg(long)]
        set_unit: Option<DistanceUnit>,

        /// Set currency symbol
        #[arg(long)]
        set_currency: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Vehicle fields shared by `add` and `edit`
#[derive(Args, Debug, Clone, Default)]
pub struct VehicleFields {
    /// Brand (e.g. "Skoda")
    #[arg(long)]
    pub brand: Option<String>,

    /// Model (e.g. "Octavia")
    #[arg(long)]
    pub model: Option<String>,

    /// License plate
    #[arg(long, short = 'p')]
    pub plate: Option<String>,

    /// Vehicle identification number
    #[arg(long)]
    pub vin: Option<String>,

    /// Current odometer reading
    #[arg(long, short = 'o')]
    pub odometer: Option<String>,

    /// Odometer unit
    #[arg(long, short = 'u')]
    pub unit: Option<DistanceUnit>,

    /// First registration date (dd.MM.yyyy)
    #[arg(long)]
    pub registration_date: Option<String>,

    /// Photo to store with the vehicle
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum VehicleCommand {
    /// Add a vehicle
    Add {
        #[command(flatten)]
        fields: VehicleFields,
    },

    /// List vehicles
    List,

    /// Show vehicle details
    Show {
        /// Vehicle ID
        id: String,
    },

    /// Modify vehicle information
    Edit {
        /// Vehicle ID
        id: String,

        #[command(flatten)]
        fields: VehicleFields,

        /// Remove the stored photo
        #[arg(long, conflicts_with = "image")]
        clear_image: bool,
    },

    /// Delete a vehicle with all its fuel and maintenance entries
    Delete {
        /// Vehicle ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Fuel entry fields shared by `add` and `edit`
#[derive(Args, Debug, Clone, Default)]
pub struct FuelFields {
    /// Date (dd.MM.yyyy). Defaults to today when adding.
    #[arg(long, short = 'd')]
    pub date: Option<String>,

    /// Liters filled
    #[arg(long, short = 'l')]
    pub liters: Option<String>,

    /// Total price
    #[arg(long, short = 'p')]
    pub price: Option<String>,

    /// Odometer reading
    #[arg(long, short = 'o')]
    pub odometer: Option<String>,

    /// Optional note
    #[arg(long, short = 'n')]
    pub note: Option<String>,
}

#[derive(Subcommand)]
pub enum FuelCommand {
    /// Log a refuel
    Add {
        /// Vehicle ID
        vehicle_id: String,

        #[command(flatten)]
        fields: FuelFields,
    },

    /// Show fuel history with per-entry metrics
    List {
        /// Vehicle ID
        vehicle_id: String,
    },

    /// Modify a fuel entry
    Edit {
        /// Vehicle ID
        vehicle_id: String,

        /// Entry ID
        entry_id: String,

        #[command(flatten)]
        fields: FuelFields,
    },

    /// Show overall fuel statistics
    Stats {
        /// Vehicle ID
        vehicle_id: String,
    },
}

/// Maintenance entry fields shared by `add` and `edit`
#[derive(Args, Debug, Clone, Default)]
pub struct MaintenanceFields {
    /// Type of maintenance (e.g. "Oil change")
    #[arg(long = "type", short = 't')]
    pub kind: Option<String>,

    /// Date (dd.MM.yyyy). Defaults to today when adding.
    #[arg(long, short = 'd')]
    pub date: Option<String>,

    /// Total price
    #[arg(long, short = 'p')]
    pub price: Option<String>,

    /// Odometer reading
    #[arg(long, short = 'o')]
    pub odometer: Option<String>,

    /// Optional note
    #[arg(long, short = 'n')]
    pub note: Option<String>,
}

#[derive(Subcommand)]
pub enum MaintenanceCommand {
    /// Log a maintenance event
    Add {
        /// Vehicle ID
        vehicle_id: String,

        #[command(flatten)]
        fields: MaintenanceFields,
    },

    /// Show maintenance history
    List {
        /// Vehicle ID
        vehicle_id: String,
    },

    /// Modify a maintenance entry
    Edit {
        /// Vehicle ID
        vehicle_id: String,

        /// Entry ID
        entry_id: String,

        #[command(flatten)]
        fields: MaintenanceFields,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fuel_add() {
        let cli = Cli::try_parse_from([
            "automate", "-f", "json", "fuel", "add", "v1", "-l", "40", "-p", "62.5", "-o", "12000",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Commands::Fuel(FuelCommand::Add { vehicle_id, fields }) => {
                assert_eq!(vehicle_id, "v1");
                assert_eq!(fields.liters.as_deref(), Some("40"));
                assert_eq!(fields.odometer.as_deref(), Some("12000"));
                assert!(fields.date.is_none());
            }
            _ => panic!("expected fuel add"),
        }
    }

    #[test]
    fn test_parse_maintenance_type_flag() {
        let cli = Cli::try_parse_from([
            "automate", "maintenance", "add", "v1", "--type", "Brakes", "-p", "200",
        ])
        .unwrap();
        match cli.command {
            Commands::Maintenance(MaintenanceCommand::Add { fields, .. }) => {
                assert_eq!(fields.kind.as_deref(), Some("Brakes"));
            }
            _ => panic!("expected maintenance add"),
        }
    }

    #[test]
    fn test_open_defaults_to_start_route() {
        let cli = Cli::try_parse_from(["automate", "open"]).unwrap();
        match cli.command {
            Commands::Open { route } => assert_eq!(route, "vehicles"),
            _ => panic!("expected open"),
        }
    }
}
