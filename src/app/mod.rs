//! Application Layer
//!
//! Orchestrates between the CLI and the domain/infrastructure layers.
//!
//! The app layer contains:
//! - `vehicle_service`: observable vehicle state and all record mutations
//! - `routes`: navigation routes mapping to screens

pub mod routes;
pub mod vehicle_service;

pub use routes::Route;
pub use vehicle_service::{RemovalSummary, VehicleService};
