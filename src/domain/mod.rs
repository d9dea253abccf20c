//! Domain module containing record types, repository traits and services

pub mod model;
pub mod repository;
pub mod service;

pub use model::*;
pub use repository::{FuelRepository, MaintenanceRepository, VehicleRepository};
