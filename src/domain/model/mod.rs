//! Domain model types

pub mod fuel_entry;
pub mod maintenance_entry;
pub mod vehicle;

pub use fuel_entry::FuelEntry;
pub use maintenance_entry::MaintenanceEntry;
pub use vehicle::Vehicle;
