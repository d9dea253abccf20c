//! JSON file repositories, one file per record kind

pub mod file_fuel_repo;
pub mod file_maintenance_repo;
pub mod file_vehicle_repo;
pub mod json_file;

pub use file_fuel_repo::FileFuelRepository;
pub use file_maintenance_repo::FileMaintenanceRepository;
pub use file_vehicle_repo::FileVehicleRepository;
pub use json_file::JsonListFile;
