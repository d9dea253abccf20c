//! Repository trait definitions for data persistence

use crate::domain::model::{FuelEntry, MaintenanceEntry, Vehicle};
use crate::error::Error;

/// Repository for vehicles
pub trait VehicleRepository {
    /// Load all vehicles in stored order
    fn find_all(&self) -> Result<Vec<Vehicle>, Error>;

    /// Append a vehicle
    fn add(&self, vehicle: &Vehicle) -> Result<(), Error>;

    /// Replace the vehicle with the same id. Returns false if none matched.
    fn update(&self, vehicle: &Vehicle) -> Result<bool, Error>;

    /// Delete a vehicle by id. Returns false if none matched.
    fn delete(&self, id: &str) -> Result<bool, Error>;
}

/// Repository for fuel entries
pub trait FuelRepository {
    fn find_all(&self) -> Result<Vec<FuelEntry>, Error>;

    /// Entries belonging to one vehicle
    fn find_by_vehicle(&self, vehicle_id: &str) -> Result<Vec<FuelEntry>, Error> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|e| e.vehicle_id == vehicle_id)
            .collect())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<FuelEntry>, Error> {
        Ok(self.find_all()?.into_iter().find(|e| e.id == id))
    }

    /// Append an entry, keeping its id
    fn add(&self, entry: &FuelEntry) -> Result<(), Error>;

    fn update(&self, entry: &FuelEntry) -> Result<bool, Error>;

    /// Delete every entry of a vehicle. Returns the number removed.
    fn delete_by_vehicle(&self, vehicle_id: &str) -> Result<usize, Error>;
}

/// Repository for maintenance entries
pub trait MaintenanceRepository {
    fn find_all(&self) -> Result<Vec<MaintenanceEntry>, Error>;

    fn find_by_vehicle(&self, vehicle_id: &str) -> Result<Vec<MaintenanceEntry>, Error> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|e| e.vehicle_id == vehicle_id)
            .collect())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<MaintenanceEntry>, Error> {
        Ok(self.find_all()?.into_iter().find(|e| e.id == id))
    }

    /// Append an entry under a freshly assigned id, which is returned
    fn add(&self, entry: &MaintenanceEntry) -> Result<String, Error>;

    fn update(&self, entry: &MaintenanceEntry) -> Result<bool, Error>;

    fn delete_by_vehicle(&self, vehicle_id: &str) -> Result<usize, Error>;
}
