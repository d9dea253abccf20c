//! File-based vehicle repository implementation

use super::json_file::JsonListFile;
use crate::domain::{Vehicle, VehicleRepository};
use crate::error::{Error, Result};
use std::path::Path;

pub const VEHICLES_FILE: &str = "vehicles.json";

/// File-based implementation of VehicleRepository
///
/// Stores vehicles as a JSON array in `vehicles.json`.
pub struct FileVehicleRepository {
    file: JsonListFile<Vehicle>,
}

impl FileVehicleRepository {
    /// Open the repository inside `store_dir`
    pub fn open(store_dir: &Path) -> Result<Self> {
        Ok(Self {
            file: JsonListFile::open(store_dir, VEHICLES_FILE)?,
        })
    }
}

impl VehicleRepository for FileVehicleRepository {
    fn find_all(&self) -> std::result::Result<Vec<Vehicle>, Error> {
        self.file.load()
    }

    fn add(&self, vehicle: &Vehicle) -> std::result::Result<(), Error> {
        let mut vehicles = self.file.load()?;
        vehicles.push(vehicle.clone());
        self.file.save(&vehicles)
    }

    fn update(&self, vehicle: &Vehicle) -> std::result::Result<bool, Error> {
        let mut vehicles = self.file.load()?;
        match vehicles.iter_mut().find(|v| v.id == vehicle.id) {
            Some(slot) => {
                *slot = vehicle.clone();
                self.file.save(&vehicles)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, id: &str) -> std::result::Result<bool, Error> {
        let mut vehicles = self.file.load()?;
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);
        if vehicles.len() == before {
            return Ok(false);
        }
        self.file.save(&vehicles)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_add_find_update_delete() {
        let dir = tempdir().unwrap();
        let repo = FileVehicleRepository::open(dir.path()).unwrap();

        let mut vehicle = Vehicle::new("Mazda", "3", "TT-111AA");
        repo.add(&vehicle).unwrap();
        assert_eq!(repo.find_all().unwrap().len(), 1);

        vehicle.current_odometer = "2500".into();
        assert!(repo.update(&vehicle).unwrap());
        assert_eq!(repo.find_all().unwrap()[0].current_odometer, "2500");

        assert!(repo.delete(&vehicle.id).unwrap());
        assert!(!repo.delete(&vehicle.id).unwrap());
        assert!(repo.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_unknown_vehicle() {
        let dir = tempdir().unwrap();
        let repo = FileVehicleRepository::open(dir.path()).unwrap();
        assert!(!repo.update(&Vehicle::new("A", "B", "C")).unwrap());
    }

    #[test]
    fn test_two_handles_see_each_others_writes() {
        let dir = tempdir().unwrap();
        let first = FileVehicleRepository::open(dir.path()).unwrap();
        let second = FileVehicleRepository::open(dir.path()).unwrap();

        first.add(&Vehicle::new("Kia", "Ceed", "NR-1")).unwrap();
        second.add(&Vehicle::new("Kia", "Rio", "NR-2")).unwrap();
        assert_eq!(first.find_all().unwrap().len(), 2);
    }

    #[test]
    fn test_reads_file_written_by_older_version() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(VEHICLES_FILE),
            r#"[{"id":"1","brand":"Opel","model":"Astra","plate":"P-1"}]"#,
        )
        .unwrap();
        let repo = FileVehicleRepository::open(dir.path()).unwrap();
        let vehicles = repo.find_all().unwrap();
        assert_eq!(vehicles[0].current_odometer, "0");
    }
}
