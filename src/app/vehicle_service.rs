//! Vehicle Service - observable vehicle state over the record files
//!
//! Holds the in-memory vehicle list, forwards every change to storage and
//! notifies subscribers with the new list. Fuel and maintenance writes go
//! through here so the vehicle odometer follows the readings logged
//! against it.

use crate::domain::service::{FuelForm, MaintenanceForm, VehicleForm};
use crate::domain::{
    FuelEntry, FuelRepository, MaintenanceEntry, MaintenanceRepository, Vehicle,
    VehicleRepository,
};
use crate::error::{Error, Result};
use crate::infrastructure::persistence::{
    FileFuelRepository, FileMaintenanceRepository, FileVehicleRepository,
};
use crate::types::parse_number;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// Callback invoked with the full vehicle list after each change
pub type Subscriber = Box<dyn Fn(&[Vehicle])>;

/// What a vehicle deletion removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovalSummary {
    pub fuel_entries: usize,
    pub maintenance_entries: usize,
}

pub struct VehicleService {
    vehicles: Vec<Vehicle>,
    vehicle_repo: Box<dyn VehicleRepository>,
    fuel_repo: Box<dyn FuelRepository>,
    maintenance_repo: Box<dyn MaintenanceRepository>,
    subscribers: Vec<Subscriber>,
}

impl VehicleService {
    /// Open the file repositories in `data_dir` and load the vehicle list
    pub fn open(data_dir: &Path) -> Result<Self> {
        Self::new(
            Box::new(FileVehicleRepository::open(data_dir)?),
            Box::new(FileFuelRepository::open(data_dir)?),
            Box::new(FileMaintenanceRepository::open(data_dir)?),
        )
    }

    pub fn new(
        vehicle_repo: Box<dyn VehicleRepository>,
        fuel_repo: Box<dyn FuelRepository>,
        maintenance_repo: Box<dyn MaintenanceRepository>,
    ) -> Result<Self> {
        let vehicles = vehicle_repo.find_all()?;
        Ok(Self {
            vehicles,
            vehicle_repo,
            fuel_repo,
            maintenance_repo,
            subscribers: Vec::new(),
        })
    }

    /// Register a callback for vehicle list changes
    pub fn subscribe(&mut self, subscriber: impl Fn(&[Vehicle]) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Re-read the vehicle list after a write and notify subscribers
    fn reload(&mut self) -> Result<()> {
        self.vehicles = self.vehicle_repo.find_all()?;
        for subscriber in &self.subscribers {
            subscriber(&self.vehicles);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Vehicles
    // ------------------------------------------------------------------

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn get_vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    fn require_vehicle(&self, id: &str) -> Result<Vehicle> {
        self.get_vehicle(id)
            .cloned()
            .ok_or_else(|| Error::VehicleNotFound(id.to_string()))
    }

    pub fn add_vehicle(&mut self, form: &VehicleForm) -> Result<Vehicle> {
        let vehicle = form.to_vehicle(&Uuid::new_v4().to_string())?;

        self.vehicle_repo.add(&vehicle)?;
        self.reload()?;

        info!(vehicle_id = %vehicle.id, plate = %vehicle.plate, "added vehicle");
        Ok(vehicle)
    }

    pub fn update_vehicle(&mut self, id: &str, form: &VehicleForm) -> Result<Vehicle> {
        self.require_vehicle(id)?;
        let vehicle = form.to_vehicle(id)?;
        self.store_vehicle(vehicle.clone())?;
        info!(vehicle_id = %id, "updated vehicle");
        Ok(vehicle)
    }

    fn store_vehicle(&mut self, vehicle: Vehicle) -> Result<()> {
        if !self.vehicle_repo.update(&vehicle)? {
            return Err(Error::VehicleNotFound(vehicle.id));
        }
        self.reload()
    }

    /// Delete a vehicle together with its fuel and maintenance entries
    pub fn remove_vehicle(&mut self, id: &str) -> Result<RemovalSummary> {
        if !self.vehicle_repo.delete(id)? {
            return Err(Error::VehicleNotFound(id.to_string()));
        }
        self.reload()?;

        let summary = RemovalSummary {
            fuel_entries: self.fuel_repo.delete_by_vehicle(id)?,
            maintenance_entries: self.maintenance_repo.delete_by_vehicle(id)?,
        };
        info!(
            vehicle_id = %id,
            fuel_entries = summary.fuel_entries,
            maintenance_entries = summary.maintenance_entries,
            "removed vehicle"
        );
        Ok(summary)
    }

    /// Raise the stored odometer if `odometer` is a higher reading.
    ///
    /// Returns whether the vehicle changed.
    pub fn update_odometer_if_higher(&mut self, vehicle_id: &str, odometer: &str) -> Result<bool> {
        let mut vehicle = self.require_vehicle(vehicle_id)?;
        let Some(reading) = parse_number(odometer) else {
            return Ok(false);
        };
        if reading <= vehicle.odometer() {
            return Ok(false);
        }

        vehicle.current_odometer = odometer.trim().to_string();
        self.store_vehicle(vehicle)?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Fuel
    // ------------------------------------------------------------------

    pub fn fuel_entries(&self, vehicle_id: &str) -> Result<Vec<FuelEntry>> {
        self.fuel_repo.find_by_vehicle(vehicle_id)
    }

    pub fn fuel_entry(&self, vehicle_id: &str, entry_id: &str) -> Result<FuelEntry> {
        self.fuel_repo
            .find_by_id(entry_id)?
            .filter(|e| e.vehicle_id == vehicle_id)
            .ok_or_else(|| Error::EntryNotFound(entry_id.to_string()))
    }

    /// Log a refuel. The reading must exceed the vehicle's odometer, which
    /// is then set to it.
    pub fn add_fuel_entry(&mut self, vehicle_id: &str, form: &FuelForm) -> Result<FuelEntry> {
        let mut vehicle = self.require_vehicle(vehicle_id)?;
        form.validate_new(vehicle.odometer())?;

        let mut entry = FuelEntry::new(vehicle_id, "", "", "", None, None);
        form.apply_to(&mut entry)?;
        self.fuel_repo.add(&entry)?;

        vehicle.current_odometer = form.odometer.trim().to_string();
        self.store_vehicle(vehicle)?;

        info!(vehicle_id = %vehicle_id, entry_id = %entry.id, "added fuel entry");
        Ok(entry)
    }

    pub fn update_fuel_entry(
        &mut self,
        vehicle_id: &str,
        entry_id: &str,
        form: &FuelForm,
    ) -> Result<FuelEntry> {
        let mut entry = self.fuel_entry(vehicle_id, entry_id)?;
        form.validate()?;
        form.apply_to(&mut entry)?;
        if !self.fuel_repo.update(&entry)? {
            return Err(Error::EntryNotFound(entry_id.to_string()));
        }
        self.update_odometer_if_higher(vehicle_id, &form.odometer)?;

        info!(vehicle_id = %vehicle_id, entry_id = %entry_id, "updated fuel entry");
        Ok(entry)
    }

    // ------------------------------------------------------------------
    // Maintenance
    // ------------------------------------------------------------------

    pub fn maintenance_entries(&self, vehicle_id: &str) -> Result<Vec<MaintenanceEntry>> {
        self.maintenance_repo.find_by_vehicle(vehicle_id)
    }

    pub fn maintenance_entry(&self, vehicle_id: &str, entry_id: &str) -> Result<MaintenanceEntry> {
        self.maintenance_repo
            .find_by_id(entry_id)?
            .filter(|e| e.vehicle_id == vehicle_id)
            .ok_or_else(|| Error::EntryNotFound(entry_id.to_string()))
    }

    pub fn add_maintenance_entry(
        &mut self,
        vehicle_id: &str,
        form: &MaintenanceForm,
    ) -> Result<MaintenanceEntry> {
        self.require_vehicle(vehicle_id)?;

        let mut entry = MaintenanceEntry::new(vehicle_id, "", "", "", "", None);
        form.apply_to(&mut entry)?;
        entry.id = self.maintenance_repo.add(&entry)?;
        self.update_odometer_if_higher(vehicle_id, &form.odometer)?;

        info!(vehicle_id = %vehicle_id, entry_id = %entry.id, "added maintenance entry");
        Ok(entry)
    }

    pub fn update_maintenance_entry(
        &mut self,
        vehicle_id: &str,
        entry_id: &str,
        form: &MaintenanceForm,
    ) -> Result<MaintenanceEntry> {
        let mut entry = self.maintenance_entry(vehicle_id, entry_id)?;
        form.apply_to(&mut entry)?;
        if !self.maintenance_repo.update(&entry)? {
            return Err(Error::EntryNotFound(entry_id.to_string()));
        }
        self.update_odometer_if_higher(vehicle_id, &form.odometer)?;

        info!(vehicle_id = %vehicle_id, entry_id = %entry_id, "updated maintenance entry");
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::{tempdir, TempDir};

    fn service() -> (TempDir, VehicleService) {
        let dir = tempdir().unwrap();
        let service = VehicleService::open(dir.path()).unwrap();
        (dir, service)
    }

    fn vehicle_form(odometer: &str) -> VehicleForm {
        VehicleForm {
            brand: "Honda".into(),
            model: "Civic".into(),
            plate: "PO-555CC".into(),
            odometer: odometer.into(),
            ..Default::default()
        }
    }

    fn fuel_form(date: &str, odometer: &str) -> FuelForm {
        FuelForm {
            date: date.into(),
            liters: "40".into(),
            price: "64".into(),
            odometer: odometer.into(),
            note: None,
        }
    }

    fn maintenance_form(odometer: &str) -> MaintenanceForm {
        MaintenanceForm {
            kind: "Oil change".into(),
            date: "10.02.2024".into(),
            price: "90".into(),
            odometer: odometer.into(),
            note: None,
        }
    }

    #[test]
    fn test_vehicles_survive_reopen() {
        let (dir, mut service) = service();
        let vehicle = service.add_vehicle(&vehicle_form("1000")).unwrap();

        let reopened = VehicleService::open(dir.path()).unwrap();
        assert_eq!(reopened.vehicles(), &[vehicle]);
    }

    #[test]
    fn test_subscribers_see_each_change() {
        let (_dir, mut service) = service();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        service.subscribe(move |vehicles| sink.borrow_mut().push(vehicles.len()));

        let vehicle = service.add_vehicle(&vehicle_form("0")).unwrap();
        service.add_vehicle(&vehicle_form("0")).unwrap();
        service.remove_vehicle(&vehicle.id).unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn test_add_vehicle_rejects_invalid_form() {
        let (_dir, mut service) = service();
        let mut form = vehicle_form("0");
        form.brand.clear();
        let err = service.add_vehicle(&form).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::Blank("Brand"))));
        assert!(service.vehicles().is_empty());
    }

    #[test]
    fn test_update_vehicle_keeps_id() {
        let (_dir, mut service) = service();
        let vehicle = service.add_vehicle(&vehicle_form("0")).unwrap();
        let mut form = VehicleForm::from_vehicle(&vehicle);
        form.plate = "NEW-1".into();

        let updated = service.update_vehicle(&vehicle.id, &form).unwrap();
        assert_eq!(updated.id, vehicle.id);
        assert_eq!(service.get_vehicle(&vehicle.id).unwrap().plate, "NEW-1");
        assert!(matches!(
            service.update_vehicle("missing", &form),
            Err(Error::VehicleNotFound(_))
        ));
    }

    #[test]
    fn test_add_fuel_sets_vehicle_odometer() {
        let (_dir, mut service) = service();
        let vehicle = service.add_vehicle(&vehicle_form("1000")).unwrap();

        service
            .add_fuel_entry(&vehicle.id, &fuel_form("01.03.2024", "1450"))
            .unwrap();
        assert_eq!(service.get_vehicle(&vehicle.id).unwrap().current_odometer, "1450");

        let err = service
            .add_fuel_entry(&vehicle.id, &fuel_form("02.03.2024", "1400"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::OdometerNotIncreasing { .. })
        ));
        assert_eq!(service.fuel_entries(&vehicle.id).unwrap().len(), 1);
    }

    #[test]
    fn test_add_fuel_unknown_vehicle() {
        let (_dir, mut service) = service();
        let err = service
            .add_fuel_entry("ghost", &fuel_form("01.03.2024", "10"))
            .unwrap_err();
        assert!(matches!(err, Error::VehicleNotFound(_)));
    }

    #[test]
    fn test_update_fuel_only_raises_odometer() {
        let (_dir, mut service) = service();
        let vehicle = service.add_vehicle(&vehicle_form("1000")).unwrap();
        let first = service
            .add_fuel_entry(&vehicle.id, &fuel_form("01.03.2024", "1200"))
            .unwrap();
        service
            .add_fuel_entry(&vehicle.id, &fuel_form("15.03.2024", "1600"))
            .unwrap();

        // Correcting an older reading leaves the vehicle at its latest one
        let updated = service
            .update_fuel_entry(&vehicle.id, &first.id, &fuel_form("01.03.2024", "1250"))
            .unwrap();
        assert_eq!(updated.odometer.as_deref(), Some("1250"));
        assert_eq!(service.get_vehicle(&vehicle.id).unwrap().current_odometer, "1600");

        service
            .update_fuel_entry(&vehicle.id, &first.id, &fuel_form("01.03.2024", "1700"))
            .unwrap();
        assert_eq!(service.get_vehicle(&vehicle.id).unwrap().current_odometer, "1700");
    }

    #[test]
    fn test_update_fuel_entry_of_other_vehicle_is_not_found() {
        let (_dir, mut service) = service();
        let a = service.add_vehicle(&vehicle_form("0")).unwrap();
        let b = service.add_vehicle(&vehicle_form("0")).unwrap();
        let entry = service
            .add_fuel_entry(&a.id, &fuel_form("01.03.2024", "100"))
            .unwrap();

        let err = service
            .update_fuel_entry(&b.id, &entry.id, &fuel_form("01.03.2024", "150"))
            .unwrap_err();
        assert!(matches!(err, Error::EntryNotFound(_)));
    }

    #[test]
    fn test_maintenance_raises_odometer_if_higher() {
        let (_dir, mut service) = service();
        let vehicle = service.add_vehicle(&vehicle_form("5000")).unwrap();

        service
            .add_maintenance_entry(&vehicle.id, &maintenance_form("4000"))
            .unwrap();
        assert_eq!(service.get_vehicle(&vehicle.id).unwrap().current_odometer, "5000");

        let entry = service
            .add_maintenance_entry(&vehicle.id, &maintenance_form("6000"))
            .unwrap();
        assert_eq!(service.get_vehicle(&vehicle.id).unwrap().current_odometer, "6000");

        let stored = service.maintenance_entry(&vehicle.id, &entry.id).unwrap();
        assert_eq!(stored, entry);

        let mut form = maintenance_form("6500");
        form.kind = "Oil + filter".into();
        let updated = service
            .update_maintenance_entry(&vehicle.id, &entry.id, &form)
            .unwrap();
        assert_eq!(updated.kind, "Oil + filter");
        assert_eq!(service.get_vehicle(&vehicle.id).unwrap().current_odometer, "6500");
    }

    #[test]
    fn test_maintenance_blank_odometer_leaves_vehicle() {
        let (_dir, mut service) = service();
        let vehicle = service.add_vehicle(&vehicle_form("5000")).unwrap();
        service
            .add_maintenance_entry(&vehicle.id, &maintenance_form(""))
            .unwrap();
        assert_eq!(service.get_vehicle(&vehicle.id).unwrap().current_odometer, "5000");
    }

    #[test]
    fn test_remove_vehicle_cascades() {
        let (_dir, mut service) = service();
        let keep = service.add_vehicle(&vehicle_form("0")).unwrap();
        let gone = service.add_vehicle(&vehicle_form("0")).unwrap();

        service.add_fuel_entry(&keep.id, &fuel_form("01.01.2024", "10")).unwrap();
        service.add_fuel_entry(&gone.id, &fuel_form("01.01.2024", "10")).unwrap();
        service.add_fuel_entry(&gone.id, &fuel_form("02.01.2024", "20")).unwrap();
        service.add_maintenance_entry(&gone.id, &maintenance_form("30")).unwrap();

        let summary = service.remove_vehicle(&gone.id).unwrap();
        assert_eq!(
            summary,
            RemovalSummary {
                fuel_entries: 2,
                maintenance_entries: 1
            }
        );
        assert!(service.get_vehicle(&gone.id).is_none());
        assert!(service.fuel_entries(&gone.id).unwrap().is_empty());
        assert_eq!(service.fuel_entries(&keep.id).unwrap().len(), 1);
        assert!(matches!(
            service.remove_vehicle(&gone.id),
            Err(Error::VehicleNotFound(_))
        ));
    }

    #[test]
    fn test_decimal_fuel_reading_keeps_vehicle_editable() {
        let (_dir, mut service) = service();
        let vehicle = service.add_vehicle(&vehicle_form("1000")).unwrap();
        service
            .add_fuel_entry(&vehicle.id, &fuel_form("01.03.2024", "1450.5"))
            .unwrap();

        let current = service.get_vehicle(&vehicle.id).unwrap().clone();
        assert_eq!(current.current_odometer, "1450.5");

        let mut form = VehicleForm::from_vehicle(&current);
        form.plate = "PO-777DD".into();
        let updated = service.update_vehicle(&vehicle.id, &form).unwrap();
        assert_eq!(updated.plate, "PO-777DD");
        assert_eq!(updated.current_odometer, "1450.5");
    }

    /// Finds its one entry but never manages to write it back
    struct VanishingFuelRepository {
        entry: FuelEntry,
    }

    impl FuelRepository for VanishingFuelRepository {
        fn find_all(&self) -> Result<Vec<FuelEntry>> {
            Ok(vec![self.entry.clone()])
        }

        fn add(&self, _entry: &FuelEntry) -> Result<()> {
            Ok(())
        }

        fn update(&self, _entry: &FuelEntry) -> Result<bool> {
            Ok(false)
        }

        fn delete_by_vehicle(&self, _vehicle_id: &str) -> Result<usize> {
            Ok(0)
        }
    }

    #[test]
    fn test_update_fuel_reports_entry_lost_on_write() {
        let dir = tempdir().unwrap();
        let vehicles = FileVehicleRepository::open(dir.path()).unwrap();
        let vehicle = vehicle_form("100").to_vehicle("v1").unwrap();
        vehicles.add(&vehicle).unwrap();

        let entry = FuelEntry::new("v1", "01.03.2024", "40", "64", Some("150".into()), None);
        let mut service = VehicleService::new(
            Box::new(vehicles),
            Box::new(VanishingFuelRepository {
                entry: entry.clone(),
            }),
            Box::new(FileMaintenanceRepository::open(dir.path()).unwrap()),
        )
        .unwrap();

        let err = service
            .update_fuel_entry("v1", &entry.id, &fuel_form("01.03.2024", "160"))
            .unwrap_err();
        assert!(matches!(err, Error::EntryNotFound(id) if id == entry.id));
        assert_eq!(service.get_vehicle("v1").unwrap().current_odometer, "100");
    }

    #[test]
    fn test_update_odometer_ignores_unparseable_reading() {
        let (_dir, mut service) = service();
        let vehicle = service.add_vehicle(&vehicle_form("100")).unwrap();
        assert!(!service.update_odometer_if_higher(&vehicle.id, "lots").unwrap());
        assert!(service.update_odometer_if_higher(&vehicle.id, "101").unwrap());
    }
}
