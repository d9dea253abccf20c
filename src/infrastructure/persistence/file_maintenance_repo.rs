//! File-based maintenance entry repository

use super::json_file::JsonListFile;
use crate::domain::{MaintenanceEntry, MaintenanceRepository};
use crate::error::{Error, Result};
use std::path::Path;
use uuid::Uuid;

pub const MAINTENANCE_FILE: &str = "maintenance_entries.json";

pub struct FileMaintenanceRepository {
    file: JsonListFile<MaintenanceEntry>,
}

impl FileMaintenanceRepository {
    pub fn open(store_dir: &Path) -> Result<Self> {
        Ok(Self {
            file: JsonListFile::open(store_dir, MAINTENANCE_FILE)?,
        })
    }
}

impl MaintenanceRepository for FileMaintenanceRepository {
    fn find_all(&self) -> std::result::Result<Vec<MaintenanceEntry>, Error> {
        self.file.load()
    }

    fn add(&self, entry: &MaintenanceEntry) -> std::result::Result<String, Error> {
        let mut entries = self.file.load()?;
        let id = Uuid::new_v4().to_string();
        entries.push(MaintenanceEntry {
            id: id.clone(),
            ..entry.clone()
        });
        self.file.save(&entries)?;
        Ok(id)
    }

    fn update(&self, entry: &MaintenanceEntry) -> std::result::Result<bool, Error> {
        let mut entries = self.file.load()?;
        match entries.iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => {
                *slot = entry.clone();
                self.file.save(&entries)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_by_vehicle(&self, vehicle_id: &str) -> std::result::Result<usize, Error> {
        let mut entries = self.file.load()?;
        let before = entries.len();
        entries.retain(|e| e.vehicle_id != vehicle_id);
        let removed = before - entries.len();
        self.file.save(&entries)?;
        Ok(removed)
    }
}
