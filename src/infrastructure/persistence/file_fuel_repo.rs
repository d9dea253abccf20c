//! File-based fuel entry repository

use super::json_file::JsonListFile;
use crate::domain::{FuelEntry, FuelRepository};
use crate::error::{Error, Result};
use std::path::Path;

pub const FUEL_FILE: &str = "fuel_entries.json";

pub struct FileFuelRepository {
    file: JsonListFile<FuelEntry>,
}

impl FileFuelRepository {
    pub fn open(store_dir: &Path) -> Result<Self> {
        Ok(Self {
            file: JsonListFile::open(store_dir, FUEL_FILE)?,
        })
    }
}

impl FuelRepository for FileFuelRepository {
    fn find_all(&self) -> std::result::Result<Vec<FuelEntry>, Error> {
        self.file.load()
    }

    fn add(&self, entry: &FuelEntry) -> std::result::Result<(), Error> {
        let mut entries = self.file.load()?;
        entries.push(entry.clone());
        self.file.save(&entries)
    }

    fn update(&self, entry: &FuelEntry) -> std::result::Result<bool, Error> {
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
