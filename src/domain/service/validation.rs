//! Form validation for vehicles, fuel and maintenance entries
//!
//! Forms carry raw text as typed by the user. Validation decides whether the
//! save may proceed; stored values keep the user's text, trimmed.

use crate::domain::model::{FuelEntry, MaintenanceEntry, Vehicle};
use crate::error::ValidationError;
use crate::types::{format_date, non_blank, parse_date, parse_number, DistanceUnit};

/// Input for adding or editing a vehicle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleForm {
    pub brand: String,
    pub model: String,
    pub plate: String,
    pub vin: Option<String>,
    /// Odometer reading, a non-negative number. Blank means zero.
    pub odometer: String,
    pub unit: Option<DistanceUnit>,
    pub registration_date: Option<String>,
    pub image: Option<String>,
}

impl VehicleForm {
    /// Prefill a form from a stored vehicle
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            plate: vehicle.plate.clone(),
            vin: vehicle.vin.clone(),
            odometer: vehicle.current_odometer.clone(),
            unit: vehicle.unit,
            registration_date: vehicle.registration_date.clone(),
            image: vehicle.image.clone(),
        }
    }

    /// Validate and build a vehicle with the given id
    pub fn to_vehicle(&self, id: &str) -> Result<Vehicle, ValidationError> {
        let brand = required("Brand", &self.brand)?;
        let model = required("Model", &self.model)?;
        let plate = required("License plate", &self.plate)?;

        let odometer = self.odometer.trim();
        non_negative("Odometer", odometer)?;

        let registration_date = match non_blank(self.registration_date.clone()) {
            Some(date) => Some(validate_date(&date)?),
            None => None,
        };

        Ok(Vehicle {
            id: id.to_string(),
            brand,
            model,
            plate,
            vin: non_blank(self.vin.clone()),
            current_odometer: if odometer.is_empty() {
                "0".to_string()
            } else {
                odometer.to_string()
            },
            unit: self.unit,
            registration_date,
            image: non_blank(self.image.clone()),
        })
    }
}

/// Input for adding or editing a fuel entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuelForm {
    pub date: String,
    pub liters: String,
    pub price: String,
    pub odometer: String,
    pub note: Option<String>,
}

impl FuelForm {
    pub fn from_entry(entry: &FuelEntry) -> Self {
        Self {
            date: entry.date.clone(),
            liters: entry.liters.clone(),
            price: entry.price.clone(),
            odometer: entry.odometer.clone().unwrap_or_default(),
            note: entry.note.clone(),
        }
    }

    /// Validate against the vehicle's last known odometer. Used when adding.
    ///
    /// Returns the parsed odometer reading.
    pub fn validate_new(&self, previous_odometer: f64) -> Result<f64, ValidationError> {
        let odometer = self.validate()?;
        if odometer <= previous_odometer {
            return Err(ValidationError::OdometerNotIncreasing {
                new: odometer,
                previous: previous_odometer,
            });
        }
        Ok(odometer)
    }

    /// Validate the fields on their own. Used when modifying.
    ///
    /// Returns the parsed odometer reading.
    pub fn validate(&self) -> Result<f64, ValidationError> {
        validate_date(&self.date)?;
        positive("Liters", &self.liters)?;
        positive("Price", &self.price)?;
        positive("Odometer", &self.odometer)
    }

    /// Copy the form fields onto an entry, normalising the date
    pub fn apply_to(&self, entry: &mut FuelEntry) -> Result<(), ValidationError> {
        entry.date = validate_date(&self.date)?;
        entry.liters = self.liters.trim().to_string();
        entry.price = self.price.trim().to_string();
        entry.odometer = non_blank(Some(self.odometer.clone()));
        entry.note = non_blank(self.note.clone());
        Ok(())
    }
}

/// Input for adding or editing a maintenance entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceForm {
    pub kind: String,
    pub date: String,
    /// Blank is allowed
    pub price: String,
    /// Blank is allowed
    pub odometer: String,
    pub note: Option<String>,
}

impl MaintenanceForm {
    pub fn from_entry(entry: &MaintenanceEntry) -> Self {
        Self {
            kind: entry.kind.clone(),
            date: entry.date.clone(),
            price: entry.price.clone(),
            odometer: entry.odometer.clone(),
            note: entry.note.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        required("Maintenance type", &self.kind)?;
        validate_date(&self.date)?;
        non_negative("Price", &self.price)?;
        non_negative("Odometer", &self.odometer)?;
        Ok(())
    }

    pub fn apply_to(&self, entry: &mut MaintenanceEntry) -> Result<(), ValidationError> {
        self.validate()?;
        entry.kind = self.kind.trim().to_string();
        entry.date = validate_date(&self.date)?;
        entry.price = self.price.trim().to_string();
        entry.odometer = self.odometer.trim().to_string();
        entry.note = non_blank(self.note.clone());
        Ok(())
    }
}

/// Check a dd.MM.yyyy date and return it in canonical form
pub fn validate_date(value: &str) -> Result<String, ValidationError> {
    parse_date(value)
        .map(format_date)
        .ok_or_else(|| ValidationError::InvalidDate(value.trim().to_string()))
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Blank(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn positive(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    parse_number(value)
        .filter(|v| *v > 0.0)
        .ok_or_else(|| ValidationError::NotPositive {
            field,
            value: value.trim().to_string(),
        })
}

fn non_negative(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    match parse_number(value) {
        Some(v) if v >= 0.0 => Ok(()),
        _ => Err(ValidationError::Negative {
            field,
            value: value.trim().to_string(),
        }),
    }
}
