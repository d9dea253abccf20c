use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{lenient_unit, null_to_default, number_or_zero, DistanceUnit};

fn default_odometer() -> String {
    "0".to_string()
}

/// A user-tracked vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Unique identifier (UUID v4)
    pub id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub brand: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub model: String,
    /// License plate
    #[serde(default, deserialize_with = "null_to_default")]
    pub plate: String,
    /// Vehicle identification number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    /// Last known odometer reading, stored as text
    #[serde(default = "default_odometer", alias = "mileage")]
    pub current_odometer: String,
    #[serde(
        default,
        deserialize_with = "lenient_unit",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit: Option<DistanceUnit>,
    /// First registration date (dd.MM.yyyy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    /// Path to a stored image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Vehicle {
    /// Create a vehicle with a freshly generated id
    pub fn new(brand: impl Into<String>, model: impl Into<String>, plate: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            brand: brand.into(),
            model: model.into(),
            plate: plate.into(),
            vin: None,
            current_odometer: default_odometer(),
            unit: None,
            registration_date: None,
            image: None,
        }
    }

    /// Odometer as a number; unparseable readings count as zero
    pub fn odometer(&self) -> f64 {
        number_or_zero(&self.current_odometer)
    }

    pub fn unit_or_default(&self) -> DistanceUnit {
        self.unit.unwrap_or_default()
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model).trim().to_string()
    }
}
