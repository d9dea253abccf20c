use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{null_to_default, parse_number};

/// A single refueling record tied to a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelEntry {
    pub id: String,
    pub vehicle_id: String,
    /// Refuel date (dd.MM.yyyy)
    #[serde(default, deserialize_with = "null_to_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub liters: String,
    /// Total price paid
    #[serde(default, deserialize_with = "null_to_default")]
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odometer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl FuelEntry {
    pub fn new(
        vehicle_id: impl Into<String>,
        date: impl Into<String>,
        liters: impl Into<String>,
        price: impl Into<String>,
        odometer: Option<String>,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            vehicle_id: vehicle_id.into(),
            date: date.into(),
            liters: liters.into(),
            price: price.into(),
            odometer,
            note,
        }
    }

    pub fn liters_value(&self) -> Option<f64> {
        parse_number(&self.liters)
    }

    pub fn price_value(&self) -> Option<f64> {
        parse_number(&self.price)
    }

    pub fn odometer_value(&self) -> Option<f64> {
        self.odometer.as_deref().and_then(parse_number)
    }
}
