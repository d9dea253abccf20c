use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{null_to_default, parse_number};

/// A single service or repair record tied to a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceEntry {
    pub id: String,
    pub vehicle_id: String,
    /// Type or name of the service (oil change, tyres, ...)
    #[serde(rename = "type", default, deserialize_with = "null_to_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub price: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub odometer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MaintenanceEntry {
    pub fn new(
        vehicle_id: impl Into<String>,
        kind: impl Into<String>,
        date: impl Into<String>,
        price: impl Into<String>,
        odometer: impl Into<String>,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            vehicle_id: vehicle_id.into(),
            kind: kind.into(),
            date: date.into(),
            price: price.into(),
            odometer: odometer.into(),
            note,
        }
    }

    pub fn price_value(&self) -> Option<f64> {
        parse_number(&self.price)
    }

    pub fn odometer_value(&self) -> Option<f64> {
        parse_number(&self.odometer)
    }
}
