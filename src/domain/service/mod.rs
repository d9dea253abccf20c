//! Domain services
//!
//! This module contains business logic services for the domain layer.

pub mod fuel_stats;
pub mod maintenance_stats;
pub mod validation;

use std::cmp::Reverse;

use chrono::NaiveDate;

use crate::domain::model::{FuelEntry, MaintenanceEntry};
use crate::types::parse_date;

pub use fuel_stats::{fuel_history, fuel_summary, FuelHistoryItem, FuelSummary};
pub use maintenance_stats::{maintenance_history, maintenance_summary, MaintenanceSummary};
pub use validation::{FuelForm, MaintenanceForm, VehicleForm};

/// Records carrying a display-formatted date
pub trait Dated {
    fn date_text(&self) -> &str;

    /// Parsed date; entries with an unreadable date sort before all others
    fn date_key(&self) -> Option<NaiveDate> {
        parse_date(self.date_text())
    }
}

impl Dated for FuelEntry {
    fn date_text(&self) -> &str {
        &self.date
    }
}

impl Dated for MaintenanceEntry {
    fn date_text(&self) -> &str {
        &self.date
    }
}

/// Chronological order, ties keep stored order
pub(crate) fn sort_oldest_first<T: Dated>(items: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_cached_key(|item| item.date_key());
    sorted
}

/// Reverse chronological order, ties keep stored order
pub(crate) fn sort_newest_first<T: Dated>(items: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_cached_key(|item| Reverse(item.date_key()));
    sorted
}
