//! Fuel consumption statistics
//!
//! Two views over a vehicle's fuel entries:
//! - [`fuel_history`]: newest-first list with the distance driven since the
//!   previous refuel, price per liter and per-entry consumption
//! - [`fuel_summary`]: averages over the whole log
//!
//! Every division by zero yields zero.

use serde::Serialize;

use super::{sort_newest_first, sort_oldest_first};
use crate::domain::model::FuelEntry;

/// A fuel entry with its derived metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelHistoryItem {
    pub entry: FuelEntry,
    /// Odometer delta to the chronologically previous entry
    pub distance: f64,
    pub price_per_liter: f64,
    /// Liters per 100 distance units, only when `distance > 0`
    pub consumption: Option<f64>,
}

/// Aggregate metrics over all fuel entries of a vehicle
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FuelSummary {
    pub entry_count: usize,
    pub total_distance: f64,
    pub total_liters: f64,
    pub total_price: f64,
    /// Liters per 100 distance units
    pub avg_consumption: f64,
    pub avg_price_per_liter: f64,
    /// Average spend per refuel
    pub avg_expenditure: f64,
    /// Average liters per refuel
    pub avg_volume: f64,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Newest-first fuel history with per-entry metrics
pub fn fuel_history(entries: &[FuelEntry]) -> Vec<FuelHistoryItem> {
    let sorted = sort_newest_first(entries);

    sorted
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let distance = match (entry.odometer_value(), sorted.get(index + 1)) {
                (Some(current), Some(previous)) => {
                    current - previous.odometer_value().unwrap_or(current)
                }
                _ => 0.0,
            };

            let liters = entry.liters_value().unwrap_or(0.0);
            let price = entry.price_value().unwrap_or(0.0);
            let consumption = (distance > 0.0).then(|| liters / distance * 100.0);

            FuelHistoryItem {
                entry: (*entry).clone(),
                distance,
                price_per_liter: ratio(price, liters),
                consumption,
            }
        })
        .collect()
}

/// Aggregate statistics. `None` when there are no entries.
pub fn fuel_summary(entries: &[FuelEntry]) -> Option<FuelSummary> {
    if entries.is_empty() {
        return None;
    }

    let sorted = sort_oldest_first(entries);

    let total_distance: f64 = sorted
        .windows(2)
        .map(|pair| {
            pair[1].odometer_value().unwrap_or(0.0) - pair[0].odometer_value().unwrap_or(0.0)
        })
        .filter(|delta| *delta > 0.0)
        .sum();

    let total_liters: f64 = sorted.iter().map(|e| e.liters_value().unwrap_or(0.0)).sum();
    let total_price: f64 = sorted.iter().map(|e| e.price_value().unwrap_or(0.0)).sum();
    let count = entries.len() as f64;

    Some(FuelSummary {
        entry_count: entries.len(),
        total_distance,
        total_liters,
        total_price,
        avg_consumption: ratio(total_liters, total_distance) * 100.0,
        avg_price_per_liter: ratio(total_price, total_liters),
        avg_expenditure: ratio(total_price, count),
        avg_volume: ratio(total_liters, count),
    })
}
