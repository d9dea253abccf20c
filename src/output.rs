//! Output formatting module
//!
//! Each screen renders to a `String` in table or JSON form; the command
//! layer prints it.

use crate::cli::OutputFormat;
use crate::domain::service::{FuelHistoryItem, FuelSummary, MaintenanceSummary};
use crate::domain::{MaintenanceEntry, Vehicle};
use crate::error::Result;
use serde::Serialize;
use std::fmt::Write;

/// Display settings shared by the screens
#[derive(Debug, Clone)]
pub struct Screen {
    pub format: OutputFormat,
    pub currency: String,
}

impl Screen {
    pub fn new(format: OutputFormat, currency: impl Into<String>) -> Self {
        Self {
            format,
            currency: currency.into(),
        }
    }

    fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    pub fn vehicle_list(&self, vehicles: &[Vehicle]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Self::json(vehicles);
        }

        let mut out = String::new();
        let _ = writeln!(out, "\nVehicles");
        let _ = writeln!(out, "========");
        if vehicles.is_empty() {
            let _ = writeln!(out, "No vehicles yet. Add one with `automate vehicle add`.");
            return Ok(out);
        }

        let _ = writeln!(
            out,
            "{:<36}  {:<24} {:<12} {:>12}",
            "ID", "Vehicle", "Plate", "Odometer"
        );
        for v in vehicles {
            let _ = writeln!(
                out,
                "{:<36}  {:<24} {:<12} {:>9} {}",
                v.id,
                truncate(&v.display_name(), 24),
                truncate(&v.plate, 12),
                v.current_odometer,
                v.unit_or_default()
            );
        }
        Ok(out)
    }

    pub fn vehicle_detail(
        &self,
        vehicle: &Vehicle,
        fuel: Option<&FuelSummary>,
        maintenance: &MaintenanceSummary,
    ) -> Result<String> {
        if self.format == OutputFormat::Json {
            #[derive(Serialize)]
            struct Detail<'a> {
                vehicle: &'a Vehicle,
                fuel: Option<&'a FuelSummary>,
                maintenance: &'a MaintenanceSummary,
            }
            return Self::json(&Detail {
                vehicle,
                fuel,
                maintenance,
            });
        }

        let unit = vehicle.unit_or_default();
        let mut out = String::new();
        let _ = writeln!(out, "\n{}", vehicle.display_name());
        let _ = writeln!(out, "{}", "=".repeat(vehicle.display_name().chars().count().max(1)));
        let _ = writeln!(out, "ID:              {}", vehicle.id);
        let _ = writeln!(out, "License plate:   {}", vehicle.plate);
        let _ = writeln!(out, "VIN:             {}", vehicle.vin.as_deref().unwrap_or("-"));
        let _ = writeln!(out, "Odometer:        {} {}", vehicle.current_odometer, unit);
        let _ = writeln!(
            out,
            "Registered:      {}",
            vehicle.registration_date.as_deref().unwrap_or("-")
        );
        if let Some(ref image) = vehicle.image {
            let _ = writeln!(out, "Image:           {}", image);
        }

        let _ = writeln!(out, "\n--- Fuel ---");
        match fuel {
            Some(summary) => {
                let _ = writeln!(out, "Refuels:         {}", summary.entry_count);
                let _ = writeln!(
                    out,
                    "Avg. consumption {:.1} L/100{}",
                    summary.avg_consumption, unit
                );
                let _ = writeln!(
                    out,
                    "Total spent:     {:.2} {}",
                    summary.total_price, self.currency
                );
            }
            None => {
                let _ = writeln!(out, "No fuel entries");
            }
        }

        let _ = writeln!(out, "\n--- Maintenance ---");
        let _ = writeln!(out, "Services:        {}", maintenance.entry_count);
        let _ = writeln!(
            out,
            "Total spent:     {:.2} {}",
            maintenance.total_cost, self.currency
        );
        if let Some(ref last) = maintenance.last_service {
            let _ = writeln!(out, "Last service:    {} ({})", last.kind, last.date);
        }
        Ok(out)
    }

    /// Overall card for a vehicle's fuel log
    pub fn fuel_summary(&self, vehicle: &Vehicle, summary: Option<&FuelSummary>) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Self::json(&summary);
        }

        let mut out = String::new();
        let _ = writeln!(out, "\nOverall");
        let _ = writeln!(out, "=======");
        match summary {
            Some(s) => {
                let unit = vehicle.unit_or_default();
                let _ = writeln!(out, "Avg. fuel consumption  {:.1} L/100{}", s.avg_consumption, unit);
                let _ = writeln!(
                    out,
                    "Avg. fuel price        {:.3} {}/L",
                    s.avg_price_per_liter, self.currency
                );
                let _ = writeln!(
                    out,
                    "Avg. expenditure       {:.0} {}",
                    s.avg_expenditure, self.currency
                );
                let _ = writeln!(out, "Avg. volume            {:.2} L", s.avg_volume);
                let _ = writeln!(out, "Distance tracked       {:.0} {}", s.total_distance, unit);
            }
            None => {
                let _ = writeln!(out, "No fuel entries");
            }
        }
        Ok(out)
    }

    /// Fuel overview: overall card followed by the history
    pub fn fuel_overview(
        &self,
        vehicle: &Vehicle,
        history: &[FuelHistoryItem],
        summary: Option<&FuelSummary>,
    ) -> Result<String> {
        if self.format == OutputFormat::Json {
            #[derive(Serialize)]
            struct Overview<'a> {
                vehicle_id: &'a str,
                summary: Option<&'a FuelSummary>,
                history: &'a [FuelHistoryItem],
            }
            return Self::json(&Overview {
                vehicle_id: &vehicle.id,
                summary,
                history,
            });
        }

        let unit = vehicle.unit_or_default();
        let mut out = format!("\nFuel Overview - {}\n", vehicle.display_name());
        out.push_str(&self.fuel_summary(vehicle, summary)?);

        let _ = writeln!(out, "\nHistory");
        let _ = writeln!(out, "-------");
        for item in history {
            let entry = &item.entry;
            let odometer = entry
                .odometer
                .as_deref()
                .map(|o| format!("{o} {unit}"))
                .unwrap_or_default();
            let consumption = item
                .consumption
                .map(|c| format!("{c:.1} L/100{unit}"))
                .unwrap_or_default();

            let _ = writeln!(
                out,
                "{:<10}  {:>14}  {:+.0} {}  {}",
                entry.date, odometer, item.distance, unit, consumption
            );
            let _ = writeln!(
                out,
                "            {} {}  {:.2} {}/L  {} L",
                entry.price, self.currency, item.price_per_liter, self.currency, entry.liters
            );
            if let Some(ref note) = entry.note {
                let _ = writeln!(out, "            {}", note);
            }
            let _ = writeln!(out, "            id: {}", entry.id);
        }
        Ok(out)
    }

    pub fn maintenance_overview(
        &self,
        vehicle: &Vehicle,
        history: &[MaintenanceEntry],
        summary: &MaintenanceSummary,
    ) -> Result<String> {
        if self.format == OutputFormat::Json {
            #[derive(Serialize)]
            struct Overview<'a> {
                vehicle_id: &'a str,
                total_cost: f64,
                history: &'a [MaintenanceEntry],
            }
            return Self::json(&Overview {
                vehicle_id: &vehicle.id,
                total_cost: summary.total_cost,
                history,
            });
        }

        let unit = vehicle.unit_or_default();
        let mut out = String::new();
        let _ = writeln!(out, "\nMaintenance - {}", vehicle.display_name());
        let _ = writeln!(out, "==============");
        if history.is_empty() {
            let _ = writeln!(out, "No maintenance entries");
            return Ok(out);
        }

        for entry in history {
            let _ = writeln!(out, "{:<10}  {}", entry.date, entry.kind);
            let odometer = if entry.odometer.is_empty() {
                String::new()
            } else {
                format!("{} {}", entry.odometer, unit)
            };
            let price = if entry.price.is_empty() {
                String::new()
            } else {
                format!("{} {}", entry.price, self.currency)
            };
            let _ = writeln!(out, "            {:<16} {}", odometer, price);
            if let Some(ref note) = entry.note {
                let _ = writeln!(out, "            {}", note);
            }
            let _ = writeln!(out, "            id: {}", entry.id);
        }
        let _ = writeln!(
            out,
            "\n{} entries, total {:.2} {}",
            summary.entry_count, summary.total_cost, self.currency
        );
        Ok(out)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
