//! Maintenance history and cost totals

use serde::Serialize;

use super::sort_newest_first;
use crate::domain::model::MaintenanceEntry;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaintenanceSummary {
    pub entry_count: usize,
    pub total_cost: f64,
    /// Most recent service, if any
    pub last_service: Option<MaintenanceEntry>,
}

/// Newest-first maintenance history
pub fn maintenance_history(entries: &[MaintenanceEntry]) -> Vec<MaintenanceEntry> {
    sort_newest_first(entries).into_iter().cloned().collect()
}

pub fn maintenance_summary(entries: &[MaintenanceEntry]) -> MaintenanceSummary {
    MaintenanceSummary {
        entry_count: entries.len(),
        total_cost: entries.iter().map(|e| e.price_value().unwrap_or(0.0)).sum(),
        last_service: sort_newest_first(entries).first().map(|e| (*e).clone()),
    }
}
