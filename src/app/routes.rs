//! Navigation routes
//!
//! String routes with path parameters, e.g. `fuel_overview/{vehicleId}`.
//! [`Route::from_str`] and [`Route::fmt`] are inverse.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Vehicles,
    AddVehicle,
    VehicleDetail { vehicle_id: String },
    ModifyVehicle { vehicle_id: String },
    FuelOverview { vehicle_id: String },
    AddFuel { vehicle_id: String },
    ModifyFuel { vehicle_id: String, entry_id: String },
    MaintenanceOverview { vehicle_id: String },
    AddMaintenance { vehicle_id: String },
    ModifyMaintenance { vehicle_id: String, entry_id: String },
}

impl Route {
    /// Where navigation starts
    pub const START: Route = Route::Vehicles;

    /// Vehicle the route is scoped to, if any
    pub fn vehicle_id(&self) -> Option<&str> {
        match self {
            Route::Vehicles | Route::AddVehicle => None,
            Route::VehicleDetail { vehicle_id }
            | Route::ModifyVehicle { vehicle_id }
            | Route::FuelOverview { vehicle_id }
            | Route::AddFuel { vehicle_id }
            | Route::ModifyFuel { vehicle_id, .. }
            | Route::MaintenanceOverview { vehicle_id }
            | Route::AddMaintenance { vehicle_id }
            | Route::ModifyMaintenance { vehicle_id, .. } => Some(vehicle_id),
        }
    }

    /// Form routes collect input rather than display records
    pub fn is_form(&self) -> bool {
        matches!(
            self,
            Route::AddVehicle
                | Route::ModifyVehicle { .. }
                | Route::AddFuel { .. }
                | Route::ModifyFuel { .. }
                | Route::AddMaintenance { .. }
                | Route::ModifyMaintenance { .. }
        )
    }

    /// Screen reached by going back from this one
    pub fn parent(&self) -> Option<Route> {
        match self {
            Route::Vehicles => None,
            Route::AddVehicle => Some(Route::Vehicles),
            Route::VehicleDetail { .. } => Some(Route::Vehicles),
            Route::ModifyVehicle { vehicle_id }
            | Route::FuelOverview { vehicle_id }
            | Route::MaintenanceOverview { vehicle_id } => Some(Route::VehicleDetail {
                vehicle_id: vehicle_id.clone(),
            }),
            Route::AddFuel { vehicle_id } | Route::ModifyFuel { vehicle_id, .. } => {
                Some(Route::FuelOverview {
                    vehicle_id: vehicle_id.clone(),
                })
            }
            Route::AddMaintenance { vehicle_id } | Route::ModifyMaintenance { vehicle_id, .. } => {
                Some(Route::MaintenanceOverview {
                    vehicle_id: vehicle_id.clone(),
                })
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Vehicles => write!(f, "vehicles"),
            Route::AddVehicle => write!(f, "add_vehicle"),
            Route::VehicleDetail { vehicle_id } => write!(f, "vehicle_detail/{vehicle_id}"),
            Route::ModifyVehicle { vehicle_id } => write!(f, "modify_vehicle/{vehicle_id}"),
            Route::FuelOverview { vehicle_id } => write!(f, "fuel_overview/{vehicle_id}"),
            Route::AddFuel { vehicle_id } => write!(f, "add_fuel/{vehicle_id}"),
            Route::ModifyFuel {
                vehicle_id,
                entry_id,
            } => write!(f, "modify_fuel/{vehicle_id}/{entry_id}"),
            Route::MaintenanceOverview { vehicle_id } => {
                write!(f, "maintenance_overview/{vehicle_id}")
            }
            Route::AddMaintenance { vehicle_id } => write!(f, "add_maintenance/{vehicle_id}"),
            Route::ModifyMaintenance {
                vehicle_id,
                entry_id,
            } => write!(f, "modify_maintenance/{vehicle_id}/{entry_id}"),
        }
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || Error::UnknownRoute(s.to_string());
        let segments: Vec<&str> = s.trim().trim_matches('/').split('/').collect();
        if segments.iter().any(|seg| seg.is_empty()) {
            return Err(unknown());
        }

        let id = |index: usize| segments[index].to_string();

        let route = match (segments[0], segments.len()) {
            ("vehicles", 1) => Route::Vehicles,
            ("add_vehicle", 1) => Route::AddVehicle,
            ("vehicle_detail", 2) => Route::VehicleDetail { vehicle_id: id(1) },
            ("modify_vehicle", 2) => Route::ModifyVehicle { vehicle_id: id(1) },
            ("fuel_overview", 2) => Route::FuelOverview { vehicle_id: id(1) },
            ("add_fuel", 2) => Route::AddFuel { vehicle_id: id(1) },
            ("modify_fuel", 3) => Route::ModifyFuel {
                vehicle_id: id(1),
                entry_id: id(2),
            },
            ("maintenance_overview", 2) => Route::MaintenanceOverview { vehicle_id: id(1) },
            ("add_maintenance", 2) => Route::AddMaintenance { vehicle_id: id(1) },
            ("modify_maintenance", 3) => Route::ModifyMaintenance {
                vehicle_id: id(1),
                entry_id: id(2),
            },
            _ => return Err(unknown()),
        };
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes_with_parameters() {
        assert_eq!("vehicles".parse::<Route>().unwrap(), Route::START);
        assert_eq!(
            "fuel_overview/abc".parse::<Route>().unwrap(),
            Route::FuelOverview {
                vehicle_id: "abc".into()
            }
        );
        assert_eq!(
            "/modify_maintenance/v1/e9/".parse::<Route>().unwrap(),
            Route::ModifyMaintenance {
                vehicle_id: "v1".into(),
                entry_id: "e9".into()
            }
        );
    }

    #[test]
    fn test_format_then_parse_is_identity() {
        let route = Route::ModifyFuel {
            vehicle_id: "v1".into(),
            entry_id: "f2".into(),
        };
        assert_eq!(route.to_string(), "modify_fuel/v1/f2");
        assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
    }

    #[test]
    fn test_rejects_unknown_or_malformed_routes() {
        for raw in ["", "garage", "vehicle_detail", "fuel_overview/a/b", "modify_fuel//x"] {
            assert!(
                matches!(raw.parse::<Route>(), Err(Error::UnknownRoute(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_parent_chain_leads_to_start() {
        let mut route = Route::ModifyMaintenance {
            vehicle_id: "v1".into(),
            entry_id: "m1".into(),
        };
        let mut depth = 0;
        while let Some(parent) = route.parent() {
            route = parent;
            depth += 1;
        }
        assert_eq!(route, Route::START);
        assert_eq!(depth, 3);
    }

    #[test]
    fn test_form_routes() {
        assert!(Route::AddVehicle.is_form());
        assert!(!Route::Vehicles.is_form());
        assert_eq!(
            Route::AddFuel {
                vehicle_id: "v".into()
            }
            .vehicle_id(),
            Some("v")
        );
    }
}
