//! Command handlers

use crate::app::{Route, VehicleService};
use crate::cli::{
    Cli, Commands, FuelCommand, FuelFields, MaintenanceCommand, MaintenanceFields, OutputFormat,
    VehicleCommand, VehicleFields,
};
use crate::config::Config;
use crate::domain::service::{
    fuel_history, fuel_summary, maintenance_history, maintenance_summary, FuelForm,
    MaintenanceForm, VehicleForm,
};
use crate::domain::Vehicle;
use crate::error::{Error, Result};
use crate::infrastructure::ImageStore;
use crate::output::Screen;
use crate::types::today;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref dir) = cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);
    let screen = Screen::new(output_format, config.currency.clone());

    match cli.command {
        Commands::Vehicle(command) => {
            let data_dir = config.data_dir()?;
            debug!(data_dir = %data_dir.display(), "opening records");
            let mut service = VehicleService::open(&data_dir)?;
            cmd_vehicle(&mut service, &config, &data_dir, &screen, command)
        }

        Commands::Fuel(command) => {
            let mut service = VehicleService::open(&config.data_dir()?)?;
            cmd_fuel(&mut service, &screen, command)
        }

        Commands::Maintenance(command) => {
            let mut service = VehicleService::open(&config.data_dir()?)?;
            cmd_maintenance(&mut service, &screen, command)
        }

        Commands::Open { route } => {
            let route: Route = route.parse()?;
            let service = VehicleService::open(&config.data_dir()?)?;
            println!("{}", render_route(&service, &screen, &route)?);
            if screen.format == OutputFormat::Table {
                if let Some(back) = back_hint(&route) {
                    println!("{back}");
                }
            }
            Ok(())
        }

        Commands::Config {
            show,
            set_data_dir,
            set_output,
            set_unit,
            set_currency,
            reset,
        } => cmd_config(show, set_data_dir, set_output, set_unit, set_currency, reset),
    }
}

// ============================================================================
// Vehicles
// ============================================================================

fn cmd_vehicle(
    service: &mut VehicleService,
    config: &Config,
    data_dir: &Path,
    screen: &Screen,
    command: VehicleCommand,
) -> Result<()> {
    match command {
        VehicleCommand::Add { fields } => {
            let mut form = VehicleForm {
                unit: Some(config.default_unit),
                ..Default::default()
            };
            apply_vehicle_fields(&mut form, &fields);
            let vehicle = save_with_image(data_dir, fields.image.as_deref(), form, |form| {
                service.add_vehicle(form)
            })?;
            print_saved(screen, "Added vehicle", &vehicle.id, &vehicle)
        }

        VehicleCommand::List => {
            println!("{}", screen.vehicle_list(service.vehicles())?);
            Ok(())
        }

        VehicleCommand::Show { id } => {
            let route = Route::VehicleDetail { vehicle_id: id };
            println!("{}", render_route(service, screen, &route)?);
            Ok(())
        }

        VehicleCommand::Edit {
            id,
            fields,
            clear_image,
        } => {
            let existing = require_vehicle(service, &id)?;
            let mut form = VehicleForm::from_vehicle(&existing);
            apply_vehicle_fields(&mut form, &fields);
            if clear_image {
                form.image = None;
            }

            let vehicle = save_with_image(data_dir, fields.image.as_deref(), form, |form| {
                service.update_vehicle(&id, form)
            })?;
            if existing.image != vehicle.image {
                discard_image(data_dir, existing.image.as_deref())?;
            }
            print_saved(screen, "Updated vehicle", &vehicle.id, &vehicle)
        }

        VehicleCommand::Delete { id, yes } => {
            let vehicle = require_vehicle(service, &id)?;

            if !yes {
                println!(
                    "\nDelete {} ({}) and all its fuel and maintenance entries? [y/N]",
                    vehicle.display_name(),
                    vehicle.plate
                );
                let mut input = String::new();
                std::io::stdin().read_line(&mut input).ok();
                if !input.trim().eq_ignore_ascii_case("y") {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let summary = service.remove_vehicle(&id)?;
            discard_image(data_dir, vehicle.image.as_deref())?;
            if screen.format == OutputFormat::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "deleted": id,
                        "fuel_entries": summary.fuel_entries,
                        "maintenance_entries": summary.maintenance_entries,
                    })
                );
            } else {
                println!(
                    "Deleted {} ({} fuel, {} maintenance entries)",
                    vehicle.display_name(),
                    summary.fuel_entries,
                    summary.maintenance_entries
                );
            }
            Ok(())
        }
    }
}

/// Merge CLI flags into a vehicle form. The photo is handled by
/// [`save_with_image`].
fn apply_vehicle_fields(form: &mut VehicleForm, fields: &VehicleFields) {
    if let Some(ref brand) = fields.brand {
        form.brand = brand.clone();
    }
    if let Some(ref model) = fields.model {
        form.model = model.clone();
    }
    if let Some(ref plate) = fields.plate {
        form.plate = plate.clone();
    }
    if fields.vin.is_some() {
        form.vin = fields.vin.clone();
    }
    if let Some(ref odometer) = fields.odometer {
        form.odometer = odometer.clone();
    }
    if fields.unit.is_some() {
        form.unit = fields.unit;
    }
    if fields.registration_date.is_some() {
        form.registration_date = fields.registration_date.clone();
    }
}

/// Import `image` into the store, point the form at it and run `save`.
///
/// A form that would not validate is rejected before the photo is decoded,
/// and a photo whose save failed is removed again.
fn save_with_image(
    data_dir: &Path,
    image: Option<&Path>,
    mut form: VehicleForm,
    save: impl FnOnce(&VehicleForm) -> Result<Vehicle>,
) -> Result<Vehicle> {
    let Some(source) = image else {
        return save(&form);
    };
    form.to_vehicle("")?;

    let store = ImageStore::open(data_dir)?;
    let stored = store.import(source)?;
    form.image = Some(stored.display().to_string());

    match save(&form) {
        Ok(vehicle) => Ok(vehicle),
        Err(err) => {
            store.remove(&stored)?;
            Err(err)
        }
    }
}

fn discard_image(data_dir: &Path, image: Option<&str>) -> Result<()> {
    if let Some(path) = image {
        ImageStore::open(data_dir)?.remove(Path::new(path))?;
    }
    Ok(())
}

fn require_vehicle(service: &VehicleService, id: &str) -> Result<Vehicle> {
    service
        .get_vehicle(id)
        .cloned()
        .ok_or_else(|| Error::VehicleNotFound(id.to_string()))
}

// ============================================================================
// Fuel
// ============================================================================

fn cmd_fuel(service: &mut VehicleService, screen: &Screen, command: FuelCommand) -> Result<()> {
    match command {
        FuelCommand::Add { vehicle_id, fields } => {
            let mut form = FuelForm {
                date: today(),
                ..Default::default()
            };
            apply_fuel_fields(&mut form, &fields);
            let entry = service.add_fuel_entry(&vehicle_id, &form)?;
            print_saved(screen, "Added fuel entry", &entry.id, &entry)
        }

        FuelCommand::List { vehicle_id } => {
            let route = Route::FuelOverview { vehicle_id };
            println!("{}", render_route(service, screen, &route)?);
            Ok(())
        }

        FuelCommand::Edit {
            vehicle_id,
            entry_id,
            fields,
        } => {
            let existing = service.fuel_entry(&vehicle_id, &entry_id)?;
            let mut form = FuelForm::from_entry(&existing);
            apply_fuel_fields(&mut form, &fields);
            let entry = service.update_fuel_entry(&vehicle_id, &entry_id, &form)?;
            print_saved(screen, "Updated fuel entry", &entry.id, &entry)
        }

        FuelCommand::Stats { vehicle_id } => {
            let vehicle = require_vehicle(service, &vehicle_id)?;
            let entries = service.fuel_entries(&vehicle_id)?;
            println!(
                "{}",
                screen.fuel_summary(&vehicle, fuel_summary(&entries).as_ref())?
            );
            Ok(())
        }
    }
}

fn apply_fuel_fields(form: &mut FuelForm, fields: &FuelFields) {
    if let Some(ref date) = fields.date {
        form.date = date.clone();
    }
    if let Some(ref liters) = fields.liters {
        form.liters = liters.clone();
    }
    if let Some(ref price) = fields.price {
        form.price = price.clone();
    }
    if let Some(ref odometer) = fields.odometer {
        form.odometer = odometer.clone();
    }
    if fields.note.is_some() {
        form.note = fields.note.clone();
    }
}

// ============================================================================
// Maintenance
// ============================================================================

fn cmd_maintenance(
    service: &mut VehicleService,
    screen: &Screen,
    command: MaintenanceCommand,
) -> Result<()> {
    match command {
        MaintenanceCommand::Add { vehicle_id, fields } => {
            let mut form = MaintenanceForm {
                date: today(),
                ..Default::default()
            };
            apply_maintenance_fields(&mut form, &fields);
            let entry = service.add_maintenance_entry(&vehicle_id, &form)?;
            print_saved(screen, "Added maintenance entry", &entry.id, &entry)
        }

        MaintenanceCommand::List { vehicle_id } => {
            let route = Route::MaintenanceOverview { vehicle_id };
            println!("{}", render_route(service, screen, &route)?);
            Ok(())
        }

        MaintenanceCommand::Edit {
            vehicle_id,
            entry_id,
            fields,
        } => {
            let existing = service.maintenance_entry(&vehicle_id, &entry_id)?;
            let mut form = MaintenanceForm::from_entry(&existing);
            apply_maintenance_fields(&mut form, &fields);
            let entry = service.update_maintenance_entry(&vehicle_id, &entry_id, &form)?;
            print_saved(screen, "Updated maintenance entry", &entry.id, &entry)
        }
    }
}

fn apply_maintenance_fields(form: &mut MaintenanceForm, fields: &MaintenanceFields) {
    if let Some(ref kind) = fields.kind {
        form.kind = kind.clone();
    }
    if let Some(ref date) = fields.date {
        form.date = date.clone();
    }
    if let Some(ref price) = fields.price {
        form.price = price.clone();
    }
    if let Some(ref odometer) = fields.odometer {
        form.odometer = odometer.clone();
    }
    if fields.note.is_some() {
        form.note = fields.note.clone();
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Render the screen a route points at.
///
/// Form routes print the command that fills in that form.
pub fn render_route(service: &VehicleService, screen: &Screen, route: &Route) -> Result<String> {
    if let Some(vehicle_id) = route.vehicle_id() {
        require_vehicle(service, vehicle_id)?;
    }

    if route.is_form() {
        match route {
            Route::ModifyFuel {
                vehicle_id,
                entry_id,
            } => {
                service.fuel_entry(vehicle_id, entry_id)?;
            }
            Route::ModifyMaintenance {
                vehicle_id,
                entry_id,
            } => {
                service.maintenance_entry(vehicle_id, entry_id)?;
            }
            _ => {}
        }
        return Ok(form_hint(route));
    }

    match route {
        Route::Vehicles => screen.vehicle_list(service.vehicles()),

        Route::VehicleDetail { vehicle_id } => {
            let vehicle = require_vehicle(service, vehicle_id)?;
            let fuel = service.fuel_entries(vehicle_id)?;
            let maintenance = service.maintenance_entries(vehicle_id)?;
            screen.vehicle_detail(
                &vehicle,
                fuel_summary(&fuel).as_ref(),
                &maintenance_summary(&maintenance),
            )
        }

        Route::FuelOverview { vehicle_id } => {
            let vehicle = require_vehicle(service, vehicle_id)?;
            let entries = service.fuel_entries(vehicle_id)?;
            screen.fuel_overview(
                &vehicle,
                &fuel_history(&entries),
                fuel_summary(&entries).as_ref(),
            )
        }

        Route::MaintenanceOverview { vehicle_id } => {
            let vehicle = require_vehicle(service, vehicle_id)?;
            let entries = service.maintenance_entries(vehicle_id)?;
            screen.maintenance_overview(
                &vehicle,
                &maintenance_history(&entries),
                &maintenance_summary(&entries),
            )
        }

        _ => Ok(form_hint(route)),
    }
}

/// Command that leads back to the screen above `route`
pub fn back_hint(route: &Route) -> Option<String> {
    route
        .parent()
        .map(|parent| format!("Back: automate open {parent}"))
}

/// CLI equivalent of a form screen
pub fn form_hint(route: &Route) -> String {
    let command = match route {
        Route::AddVehicle => {
            "automate vehicle add --brand <BRAND> --model <MODEL> --plate <PLATE>".to_string()
        }
        Route::ModifyVehicle { vehicle_id } => {
            format!("automate vehicle edit {vehicle_id} [--brand ..] [--odometer ..]")
        }
        Route::AddFuel { vehicle_id } => format!(
            "automate fuel add {vehicle_id} --liters <L> --price <PRICE> --odometer <READING>"
        ),
        Route::ModifyFuel {
            vehicle_id,
            entry_id,
        } => format!("automate fuel edit {vehicle_id} {entry_id} [--liters ..] [--price ..]"),
        Route::AddMaintenance { vehicle_id } => {
            format!("automate maintenance add {vehicle_id} --type <TYPE> [--price ..]")
        }
        Route::ModifyMaintenance {
            vehicle_id,
            entry_id,
        } => format!("automate maintenance edit {vehicle_id} {entry_id} [--type ..]"),
        other => format!("automate open {other}"),
    };
    format!("{route} is a form. Fill it in with:\n  {command}")
}

fn print_saved<T: serde::Serialize>(
    screen: &Screen,
    label: &str,
    id: &str,
    record: &T,
) -> Result<()> {
    if screen.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{label}: {id}");
    }
    Ok(())
}

// ============================================================================
// Config
// ============================================================================

fn cmd_config(
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_unit: Option<crate::types::DistanceUnit>,
    set_currency: Option<String>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults.");
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(dir) = set_data_dir {
        config.data_dir = Some(dir);
        modified = true;
    }
    if let Some(format) = set_output {
        config.output_format = format;
        modified = true;
    }
    if let Some(unit) = set_unit {
        config.default_unit = unit;
        modified = true;
    }
    if let Some(currency) = set_currency {
        config.currency = currency;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration saved.");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn seeded() -> (tempfile::TempDir, VehicleService, Vehicle) {
        let dir = tempdir().unwrap();
        let mut service = VehicleService::open(dir.path()).unwrap();
        let vehicle = service
            .add_vehicle(&VehicleForm {
                brand: "Ford".into(),
                model: "Focus".into(),
                plate: "KE-42".into(),
                odometer: "900".into(),
                ..Default::default()
            })
            .unwrap();
        (dir, service, vehicle)
    }

    #[test]
    fn test_render_overview_routes() {
        let (_dir, mut service, vehicle) = seeded();
        service
            .add_fuel_entry(
                &vehicle.id,
                &FuelForm {
                    date: "01.02.2024".into(),
                    liters: "30".into(),
                    price: "45".into(),
                    odometer: "1000".into(),
                    note: None,
                },
            )
            .unwrap();
        let screen = Screen::new(OutputFormat::Table, "€");

        let out = render_route(&service, &screen, &Route::START).unwrap();
        assert!(out.contains("KE-42"));

        let route = Route::FuelOverview {
            vehicle_id: vehicle.id.clone(),
        };
        let out = render_route(&service, &screen, &route).unwrap();
        assert!(out.contains("Fuel Overview - Ford Focus"));
        assert!(out.contains("01.02.2024"));

        let route = Route::VehicleDetail {
            vehicle_id: vehicle.id.clone(),
        };
        let out = render_route(&service, &screen, &route).unwrap();
        assert!(out.contains("Odometer:        1000 km"));
    }

    #[test]
    fn test_render_route_unknown_vehicle() {
        let (_dir, service, _vehicle) = seeded();
        let screen = Screen::new(OutputFormat::Table, "€");
        let route = Route::MaintenanceOverview {
            vehicle_id: "nope".into(),
        };
        assert!(matches!(
            render_route(&service, &screen, &route),
            Err(Error::VehicleNotFound(_))
        ));
    }

    #[test]
    fn test_form_routes_render_hint() {
        let (_dir, service, vehicle) = seeded();
        let screen = Screen::new(OutputFormat::Table, "€");
        let route = Route::AddFuel {
            vehicle_id: vehicle.id.clone(),
        };
        let out = render_route(&service, &screen, &route).unwrap();
        assert!(out.contains(&format!("automate fuel add {}", vehicle.id)));

        let route = Route::ModifyFuel {
            vehicle_id: vehicle.id.clone(),
            entry_id: "missing".into(),
        };
        assert!(matches!(
            render_route(&service, &screen, &route),
            Err(Error::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_back_hint_follows_parent_route() {
        let route = Route::ModifyFuel {
            vehicle_id: "v1".into(),
            entry_id: "f1".into(),
        };
        assert_eq!(
            back_hint(&route).as_deref(),
            Some("Back: automate open fuel_overview/v1")
        );
        assert_eq!(back_hint(&Route::START), None);
    }

    fn write_photo(dir: &Path) -> PathBuf {
        let source = dir.join("car.png");
        image::RgbImage::from_pixel(3, 3, image::Rgb([20, 40, 60]))
            .save(&source)
            .unwrap();
        source
    }

    fn stored_images(data_dir: &Path) -> usize {
        std::fs::read_dir(data_dir.join("images"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    #[test]
    fn test_invalid_vehicle_leaves_no_photo_behind() {
        let dir = tempdir().unwrap();
        let source = write_photo(dir.path());
        let mut service = VehicleService::open(dir.path()).unwrap();

        let form = VehicleForm {
            brand: "".into(),
            model: "Yaris".into(),
            plate: "TT-1".into(),
            ..Default::default()
        };
        let err = save_with_image(dir.path(), Some(&source), form, |form| {
            service.add_vehicle(form)
        })
        .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(service.vehicles().is_empty());
        assert_eq!(stored_images(dir.path()), 0);
    }

    #[test]
    fn test_failed_save_removes_imported_photo() {
        let dir = tempdir().unwrap();
        let source = write_photo(dir.path());
        let mut service = VehicleService::open(dir.path()).unwrap();

        let form = VehicleForm {
            brand: "Toyota".into(),
            model: "Yaris".into(),
            plate: "TT-1".into(),
            ..Default::default()
        };
        let err = save_with_image(dir.path(), Some(&source), form.clone(), |form| {
            service.update_vehicle("missing", form)
        })
        .unwrap_err();
        assert!(matches!(err, Error::VehicleNotFound(_)));
        assert_eq!(stored_images(dir.path()), 0);

        let vehicle = save_with_image(dir.path(), Some(&source), form, |form| {
            service.add_vehicle(form)
        })
        .unwrap();
        assert_eq!(stored_images(dir.path()), 1);
        assert!(Path::new(vehicle.image.as_deref().unwrap()).is_file());
    }

    #[test]
    fn test_apply_fields_only_overrides_given_values() {
        let mut form = FuelForm {
            date: "01.01.2024".into(),
            liters: "10".into(),
            price: "20".into(),
            odometer: "300".into(),
            note: Some("keep".into()),
        };
        let fields = FuelFields {
            price: Some("25".into()),
            ..Default::default()
        };
        apply_fuel_fields(&mut form, &fields);
        assert_eq!(form.price, "25");
        assert_eq!(form.liters, "10");
        assert_eq!(form.note.as_deref(), Some("keep"));
    }
}
