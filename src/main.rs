//! AUTOmate - vehicle, fuel and maintenance tracker
//!
//! A CLI tool that keeps a garage of vehicles with their refuels and
//! services, and reports consumption and cost statistics.

use automate::cli::Cli;
use automate::commands;
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let default_level = if verbose { "automate=debug" } else { "warn" };
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_level.into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
