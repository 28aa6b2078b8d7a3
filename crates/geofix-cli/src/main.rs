//! geofix CLI - Command-line interface
//!
//! Repairs or validates the geometries of GeoJSON files.

mod batch;
mod cli;
mod commands;
mod config_loader;
mod errors;
mod files;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Verbosity};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbosity);

    // Execute the command
    let summary = commands::execute(cli)?;

    if summary.all_succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Logs go to stderr so printed documents stay machine-readable
fn init_tracing(verbosity: Option<Verbosity>) {
    let filter = match verbosity {
        Some(level) => EnvFilter::new(level.directive()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
