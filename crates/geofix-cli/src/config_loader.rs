//! Configuration loading utilities for CLI commands

use crate::cli::Cli;
use anyhow::{Context, Result};
use geofix_core::config::{validate_suffix, CliConfigOverrides, LayeredConfig};
use std::path::Path;

/// Configuration file picked up from the working directory
pub const CONFIG_FILE_NAME: &str = "geofix.toml";

/// Load layered configuration: defaults, file, environment, then CLI flags
pub fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let config = LayeredConfig::with_defaults();

    let config = match &cli.config {
        Some(path) => config
            .load_from_file(path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?,
        None if Path::new(CONFIG_FILE_NAME).is_file() => config
            .load_from_file(CONFIG_FILE_NAME)
            .context("Failed to load configuration file geofix.toml")?,
        None => config,
    };

    let mut config = config.load_from_env();
    config.update_from_cli(cli_overrides(cli)?);
    Ok(config)
}

fn cli_overrides(cli: &Cli) -> Result<CliConfigOverrides> {
    let suffix = cli.suffix.as_deref().map(validate_suffix).transpose()?;

    Ok(CliConfigOverrides {
        axis_mode: cli.flip.map(Into::into),
        output_method: cli.output_method.map(Into::into),
        suffix,
    })
}
