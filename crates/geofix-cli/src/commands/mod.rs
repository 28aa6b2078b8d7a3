//! Command implementations

mod fix;
mod validate;

use crate::batch::BatchSummary;
use crate::cli::Cli;
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::Result;
use geofix_core::config::{ConfigSource, LayeredConfig};
use geofix_core::models::RunMode;
use serde::Serialize;
use tabled::Tabled;

/// Execute the CLI invocation
pub fn execute(cli: Cli) -> Result<BatchSummary> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;

    tracing::debug!(
        mode = ?cli.run_mode(),
        axis_mode = ?config.axis_mode.value,
        output_method = ?config.output_method.value,
        files = cli.files.len(),
        "Starting geofix"
    );

    if cli.show_config {
        show_config(&config, &output)?;
        return Ok(BatchSummary::new(0));
    }

    match cli.run_mode() {
        RunMode::Repair => fix::execute(&cli.files, &config, &output),
        RunMode::Report => validate::execute(&cli.files, &output),
    }
}

#[derive(Tabled, Serialize)]
struct ConfigRow {
    #[tabled(rename = "Setting")]
    setting: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Source")]
    source: String,
}

fn show_config(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(setting, (value, source))| ConfigRow {
            setting,
            value,
            source: source_name(source).to_string(),
        })
        .collect();
    rows.sort_by(|a, b| a.setting.cmp(&b.setting));

    if output.is_json() {
        return output.result(true, &rows);
    }

    output.section("Configuration");
    output.table(rows);
    Ok(())
}

fn source_name(source: ConfigSource) -> &'static str {
    match source {
        ConfigSource::Default => "default",
        ConfigSource::File => "file",
        ConfigSource::Environment => "environment",
        ConfigSource::Cli => "cli",
    }
}
