//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use geofix_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use geofix_core::models::{AxisMode, OutputMethod};
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

const VARS: [&str; 3] = ["GEOFIX_AXIS_MODE", "GEOFIX_OUTPUT_METHOD", "GEOFIX_SUFFIX"];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", content).unwrap();
    file
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.axis_mode.value, AxisMode::FlipIfOutOfRange);
    assert_eq!(config.axis_mode.source, ConfigSource::Default);
    assert_eq!(config.output_method.value, OutputMethod::NewFile);
    assert_eq!(config.suffix.value, "_fixed");
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let file = config_file(
        r#"
axis_mode = "never"
output_method = "overwrite"
"#,
    );
    env::set_var("GEOFIX_AXIS_MODE", "always");

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();

    assert_eq!(config.axis_mode.value, AxisMode::AlwaysFlip);
    assert_eq!(config.axis_mode.source, ConfigSource::Environment);
    // Not set in the environment, so the file still wins
    assert_eq!(config.output_method.value, OutputMethod::Overwrite);
    assert_eq!(config.output_method.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var("GEOFIX_OUTPUT_METHOD", "print");
    env::set_var("GEOFIX_SUFFIX", "_env");

    let mut config = LayeredConfig::with_defaults().load_from_env();
    config.update_from_cli(CliConfigOverrides {
        output_method: Some(OutputMethod::Overwrite),
        ..Default::default()
    });

    assert_eq!(config.output_method.value, OutputMethod::Overwrite);
    assert_eq!(config.output_method.source, ConfigSource::Cli);
    assert_eq!(config.suffix.value, "_env");
    assert_eq!(config.suffix.source, ConfigSource::Environment);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_value_is_ignored() {
    clear_env();
    env::set_var("GEOFIX_AXIS_MODE", "sideways");
    env::set_var("GEOFIX_SUFFIX", "a/b");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.axis_mode.value, AxisMode::FlipIfOutOfRange);
    assert_eq!(config.axis_mode.source, ConfigSource::Default);
    assert_eq!(config.suffix.value, "_fixed");

    clear_env();
}

#[test]
#[serial]
fn test_full_precedence_chain() {
    clear_env();
    let file = config_file(r#"suffix = "_file""#);
    env::set_var("GEOFIX_SUFFIX", "_env");

    let mut config =
        LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();
    assert_eq!(config.suffix.value, "_env");

    config.update_from_cli(CliConfigOverrides {
        suffix: Some("_cli".to_string()),
        ..Default::default()
    });

    assert_eq!(config.suffix.value, "_cli");
    assert_eq!(config.suffix.source, ConfigSource::Cli);

    let map = config.to_inspection_map();
    assert_eq!(map["suffix"], ("_cli".to_string(), ConfigSource::Cli));

    clear_env();
}

#[test]
fn test_missing_file_is_an_error() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/geofix.toml");
    assert!(result.is_err());
}
