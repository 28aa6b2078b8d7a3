use crate::error::{GeofixError, Result};
use crate::models::{AxisMode, OutputMethod};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Default suffix appended to the file stem for `new_file` output
pub const DEFAULT_SUFFIX: &str = "_fixed";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for geofix
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub axis_mode: ConfigValue<AxisMode>,
    pub output_method: ConfigValue<OutputMethod>,
    pub suffix: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            axis_mode: ConfigValue::new(AxisMode::FlipIfOutOfRange, ConfigSource::Default),
            output_method: ConfigValue::new(OutputMethod::NewFile, ConfigSource::Default),
            suffix: ConfigValue::new(DEFAULT_SUFFIX.to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeofixError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeofixError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(axis_mode) = file_config.axis_mode {
            self.axis_mode.update(parse_axis_mode(&axis_mode)?, ConfigSource::File);
        }

        if let Some(output_method) = file_config.output_method {
            self.output_method.update(parse_output_method(&output_method)?, ConfigSource::File);
        }

        if let Some(suffix) = file_config.suffix {
            self.suffix.update(validate_suffix(&suffix)?, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEOFIX_AXIS_MODE
        if let Ok(mode_str) = env::var("GEOFIX_AXIS_MODE") {
            match parse_axis_mode(&mode_str) {
                Ok(mode) => self.axis_mode.update(mode, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOFIX_AXIS_MODE value '{}': expected always, never, or auto",
                    mode_str
                ),
            }
        }

        // GEOFIX_OUTPUT_METHOD
        if let Ok(method_str) = env::var("GEOFIX_OUTPUT_METHOD") {
            match parse_output_method(&method_str) {
                Ok(method) => self.output_method.update(method, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOFIX_OUTPUT_METHOD value '{}': expected overwrite, new_file, or print",
                    method_str
                ),
            }
        }

        // GEOFIX_SUFFIX
        if let Ok(suffix) = env::var("GEOFIX_SUFFIX") {
            match validate_suffix(&suffix) {
                Ok(suffix) => self.suffix.update(suffix, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOFIX_SUFFIX value '{}': must be non-empty without path separators",
                    suffix
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(axis_mode) = overrides.axis_mode {
            self.axis_mode.update(axis_mode, ConfigSource::Cli);
        }

        if let Some(output_method) = overrides.output_method {
            self.output_method.update(output_method, ConfigSource::Cli);
        }

        if let Some(suffix) = overrides.suffix {
            self.suffix.update(suffix, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "axis_mode".to_string(),
            (axis_mode_name(self.axis_mode.value).to_string(), self.axis_mode.source),
        );

        map.insert(
            "output_method".to_string(),
            (output_method_name(self.output_method.value).to_string(), self.output_method.source),
        );

        map.insert("suffix".to_string(), (self.suffix.value.clone(), self.suffix.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    axis_mode: Option<String>,
    output_method: Option<String>,
    suffix: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub axis_mode: Option<AxisMode>,
    pub output_method: Option<OutputMethod>,
    pub suffix: Option<String>,
}

/// Parse axis mode from string
pub fn parse_axis_mode(s: &str) -> Result<AxisMode> {
    match s.to_lowercase().as_str() {
        "always" | "flip" => Ok(AxisMode::AlwaysFlip),
        "never" | "no-flip" | "no_flip" => Ok(AxisMode::NeverFlip),
        "auto" | "if-out-of-range" | "if_out_of_range" => Ok(AxisMode::FlipIfOutOfRange),
        _ => Err(GeofixError::ConfigInvalid {
            key: "axis_mode".to_string(),
            reason: format!("Invalid axis mode: {}. Use always, never, or auto", s),
        }),
    }
}

/// Parse output method from string
pub fn parse_output_method(s: &str) -> Result<OutputMethod> {
    match s.to_lowercase().as_str() {
        "overwrite" => Ok(OutputMethod::Overwrite),
        "new_file" | "new-file" => Ok(OutputMethod::NewFile),
        "print" => Ok(OutputMethod::Print),
        _ => Err(GeofixError::ConfigInvalid {
            key: "output_method".to_string(),
            reason: format!("Invalid output method: {}. Use overwrite, new_file, or print", s),
        }),
    }
}

/// Check a `new_file` suffix
pub fn validate_suffix(s: &str) -> Result<String> {
    if s.is_empty() || s.contains(|c| c == '/' || c == '\\') {
        return Err(GeofixError::ConfigInvalid {
            key: "suffix".to_string(),
            reason: format!("Invalid suffix: '{}'. Must be non-empty without path separators", s),
        });
    }
    Ok(s.to_string())
}

fn axis_mode_name(mode: AxisMode) -> &'static str {
    match mode {
        AxisMode::AlwaysFlip => "always",
        AxisMode::NeverFlip => "never",
        AxisMode::FlipIfOutOfRange => "auto",
    }
}

fn output_method_name(method: OutputMethod) -> &'static str {
    match method {
        OutputMethod::Overwrite => "overwrite",
        OutputMethod::NewFile => "new_file",
        OutputMethod::Print => "print",
    }
}
