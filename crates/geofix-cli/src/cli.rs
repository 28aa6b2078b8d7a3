use clap::{Parser, ValueEnum};
use geofix_core::models::{AxisMode, OutputMethod, RunMode};
use std::path::PathBuf;

/// geofix - repair and validate GeoJSON geometries
#[derive(Parser, Debug)]
#[command(name = "geofix")]
#[command(about = "Repair and validate GeoJSON geometries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// GeoJSON files to process
    #[arg(required_unless_present = "show_config")]
    pub files: Vec<PathBuf>,

    /// Print the validity of each file without fixing it
    #[arg(long, conflicts_with = "fix")]
    pub validate: bool,

    /// Fix each file (default)
    #[arg(long)]
    pub fix: bool,

    /// How to output fixed documents
    #[arg(short = 'o', long, value_enum)]
    pub output_method: Option<OutputMethodArg>,

    /// Coordinate order handling, e.g. [25, 50] to [50, 25]
    #[arg(long, value_enum)]
    pub flip: Option<FlipArg>,

    /// Suffix appended to the file stem with `-o new_file`
    #[arg(long)]
    pub suffix: Option<String>,

    /// Log level
    #[arg(short = 'v', long, value_enum, ignore_case = true)]
    pub verbosity: Option<Verbosity>,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Configuration file (defaults to ./geofix.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show the effective configuration and where each value came from, then exit
    #[arg(long, conflicts_with = "files")]
    pub show_config: bool,
}

impl Cli {
    pub fn run_mode(&self) -> RunMode {
        if self.validate {
            RunMode::Report
        } else {
            RunMode::Repair
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMethodArg {
    /// Overwrite the source file
    Overwrite,
    /// Write `<stem><suffix>.<ext>` next to the source file
    #[value(name = "new_file", alias = "new-file")]
    NewFile,
    /// Print fixed documents to stdout
    Print,
}

impl From<OutputMethodArg> for OutputMethod {
    fn from(arg: OutputMethodArg) -> Self {
        match arg {
            OutputMethodArg::Overwrite => OutputMethod::Overwrite,
            OutputMethodArg::NewFile => OutputMethod::NewFile,
            OutputMethodArg::Print => OutputMethod::Print,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FlipArg {
    /// Swap every coordinate pair
    Always,
    /// Keep coordinates as given
    Never,
    /// Swap only geometries that are out of range as lon/lat
    Auto,
}

impl From<FlipArg> for AxisMode {
    fn from(arg: FlipArg) -> Self {
        match arg {
            FlipArg::Always => AxisMode::AlwaysFlip,
            FlipArg::Never => AxisMode::NeverFlip,
            FlipArg::Auto => AxisMode::FlipIfOutOfRange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Verbosity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Verbosity {
    /// `tracing` filter directive for this level
    pub fn directive(&self) -> &'static str {
        match self {
            Verbosity::Debug => "debug",
            Verbosity::Info => "info",
            Verbosity::Warning => "warn",
            Verbosity::Error | Verbosity::Critical => "error",
        }
    }
}
