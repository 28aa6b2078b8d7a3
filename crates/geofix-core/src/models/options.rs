//! Processing modes threaded through the pipeline.

use serde::{Deserialize, Serialize};

/// Coordinate axis-order handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisMode {
    /// Swap axis order of every geometry unconditionally
    AlwaysFlip,
    /// Leave axis order untouched
    NeverFlip,
    /// Swap a geometry only when a coordinate is out of range as-is but in range swapped
    #[default]
    FlipIfOutOfRange,
}

/// What to do with a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RunMode {
    /// Repair geometries and return a new document
    #[default]
    Repair,
    /// Classify the document without changing it
    Report,
}

/// Where fixed documents go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputMethod {
    /// Replace the source file
    Overwrite,
    /// Write next to the source with a suffix appended to the file stem
    #[default]
    NewFile,
    /// Print to stdout
    Print,
}

/// Immutable options for one repair run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixOptions {
    pub axis_mode: AxisMode,
}

impl FixOptions {
    pub fn new(axis_mode: AxisMode) -> Self {
        Self { axis_mode }
    }
}
