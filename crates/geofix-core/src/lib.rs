//! geofix core - GeoJSON geometry normalization
//!
//! This crate contains the repair pipeline (axis-order heuristic, validity
//! repair, ring winding), the container recursion over GeoJSON documents,
//! the read-only validity report, and the port trait a geometry engine
//! implements.

pub mod axis;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod normalize;
pub mod ports;
pub mod report;
pub mod walker;

pub use dispatch::{fix_document, FixSummary, FixedDocument};
pub use error::{GeofixError, Result};
pub use models::{AxisMode, FixOptions, RunMode};
pub use ports::GeometryEngine;
pub use report::{check_document, ValidityReport, Verdict};

use serde_json::Value;

/// Result of running one document in either mode
#[derive(Debug, Clone)]
pub enum Outcome {
    Fixed(FixedDocument),
    Report(ValidityReport),
}

/// Run a document through the pipeline selected by `mode`
pub fn process<E: GeometryEngine>(
    engine: &E,
    document: &Value,
    mode: RunMode,
    options: &FixOptions,
) -> Result<Outcome> {
    match mode {
        RunMode::Repair => fix_document(engine, document, options).map(Outcome::Fixed),
        RunMode::Report => check_document(engine, document).map(Outcome::Report),
    }
}
