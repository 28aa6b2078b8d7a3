//! Read-only validity reporting.

use crate::dispatch::feature_location;
use crate::error::{GeofixError, Result};
use crate::models::{DocumentKind, GeometryType};
use crate::ports::GeometryEngine;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Advisory attached to any geometry whose rings need rewinding
pub const WINDING_ADVISORY: &str = "polygon ring order violates the right-hand rule";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Valid,
    Invalid,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => f.write_str("valid"),
            Verdict::Invalid => f.write_str("invalid"),
        }
    }
}

/// Verdict plus the reasons behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidityReport {
    pub verdict: Verdict,
    pub explanations: Vec<String>,
}

impl ValidityReport {
    /// Create a valid report
    pub fn valid() -> Self {
        Self { verdict: Verdict::Valid, explanations: Vec::new() }
    }

    /// Create an invalid report with explanations
    pub fn invalid(explanations: Vec<String>) -> Self {
        Self { verdict: Verdict::Invalid, explanations }
    }

    pub fn is_valid(&self) -> bool {
        self.verdict == Verdict::Valid
    }

    /// Valid iff every child is valid; explanations concatenated in order
    pub fn aggregate(children: impl IntoIterator<Item = ValidityReport>) -> Self {
        let mut verdict = Verdict::Valid;
        let mut explanations = Vec::new();
        for child in children {
            if child.verdict == Verdict::Invalid {
                verdict = Verdict::Invalid;
            }
            explanations.extend(child.explanations.into_iter().filter(|e| !e.is_empty()));
        }
        Self { verdict, explanations }
    }
}

impl fmt::Display for ValidityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.explanations.is_empty() {
            write!(f, "{}", self.verdict)
        } else {
            write!(f, "{}: {}", self.verdict, self.explanations.join("; "))
        }
    }
}

/// Classify a whole document without modifying it
pub fn check_document<E: GeometryEngine>(engine: &E, document: &Value) -> Result<ValidityReport> {
    match DocumentKind::of(document)? {
        DocumentKind::FeatureCollection => {
            let features = document.get("features").and_then(Value::as_array).ok_or_else(|| {
                GeofixError::InvalidDocument {
                    reason: "FeatureCollection has no \"features\" array".to_string(),
                }
            })?;
            let reports = features
                .iter()
                .enumerate()
                .map(|(index, feature)| {
                    check_feature(engine, feature)
                        .map_err(|e| e.in_feature(feature_location(index, feature)))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(ValidityReport::aggregate(reports))
        }
        DocumentKind::Feature => check_feature(engine, document),
        DocumentKind::Geometry(kind) => check_geometry(engine, kind, document),
    }
}

fn check_feature<E: GeometryEngine>(engine: &E, feature: &Value) -> Result<ValidityReport> {
    match DocumentKind::of(feature)? {
        DocumentKind::Feature => {}
        _ => {
            return Err(GeofixError::InvalidDocument {
                reason: "FeatureCollection member is not a Feature".to_string(),
            })
        }
    }

    match feature.get("geometry") {
        None | Some(Value::Null) => Ok(ValidityReport::valid()),
        Some(geometry) => match DocumentKind::of(geometry)? {
            DocumentKind::Geometry(kind) => check_geometry(engine, kind, geometry),
            _ => Err(GeofixError::InvalidDocument {
                reason: "Feature \"geometry\" is not a geometry object".to_string(),
            }),
        },
    }
}

/// Validity and winding verdict for one geometry
pub fn check_geometry<E: GeometryEngine>(
    engine: &E,
    kind: GeometryType,
    geometry: &Value,
) -> Result<ValidityReport> {
    let parsed = engine.parse(kind, geometry)?;

    let mut explanations = Vec::new();
    if !engine.is_valid(&parsed) {
        explanations.push(engine.explain_invalidity(&parsed));
    }
    if engine.needs_rewinding(&parsed) {
        explanations.push(WINDING_ADVISORY.to_string());
    }

    if explanations.is_empty() {
        Ok(ValidityReport::valid())
    } else {
        Ok(ValidityReport::invalid(explanations))
    }
}
