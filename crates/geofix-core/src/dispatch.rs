//! Recursion over GeoJSON containers.
//!
//! FeatureCollection → Feature → Geometry. Only the geometry leaves are
//! normalized; every other member of a Feature or FeatureCollection is
//! carried over unchanged and Feature order is preserved.

use crate::error::{FeatureLocation, GeofixError, Result};
use crate::models::{DocumentKind, FixOptions};
use crate::normalize::{normalize_geometry, NormalizedGeometry};
use crate::ports::GeometryEngine;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::ops::AddAssign;

/// Counts of what a run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FixSummary {
    pub geometries: usize,
    pub flipped: usize,
    pub repaired: usize,
    pub rewound: usize,
}

impl FixSummary {
    fn record(normalized: &NormalizedGeometry) -> Self {
        Self {
            geometries: 1,
            flipped: usize::from(normalized.actions.flipped),
            repaired: usize::from(normalized.actions.repaired),
            rewound: usize::from(normalized.actions.rewound),
        }
    }

    /// Whether any geometry was changed
    pub fn changed(&self) -> bool {
        self.flipped + self.repaired + self.rewound > 0
    }
}

impl AddAssign for FixSummary {
    fn add_assign(&mut self, other: Self) {
        self.geometries += other.geometries;
        self.flipped += other.flipped;
        self.repaired += other.repaired;
        self.rewound += other.rewound;
    }
}

/// A repaired document
#[derive(Debug, Clone)]
pub struct FixedDocument {
    pub document: Value,
    pub summary: FixSummary,
}

/// Repair every geometry in a document.
///
/// Fails on the first geometry that is malformed or cannot be repaired; a
/// failure inside a FeatureCollection carries the Feature's position.
pub fn fix_document<E: GeometryEngine>(
    engine: &E,
    document: &Value,
    options: &FixOptions,
) -> Result<FixedDocument> {
    match DocumentKind::of(document)? {
        DocumentKind::FeatureCollection => fix_feature_collection(engine, document, options),
        DocumentKind::Feature => fix_feature(engine, document, options),
        DocumentKind::Geometry(kind) => {
            let normalized = normalize_geometry(engine, kind, document, options)?;
            let summary = FixSummary::record(&normalized);
            Ok(FixedDocument { document: normalized.geometry, summary })
        }
    }
}

fn fix_feature_collection<E: GeometryEngine>(
    engine: &E,
    collection: &Value,
    options: &FixOptions,
) -> Result<FixedDocument> {
    let features = collection.get("features").and_then(Value::as_array).ok_or_else(|| {
        GeofixError::InvalidDocument {
            reason: "FeatureCollection has no \"features\" array".to_string(),
        }
    })?;

    tracing::debug!(features = features.len(), "Fixing FeatureCollection");
    let fixed = features
        .par_iter()
        .enumerate()
        .map(|(index, feature)| {
            fix_feature(engine, feature, options)
                .map_err(|e| e.in_feature(feature_location(index, feature)))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut summary = FixSummary::default();
    let mut fixed_features = Vec::with_capacity(fixed.len());
    for feature in fixed {
        summary += feature.summary;
        fixed_features.push(feature.document);
    }

    let mut document = collection.clone();
    if let Some(members) = document.as_object_mut() {
        members.insert("features".to_string(), Value::Array(fixed_features));
    }
    Ok(FixedDocument { document, summary })
}

fn fix_feature<E: GeometryEngine>(
    engine: &E,
    feature: &Value,
    options: &FixOptions,
) -> Result<FixedDocument> {
    if DocumentKind::of(feature)? != DocumentKind::Feature {
        return Err(GeofixError::InvalidDocument {
            reason: "FeatureCollection member is not a Feature".to_string(),
        });
    }

    let geometry = match feature.get("geometry") {
        None | Some(Value::Null) => {
            return Ok(FixedDocument { document: feature.clone(), summary: FixSummary::default() })
        }
        Some(geometry) => geometry,
    };

    let DocumentKind::Geometry(kind) = DocumentKind::of(geometry)? else {
        return Err(GeofixError::InvalidDocument {
            reason: "Feature \"geometry\" is not a geometry object".to_string(),
        });
    };

    let normalized = normalize_geometry(engine, kind, geometry, options)?;
    let summary = FixSummary::record(&normalized);

    let mut document = feature.clone();
    if let Some(members) = document.as_object_mut() {
        members.insert("geometry".to_string(), normalized.geometry);
    }
    Ok(FixedDocument { document, summary })
}

/// Position and `id` of a Feature, for error context
pub(crate) fn feature_location(index: usize, feature: &Value) -> FeatureLocation {
    let id = feature.get("id").filter(|id| !id.is_null()).map(Value::to_string);
    FeatureLocation::new(index, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_location() {
        let location = feature_location(2, &json!({"type": "Feature", "id": "a-1"}));
        assert_eq!(location.to_string(), "#2 (id \"a-1\")");

        let location = feature_location(0, &json!({"type": "Feature", "id": 17}));
        assert_eq!(location.id.as_deref(), Some("17"));

        let location = feature_location(5, &json!({"type": "Feature", "id": null}));
        assert_eq!(location.id, None);
    }

    #[test]
    fn test_summary_accumulates() {
        let mut total = FixSummary::default();
        total += FixSummary { geometries: 1, flipped: 1, repaired: 0, rewound: 0 };
        total += FixSummary { geometries: 2, flipped: 0, repaired: 1, rewound: 2 };

        assert_eq!(total, FixSummary { geometries: 3, flipped: 1, repaired: 1, rewound: 2 });
        assert!(total.changed());
        assert!(!FixSummary::default().changed());
    }
}
