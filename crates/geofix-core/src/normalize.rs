//! Geometry normalization.
//!
//! Runs one geometry through axis resolution, validity repair and ring
//! rewinding. The loop is bounded: after a repair or a rewind the result is
//! checked exactly once more, and a geometry that still fails either check is
//! reported as unrepairable instead of being returned broken.

use crate::axis;
use crate::error::{GeofixError, Result};
use crate::models::{FixOptions, GeometryType};
use crate::ports::GeometryEngine;
use crate::report::WINDING_ADVISORY;
use crate::walker;
use serde_json::{Map, Value};

/// What the pipeline did to one geometry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairActions {
    /// Axis order was swapped
    pub flipped: bool,
    /// The engine's validity repair was applied
    pub repaired: bool,
    /// Rings were rewound to the right-hand rule
    pub rewound: bool,
}

impl RepairActions {
    /// Whether anything was changed
    pub fn any(&self) -> bool {
        self.flipped || self.repaired || self.rewound
    }
}

/// A geometry that is valid and correctly wound
#[derive(Debug, Clone)]
pub struct NormalizedGeometry {
    pub geometry: Value,
    pub actions: RepairActions,
}

/// Normalize one GeoJSON geometry object.
///
/// When nothing needs fixing, the input value is returned as-is. Otherwise the
/// engine's geometry replaces the coordinates, foreign members are kept and a
/// present `bbox` is recomputed.
pub fn normalize_geometry<E: GeometryEngine>(
    engine: &E,
    kind: GeometryType,
    geometry: &Value,
    options: &FixOptions,
) -> Result<NormalizedGeometry> {
    let (candidate, flipped) = axis::resolve_axis_order(geometry, kind, options.axis_mode);

    let parsed = engine.parse(kind, &candidate)?;
    let (fixed, mut actions) = converge(engine, kind, parsed)?;
    actions.flipped = flipped;

    let rendered = engine.to_geojson(&fixed)?;
    let engine_changed =
        actions.repaired || actions.rewound || !walker::positions_match(&candidate, &rendered);

    if !engine_changed && !flipped {
        return Ok(NormalizedGeometry { geometry: geometry.clone(), actions });
    }

    let mut output = if engine_changed { merge_members(&candidate, rendered) } else { candidate };
    refresh_bbox(&mut output);
    Ok(NormalizedGeometry { geometry: output, actions })
}

/// Validity check, orientation check and, if either changed something, one final check.
pub fn converge<E: GeometryEngine>(
    engine: &E,
    kind: GeometryType,
    geometry: E::Geometry,
) -> Result<(E::Geometry, RepairActions)> {
    let mut actions = RepairActions::default();

    let mut current = if engine.is_valid(&geometry) {
        geometry
    } else {
        tracing::info!(
            geometry_type = %kind,
            reason = %engine.explain_invalidity(&geometry),
            "Geometry is invalid, attempting repair"
        );
        actions.repaired = true;
        engine.repair(&geometry)?
    };

    if engine.needs_rewinding(&current) {
        tracing::info!(geometry_type = %kind, "Polygon rings violate the right-hand rule, rewinding");
        current = engine.canonical_winding(&current);
        actions.rewound = true;
    }

    if !actions.repaired && !actions.rewound {
        return Ok((current, actions));
    }

    let valid = engine.is_valid(&current);
    let needs_rewinding = engine.needs_rewinding(&current);
    if valid && !needs_rewinding {
        tracing::debug!(geometry_type = %kind, ?actions, "Geometry repaired");
        return Ok((current, actions));
    }

    let mut reasons = Vec::new();
    if !valid {
        reasons.push(engine.explain_invalidity(&current));
    }
    if needs_rewinding {
        reasons.push(WINDING_ADVISORY.to_string());
    }
    Err(GeofixError::UnrepairableGeometry { explanation: reasons.join("; "), needs_rewinding })
}

/// Engine output for `type`/`coordinates`/`geometries`, every other member from `original`
fn merge_members(original: &Value, rendered: Value) -> Value {
    let Value::Object(rendered) = rendered else {
        return rendered;
    };
    let Some(original) = original.as_object() else {
        return Value::Object(rendered);
    };

    let mut merged = Map::with_capacity(original.len().max(rendered.len()));
    for (key, value) in original {
        match key.as_str() {
            "type" | "coordinates" | "geometries" => {}
            _ => {
                merged.insert(key.clone(), value.clone());
            }
        }
    }
    for (key, value) in rendered {
        let value = match (key.as_str(), original.get("geometries")) {
            ("geometries", Some(Value::Array(members))) => merge_geometries(members, value),
            _ => value,
        };
        merged.insert(key, value);
    }
    Value::Object(merged)
}

/// Collection members are matched by position; if the count changed the engine's list stands
fn merge_geometries(original: &[Value], rendered: Value) -> Value {
    match rendered {
        Value::Array(members) if members.len() == original.len() => Value::Array(
            original
                .iter()
                .zip(members)
                .map(|(before, after)| merge_members(before, after))
                .collect(),
        ),
        other => other,
    }
}

/// Recompute `bbox` members from the coordinates they describe, recursing into collections
fn refresh_bbox(geometry: &mut Value) {
    let Some(members) = geometry.as_object_mut() else {
        return;
    };

    if let Some(Value::Array(children)) = members.get_mut("geometries") {
        children.iter_mut().for_each(refresh_bbox);
    }

    if !members.contains_key("bbox") {
        return;
    }

    let source = members.get("coordinates").or_else(|| members.get("geometries"));
    match source.and_then(walker::bounds) {
        Some(bounds) => {
            members.insert("bbox".to_string(), serde_json::json!(bounds));
        }
        None => {
            members.remove("bbox");
        }
    }
}
