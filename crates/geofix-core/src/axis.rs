//! Latitude/longitude axis-order heuristic.

use crate::models::{AxisMode, GeometryType};
use crate::walker;
use serde_json::{Map, Value};

/// Longitude bound in degrees
pub const MAX_LONGITUDE: f64 = 180.0;

/// Web Mercator latitude bound in degrees
pub const MAX_LATITUDE: f64 = 85.05112878;

/// Whether `(x, y)` reads as an in-range `(longitude, latitude)`
pub fn is_lon_lat(x: f64, y: f64) -> bool {
    (-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&x) && (-MAX_LATITUDE..=MAX_LATITUDE).contains(&y)
}

/// Recommend swapping a pair iff it is out of range as-is and in range swapped.
///
/// Ambiguous pairs (both readings valid, or neither) are never flipped.
pub fn should_flip(coordinate: [f64; 2]) -> bool {
    let [x, y] = coordinate;
    !is_lon_lat(x, y) && is_lon_lat(y, x)
}

/// OR of [`should_flip`] over every pair of the geometry
pub fn should_flip_geometry(geometry: &Value) -> bool {
    walker::any_pair(geometry, &mut |pair| pair.as_f64().is_some_and(should_flip))
}

/// Swap the axes of every pair, preserving all nesting
pub fn flip(geometry: &Value) -> Value {
    walker::map_pairs(geometry, &mut |pair| pair.swapped())
}

/// Members of a geometry object that carry coordinates
const COORDINATE_MEMBERS: [&str; 2] = ["coordinates", "geometries"];

/// Apply the axis mode to one geometry object.
///
/// Only the coordinate-bearing members are considered and rewritten; foreign
/// members and `bbox` are left alone. Returns the geometry and whether it was flipped.
pub fn resolve_axis_order(geometry: &Value, kind: GeometryType, mode: AxisMode) -> (Value, bool) {
    let Some(members) = geometry.as_object() else {
        return (geometry.clone(), false);
    };

    let flip_it = match mode {
        AxisMode::AlwaysFlip => true,
        AxisMode::NeverFlip => false,
        AxisMode::FlipIfOutOfRange => COORDINATE_MEMBERS
            .iter()
            .filter_map(|key| members.get(*key))
            .any(should_flip_geometry),
    };

    if !flip_it {
        return (geometry.clone(), false);
    }

    tracing::debug!(geometry_type = %kind, ?mode, "Flipping coordinate axis order");
    let flipped: Map<String, Value> = members
        .iter()
        .map(|(key, value)| {
            if COORDINATE_MEMBERS.contains(&key.as_str()) {
                (key.clone(), flip(value))
            } else {
                (key.clone(), value.clone())
            }
        })
        .collect();
    (Value::Object(flipped), true)
}
