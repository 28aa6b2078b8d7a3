//! Validity checks for `geo` geometries.
//!
//! The verdict comes from `geo`'s OGC validation. This module turns its errors
//! into `location: reason` lines such as `Polygon.exterior: Self-intersection`,
//! with nested members located as `GeometryCollection[1].Polygon.interior[0]`.

use geo::algorithm::validation::{
    InvalidGeometry, InvalidGeometryCollection, InvalidLineString, InvalidMultiLineString,
    InvalidMultiPoint, InvalidMultiPolygon, InvalidPolygon, RingRole,
};
use geo::{Geometry, Validation};

const NON_FINITE: &str = "Coordinates must be finite";

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    /// One line per error, `location: reason`, joined with `; `
    pub fn describe(&self) -> String {
        if self.is_valid {
            return "Valid Geometry".to_string();
        }
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.location, e.reason))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validate a geometry
pub fn validate_geometry(geometry: &Geometry<f64>) -> ValidationResult {
    let mut result = ValidationResult::valid();
    for error in geometry.validation_errors() {
        record(&mut result, "", &error);
    }
    result
}

fn at(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn record(result: &mut ValidationResult, prefix: &str, error: &InvalidGeometry) {
    match error {
        InvalidGeometry::InvalidPoint(_) => result.add_error(at(prefix, "Point"), NON_FINITE.to_string()),
        InvalidGeometry::InvalidMultiPoint(InvalidMultiPoint::InvalidPoint(index, _)) => {
            result.add_error(at(prefix, &format!("MultiPoint[{}]", index.0)), NON_FINITE.to_string())
        }
        InvalidGeometry::InvalidLineString(e) => record_line_string(result, &at(prefix, "LineString"), e),
        InvalidGeometry::InvalidMultiLineString(InvalidMultiLineString::InvalidLineString(index, e)) => {
            record_line_string(result, &at(prefix, &format!("MultiLineString[{}]", index.0)), e)
        }
        InvalidGeometry::InvalidPolygon(e) => record_polygon(result, &at(prefix, "Polygon"), e),
        InvalidGeometry::InvalidMultiPolygon(e) => record_multi_polygon(result, prefix, e),
        InvalidGeometry::InvalidGeometryCollection(InvalidGeometryCollection::InvalidGeometry(index, e)) => {
            record(result, &at(prefix, &format!("GeometryCollection[{}]", index.0)), e)
        }
        // Line, Rect and Triangle are never produced from GeoJSON
        other => result.add_error(at(prefix, "Geometry"), sentence(&other.to_string())),
    }
}

fn record_line_string(result: &mut ValidationResult, location: &str, error: &InvalidLineString) {
    match error {
        InvalidLineString::TooFewPoints => result.add_error(
            location.to_string(),
            "Too few points: at least 2 distinct required".to_string(),
        ),
        InvalidLineString::NonFiniteCoord(index) => {
            result.add_error(format!("{}[{}]", location, index.0), NON_FINITE.to_string())
        }
    }
}

fn ring_name(role: &RingRole) -> String {
    match role {
        RingRole::Exterior => "exterior".to_string(),
        RingRole::Interior(index) => format!("interior[{}]", index),
    }
}

fn record_polygon(result: &mut ValidationResult, location: &str, error: &InvalidPolygon) {
    let (role, reason) = match error {
        InvalidPolygon::TooFewPointsInRing(role) => {
            (role, "Too few points: ring must have at least 3 distinct points".to_string())
        }
        InvalidPolygon::SelfIntersection(role) => (role, "Self-intersection".to_string()),
        InvalidPolygon::NonFiniteCoord(role, index) => {
            (role, format!("Non-finite coordinate at index {}", index.0))
        }
        InvalidPolygon::InteriorRingNotContainedInExteriorRing(role) => {
            (role, "Hole lies outside shell".to_string())
        }
        InvalidPolygon::IntersectingRingsOnALine(role, other) => {
            (role, format!("Ring intersects {} on a line", ring_name(other)))
        }
        InvalidPolygon::IntersectingRingsOnAnArea(role, other) => {
            (role, format!("Ring overlaps {}", ring_name(other)))
        }
    };
    result.add_error(format!("{}.{}", location, ring_name(role)), reason);
}

fn record_multi_polygon(result: &mut ValidationResult, prefix: &str, error: &InvalidMultiPolygon) {
    match error {
        InvalidMultiPolygon::InvalidPolygon(index, e) => {
            record_polygon(result, &at(prefix, &format!("MultiPolygon[{}].Polygon", index.0)), e)
        }
        InvalidMultiPolygon::ElementsOverlaps(first, second) => result.add_error(
            at(prefix, &format!("MultiPolygon[{}]", first.0)),
            format!("Overlaps MultiPolygon[{}]", second.0),
        ),
        InvalidMultiPolygon::ElementsTouchOnALine(first, second) => result.add_error(
            at(prefix, &format!("MultiPolygon[{}]", first.0)),
            format!("Touches MultiPolygon[{}] on a line", second.0),
        ),
    }
}

fn sentence(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
