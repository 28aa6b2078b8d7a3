//! GeoJSON type tags.
//!
//! Documents are kept as `serde_json::Value` trees so that every member the
//! pipeline does not touch survives byte-for-byte. These tags are the typed
//! view used to dispatch on the `type` member.

use crate::error::{GeofixError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Geometry type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    /// Parse a GeoJSON geometry `type` tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Point" => Some(GeometryType::Point),
            "LineString" => Some(GeometryType::LineString),
            "Polygon" => Some(GeometryType::Polygon),
            "MultiPoint" => Some(GeometryType::MultiPoint),
            "MultiLineString" => Some(GeometryType::MultiLineString),
            "MultiPolygon" => Some(GeometryType::MultiPolygon),
            "GeometryCollection" => Some(GeometryType::GeometryCollection),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level tag of a GeoJSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    FeatureCollection,
    Feature,
    Geometry(GeometryType),
}

impl DocumentKind {
    /// Read the `type` member of a GeoJSON object
    pub fn of(value: &Value) -> Result<Self> {
        let tag = value.get("type").and_then(Value::as_str).ok_or_else(|| {
            GeofixError::InvalidDocument { reason: "object has no string \"type\" member".to_string() }
        })?;

        match tag {
            "FeatureCollection" => Ok(DocumentKind::FeatureCollection),
            "Feature" => Ok(DocumentKind::Feature),
            other => GeometryType::from_tag(other).map(DocumentKind::Geometry).ok_or_else(|| {
                GeofixError::InvalidDocument { reason: format!("unknown GeoJSON type \"{}\"", other) }
            }),
        }
    }
}
