use crate::{convert, repair, validation, winding};
use geo::Geometry;
use geofix_core::error::Result;
use geofix_core::models::GeometryType;
use geofix_core::ports::GeometryEngine;
use serde_json::Value;

/// [`GeometryEngine`] backed by the `geo` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoEngine;

impl GeoEngine {
    pub fn new() -> Self {
        Self
    }
}

impl GeometryEngine for GeoEngine {
    type Geometry = Geometry<f64>;

    fn parse(&self, kind: GeometryType, geometry: &Value) -> Result<Self::Geometry> {
        convert::geometry_from_json(kind, geometry)
    }

    fn to_geojson(&self, geometry: &Self::Geometry) -> Result<Value> {
        convert::geometry_to_json(geometry)
    }

    fn is_valid(&self, geometry: &Self::Geometry) -> bool {
        validation::validate_geometry(geometry).is_valid
    }

    fn explain_invalidity(&self, geometry: &Self::Geometry) -> String {
        validation::validate_geometry(geometry).describe()
    }

    fn repair(&self, geometry: &Self::Geometry) -> Result<Self::Geometry> {
        repair::make_valid(geometry)
    }

    fn canonical_winding(&self, geometry: &Self::Geometry) -> Self::Geometry {
        winding::orient(geometry)
    }

    fn needs_rewinding(&self, geometry: &Self::Geometry) -> bool {
        winding::needs_rewinding(geometry)
    }
}
