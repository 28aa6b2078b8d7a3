//! Port trait definitions
//!
//! The computational geometry behind validity testing, repair and ring
//! winding lives in an adapter crate; the pipeline only talks to it through
//! this trait.

use crate::error::Result;
use crate::models::GeometryType;
use serde_json::Value;

/// Port for a geometry engine
pub trait GeometryEngine: Sync {
    /// Engine-native geometry value
    type Geometry: Clone + std::fmt::Debug;

    /// Parse a GeoJSON geometry object declared as `kind`.
    ///
    /// Fails with `MalformedGeometry` when the coordinate nesting or position
    /// arity does not match the declared type.
    fn parse(&self, kind: GeometryType, geometry: &Value) -> Result<Self::Geometry>;

    /// Convert back to a GeoJSON geometry object (`type` plus `coordinates` or `geometries`)
    fn to_geojson(&self, geometry: &Self::Geometry) -> Result<Value>;

    /// Whether the geometry is topologically valid
    fn is_valid(&self, geometry: &Self::Geometry) -> bool;

    /// Human-readable reason the geometry is invalid
    fn explain_invalidity(&self, geometry: &Self::Geometry) -> String;

    /// Best-effort minimal repair. The result may have a different type.
    fn repair(&self, geometry: &Self::Geometry) -> Result<Self::Geometry>;

    /// Rewrite polygon rings to the right-hand rule. Identity for non-polygonal types.
    fn canonical_winding(&self, geometry: &Self::Geometry) -> Self::Geometry;

    /// Whether [`GeometryEngine::canonical_winding`] would change the geometry
    fn needs_rewinding(&self, geometry: &Self::Geometry) -> bool;
}
