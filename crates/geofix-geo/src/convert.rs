//! Conversions between GeoJSON geometry objects and `geo` geometries.
//!
//! Parsing checks the coordinate structure against the declared type before
//! building anything, so a short position or a wrongly nested array surfaces
//! as `MalformedGeometry` instead of a panic further down.

use geo::{Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use geofix_core::error::{GeofixError, Result};
use geofix_core::models::{DocumentKind, GeometryType};
use serde_json::Value;

/// Build a `geo` geometry from a GeoJSON geometry object declared as `kind`
pub fn geometry_from_json(kind: GeometryType, value: &Value) -> Result<Geometry<f64>> {
    let malformed = |reason: String| GeofixError::MalformedGeometry {
        geometry_type: kind.to_string(),
        reason,
    };

    let coordinates = || {
        value.get("coordinates").ok_or_else(|| malformed("missing \"coordinates\" member".to_string()))
    };

    let geometry = match kind {
        GeometryType::Point => {
            Geometry::Point(Point::from(position(coordinates()?).map_err(malformed)?))
        }
        GeometryType::LineString => {
            Geometry::LineString(line_string(coordinates()?).map_err(malformed)?)
        }
        GeometryType::Polygon => Geometry::Polygon(polygon(coordinates()?).map_err(malformed)?),
        GeometryType::MultiPoint => {
            let points = array(coordinates()?, "MultiPoint coordinates")
                .and_then(|items| {
                    items.iter().map(|p| position(p).map(Point::from)).collect::<std::result::Result<Vec<_>, _>>()
                })
                .map_err(malformed)?;
            Geometry::MultiPoint(MultiPoint::new(points))
        }
        GeometryType::MultiLineString => {
            let lines = array(coordinates()?, "MultiLineString coordinates")
                .and_then(|items| items.iter().map(line_string).collect::<std::result::Result<Vec<_>, _>>())
                .map_err(malformed)?;
            Geometry::MultiLineString(MultiLineString::new(lines))
        }
        GeometryType::MultiPolygon => {
            let polygons = array(coordinates()?, "MultiPolygon coordinates")
                .and_then(|items| items.iter().map(polygon).collect::<std::result::Result<Vec<_>, _>>())
                .map_err(malformed)?;
            Geometry::MultiPolygon(MultiPolygon::new(polygons))
        }
        GeometryType::GeometryCollection => {
            let members = value
                .get("geometries")
                .and_then(Value::as_array)
                .ok_or_else(|| malformed("missing \"geometries\" array".to_string()))?;

            let geometries = members
                .iter()
                .enumerate()
                .map(|(i, member)| match DocumentKind::of(member) {
                    Ok(DocumentKind::Geometry(member_kind)) => geometry_from_json(member_kind, member),
                    _ => Err(malformed(format!("member {} is not a geometry object", i))),
                })
                .collect::<Result<Vec<_>>>()?;
            Geometry::GeometryCollection(GeometryCollection(geometries))
        }
    };

    Ok(geometry)
}

fn array<'a>(value: &'a Value, what: &str) -> std::result::Result<&'a Vec<Value>, String> {
    value.as_array().ok_or_else(|| format!("{} must be an array, found {}", what, value))
}

/// A position needs at least two numbers; further components are ignored
fn position(value: &Value) -> std::result::Result<Coord<f64>, String> {
    let components = array(value, "position")?;
    if components.len() < 2 {
        return Err(format!(
            "position must have at least 2 components, found {}",
            components.len()
        ));
    }

    let component = |i: usize| {
        components[i]
            .as_f64()
            .ok_or_else(|| format!("position component {} is not a number", components[i]))
    };
    Ok(Coord { x: component(0)?, y: component(1)? })
}

fn line_string(value: &Value) -> std::result::Result<LineString<f64>, String> {
    let coords = array(value, "line")?
        .iter()
        .map(position)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(LineString::new(coords))
}

fn polygon(value: &Value) -> std::result::Result<Polygon<f64>, String> {
    let mut rings = array(value, "polygon")?
        .iter()
        .map(line_string)
        .collect::<std::result::Result<Vec<_>, _>>()?
        .into_iter();

    let exterior = rings.next().unwrap_or_else(|| LineString::new(vec![]));
    Ok(Polygon::new(exterior, rings.collect()))
}

/// Render a `geo` geometry as a GeoJSON geometry object.
///
/// Only `type` and `coordinates` (or `geometries`) are written; an empty
/// Polygon is written with an empty ring list.
pub fn geometry_to_json(geometry: &Geometry<f64>) -> Result<Value> {
    let rendered = geojson::Geometry::new(geojson_value(geometry));
    serde_json::to_value(&rendered).map_err(|e| {
        GeofixError::Serialization(format!("Failed to serialize geometry: {}", e))
    })
}

fn geojson_value(geometry: &Geometry<f64>) -> geojson::Value {
    match geometry {
        Geometry::Point(p) => geojson::Value::Point(vec![p.x(), p.y()]),
        Geometry::Line(l) => {
            geojson::Value::LineString(vec![vec![l.start.x, l.start.y], vec![l.end.x, l.end.y]])
        }
        Geometry::LineString(ls) => geojson::Value::LineString(positions(ls)),
        Geometry::Polygon(p) => geojson::Value::Polygon(rings(p)),
        Geometry::MultiPoint(mp) => {
            geojson::Value::MultiPoint(mp.iter().map(|p| vec![p.x(), p.y()]).collect())
        }
        Geometry::MultiLineString(mls) => {
            geojson::Value::MultiLineString(mls.iter().map(positions).collect())
        }
        Geometry::MultiPolygon(mp) => geojson::Value::MultiPolygon(mp.iter().map(rings).collect()),
        Geometry::GeometryCollection(gc) => geojson::Value::GeometryCollection(
            gc.iter().map(|member| geojson::Geometry::new(geojson_value(member))).collect(),
        ),
        Geometry::Rect(r) => geojson::Value::Polygon(rings(&r.to_polygon())),
        Geometry::Triangle(t) => geojson::Value::Polygon(rings(&t.to_polygon())),
    }
}

fn positions(line: &LineString<f64>) -> Vec<Vec<f64>> {
    line.coords().map(|c| vec![c.x, c.y]).collect()
}

fn rings(polygon: &Polygon<f64>) -> Vec<Vec<Vec<f64>>> {
    if polygon.exterior().0.is_empty() && polygon.interiors().is_empty() {
        return Vec::new();
    }
    std::iter::once(polygon.exterior()).chain(polygon.interiors()).map(positions).collect()
}
