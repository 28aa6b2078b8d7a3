//! Best-effort repair of invalid geometries.
//!
//! Non-finite and repeated positions are dropped and rings are closed.
//! Polygonal geometries are then rebuilt through a boolean union, which splits
//! self-intersecting rings, moves holes that escaped their shell out into
//! separate polygons and dissolves overlapping MultiPolygon members. A
//! Polygon that collapses entirely falls back to its outline as a LineString,
//! or to a Point; collapsed MultiPolygon members are kept that way next to
//! the dissolved polygons in a GeometryCollection.

use geo::{BooleanOps, Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use geofix_core::error::{GeofixError, Result};

/// Repair a geometry. The result may have a different type than the input.
pub fn make_valid(geometry: &Geometry<f64>) -> Result<Geometry<f64>> {
    let repaired = match geometry {
        Geometry::Point(p) if is_finite(&p.0) => Geometry::Point(*p),
        Geometry::Point(_) => return Err(nothing_left()),
        Geometry::Line(l) => repair_line(&LineString::new(vec![l.start, l.end]))?,
        Geometry::LineString(ls) => repair_line(ls)?,
        Geometry::Polygon(p) => repair_polygon(p)?,
        Geometry::MultiPoint(mp) => {
            let points: Vec<Point<f64>> = mp.iter().copied().filter(|p| is_finite(&p.0)).collect();
            if points.is_empty() {
                return Err(nothing_left());
            }
            Geometry::MultiPoint(MultiPoint::new(points))
        }
        Geometry::MultiLineString(mls) => {
            let lines: Vec<LineString<f64>> = mls.iter().filter_map(clean_line).collect();
            if lines.is_empty() {
                return Err(nothing_left());
            }
            Geometry::MultiLineString(MultiLineString::new(lines))
        }
        Geometry::MultiPolygon(mp) => repair_multi_polygon(mp)?,
        Geometry::GeometryCollection(gc) => Geometry::GeometryCollection(GeometryCollection(
            gc.iter().map(make_valid).collect::<Result<Vec<_>>>()?,
        )),
        Geometry::Rect(_) | Geometry::Triangle(_) => geometry.clone(),
    };

    tracing::trace!(from = geometry_name(geometry), to = geometry_name(&repaired), "Repaired geometry");
    Ok(repaired)
}

fn unrepairable(explanation: &str) -> GeofixError {
    GeofixError::UnrepairableGeometry { explanation: explanation.to_string(), needs_rewinding: false }
}

fn nothing_left() -> GeofixError {
    unrepairable("no finite positions remain")
}

fn is_finite(coord: &Coord<f64>) -> bool {
    coord.x.is_finite() && coord.y.is_finite()
}

/// Finite positions with consecutive repeats removed
fn cleaned_coords(line: &LineString<f64>) -> Vec<Coord<f64>> {
    let mut coords: Vec<Coord<f64>> = line.coords().copied().filter(is_finite).collect();
    coords.dedup();
    coords
}

fn clean_line(line: &LineString<f64>) -> Option<LineString<f64>> {
    let coords = cleaned_coords(line);
    (coords.len() >= 2).then(|| LineString::new(coords))
}

fn repair_line(line: &LineString<f64>) -> Result<Geometry<f64>> {
    if line.0.is_empty() {
        return Ok(Geometry::LineString(line.clone()));
    }
    collapse(cleaned_coords(line))
}

/// A LineString if at least two positions remain, else a Point
fn collapse(coords: Vec<Coord<f64>>) -> Result<Geometry<f64>> {
    match coords.len() {
        0 => Err(nothing_left()),
        1 => Ok(Geometry::Point(Point::from(coords[0]))),
        _ => Ok(Geometry::LineString(LineString::new(coords))),
    }
}

fn clean_ring(ring: &LineString<f64>) -> Option<LineString<f64>> {
    let mut coords = cleaned_coords(ring);
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }
    if coords.len() < 3 {
        return None;
    }

    let mut cleaned = LineString::new(coords);
    cleaned.close();
    Some(cleaned)
}

fn clean_polygon(polygon: &Polygon<f64>) -> Option<Polygon<f64>> {
    let exterior = clean_ring(polygon.exterior())?;
    let interiors = polygon.interiors().iter().filter_map(clean_ring).collect();
    Some(Polygon::new(exterior, interiors))
}

/// Rebuild a polygon's rings without crossings
fn resolve(polygon: Polygon<f64>) -> MultiPolygon<f64> {
    MultiPolygon::new(vec![polygon]).union(&MultiPolygon::new(vec![]))
}

fn repair_polygon(polygon: &Polygon<f64>) -> Result<Geometry<f64>> {
    let mut resolved = match clean_polygon(polygon) {
        Some(cleaned) => resolve(cleaned),
        None => MultiPolygon::new(vec![]),
    };

    match resolved.0.len() {
        0 => collapse(outline(polygon)),
        1 => Ok(Geometry::Polygon(resolved.0.remove(0))),
        _ => Ok(Geometry::MultiPolygon(resolved)),
    }
}

/// Dissolve overlapping members; a member without area is kept as its outline
fn repair_multi_polygon(multi_polygon: &MultiPolygon<f64>) -> Result<Geometry<f64>> {
    let mut dissolved = MultiPolygon::new(vec![]);
    let mut collapsed = Vec::new();

    for (index, member) in multi_polygon.iter().enumerate() {
        let resolved = clean_polygon(member).map(resolve).unwrap_or_else(|| MultiPolygon::new(vec![]));
        if !resolved.0.is_empty() {
            dissolved = dissolved.union(&resolved);
            continue;
        }

        match collapse(outline(member)) {
            Ok(remainder) => {
                tracing::debug!(member = index, to = geometry_name(&remainder), "MultiPolygon member has no area");
                collapsed.push(remainder);
            }
            Err(_) => tracing::debug!(member = index, "Dropping MultiPolygon member without finite positions"),
        }
    }

    let mut parts = Vec::with_capacity(collapsed.len() + 1);
    if !dissolved.0.is_empty() {
        parts.push(Geometry::MultiPolygon(dissolved));
    }
    parts.extend(collapsed);

    match parts.len() {
        0 => Err(unrepairable("no MultiPolygon member has finite positions")),
        1 => Ok(parts.remove(0)),
        _ => Ok(Geometry::GeometryCollection(GeometryCollection(parts))),
    }
}

/// Exterior positions of a polygon without the closing repeat
fn outline(polygon: &Polygon<f64>) -> Vec<Coord<f64>> {
    let mut coords = cleaned_coords(polygon.exterior());
    if coords.len() > 2 && coords.first() == coords.last() {
        coords.pop();
    }
    coords
}

fn geometry_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
