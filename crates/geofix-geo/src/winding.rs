//! Ring orientation.
//!
//! The right-hand rule: exterior rings counter-clockwise, holes clockwise.

use geo::algorithm::orient::{Direction, Orient};
use geo::algorithm::winding_order::{Winding, WindingOrder};
use geo::{Geometry, GeometryCollection, LineString, Polygon};

/// Rewind every polygon ring to the right-hand rule
pub fn orient(geometry: &Geometry<f64>) -> Geometry<f64> {
    match geometry {
        Geometry::Polygon(p) => Geometry::Polygon(p.orient(Direction::Default)),
        Geometry::MultiPolygon(mp) => Geometry::MultiPolygon(mp.orient(Direction::Default)),
        Geometry::GeometryCollection(gc) => {
            Geometry::GeometryCollection(GeometryCollection(gc.iter().map(orient).collect()))
        }
        other => other.clone(),
    }
}

/// Whether any ring is wound against the right-hand rule
pub fn needs_rewinding(geometry: &Geometry<f64>) -> bool {
    match geometry {
        Geometry::Polygon(p) => polygon_misoriented(p),
        Geometry::MultiPolygon(mp) => mp.iter().any(polygon_misoriented),
        Geometry::GeometryCollection(gc) => gc.iter().any(needs_rewinding),
        _ => false,
    }
}

fn polygon_misoriented(polygon: &Polygon<f64>) -> bool {
    wound(polygon.exterior(), WindingOrder::Clockwise)
        || polygon.interiors().iter().any(|ring| wound(ring, WindingOrder::CounterClockwise))
}

fn wound(ring: &LineString<f64>, order: WindingOrder) -> bool {
    ring.winding_order() == Some(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, MultiPolygon, Point};

    fn cw_square() -> Polygon<f64> {
        polygon![(x: 0.0, y: 0.0), (x: 0.0, y: 1.0), (x: 1.0, y: 1.0), (x: 1.0, y: 0.0)]
    }

    #[test]
    fn test_cw_exterior_needs_rewinding() {
        let geometry = Geometry::Polygon(cw_square());
        assert!(needs_rewinding(&geometry));

        let oriented = orient(&geometry);
        assert!(!needs_rewinding(&oriented));

        let Geometry::Polygon(p) = oriented else { panic!("Expected Polygon") };
        assert_eq!(p.exterior().winding_order(), Some(WindingOrder::CounterClockwise));
    }

    #[test]
    fn test_ccw_hole_needs_rewinding() {
        let ccw_hole = LineString::from(vec![(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0), (1.0, 1.0)]);
        let shell = LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
        let polygon = Polygon::new(shell, vec![ccw_hole]);

        assert!(needs_rewinding(&Geometry::Polygon(polygon.clone())));

        let Geometry::Polygon(oriented) = orient(&Geometry::Polygon(polygon)) else {
            panic!("Expected Polygon")
        };
        assert_eq!(oriented.interiors()[0].winding_order(), Some(WindingOrder::Clockwise));
    }

    #[test]
    fn test_orient_is_idempotent() {
        let once = orient(&Geometry::MultiPolygon(MultiPolygon::new(vec![cw_square()])));
        assert_eq!(orient(&once), once);
    }

    #[test]
    fn test_non_polygonal_untouched() {
        let point = Geometry::Point(Point::new(1.0, 2.0));
        assert!(!needs_rewinding(&point));
        assert_eq!(orient(&point), point);
    }

    #[test]
    fn test_collection_member() {
        let collection =
            Geometry::GeometryCollection(GeometryCollection(vec![Geometry::Polygon(cw_square())]));
        assert!(needs_rewinding(&collection));
        assert!(!needs_rewinding(&orient(&collection)));
    }
}
