//! Integration tests for the geometry normalization loop
//!
//! These tests drive `normalize_geometry` through in-test engines to check
//! the repair/rewind ordering, the bounded final check and the axis decision.

mod support;

use geofix_core::models::{AxisMode, FixOptions, GeometryType};
use geofix_core::normalize::normalize_geometry;
use geofix_core::GeofixError;
use serde_json::json;
use support::{ccw_square, cw_square, IneffectiveRepairEngine, PlanarEngine, StubbornEngine};

fn auto() -> FixOptions {
    FixOptions::new(AxisMode::FlipIfOutOfRange)
}

#[test]
fn test_valid_geometry_is_returned_untouched() {
    let engine = PlanarEngine::default();
    let geometry = ccw_square();

    let normalized = normalize_geometry(&engine, GeometryType::Polygon, &geometry, &auto()).unwrap();

    assert_eq!(normalized.geometry, geometry);
    assert_eq!(serde_json::to_string(&normalized.geometry).unwrap(), geometry.to_string());
    assert!(!normalized.actions.any());
    assert_eq!(engine.repairs(), 0);
    assert_eq!(engine.windings(), 0);
}

#[test]
fn test_wrong_winding_only_rewinds() {
    let engine = PlanarEngine::default();

    let normalized =
        normalize_geometry(&engine, GeometryType::Polygon, &cw_square(), &auto()).unwrap();

    assert!(normalized.actions.rewound);
    assert!(!normalized.actions.repaired);
    assert_eq!(engine.repairs(), 0);
    assert_eq!(engine.windings(), 1);
    assert_eq!(
        normalized.geometry["coordinates"],
        json!([[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]])
    );
}

#[test]
fn test_unclosed_ring_is_repaired() {
    let engine = PlanarEngine::default();
    let geometry = json!({"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1]]]});

    let normalized = normalize_geometry(&engine, GeometryType::Polygon, &geometry, &auto()).unwrap();

    assert!(normalized.actions.repaired);
    assert!(!normalized.actions.rewound);
    assert_eq!(engine.repairs(), 1);
    let ring = normalized.geometry["coordinates"][0].as_array().unwrap();
    assert_eq!(ring.len(), 5);
    assert_eq!(ring.first(), ring.last());
}

#[test]
fn test_repair_then_rewind() {
    let engine = PlanarEngine::default();
    let geometry = json!({"type": "Polygon", "coordinates": [[[0, 0], [0, 1], [1, 1], [1, 0]]]});

    let normalized = normalize_geometry(&engine, GeometryType::Polygon, &geometry, &auto()).unwrap();

    assert!(normalized.actions.repaired);
    assert!(normalized.actions.rewound);
    assert_eq!(engine.repairs(), 1);
    assert_eq!(engine.windings(), 1);
}

#[test]
fn test_non_convergent_engine_fails_after_one_extra_pass() {
    let engine = StubbornEngine::default();

    let err = normalize_geometry(&engine, GeometryType::Polygon, &ccw_square(), &auto()).unwrap_err();

    match err {
        GeofixError::UnrepairableGeometry { explanation, needs_rewinding } => {
            assert!(needs_rewinding);
            assert!(explanation.contains("right-hand rule"));
        }
        other => panic!("Expected UnrepairableGeometry, got {:?}", other),
    }
    assert_eq!(engine.winding_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn test_repair_that_leaves_geometry_invalid_is_unrepairable() {
    let engine = IneffectiveRepairEngine::default();

    let err = normalize_geometry(&engine, GeometryType::Polygon, &ccw_square(), &auto()).unwrap_err();

    match err {
        GeofixError::UnrepairableGeometry { explanation, needs_rewinding } => {
            assert!(!needs_rewinding);
            assert_eq!(explanation, "Polygon.exterior: Self-intersection");
        }
        other => panic!("Expected UnrepairableGeometry, got {:?}", other),
    }
    assert_eq!(engine.repairs(), 1);
}

#[test]
fn test_ambiguous_axis_order_is_not_an_error() {
    let engine = PlanarEngine::default();
    let geometry = json!({"type": "Point", "coordinates": [-200.0, 40.0]});

    let normalized = normalize_geometry(&engine, GeometryType::Point, &geometry, &auto()).unwrap();

    assert!(!normalized.actions.flipped);
    assert_eq!(normalized.geometry, geometry);
}

#[test]
fn test_latitude_first_polygon_is_flipped_and_rewound() {
    let engine = PlanarEngine::default();
    let geometry = json!({
        "type": "Polygon",
        "coordinates": [[[-8.0, 115.0], [-8.0, 116.0], [-9.0, 116.0], [-9.0, 115.0], [-8.0, 115.0]]],
        "bbox": [-9.0, 115.0, -8.0, 116.0]
    });

    let normalized = normalize_geometry(&engine, GeometryType::Polygon, &geometry, &auto()).unwrap();

    assert!(normalized.actions.flipped);
    assert!(normalized.actions.rewound);
    assert_eq!(normalized.geometry["coordinates"][0][0], json!([115.0, -8.0]));
    assert_eq!(normalized.geometry["bbox"], json!([115.0, -9.0, 116.0, -8.0]));
}

#[test]
fn test_never_flip_keeps_latitude_first() {
    let engine = PlanarEngine::default();
    let geometry = json!({"type": "Point", "coordinates": [-8.5, 115.2]});

    let normalized = normalize_geometry(
        &engine,
        GeometryType::Point,
        &geometry,
        &FixOptions::new(AxisMode::NeverFlip),
    )
    .unwrap();

    assert_eq!(normalized.geometry, geometry);
}

#[test]
fn test_always_flip_swaps_in_range_point() {
    let engine = PlanarEngine::default();
    let geometry = json!({"type": "Point", "coordinates": [25, 50], "title": "kept"});

    let normalized = normalize_geometry(
        &engine,
        GeometryType::Point,
        &geometry,
        &FixOptions::new(AxisMode::AlwaysFlip),
    )
    .unwrap();

    assert!(normalized.actions.flipped);
    assert_eq!(normalized.geometry, json!({"type": "Point", "coordinates": [50, 25], "title": "kept"}));
}

#[test]
fn test_malformed_geometry_propagates() {
    let engine = PlanarEngine::default();
    let geometry = json!({"type": "Polygon", "coordinates": "nope"});

    let err = normalize_geometry(&engine, GeometryType::Polygon, &geometry, &auto()).unwrap_err();
    assert!(matches!(err, GeofixError::MalformedGeometry { .. }));
}
