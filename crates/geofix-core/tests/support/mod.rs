//! In-test geometry engines.
//!
//! `PlanarEngine` understands just enough of Polygons to exercise the
//! pipeline: a ring is valid when it is closed with at least four positions,
//! and correctly wound when exterior rings are counter-clockwise and holes
//! clockwise. `StubbornEngine` never converges and `IneffectiveRepairEngine`
//! hands invalid geometries back unchanged from `repair`.

#![allow(dead_code)]

use geofix_core::error::{GeofixError, Result};
use geofix_core::models::GeometryType;
use geofix_core::ports::GeometryEngine;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct PlanarEngine {
    pub repair_calls: AtomicUsize,
    pub winding_calls: AtomicUsize,
}

impl PlanarEngine {
    pub fn repairs(&self) -> usize {
        self.repair_calls.load(Ordering::SeqCst)
    }

    pub fn windings(&self) -> usize {
        self.winding_calls.load(Ordering::SeqCst)
    }
}

fn rings(geometry: &Value) -> Vec<Vec<[f64; 2]>> {
    geometry["coordinates"]
        .as_array()
        .map(|rings| {
            rings
                .iter()
                .map(|ring| {
                    ring.as_array()
                        .map(|positions| {
                            positions
                                .iter()
                                .map(|p| [p[0].as_f64().unwrap_or(0.0), p[1].as_f64().unwrap_or(0.0)])
                                .collect()
                        })
                        .unwrap_or_default()
                })
                .collect()
        })
        .unwrap_or_default()
}

fn signed_area(ring: &[[f64; 2]]) -> f64 {
    ring.windows(2).map(|w| w[0][0] * w[1][1] - w[1][0] * w[0][1]).sum::<f64>() / 2.0
}

fn is_closed(ring: &[[f64; 2]]) -> bool {
    ring.len() >= 4 && ring.first() == ring.last()
}

fn wrong_winding(index: usize, ring: &[[f64; 2]]) -> bool {
    let area = signed_area(ring);
    if index == 0 {
        area < 0.0
    } else {
        area > 0.0
    }
}

fn polygon(rings: Vec<Vec<[f64; 2]>>) -> Value {
    json!({"type": "Polygon", "coordinates": rings})
}

fn is_polygon(geometry: &Value) -> bool {
    geometry["type"] == "Polygon"
}

impl GeometryEngine for PlanarEngine {
    type Geometry = Value;

    fn parse(&self, kind: GeometryType, geometry: &Value) -> Result<Value> {
        let member = if kind == GeometryType::GeometryCollection { "geometries" } else { "coordinates" };
        if !geometry.get(member).is_some_and(Value::is_array) {
            return Err(GeofixError::MalformedGeometry {
                geometry_type: kind.to_string(),
                reason: format!("missing \"{}\" array", member),
            });
        }
        Ok(json!({"type": kind.as_str(), member: geometry[member].clone()}))
    }

    fn to_geojson(&self, geometry: &Value) -> Result<Value> {
        Ok(geometry.clone())
    }

    fn is_valid(&self, geometry: &Value) -> bool {
        !is_polygon(geometry) || rings(geometry).iter().all(|ring| is_closed(ring))
    }

    fn explain_invalidity(&self, geometry: &Value) -> String {
        if self.is_valid(geometry) {
            "Valid Geometry".to_string()
        } else {
            "Ring is not closed".to_string()
        }
    }

    fn repair(&self, geometry: &Value) -> Result<Value> {
        self.repair_calls.fetch_add(1, Ordering::SeqCst);
        let closed = rings(geometry)
            .into_iter()
            .map(|mut ring| {
                if let Some(first) = ring.first().copied() {
                    if ring.last() != Some(&first) {
                        ring.push(first);
                    }
                }
                ring
            })
            .collect();
        Ok(polygon(closed))
    }

    fn canonical_winding(&self, geometry: &Value) -> Value {
        self.winding_calls.fetch_add(1, Ordering::SeqCst);
        if !is_polygon(geometry) {
            return geometry.clone();
        }
        let wound = rings(geometry)
            .into_iter()
            .enumerate()
            .map(|(index, mut ring)| {
                if wrong_winding(index, &ring) {
                    ring.reverse();
                }
                ring
            })
            .collect();
        polygon(wound)
    }

    fn needs_rewinding(&self, geometry: &Value) -> bool {
        is_polygon(geometry)
            && rings(geometry).iter().enumerate().any(|(index, ring)| wrong_winding(index, ring))
    }
}

/// Claims every geometry needs rewinding, no matter how often it is rewound
#[derive(Default)]
pub struct StubbornEngine {
    pub winding_calls: AtomicUsize,
}

impl GeometryEngine for StubbornEngine {
    type Geometry = Value;

    fn parse(&self, _kind: GeometryType, geometry: &Value) -> Result<Value> {
        Ok(geometry.clone())
    }

    fn to_geojson(&self, geometry: &Value) -> Result<Value> {
        Ok(geometry.clone())
    }

    fn is_valid(&self, _geometry: &Value) -> bool {
        true
    }

    fn explain_invalidity(&self, _geometry: &Value) -> String {
        "Valid Geometry".to_string()
    }

    fn repair(&self, geometry: &Value) -> Result<Value> {
        Ok(geometry.clone())
    }

    fn canonical_winding(&self, geometry: &Value) -> Value {
        self.winding_calls.fetch_add(1, Ordering::SeqCst);
        geometry.clone()
    }

    fn needs_rewinding(&self, _geometry: &Value) -> bool {
        true
    }
}

/// Reports every geometry invalid; `repair` returns its input unchanged
#[derive(Default)]
pub struct IneffectiveRepairEngine {
    pub repair_calls: AtomicUsize,
}

impl IneffectiveRepairEngine {
    pub fn repairs(&self) -> usize {
        self.repair_calls.load(Ordering::SeqCst)
    }
}

impl GeometryEngine for IneffectiveRepairEngine {
    type Geometry = Value;

    fn parse(&self, _kind: GeometryType, geometry: &Value) -> Result<Value> {
        Ok(geometry.clone())
    }

    fn to_geojson(&self, geometry: &Value) -> Result<Value> {
        Ok(geometry.clone())
    }

    fn is_valid(&self, _geometry: &Value) -> bool {
        false
    }

    fn explain_invalidity(&self, _geometry: &Value) -> String {
        "Polygon.exterior: Self-intersection".to_string()
    }

    fn repair(&self, geometry: &Value) -> Result<Value> {
        self.repair_calls.fetch_add(1, Ordering::SeqCst);
        Ok(geometry.clone())
    }

    fn canonical_winding(&self, geometry: &Value) -> Value {
        geometry.clone()
    }

    fn needs_rewinding(&self, _geometry: &Value) -> bool {
        false
    }
}

/// Counter-clockwise unit square with integer coordinates
pub fn ccw_square() -> Value {
    json!({"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]]})
}

/// The same square wound clockwise
pub fn cw_square() -> Value {
    json!({"type": "Polygon", "coordinates": [[[0, 0], [0, 1], [1, 1], [1, 0], [0, 0]]]})
}
