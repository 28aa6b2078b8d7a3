//! geofix geo - geometry engine for geofix
//!
//! This crate implements the `GeometryEngine` port from `geofix-core` with
//! the `geo` crate: GeoJSON conversion, validity checks, repair and ring
//! orientation.

pub mod convert;
pub mod engine;
pub mod repair;
pub mod validation;
pub mod winding;

pub use engine::GeoEngine;
