//! Error types for geofix

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeofixError {
    // Geometry errors
    #[error("Malformed {geometry_type} geometry: {reason}")]
    MalformedGeometry {
        geometry_type: String,
        reason: String,
    },

    #[error("Unable to repair geometry: {explanation} (needs rewinding: {needs_rewinding})")]
    UnrepairableGeometry {
        explanation: String,
        needs_rewinding: bool,
    },

    // Document errors
    #[error("Invalid GeoJSON document: {reason}")]
    InvalidDocument { reason: String },

    #[error("Failed to process feature {location}")]
    Feature {
        location: FeatureLocation,
        #[source]
        source: Box<GeofixError>,
    },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GeofixError {
    /// Attach the position of the enclosing Feature to an error
    pub fn in_feature(self, location: FeatureLocation) -> Self {
        GeofixError::Feature { location, source: Box::new(self) }
    }

    /// The innermost error, skipping any Feature context
    pub fn root_cause(&self) -> &GeofixError {
        match self {
            GeofixError::Feature { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Position of a Feature inside its document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureLocation {
    /// Zero-based index within the FeatureCollection
    pub index: usize,
    /// The Feature `id` member, rendered as text
    pub id: Option<String>,
}

impl FeatureLocation {
    pub fn new(index: usize, id: Option<String>) -> Self {
        Self { index, id }
    }
}

impl fmt::Display for FeatureLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "#{} (id {})", self.index, id),
            None => write!(f, "#{}", self.index),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeofixError>;
