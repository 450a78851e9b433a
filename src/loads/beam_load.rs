//! Concentrated loads on the beam

use serde::{Deserialize, Serialize};

/// Kind of a concentrated load
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoadKind {
    /// Transverse force (positive up)
    Point,
    /// Couple (positive counter-clockwise)
    Moment,
}

/// A point force or point moment applied at a location along the beam.
///
/// Loads are immutable once created; a changed load is a new `Load`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Load {
    kind: LoadKind,
    magnitude: f64,
    location: f64,
}

impl Load {
    /// Create a new load
    pub fn new(kind: LoadKind, magnitude: f64, location: f64) -> Self {
        Self {
            kind,
            magnitude,
            location,
        }
    }

    /// Create a transverse point force
    pub fn point(magnitude: f64, location: f64) -> Self {
        Self::new(LoadKind::Point, magnitude, location)
    }

    /// Create a point moment
    pub fn moment(magnitude: f64, location: f64) -> Self {
        Self::new(LoadKind::Moment, magnitude, location)
    }

    pub fn kind(&self) -> LoadKind {
        self.kind
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn location(&self) -> f64 {
        self.location
    }

    /// Force and moment components as `[force, moment]`
    pub fn as_array(&self) -> [f64; 2] {
        match self.kind {
            LoadKind::Point => [self.magnitude, 0.0],
            LoadKind::Moment => [0.0, self.magnitude],
        }
    }
}
