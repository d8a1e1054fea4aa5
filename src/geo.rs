//! Geographic primitives: validated coordinates and travel profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// A geographic coordinate (latitude, longitude) in degrees.
///
/// Construction through [`Coordinate::new`] guarantees both components are
/// finite and within range, so downstream code never re-checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

/// Default viewport center for a UI before any waypoint exists
/// (Bahía Blanca, Argentina).
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    lat: -38.716666666667,
    lon: -62.266666666667,
};

impl Coordinate {
    /// Create a coordinate, validating ranges.
    ///
    /// Latitude must be in [-90, 90] and longitude in [-180, 180]; both
    /// must be finite.
    pub fn new(lat: f64, lon: f64) -> Result<Self, PlannerError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(PlannerError::InvalidInput(format!(
                "coordinate components must be finite numbers, got ({lat}, {lon})"
            )));
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(PlannerError::InvalidInput(format!(
                "coordinate ({lat}, {lon}) outside valid range ([-90, 90], [-180, 180])"
            )));
        }
        Ok(Self { lat, lon })
    }

    pub const fn lat(&self) -> f64 {
        self.lat
    }

    pub const fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

/// Routing mode selecting the road-graph weighting of the routing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelProfile {
    #[default]
    Car,
    Truck,
}

impl TravelProfile {
    /// Wire value used in routing requests.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Truck => "truck",
        }
    }
}

impl fmt::Display for TravelProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
