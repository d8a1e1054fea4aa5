//! Real Bahía Blanca locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. The city is the default map
//! viewport, so these are the points a user would actually click.

use route_planner::geo::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon).expect("fixture coordinate in range")
    }
}

pub const CITY_LANDMARKS: &[Location] = &[
    Location::new("Plaza Rivadavia", -38.7183, -62.2661),
    Location::new("Teatro Municipal", -38.7172, -62.2646),
    Location::new("Estación Sud", -38.7243, -62.2624),
    Location::new("Parque de Mayo", -38.6930, -62.2512),
    Location::new("Universidad Nacional del Sur", -38.7008, -62.2694),
    Location::new("Puerto Ingeniero White", -38.7870, -62.2672),
];

/// Reference vector from the polyline format documentation.
pub const REFERENCE_ENCODED: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

/// The coordinates `REFERENCE_ENCODED` decodes to.
pub fn reference_points() -> Vec<Coordinate> {
    [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)]
        .iter()
        .map(|&(lat, lon)| Coordinate::new(lat, lon).expect("reference point in range"))
        .collect()
}
