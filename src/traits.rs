//! Provider seams between the planner and the remote services.
//!
//! The planner only ever talks to these traits. Concrete HTTP clients
//! live in [`crate::geocode`] and [`crate::router`]; tests supply
//! in-memory fakes.

use async_trait::async_trait;

use crate::error::PlannerError;
use crate::geo::{Coordinate, TravelProfile};

/// A resolved address: the coordinate plus the display string the service
/// returned for it, when one was available.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub point: Coordinate,
    pub display_name: Option<String>,
}

/// Raw outcome of a route calculation: the still-encoded geometry and the
/// total distance in meters. Decoding and unit conversion happen in the
/// planner.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePath {
    pub points: String,
    pub distance_m: f64,
}

/// Forward and reverse geocoding against an external service.
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Resolve a street address to a coordinate.
    ///
    /// Fails with [`PlannerError::AddressNotFound`] when the service
    /// returns zero results.
    async fn search(
        &self,
        street: &str,
        number: &str,
        city: &str,
    ) -> Result<GeocodeResult, PlannerError>;

    /// Resolve a coordinate to a human-readable address.
    ///
    /// Fails with [`PlannerError::AddressNotFound`] when the service has
    /// no display name for the location.
    async fn reverse(&self, point: Coordinate) -> Result<String, PlannerError>;
}

/// Route calculation against an external service.
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Calculate a route visiting `waypoints` in order.
    ///
    /// Implementations must reject fewer than two waypoints with
    /// [`PlannerError::InsufficientWaypoints`] before any network I/O.
    async fn route(
        &self,
        waypoints: &[Coordinate],
        profile: TravelProfile,
    ) -> Result<RoutePath, PlannerError>;
}
