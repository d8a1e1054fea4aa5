//! Planner error taxonomy.
//!
//! Every fallible operation in the crate returns one of these variants.
//! All of them are recoverable: the planner records the message in its
//! error slot for the UI and carries on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    /// The geocoding service returned zero results for the query.
    #[error("no results found for the requested address")]
    AddressNotFound,

    /// The routing service returned zero paths between the waypoints.
    #[error("no route found between the given waypoints")]
    NoRouteFound,

    /// Transport failure, non-success HTTP status, or an unparseable body.
    #[error("service request failed: {0}")]
    Service(String),

    /// A route was requested with fewer than two waypoints.
    #[error("at least 2 waypoints are required to calculate a route, got {found}")]
    InsufficientWaypoints { found: usize },

    /// The encoded polyline is truncated or contains bytes outside the
    /// encoding alphabet.
    #[error("malformed polyline encoding at byte {offset}")]
    InvalidEncoding { offset: usize },

    /// A waypoint index did not refer to an existing entry.
    #[error("waypoint index {index} is out of range (list has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Caller-supplied value rejected before any request was issued.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl PlannerError {
    /// Returns true if retrying the operation could succeed.
    ///
    /// Only transport-level failures qualify; semantic results such as
    /// `AddressNotFound` or `NoRouteFound` are final.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Service(_))
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        Self::Service(err.to_string())
    }
}
