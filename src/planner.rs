//! Route planner: single owner of waypoints, route geometry and distance.
//!
//! All mutation goes through `&mut self` methods, so one logical event
//! loop drives the planner and no locking is needed. Remote calls are
//! issued against the provider traits; responses only land if the request
//! that produced them is still the latest one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::error::PlannerError;
use crate::geo::{Coordinate, TravelProfile};
use crate::polyline::Polyline;
use crate::retry::{RetryPolicy, with_retry};
use crate::traits::{GeocodeResult, GeocodingProvider, RoutePath, RoutingProvider};

/// What the planner is currently waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlannerPhase {
    #[default]
    Idle,
    Searching,
    RouteCalculating,
}

/// Decoded route geometry and its total distance in kilometers (rounded
/// to two decimals). Kept as one value so geometry and distance can only
/// ever be set or cleared together.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedRoute {
    pub path: Polyline,
    pub distance_km: f64,
}

/// Handle for one issued route request.
///
/// A ticket is superseded as soon as a newer request is issued or the
/// waypoint list changes; applying a superseded ticket's response is a
/// no-op, and in-flight work can poll [`RouteTicket::is_superseded`] to
/// stop early.
#[derive(Debug, Clone)]
pub struct RouteTicket {
    seq: u64,
    latest: Arc<AtomicU64>,
    waypoints: Vec<Coordinate>,
    profile: TravelProfile,
}

impl RouteTicket {
    /// Snapshot of the waypoint list taken when the request was issued.
    pub fn waypoints(&self) -> &[Coordinate] {
        &self.waypoints
    }

    pub fn profile(&self) -> TravelProfile {
        self.profile
    }

    pub fn is_superseded(&self) -> bool {
        self.latest.load(Ordering::SeqCst) != self.seq
    }
}

/// Outcome of feeding a route response back into the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The response belonged to a superseded request and was discarded.
    Stale,
}

pub struct RoutePlanner<G, R> {
    geocoder: G,
    router: R,
    retry: RetryPolicy,
    waypoints: Vec<Coordinate>,
    route: Option<ComputedRoute>,
    geocode: Option<GeocodeResult>,
    phase: PlannerPhase,
    latest_seq: Arc<AtomicU64>,
    error: Option<String>,
}

impl<G, R> RoutePlanner<G, R>
where
    G: GeocodingProvider,
    R: RoutingProvider,
{
    pub fn new(geocoder: G, router: R) -> Self {
        Self::with_retry(geocoder, router, RetryPolicy::default())
    }

    pub fn with_retry(geocoder: G, router: R, retry: RetryPolicy) -> Self {
        Self {
            geocoder,
            router,
            retry,
            waypoints: Vec::new(),
            route: None,
            geocode: None,
            phase: PlannerPhase::default(),
            latest_seq: Arc::new(AtomicU64::new(0)),
            error: None,
        }
    }

    pub fn waypoints(&self) -> &[Coordinate] {
        &self.waypoints
    }

    pub fn route(&self) -> Option<&ComputedRoute> {
        self.route.as_ref()
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.route.as_ref().map(|route| route.distance_km)
    }

    pub fn geocode_result(&self) -> Option<&GeocodeResult> {
        self.geocode.as_ref()
    }

    pub fn phase(&self) -> PlannerPhase {
        self.phase
    }

    /// Human-readable message from the last failed operation, for the UI
    /// to render. Cleared when a new remote operation starts.
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Append a waypoint (map click).
    pub fn add_waypoint(&mut self, point: Coordinate) {
        self.waypoints.push(point);
        self.supersede_pending();
    }

    /// Replace the waypoint at `index` in place (marker drag).
    pub fn move_waypoint(&mut self, index: usize, point: Coordinate) -> Result<(), PlannerError> {
        if index >= self.waypoints.len() {
            let err = PlannerError::IndexOutOfRange {
                index,
                len: self.waypoints.len(),
            };
            return Err(self.fail(err));
        }
        self.waypoints[index] = point;
        self.supersede_pending();
        Ok(())
    }

    /// Forward-geocode a street address; on success the found coordinate
    /// is appended as a waypoint and kept as the current geocode marker.
    pub async fn search_address(
        &mut self,
        street: &str,
        number: &str,
        city: &str,
    ) -> Result<GeocodeResult, PlannerError> {
        self.error = None;
        self.phase = PlannerPhase::Searching;

        let result = {
            let geocoder = &self.geocoder;
            with_retry(&self.retry, || geocoder.search(street, number, city)).await
        };

        self.phase = PlannerPhase::Idle;
        match result {
            Ok(found) => {
                self.waypoints.push(found.point);
                self.supersede_pending();
                self.geocode = Some(found.clone());
                Ok(found)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Reverse-geocode a coordinate and keep the result as the current
    /// geocode marker. The waypoint list is not touched.
    pub async fn lookup_address(&mut self, point: Coordinate) -> Result<String, PlannerError> {
        self.error = None;
        self.phase = PlannerPhase::Searching;

        let result = {
            let geocoder = &self.geocoder;
            with_retry(&self.retry, || geocoder.reverse(point)).await
        };

        self.phase = PlannerPhase::Idle;
        match result {
            Ok(display_name) => {
                self.geocode = Some(GeocodeResult {
                    point,
                    display_name: Some(display_name.clone()),
                });
                Ok(display_name)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Issue a route request for the current waypoints.
    ///
    /// Fails fast with [`PlannerError::InsufficientWaypoints`] before any
    /// network call when fewer than two waypoints exist. The returned
    /// ticket supersedes every earlier one.
    pub fn begin_route_request(
        &mut self,
        profile: TravelProfile,
    ) -> Result<RouteTicket, PlannerError> {
        self.error = None;
        if self.waypoints.len() < 2 {
            let err = PlannerError::InsufficientWaypoints {
                found: self.waypoints.len(),
            };
            return Err(self.fail(err));
        }

        let seq = self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.phase = PlannerPhase::RouteCalculating;
        debug!(seq, waypoints = self.waypoints.len(), "route request issued");

        Ok(RouteTicket {
            seq,
            latest: Arc::clone(&self.latest_seq),
            waypoints: self.waypoints.clone(),
            profile,
        })
    }

    /// Feed a routing response back into the planner.
    ///
    /// Responses for superseded tickets are discarded ([`ApplyOutcome::Stale`])
    /// so an out-of-order arrival can never overwrite newer state. On
    /// success the geometry is decoded and installed together with the
    /// distance (meters converted to kilometers, two decimals).
    pub fn apply_route_response(
        &mut self,
        ticket: &RouteTicket,
        response: Result<RoutePath, PlannerError>,
    ) -> Result<ApplyOutcome, PlannerError> {
        if ticket.is_superseded() {
            debug!(seq = ticket.seq, "discarding stale route response");
            return Ok(ApplyOutcome::Stale);
        }

        self.phase = PlannerPhase::Idle;
        match response {
            Ok(raw) => {
                let path = match Polyline::decode(&raw.points) {
                    Ok(path) => path,
                    Err(err) => return Err(self.fail(err)),
                };
                let distance_km = (raw.distance_m / 1000.0 * 100.0).round() / 100.0;
                self.route = Some(ComputedRoute { path, distance_km });
                Ok(ApplyOutcome::Applied)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Calculate a route for the current waypoints: issue the request,
    /// call the routing provider (with retry for transient failures) and
    /// apply the response.
    pub async fn compute_route(
        &mut self,
        profile: TravelProfile,
    ) -> Result<ApplyOutcome, PlannerError> {
        let ticket = self.begin_route_request(profile)?;

        let response = {
            let router = &self.router;
            with_retry(&self.retry, || {
                router.route(ticket.waypoints(), ticket.profile())
            })
            .await
        };

        self.apply_route_response(&ticket, response)
    }

    /// Clear waypoints, route, distance and the geocode marker. Any
    /// pending request is superseded. The error message is left for the
    /// UI to dismiss.
    pub fn reset(&mut self) {
        self.waypoints.clear();
        self.route = None;
        self.geocode = None;
        self.supersede_pending();
    }

    /// Invalidate every outstanding ticket. Nothing is pending afterwards,
    /// so the phase returns to idle as well.
    fn supersede_pending(&mut self) {
        self.latest_seq.fetch_add(1, Ordering::SeqCst);
        self.phase = PlannerPhase::Idle;
    }

    fn fail(&mut self, err: PlannerError) -> PlannerError {
        self.error = Some(err.to_string());
        err
    }
}
