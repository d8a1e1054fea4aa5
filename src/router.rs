//! GraphHopper HTTP adapter for route calculation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::PlannerError;
use crate::geo::{Coordinate, TravelProfile};
use crate::traits::{RoutePath, RoutingProvider};

#[derive(Debug, Clone)]
pub struct GraphHopperConfig {
    pub base_url: String,
    pub api_key: String,
    /// Language for turn instructions and error messages.
    pub locale: String,
    pub timeout_secs: u64,
}

impl Default for GraphHopperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://graphhopper.com/api/1".to_string(),
            api_key: String::new(),
            locale: "es".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GraphHopperClient {
    config: GraphHopperConfig,
    client: reqwest::Client,
}

impl GraphHopperClient {
    pub fn new(config: GraphHopperConfig) -> Result<Self, PlannerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    paths: Vec<PathBody>,
}

#[derive(Debug, Deserialize)]
struct PathBody {
    points: String,
    distance: f64,
}

#[async_trait]
impl RoutingProvider for GraphHopperClient {
    async fn route(
        &self,
        waypoints: &[Coordinate],
        profile: TravelProfile,
    ) -> Result<RoutePath, PlannerError> {
        // Fail before any network I/O.
        if waypoints.len() < 2 {
            return Err(PlannerError::InsufficientWaypoints {
                found: waypoints.len(),
            });
        }

        let mut params: Vec<(&str, String)> =
            vec![("key", self.config.api_key.clone())];
        params.extend(
            waypoints
                .iter()
                .map(|point| ("point", format!("{:.6},{:.6}", point.lat(), point.lon()))),
        );
        params.push(("profile", profile.as_str().to_string()));
        params.push(("locale", self.config.locale.clone()));
        params.push(("calc_points", "true".to_string()));

        debug!(waypoints = waypoints.len(), %profile, "requesting route");

        let url = format!("{}/route", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let body: RouteResponse = response.json().await?;
        let path = body
            .paths
            .into_iter()
            .next()
            .ok_or(PlannerError::NoRouteFound)?;

        debug!(distance_m = path.distance, "route calculated");
        Ok(RoutePath {
            points: path.points,
            distance_m: path.distance,
        })
    }
}
