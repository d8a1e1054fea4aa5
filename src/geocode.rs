//! Nominatim HTTP adapter for forward and reverse geocoding.
//!
//! Forward search turns a street/number/city triple into a free-text
//! query; reverse lookup returns the display name for a coordinate.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::PlannerError;
use crate::geo::Coordinate;
use crate::traits::{GeocodeResult, GeocodingProvider};

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying User-Agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: format!("route-planner/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, PlannerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { config, client })
    }

    /// Reverse-geocode raw latitude/longitude values.
    ///
    /// Validates the pair first and fails with
    /// [`PlannerError::InvalidInput`] before any request is issued, so
    /// malformed UI input never reaches the wire.
    pub async fn reverse_raw(&self, lat: f64, lon: f64) -> Result<String, PlannerError> {
        let point = Coordinate::new(lat, lon)?;
        self.reverse(point).await
    }
}

/// Result object shared by the search and reverse endpoints. Nominatim
/// serializes lat/lon as JSON strings.
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

/// Reverse responses carry the display name at the top level; lat/lon are
/// echoed but not needed.
#[derive(Debug, Deserialize)]
struct ReverseResult {
    display_name: Option<String>,
}

fn parse_component(value: &str, name: &str) -> Result<f64, PlannerError> {
    value
        .parse()
        .map_err(|_| PlannerError::Service(format!("non-numeric {name} in geocode response: {value}")))
}

#[async_trait]
impl GeocodingProvider for NominatimClient {
    async fn search(
        &self,
        street: &str,
        number: &str,
        city: &str,
    ) -> Result<GeocodeResult, PlannerError> {
        let query = format!("{number} {street}, {city}");
        debug!(%query, "forward geocoding");

        let url = format!("{}/search", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", "1"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let results: Vec<NominatimResult> = response.json().await?;
        let first = results.into_iter().next().ok_or(PlannerError::AddressNotFound)?;

        let lat = parse_component(&first.lat, "latitude")?;
        let lon = parse_component(&first.lon, "longitude")?;
        let point = Coordinate::new(lat, lon)
            .map_err(|err| PlannerError::Service(format!("geocode response rejected: {err}")))?;

        debug!(%point, "forward geocode hit");
        Ok(GeocodeResult {
            point,
            display_name: first.display_name,
        })
    }

    async fn reverse(&self, point: Coordinate) -> Result<String, PlannerError> {
        debug!(%point, "reverse geocoding");

        let url = format!("{}/reverse", self.config.base_url);
        let lat = point.lat().to_string();
        let lon = point.lon().to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json"),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let result: ReverseResult = response.json().await?;
        result
            .display_name
            .filter(|name| !name.is_empty())
            .ok_or(PlannerError::AddressNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NominatimConfig::default();
        assert_eq!(config.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.user_agent.starts_with("route-planner/"));
    }

    #[test]
    fn test_search_result_parsing() {
        let json = r#"[{"lat": "-38.7183", "lon": "-62.2661", "display_name": "Alsina 65, Bahía Blanca"}]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(json).expect("parse");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].lat, "-38.7183");
        assert_eq!(
            results[0].display_name.as_deref(),
            Some("Alsina 65, Bahía Blanca")
        );
    }

    #[test]
    fn test_empty_result_list_parses() {
        let results: Vec<NominatimResult> = serde_json::from_str("[]").expect("parse");
        assert!(results.is_empty());
    }

    #[test]
    fn test_reverse_result_without_display_name() {
        let result: ReverseResult =
            serde_json::from_str(r#"{"error": "Unable to geocode"}"#).expect("parse");
        assert!(result.display_name.is_none());
    }

    #[test]
    fn test_component_parsing_rejects_garbage() {
        assert!(parse_component("-38.7", "latitude").is_ok());
        assert!(matches!(
            parse_component("not-a-number", "latitude"),
            Err(PlannerError::Service(_))
        ));
    }
}
