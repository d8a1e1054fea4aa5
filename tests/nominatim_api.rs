//! Integration tests for the Nominatim geocoding client (wiremock-based).

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use route_planner::error::PlannerError;
use route_planner::geo::Coordinate;
use route_planner::geocode::{NominatimClient, NominatimConfig};
use route_planner::traits::GeocodingProvider;

fn client_for(server: &MockServer) -> NominatimClient {
    let config = NominatimConfig {
        base_url: server.uri(),
        user_agent: "route-planner-tests/0".to_string(),
        timeout_secs: 5,
    };
    NominatimClient::new(config).expect("build client")
}

const fn search_hit_json() -> &'static str {
    r#"[
        {
            "place_id": 109129429,
            "lat": "-38.7196439",
            "lon": "-62.2701731",
            "display_name": "Alsina 65, Bahia Blanca, Buenos Aires, Argentina",
            "class": "place",
            "type": "house"
        }
    ]"#
}

#[tokio::test]
async fn search_returns_first_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "65 Alsina, Bahia Blanca"))
        .and(query_param("format", "json"))
        .and(query_param("addressdetails", "1"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_hit_json()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .search("Alsina", "65", "Bahia Blanca")
        .await
        .expect("search succeeds");

    assert!((result.point.lat() + 38.7196439).abs() < 1e-9);
    assert!((result.point.lon() + 62.2701731).abs() < 1e-9);
    assert_eq!(
        result.display_name.as_deref(),
        Some("Alsina 65, Bahia Blanca, Buenos Aires, Argentina")
    );
}

#[tokio::test]
async fn search_with_zero_results_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .search("Nowhere", "1", "Atlantis")
        .await
        .expect_err("zero results");
    assert!(matches!(err, PlannerError::AddressNotFound));
}

#[tokio::test]
async fn search_surfaces_http_failures_as_service_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .search("Alsina", "65", "Bahia Blanca")
        .await
        .expect_err("server error");
    assert!(matches!(err, PlannerError::Service(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn search_rejects_non_numeric_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"lat": "not-a-number", "lon": "-62.27", "display_name": "broken"}]"#,
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .search("Alsina", "65", "Bahia Blanca")
        .await
        .expect_err("garbage latitude");
    assert!(matches!(err, PlannerError::Service(_)));
}

#[tokio::test]
async fn reverse_returns_display_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("format", "json"))
        .and(query_param("lat", "-38.7183"))
        .and(query_param("lon", "-62.2661"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"lat": "-38.7183", "lon": "-62.2661", "display_name": "Plaza Rivadavia, Bahia Blanca, Argentina"}"#,
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let point = Coordinate::new(-38.7183, -62.2661).expect("valid point");
    let name = client.reverse(point).await.expect("reverse succeeds");
    assert_eq!(name, "Plaza Rivadavia, Bahia Blanca, Argentina");
}

#[tokio::test]
async fn reverse_without_display_name_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"error": "Unable to geocode"}"#),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let point = Coordinate::new(0.0, 0.0).expect("valid point");
    let err = client.reverse(point).await.expect_err("no address");
    assert!(matches!(err, PlannerError::AddressNotFound));
}

#[tokio::test]
async fn reverse_raw_validates_before_any_request() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client
        .reverse_raw(200.0, -62.2661)
        .await
        .expect_err("latitude out of range");
    assert!(matches!(err, PlannerError::InvalidInput(_)));

    let err = client
        .reverse_raw(f64::NAN, -62.2661)
        .await
        .expect_err("non-finite latitude");
    assert!(matches!(err, PlannerError::InvalidInput(_)));

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty(), "no request may reach the wire");
}
