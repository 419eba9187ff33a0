//! Integration tests for `GoogleMapsClient`.
//!
//! Each test stands up a `wiremock` server in place of the Maps web
//! services, so no real network traffic is made.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storemap_core::Position;
use storemap_locator::{GoogleMapsClient, MapProvider, ProviderError, TravelMode};

/// 5-second timeout, no retries.
fn test_client(server: &MockServer) -> GoogleMapsClient {
    GoogleMapsClient::with_base_url("test-key", 5, &server.uri())
        .expect("failed to build test GoogleMapsClient")
}

fn pos(lat: f64, lng: f64) -> Position {
    Position::new(lat, lng).expect("valid test position")
}

fn geocode_ok(lat: f64, lng: f64, formatted: &str) -> serde_json::Value {
    json!({
        "status": "OK",
        "results": [{
            "formatted_address": formatted,
            "geometry": { "location": { "lat": lat, "lng": lng } }
        }]
    })
}

// ---------------------------------------------------------------------------
// Forward geocoding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn geocode_returns_first_result_position() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .and(query_param("address", "1 Main St W, Hamilton"))
        .and(query_param("key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(geocode_ok(43.256, -79.869, "1 Main St W")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let position = test_client(&server)
        .geocode("1 Main St W, Hamilton")
        .await
        .expect("geocode should succeed");

    assert_eq!(position, pos(43.256, -79.869));
}

#[tokio::test]
async fn geocode_surfaces_zero_results_status_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server).geocode("nowhere").await.unwrap_err();

    match err {
        ProviderError::Status(ref status) => assert_eq!(status, "ZERO_RESULTS"),
        other => panic!("expected ProviderError::Status, got: {other:?}"),
    }
    assert_eq!(err.status_text(), "ZERO_RESULTS");
}

#[tokio::test]
async fn geocode_request_denied_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).with_retries(3, 0);
    let err = client.geocode("1 Main St").await.unwrap_err();

    assert!(
        matches!(err, ProviderError::Status(ref s) if s == "REQUEST_DENIED"),
        "expected REQUEST_DENIED, got: {err:?}"
    );
}

#[tokio::test]
async fn geocode_retries_transient_status_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "UNKNOWN_ERROR"})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocode_ok(43.2, -79.8, "x")))
        .mount(&server)
        .await;

    let client = test_client(&server).with_retries(2, 0);
    let position = client.geocode("1 Main St").await.expect("retry should succeed");

    assert_eq!(position, pos(43.2, -79.8));
}

#[tokio::test]
async fn geocode_propagates_server_error_without_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server).geocode("1 Main St").await.unwrap_err();

    match err {
        ProviderError::Http(e) => assert_eq!(e.status().map(|s| s.as_u16()), Some(503)),
        other => panic!("expected ProviderError::Http, got: {other:?}"),
    }
}

#[tokio::test]
async fn geocode_malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server).geocode("1 Main St").await.unwrap_err();

    assert!(
        matches!(err, ProviderError::Deserialize { .. }),
        "expected ProviderError::Deserialize, got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Reverse geocoding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reverse_geocode_returns_formatted_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .and(query_param("latlng", "43.25,-79.88"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(geocode_ok(43.25, -79.88, "100 King St W, Hamilton, ON")),
        )
        .mount(&server)
        .await;

    let address = test_client(&server)
        .reverse_geocode(pos(43.25, -79.88))
        .await
        .expect("reverse geocode should succeed");

    assert_eq!(address.as_deref(), Some("100 King St W, Hamilton, ON"));
}

#[tokio::test]
async fn reverse_geocode_zero_results_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
        )
        .mount(&server)
        .await;

    let address = test_client(&server)
        .reverse_geocode(pos(0.0, 0.0))
        .await
        .expect("ZERO_RESULTS is not an error for reverse lookup");

    assert_eq!(address, None);
}

// ---------------------------------------------------------------------------
// Directions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn directions_maps_first_route() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/directions/json"))
        .and(query_param("origin", "43.25,-79.88"))
        .and(query_param("destination", "43.26,-79.9"))
        .and(query_param("mode", "driving"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "routes": [{
                "summary": "Main St W",
                "legs": [{
                    "start_address": "1 Main St",
                    "end_address": "2 King St",
                    "distance": { "text": "2.1 km", "value": 2100 },
                    "duration": { "text": "6 mins", "value": 360 }
                }],
                "overview_polyline": { "points": "abc123" }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let route = test_client(&server)
        .directions(pos(43.25, -79.88), pos(43.26, -79.9), TravelMode::Driving)
        .await
        .expect("directions should succeed");

    assert_eq!(route.summary, "Main St W");
    assert_eq!(route.legs.len(), 1);
    assert_eq!(route.legs[0].distance_text, "2.1 km");
    assert_eq!(route.total_distance_meters(), 2100);
    assert_eq!(route.total_duration_secs(), 360);
    assert_eq!(route.polyline.as_deref(), Some("abc123"));
}

#[tokio::test]
async fn directions_not_found_status_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/directions/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "NOT_FOUND", "routes": []})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server)
        .directions(pos(1.0, 2.0), pos(3.0, 4.0), TravelMode::Driving)
        .await
        .unwrap_err();

    assert_eq!(err.status_text(), "NOT_FOUND");
}
