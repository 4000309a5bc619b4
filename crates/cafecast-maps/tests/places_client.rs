//! Integration tests for `GoogleMapsClient` using wiremock HTTP mocks.

use std::time::Duration;

use cafecast_core::Coordinates;
use cafecast_maps::{GoogleMapsClient, MapsError, TravelTimeProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NEARBY_PATH: &str = "/maps/api/place/nearbysearch/json";
const MATRIX_PATH: &str = "/maps/api/distancematrix/json";

fn test_client(base_url: &str) -> GoogleMapsClient {
    GoogleMapsClient::with_base_url("test-key", 1, 1, base_url)
        .expect("client construction should not fail")
}

fn center() -> Coordinates {
    Coordinates::new(37.5, -122.25)
}

#[tokio::test]
async fn nearby_search_returns_places_in_order() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [
            {
                "name": "Verve",
                "vicinity": "1 Main St",
                "geometry": {"location": {"lat": 37.51, "lng": -122.26}}
            },
            {
                "name": "Blue Bottle",
                "geometry": {"location": {"lat": 37.52, "lng": -122.27}}
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .and(query_param("location", "37.5,-122.25"))
        .and(query_param("radius", "8046"))
        .and(query_param("type", "cafe"))
        .and(query_param("keyword", "coffee"))
        .and(query_param("opennow", "true"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let places = test_client(&server.uri())
        .nearby_search(center(), "coffee", 8046)
        .await
        .expect("should parse places");

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].name, "Verve");
    assert_eq!(places[0].address(), "1 Main St");
    assert_eq!(places[1].name, "Blue Bottle");
    assert_eq!(places[1].address(), "Unknown address");
    assert_eq!(
        places[1].coordinates(),
        Some(Coordinates::new(37.52, -122.27))
    );
}

#[tokio::test]
async fn nearby_search_zero_results_is_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "ZERO_RESULTS", "results": []})),
        )
        .mount(&server)
        .await;

    let places = test_client(&server.uri())
        .nearby_search(center(), "coffee", 8046)
        .await
        .expect("zero results is not an error");
    assert!(places.is_empty());
}

#[tokio::test]
async fn nearby_search_denied_status_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .nearby_search(center(), "coffee", 8046)
        .await
        .unwrap_err();

    match err {
        MapsError::ApiStatus { status, message } => {
            assert_eq!(status, "REQUEST_DENIED");
            assert_eq!(message, "The provided API key is invalid.");
        }
        other => panic!("expected ApiStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn nearby_search_server_error_is_unexpected_status_without_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .nearby_search(center(), "coffee", 8046)
        .await
        .unwrap_err();

    match err {
        MapsError::UnexpectedStatus { status, url } => {
            assert_eq!(status, 500);
            assert!(!url.contains("test-key"), "key leaked into {url}");
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn nearby_search_non_json_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .nearby_search(center(), "coffee", 8046)
        .await
        .unwrap_err();
    assert!(matches!(err, MapsError::Deserialize { .. }), "got {err:?}");
}

#[tokio::test]
async fn nearby_search_slow_upstream_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "OK", "results": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .nearby_search(center(), "coffee", 8046)
        .await
        .unwrap_err();
    assert!(matches!(err, MapsError::Timeout { secs: 1 }), "got {err:?}");
}

#[tokio::test]
async fn travel_time_reads_duration_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MATRIX_PATH))
        .and(query_param("origins", "37.5,-122.25"))
        .and(query_param("destinations", "37.51,-122.26"))
        .and(query_param("units", "imperial"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "rows": [{"elements": [{
                "status": "OK",
                "duration": {"text": "7 mins", "value": 420},
                "distance": {"text": "1.2 mi", "value": 1931}
            }]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = test_client(&server.uri())
        .travel_time(center(), Coordinates::new(37.51, -122.26))
        .await
        .expect("request should succeed");
    assert_eq!(text.as_deref(), Some("7 mins"));
}

#[tokio::test]
async fn travel_time_without_route_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MATRIX_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "rows": [{"elements": [{"status": "ZERO_RESULTS"}]}]
        })))
        .mount(&server)
        .await;

    let text = test_client(&server.uri())
        .travel_time(center(), Coordinates::new(10.0, 10.0))
        .await
        .expect("request should succeed");
    assert_eq!(text, None);
}
