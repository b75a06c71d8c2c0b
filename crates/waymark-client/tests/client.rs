//! Integration tests for `RemoteClient` using wiremock HTTP mocks.

use waymark_client::{ClientError, RemoteClient};
use waymark_core::{CandidateStatus, Nomination, NominationImage};
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(endpoint: &str) -> RemoteClient {
    RemoteClient::new(endpoint, 30).expect("client construction should not fail")
}

fn nomination() -> Nomination {
    Nomination {
        id: "N1".into(),
        title: "Old Fountain".into(),
        description: "Stone fountain in the park".into(),
        lat: 10.000_05,
        lng: 20.000_05,
        state: "Live".into(),
        images: vec![NominationImage {
            url: "https://img.example/fountain.jpg".into(),
        }],
        discovered_timestamp_ms: Some(1_709_294_400_000),
    }
}

#[tokio::test]
async fn fetch_snapshot_filters_and_aliases_statuses() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {"id": "A", "title": "Fountain", "description": "", "lat": 10.0, "lng": 20.0, "status": "lightship-live"},
        {"id": "B", "title": "Mural", "description": "", "lat": "11.5", "lng": "21.5", "status": "potential"},
        {"id": "C", "title": "Ghost", "description": "", "lat": 0.0, "lng": 0.0, "status": "rejected"}
    ]);

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let snapshot = test_client(&server.uri())
        .fetch_snapshot()
        .await
        .expect("should parse snapshot");

    assert_eq!(snapshot.len(), 2, "unrecognized statuses must be dropped");
    assert_eq!(snapshot["A"].status, CandidateStatus::Live);
    assert_eq!(snapshot["B"].status, CandidateStatus::Potential);
    assert!((snapshot["B"].lat - 11.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn fetch_snapshot_fails_on_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_snapshot().await;
    assert!(matches!(result, Err(ClientError::Deserialize { .. })));
}

#[tokio::test]
async fn fetch_snapshot_fails_on_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_snapshot().await;
    assert!(matches!(result, Err(ClientError::Http(_))));
}

#[tokio::test]
async fn upload_serializes_endpoint_vocabulary() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("id=N1"))
        .and(body_string_contains("status=lightship-live"))
        .and(body_string_contains("nickname=operator%40example.com"))
        .and(body_string_contains("submitteddate=2024-03-01"))
        .and(body_string_contains(
            "candidateimageurl=https%3A%2F%2Fimg.example%2Ffountain.jpg",
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server.uri())
        .upload_nomination(&nomination(), "operator@example.com")
        .await
        .expect("upload should succeed");
}

#[tokio::test]
async fn upload_passes_non_live_states_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("status=retired"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut n = nomination();
    n.state = "Retired".into();
    test_client(&server.uri())
        .upload_nomination(&n, "op")
        .await
        .expect("upload should succeed");
}

#[tokio::test]
async fn upload_surfaces_http_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let result = test_client(&server.uri())
        .upload_nomination(&nomination(), "op")
        .await;
    assert!(matches!(result, Err(ClientError::Http(_))));
}

#[tokio::test]
async fn deletion_sends_delete_marker() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("status=delete"))
        .and(body_string_contains("id=P1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server.uri())
        .request_deletion("P1")
        .await
        .expect("deletion should succeed");
}
