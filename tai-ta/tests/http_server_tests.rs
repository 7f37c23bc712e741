//! HTTP Server & Routing Integration Tests
//!
//! Drives the router directly via `oneshot`; the classifier and geology
//! endpoints point at an unroutable local port so upstream failures are
//! immediate and deterministic.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use tai_ta::config::ServiceConfig;
use tai_ta::{build_router, AppState};

const BOUNDARY: &str = "tai-test-boundary";

/// Test config with both upstreams pointed at a closed local port
fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.classifier.endpoint = "http://127.0.0.1:1/classify".to_string();
    config.classifier.timeout_seconds = 2;
    config.geology.base_url = "http://127.0.0.1:1".to_string();
    config.geology.timeout_seconds = 2;
    config
}

fn test_app_state(config: ServiceConfig) -> AppState {
    AppState::new(config).unwrap()
}

/// Build a multipart body with a single `file` part
fn multipart_body(filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_module_identity() {
    let app = build_router(test_app_state(test_config()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "tai-ta");
    assert!(json["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn predict_rejects_non_image_upload() {
    let app = build_router(test_app_state(test_config()));

    let body = multipart_body("notes.txt", "text/plain", b"hello");
    let response = app.oneshot(multipart_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["detail"], "Please upload an image file (JPG, PNG, TIFF)");
}

#[tokio::test]
async fn predict_rejects_missing_file_field() {
    let app = build_router(test_app_state(test_config()));

    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{BOUNDARY}--\r\n"
    )
    .into_bytes();
    let response = app.oneshot(multipart_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["detail"], "Missing file field in upload");
}

#[tokio::test]
async fn predict_rejects_oversized_upload() {
    let app = build_router(test_app_state(test_config()));

    // One byte over the validator's cap, still under the framework limit
    let data = vec![0u8; tai_ta::validators::MAX_UPLOAD_BYTES + 1];
    let body = multipart_body("big.png", "image/png", &data);
    let response = app.oneshot(multipart_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = response_json(response).await;
    assert_eq!(json["detail"], "Please upload an image smaller than 10MB");
}

#[tokio::test]
async fn predict_serves_synthetic_result_when_classifier_is_down() {
    // Default policy masks classifier outages with a synthetic result
    let app = build_router(test_app_state(test_config()));

    let body = multipart_body("scene.png", "image/png", b"\x89PNG\r\n\x1a\n");
    let response = app.oneshot(multipart_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert!(json["type"].is_string());
    assert!(json["color"].is_string());
    assert!(json["description"].is_string());
    let confidence = json["confidence"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&confidence));
    assert!(json["coordinates"]["lat"].is_f64());
    assert!(json["coordinates"]["lng"].is_f64());
}

#[tokio::test]
async fn predict_surfaces_outage_when_fallback_disabled() {
    let mut config = test_config();
    config.fallback.synthetic_on_classifier_failure = false;
    let app = build_router(test_app_state(config));

    let body = multipart_body("scene.png", "image/png", b"\x89PNG\r\n\x1a\n");
    let response = app.oneshot(multipart_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = response_json(response).await;
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn classifier_outage_is_recorded_for_diagnostics() {
    let state = test_app_state(test_config());
    let app = build_router(state.clone());

    let body = multipart_body("scene.png", "image/png", b"\x89PNG\r\n\x1a\n");
    let response = app.oneshot(multipart_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let last_error = state.last_error.read().await.clone();
    assert!(last_error.is_some(), "outage should be recorded");
}

#[tokio::test]
async fn geology_proxy_surfaces_unreachable_service_as_bad_gateway() {
    let app = build_router(test_app_state(test_config()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/geology")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"latitude": 22.57, "longitude": 88.36}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = response_json(response).await;
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn terrain_image_requires_coordinates() {
    let app = build_router(test_app_state(test_config()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/terrain")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Missing lat/lon query params fail extraction
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn terrain_image_surfaces_unreachable_service_as_bad_gateway() {
    let app = build_router(test_app_state(test_config()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/terrain?lat=22.57&lon=88.36")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = build_router(test_app_state(test_config()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
