//! Integration tests for health check endpoints

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_endpoint() {
    let app = common::TestApp::without_database();

    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "healthy");
}

#[tokio::test]
async fn test_liveness_endpoint() {
    let app = common::TestApp::without_database();

    let response = app.get("/health/live").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("alive"));
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let app = common::TestApp::without_database();

    let response = app.get("/metrics").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = common::TestApp::without_database();

    let response = app.get("/api/does-not-exist").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_readiness_endpoint() {
    let app = common::TestApp::new().await;

    let response = app.get("/health/ready").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"]["status"], "healthy");
    assert_eq!(body["checks"]["ai_enabled"], false);
    // No Redis connection in tests
    assert!(body["checks"].get("redis").is_none());
}
