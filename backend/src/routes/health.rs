//! Probe and metrics endpoints
//!
//! - /health - Basic health check
//! - /health/ready - Readiness probe (database required, Redis reported)
//! - /health/live - Liveness probe
//! - /metrics - Prometheus text exposition

use crate::{db, state::AppState};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

/// Individual health checks
#[derive(Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    /// Absent when Redis is not configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<CheckStatus>,
    pub ai_enabled: bool,
}

/// Status of an individual check
#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    fn from_result(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self {
                status: "healthy".to_string(),
                message: None,
            },
            Err(message) => Self {
                status: "unhealthy".to_string(),
                message: Some(message),
            },
        }
    }

    fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

fn status(text: &str) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: text.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
    })
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    status("healthy")
}

/// Readiness probe. Returns 503 when the database is unreachable; a Redis
/// outage only disables the AI quota, so it is reported without failing.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database =
        CheckStatus::from_result(db::health_check(state.db()).await.map_err(|e| e.to_string()));
    let redis = state.quota().ping().await.map(CheckStatus::from_result);

    let is_ready = database.is_healthy();
    let response = HealthResponse {
        status: if is_ready { "ready" } else { "not_ready" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(HealthChecks {
            database,
            redis,
            ai_enabled: state.config().ai.enabled,
        }),
    };

    if is_ready {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Liveness probe - always OK while the process serves requests
pub async fn liveness_check() -> Json<HealthResponse> {
    status("alive")
}

/// GET /metrics - Prometheus text format; 404 when no recorder is installed
pub async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain")],
            "metrics recorder not installed".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_returns_healthy() {
        let response = health_check().await;
        assert_eq!(response.status, "healthy");
        assert!(!response.version.is_empty());
    }

    #[tokio::test]
    async fn test_liveness_check_returns_alive() {
        let response = liveness_check().await;
        assert_eq!(response.status, "alive");
    }

    #[test]
    fn test_check_status_from_result() {
        assert!(CheckStatus::from_result(Ok(())).is_healthy());
        let failed = CheckStatus::from_result(Err("connection refused".to_string()));
        assert!(!failed.is_healthy());
        assert_eq!(failed.message.as_deref(), Some("connection refused"));
    }
}
