//! Health metrics API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::HealthMetricsService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use wellness_shared::types::{HealthMetricsResponse, LimitQuery, RecordHealthMetricsRequest};

/// Create health metrics routes
pub fn health_metrics_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(record_metrics).get(get_history))
        .route("/latest", get(get_latest))
}

/// POST /api/health - Record a vitals snapshot
///
/// Height and weight accept any supported unit and are stored in cm/kg.
async fn record_metrics(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RecordHealthMetricsRequest>,
) -> Result<Json<HealthMetricsResponse>, ApiError> {
    let metrics = HealthMetricsService::record(state.db(), auth.user_id, req).await?;
    Ok(Json(metrics))
}

/// GET /api/health/latest - Newest snapshot
async fn get_latest(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<HealthMetricsResponse>, ApiError> {
    let metrics = HealthMetricsService::latest(state.db(), auth.user_id).await?;
    Ok(Json(metrics))
}

/// GET /api/health - Snapshot history, newest first
async fn get_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<HealthMetricsResponse>>, ApiError> {
    let history = HealthMetricsService::history(state.db(), auth.user_id, query.limit).await?;
    Ok(Json(history))
}
