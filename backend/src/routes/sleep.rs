//! Sleep tracking API routes

use crate::auth::AuthUser;
use crate::error::{parse_id, ApiError};
use crate::services::SleepService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, post},
    Json, Router,
};
use wellness_shared::types::{DateRangeQuery, DeletedResponse, LogSleepRequest, SleepLogResponse};

/// Create sleep routes
pub fn sleep_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_sleep).get(list_sleep))
        .route("/:id", delete(delete_log))
}

/// POST /api/sleep - Log a night of sleep
async fn log_sleep(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogSleepRequest>,
) -> Result<Json<SleepLogResponse>, ApiError> {
    let log = SleepService::log(state.db(), auth.user_id, req).await?;
    Ok(Json(log))
}

/// GET /api/sleep?start=&end= - Logs by wake date
async fn list_sleep(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<SleepLogResponse>>, ApiError> {
    let logs = SleepService::list(state.db(), auth.user_id, query).await?;
    Ok(Json(logs))
}

/// DELETE /api/sleep/:id
async fn delete_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let log_id = parse_id(&id, "sleep log")?;
    SleepService::delete(state.db(), auth.user_id, log_id).await?;
    Ok(Json(DeletedResponse { deleted: true, id }))
}
