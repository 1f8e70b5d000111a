//! Health report API routes

use crate::auth::AuthUser;
use crate::error::{parse_id, ApiError};
use crate::services::ReportService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use wellness_shared::types::{
    DeletedResponse, HealthReportResponse, HealthReportSummary, LimitQuery,
};

/// Create report routes
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(generate_report).get(list_reports))
        .route("/:id", get(get_report).delete(delete_report))
}

/// POST /api/reports - Score the latest vitals and write a new report
async fn generate_report(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<(StatusCode, Json<HealthReportResponse>), ApiError> {
    let report =
        ReportService::generate(state.db(), state.ai(), state.quota(), auth.user_id).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /api/reports?limit= - Report summaries, newest first
async fn list_reports(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<HealthReportSummary>>, ApiError> {
    let reports = ReportService::list(state.db(), auth.user_id, query.limit).await?;
    Ok(Json(reports))
}

/// GET /api/reports/:id
async fn get_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<HealthReportResponse>, ApiError> {
    let report_id = parse_id(&id, "report")?;
    let report = ReportService::get(state.db(), auth.user_id, report_id).await?;
    Ok(Json(report))
}

/// DELETE /api/reports/:id
async fn delete_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let report_id = parse_id(&id, "report")?;
    ReportService::delete(state.db(), auth.user_id, report_id).await?;
    Ok(Json(DeletedResponse { deleted: true, id }))
}
