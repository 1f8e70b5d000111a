//! Data export API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::ExportService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::get,
    Router,
};

/// Create export routes
pub fn export_routes() -> Router<AppState> {
    Router::new()
        .route("/json", get(export_json))
        .route("/csv/food", get(export_food_csv))
        .route("/csv/exercise", get(export_exercise_csv))
}

fn attachment(content_type: &'static str, disposition: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(header::CONTENT_DISPOSITION, HeaderValue::from_static(disposition));
    headers
}

/// GET /api/export/json - Export all user data as JSON
async fn export_json(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let export = ExportService::export_json(state.db(), auth.user_id).await?;

    let json = serde_json::to_string_pretty(&export)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("JSON serialization error: {}", e)))?;

    Ok((
        attachment("application/json", "attachment; filename=\"wellness-export.json\""),
        json,
    ))
}

/// GET /api/export/csv/food - Export food entries as CSV
async fn export_food_csv(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let csv = ExportService::export_food_csv(state.db(), auth.user_id).await?;
    Ok((
        attachment("text/csv", "attachment; filename=\"food-export.csv\""),
        csv,
    ))
}

/// GET /api/export/csv/exercise - Export exercises as CSV
async fn export_exercise_csv(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let csv = ExportService::export_exercise_csv(state.db(), auth.user_id).await?;
    Ok((
        attachment("text/csv", "attachment; filename=\"exercise-export.csv\""),
        csv,
    ))
}
