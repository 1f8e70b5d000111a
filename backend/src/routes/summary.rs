//! Dashboard summary route

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::SummaryService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use wellness_shared::types::{SummaryQuery, SummaryResponse};

pub fn summary_routes() -> Router<AppState> {
    Router::new().route("/", get(get_summary))
}

/// GET /api/summary?range=week|month&end= - Daily and weekly buckets
async fn get_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let summary = SummaryService::get(state.db(), auth.user_id, query).await?;
    Ok(Json(summary))
}
