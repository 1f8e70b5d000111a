//! Digital health card route

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::HealthCardService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use wellness_shared::types::HealthCardResponse;

pub fn health_card_routes() -> Router<AppState> {
    Router::new().route("/", get(get_health_card))
}

/// GET /api/health-card
async fn get_health_card(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<HealthCardResponse>, ApiError> {
    let card = HealthCardService::get(state.db(), auth.user_id).await?;
    Ok(Json(card))
}
