//! Food logging API routes

use crate::auth::AuthUser;
use crate::error::{parse_id, ApiError};
use crate::services::FoodService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use wellness_shared::types::{
    DailyFoodResponse, DateQuery, DeletedResponse, FoodEntryResponse, FoodListQuery,
    LogFoodRequest,
};

/// Create food routes
pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_food).get(list_food))
        .route("/daily", get(get_daily))
        .route("/:id", delete(delete_food))
}

/// POST /api/food - Log a food entry
///
/// With `generate_image` set, an illustration is requested from the image
/// API; a failed generation leaves the entry without an image.
async fn log_food(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogFoodRequest>,
) -> Result<Json<FoodEntryResponse>, ApiError> {
    let entry = FoodService::log(state.db(), state.ai(), auth.user_id, req).await?;
    Ok(Json(entry))
}

/// GET /api/food?date= or ?start=&end= - List entries
async fn list_food(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<FoodListQuery>,
) -> Result<Json<Vec<FoodEntryResponse>>, ApiError> {
    let entries = FoodService::list(state.db(), auth.user_id, query).await?;
    Ok(Json(entries))
}

/// GET /api/food/daily?date= - Daily totals by meal (default: today)
async fn get_daily(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DateQuery>,
) -> Result<Json<DailyFoodResponse>, ApiError> {
    let daily = FoodService::daily(state.db(), auth.user_id, query.date).await?;
    Ok(Json(daily))
}

/// DELETE /api/food/:id
async fn delete_food(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let entry_id = parse_id(&id, "food entry")?;
    FoodService::delete(state.db(), auth.user_id, entry_id).await?;
    Ok(Json(DeletedResponse { deleted: true, id }))
}
