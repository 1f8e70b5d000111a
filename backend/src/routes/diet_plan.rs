//! Diet plan API routes
//!
//! Plan creation calls the text model and counts against the user's AI
//! quota; `/calculate` is the calculator alone and is never rate limited.

use crate::auth::AuthUser;
use crate::error::{parse_id, ApiError};
use crate::services::DietPlanService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use wellness_shared::health_metrics::CalorieTargets;
use wellness_shared::types::{
    DeletedResponse, DietPlanRequest, DietPlanResponse, WeeklyDietPlanRequest,
};

/// Create diet plan routes
pub fn diet_plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_plan).get(list_plans))
        .route("/weekly", post(create_weekly_plan))
        .route("/calculate", post(calculate))
        .route("/:id", get(get_plan).delete(delete_plan))
}

/// POST /api/diet-plan - Calculate targets and generate a single-day plan
async fn create_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<DietPlanRequest>,
) -> Result<(StatusCode, Json<DietPlanResponse>), ApiError> {
    let plan =
        DietPlanService::create(state.db(), state.ai(), state.quota(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// POST /api/diet-plan/weekly - Expand a single-day plan to seven days
async fn create_weekly_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<WeeklyDietPlanRequest>,
) -> Result<(StatusCode, Json<DietPlanResponse>), ApiError> {
    let plan =
        DietPlanService::create_weekly(state.db(), state.ai(), state.quota(), auth.user_id, req)
            .await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// POST /api/diet-plan/calculate - Targets only, nothing is stored
async fn calculate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<DietPlanRequest>,
) -> Result<Json<CalorieTargets>, ApiError> {
    let targets = DietPlanService::calculate(state.db(), auth.user_id, &req).await?;
    Ok(Json(targets))
}

/// GET /api/diet-plan - All plans, newest first
async fn list_plans(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<DietPlanResponse>>, ApiError> {
    let plans = DietPlanService::list(state.db(), auth.user_id).await?;
    Ok(Json(plans))
}

/// GET /api/diet-plan/:id
async fn get_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DietPlanResponse>, ApiError> {
    let plan_id = parse_id(&id, "plan")?;
    let plan = DietPlanService::get(state.db(), auth.user_id, plan_id).await?;
    Ok(Json(plan))
}

/// DELETE /api/diet-plan/:id
async fn delete_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let plan_id = parse_id(&id, "plan")?;
    DietPlanService::delete(state.db(), auth.user_id, plan_id).await?;
    Ok(Json(DeletedResponse { deleted: true, id }))
}
