//! Goals API routes

use crate::auth::AuthUser;
use crate::error::{parse_id, ApiError};
use crate::services::GoalService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use wellness_shared::types::{
    CreateGoalRequest, DeletedResponse, GoalProgressResponse, GoalResponse, UpdateGoalRequest,
};

/// Create goals routes
pub fn goals_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_goal).get(list_goals))
        .route("/:id", get(get_goal).put(update_goal).delete(delete_goal))
        .route("/:id/progress", get(get_progress))
}

#[derive(Debug, Deserialize)]
struct GoalsListQuery {
    status: Option<String>,
}

/// POST /api/goals - Create a new goal
async fn create_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<GoalResponse>), ApiError> {
    let goal = GoalService::create(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

/// GET /api/goals?status= - List goals
async fn list_goals(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<GoalsListQuery>,
) -> Result<Json<Vec<GoalResponse>>, ApiError> {
    let goals = GoalService::list(state.db(), auth.user_id, query.status.as_deref()).await?;
    Ok(Json(goals))
}

/// GET /api/goals/:id - Get a specific goal
async fn get_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<GoalResponse>, ApiError> {
    let goal_id = parse_id(&id, "goal")?;
    let goal = GoalService::get(state.db(), auth.user_id, goal_id).await?;
    Ok(Json(goal))
}

/// PUT /api/goals/:id - Update a goal
async fn update_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateGoalRequest>,
) -> Result<Json<GoalResponse>, ApiError> {
    let goal_id = parse_id(&id, "goal")?;
    let goal = GoalService::update(state.db(), auth.user_id, goal_id, req).await?;
    Ok(Json(goal))
}

/// DELETE /api/goals/:id - Delete a goal
async fn delete_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let goal_id = parse_id(&id, "goal")?;
    GoalService::delete(state.db(), auth.user_id, goal_id).await?;
    Ok(Json(DeletedResponse { deleted: true, id }))
}

/// GET /api/goals/:id/progress - Progress toward the target
async fn get_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<GoalProgressResponse>, ApiError> {
    let goal_id = parse_id(&id, "goal")?;
    let progress = GoalService::progress(state.db(), auth.user_id, goal_id).await?;
    Ok(Json(progress))
}
