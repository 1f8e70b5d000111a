//! Exercise API routes

use crate::auth::AuthUser;
use crate::error::{parse_id, ApiError};
use crate::services::ExerciseService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use wellness_shared::types::{
    DateQuery, DateRangeQuery, DeletedResponse, ExerciseResponse, LogExerciseRequest,
    WeeklyExerciseResponse,
};

/// Create exercise routes
pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_exercise).get(list_exercises))
        .route("/weekly", get(get_weekly))
        .route("/:id", delete(delete_exercise))
}

/// POST /api/exercise - Log a workout
async fn log_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogExerciseRequest>,
) -> Result<Json<ExerciseResponse>, ApiError> {
    let exercise = ExerciseService::log(state.db(), auth.user_id, req).await?;
    Ok(Json(exercise))
}

/// GET /api/exercise?start=&end= - Workouts in range, newest first
async fn list_exercises(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<ExerciseResponse>>, ApiError> {
    let exercises = ExerciseService::list(state.db(), auth.user_id, query).await?;
    Ok(Json(exercises))
}

/// GET /api/exercise/weekly?date= - Totals for the week containing `date`
async fn get_weekly(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DateQuery>,
) -> Result<Json<WeeklyExerciseResponse>, ApiError> {
    let weekly = ExerciseService::weekly(state.db(), auth.user_id, query.date).await?;
    Ok(Json(weekly))
}

/// DELETE /api/exercise/:id
async fn delete_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let exercise_id = parse_id(&id, "exercise")?;
    ExerciseService::delete(state.db(), auth.user_id, exercise_id).await?;
    Ok(Json(DeletedResponse { deleted: true, id }))
}
