//! Health goals and progress tracking

use crate::db::{dec_to_f64, f64_to_dec};
use crate::error::ApiError;
use crate::repositories::{CreateGoal, GoalRecord, GoalRepository, UpdateGoal};
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use wellness_shared::models::{goal_progress_percent, GoalDirection, GoalStatus, GoalType};
use wellness_shared::types::{
    CreateGoalRequest, GoalProgressResponse, GoalResponse, UpdateGoalRequest,
};
use wellness_shared::validation::{check_field, validate_name, ValidationError};

const MAX_GOAL_VALUE: f64 = 1_000_000_000.0;

pub struct GoalService;

impl GoalService {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        req: CreateGoalRequest,
    ) -> Result<GoalResponse, ApiError> {
        let input = Self::validate_create(user_id, req, Utc::now().date_naive())?;
        let record = GoalRepository::create(db, input)
            .await
            .map_err(ApiError::Internal)?;

        Ok(to_response(&record))
    }

    /// Goals for the user, optionally filtered by status
    pub async fn list(
        db: &PgPool,
        user_id: Uuid,
        status: Option<&str>,
    ) -> Result<Vec<GoalResponse>, ApiError> {
        let status = status
            .map(|s| s.parse::<GoalStatus>().map_err(|e| ValidationError::new("status", &e)))
            .transpose()?;

        let records = GoalRepository::get_by_user(db, user_id, status.as_ref().map(|s| s.as_str()))
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.iter().map(to_response).collect())
    }

    pub async fn get(db: &PgPool, user_id: Uuid, id: Uuid) -> Result<GoalResponse, ApiError> {
        Ok(to_response(&Self::find(db, user_id, id).await?))
    }

    /// Apply an update; an active goal whose current value reaches the
    /// target is marked completed
    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        req: UpdateGoalRequest,
    ) -> Result<GoalResponse, ApiError> {
        let existing = Self::find(db, user_id, id).await?;
        let updates = validate_update(&existing, req, Utc::now().date_naive())?;

        let record = GoalRepository::update(db, id, user_id, updates)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))?;

        if record.status != existing.status {
            info!(goal_id = %record.id, status = %record.status, "Goal status changed");
        }
        Ok(to_response(&record))
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = GoalRepository::delete(db, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Goal not found".to_string()));
        }
        Ok(())
    }

    pub async fn progress(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<GoalProgressResponse, ApiError> {
        let record = Self::find(db, user_id, id).await?;
        Ok(progress(&record, Utc::now().date_naive()))
    }

    pub(crate) async fn count_active(db: &PgPool, user_id: Uuid) -> Result<usize, ApiError> {
        GoalRepository::count_active(db, user_id)
            .await
            .map(|n| n.max(0) as usize)
            .map_err(ApiError::Internal)
    }

    async fn find(db: &PgPool, user_id: Uuid, id: Uuid) -> Result<GoalRecord, ApiError> {
        GoalRepository::get_by_id(db, id, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))
    }

    fn validate_create(
        user_id: Uuid,
        req: CreateGoalRequest,
        today: NaiveDate,
    ) -> Result<CreateGoal, ApiError> {
        check_field("title", validate_name(&req.title, 200))?;
        check_field("target_value", validate_value(req.target_value))?;
        check_field("start_value", validate_value(req.start_value))?;

        let goal_type: GoalType = req
            .goal_type
            .parse()
            .map_err(|e: String| ValidationError::new("goal_type", &e))?;

        let direction = match req.direction.as_deref() {
            Some(d) => d
                .parse::<GoalDirection>()
                .map_err(|e| ValidationError::new("direction", &e))?,
            None => GoalDirection::infer(req.start_value, req.target_value),
        };

        check_reachable(direction, req.start_value, req.target_value)?;
        if let Some(date) = req.target_date {
            check_target_date(date, today)?;
        }

        Ok(CreateGoal {
            user_id,
            title: req.title.trim().to_string(),
            goal_type: goal_type.as_str().to_string(),
            target_value: f64_to_dec(req.target_value),
            start_value: f64_to_dec(req.start_value),
            unit: req.unit.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()),
            direction: direction.as_str().to_string(),
            target_date: req.target_date,
        })
    }
}

fn validate_value(value: f64) -> Result<(), String> {
    if !value.is_finite() || value.abs() > MAX_GOAL_VALUE {
        return Err("Value is out of range".to_string());
    }
    Ok(())
}

fn check_reachable(direction: GoalDirection, start: f64, target: f64) -> Result<(), ApiError> {
    let wrong_way = match direction {
        GoalDirection::Increasing => target < start,
        GoalDirection::Decreasing => target > start,
    };
    if wrong_way {
        return Err(ValidationError::new(
            "target_value",
            &format!("Target is not reachable for a {} goal", direction),
        )
        .into());
    }
    Ok(())
}

fn check_target_date(date: NaiveDate, today: NaiveDate) -> Result<(), ApiError> {
    if date < today {
        return Err(ValidationError::new("target_date", "Target date is in the past").into());
    }
    Ok(())
}

fn validate_update(
    existing: &GoalRecord,
    req: UpdateGoalRequest,
    today: NaiveDate,
) -> Result<UpdateGoal, ApiError> {
    let start = dec_to_f64(existing.start_value);

    if let Some(ref title) = req.title {
        check_field("title", validate_name(title, 200))?;
    }
    if let Some(v) = req.current_value {
        check_field("current_value", validate_value(v))?;
    }
    if let Some(v) = req.target_value {
        check_field("target_value", validate_value(v))?;
        let direction = existing
            .direction
            .parse::<GoalDirection>()
            .unwrap_or_else(|_| GoalDirection::infer(start, dec_to_f64(existing.target_value)));
        check_reachable(direction, start, v)?;
    }
    if let Some(date) = req.target_date {
        check_target_date(date, today)?;
    }

    let mut status = req
        .status
        .as_deref()
        .map(|s| s.parse::<GoalStatus>().map_err(|e| ValidationError::new("status", &e)))
        .transpose()?;

    let current_status: GoalStatus = existing.status.parse().unwrap_or(GoalStatus::Active);
    if status.unwrap_or(current_status) == GoalStatus::Active {
        let current = req.current_value.unwrap_or_else(|| dec_to_f64(existing.current_value));
        let target = req.target_value.unwrap_or_else(|| dec_to_f64(existing.target_value));
        if goal_progress_percent(start, current, target) >= 100.0 {
            status = Some(GoalStatus::Completed);
        }
    }

    Ok(UpdateGoal {
        title: req.title.map(|t| t.trim().to_string()),
        target_value: req.target_value.map(f64_to_dec),
        current_value: req.current_value.map(f64_to_dec),
        target_date: req.target_date,
        status: status.map(|s| s.as_str().to_string()),
    })
}

fn progress(record: &GoalRecord, today: NaiveDate) -> GoalProgressResponse {
    let start = dec_to_f64(record.start_value);
    let current = dec_to_f64(record.current_value);
    let target = dec_to_f64(record.target_value);
    let percent = goal_progress_percent(start, current, target);

    GoalProgressResponse {
        goal_id: record.id.to_string(),
        start_value: start,
        current_value: current,
        target_value: target,
        progress_percent: (percent * 10.0).round() / 10.0,
        remaining: (target - current).abs(),
        days_remaining: record.target_date.map(|d| (d - today).num_days()),
        completed: percent >= 100.0 || record.status == GoalStatus::Completed.as_str(),
    }
}

pub(crate) fn to_response(record: &GoalRecord) -> GoalResponse {
    let start = dec_to_f64(record.start_value);
    let current = dec_to_f64(record.current_value);
    let target = dec_to_f64(record.target_value);

    GoalResponse {
        id: record.id.to_string(),
        title: record.title.clone(),
        goal_type: record.goal_type.clone(),
        target_value: target,
        start_value: start,
        current_value: current,
        unit: record.unit.clone(),
        direction: record.direction.clone(),
        target_date: record.target_date,
        status: record.status.clone(),
        progress_percent: (goal_progress_percent(start, current, target) * 10.0).round() / 10.0,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}
