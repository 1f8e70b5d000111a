//! Sleep logging. Duration is derived from bedtime and wake time.

use super::dates::{instant_bounds, resolve_range};
use crate::error::ApiError;
use crate::repositories::{CreateSleepLog, SleepLogRecord, SleepLogRepository};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;
use wellness_shared::types::{DateRangeQuery, LogSleepRequest, SleepLogResponse};
use wellness_shared::validation::{check_field, validate_sleep_quality, ValidationError};

const MAX_SLEEP_MINUTES: i64 = 24 * 60;
const MAX_NOTES_LEN: usize = 1000;
const DEFAULT_LIST_DAYS: i64 = 7;

pub struct SleepService;

impl SleepService {
    pub async fn log(
        db: &PgPool,
        user_id: Uuid,
        req: LogSleepRequest,
    ) -> Result<SleepLogResponse, ApiError> {
        let input = Self::validate(user_id, req)?;
        let record = SleepLogRepository::create(db, input)
            .await
            .map_err(ApiError::Internal)?;

        Ok(to_response(&record))
    }

    /// Logs whose wake time falls in `start..=end`, newest first
    pub async fn list(
        db: &PgPool,
        user_id: Uuid,
        query: DateRangeQuery,
    ) -> Result<Vec<SleepLogResponse>, ApiError> {
        let (start, end) = resolve_range(query.start, query.end, DEFAULT_LIST_DAYS)?;
        let records = Self::in_range(db, user_id, start, end).await?;
        Ok(records.iter().map(to_response).collect())
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = SleepLogRepository::delete(db, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Sleep log not found".to_string()));
        }
        Ok(())
    }

    pub(crate) async fn in_range(
        db: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SleepLogRecord>, ApiError> {
        let (from, until) = instant_bounds(start, end)?;
        SleepLogRepository::get_in_range(db, user_id, from, until)
            .await
            .map_err(ApiError::Internal)
    }

    fn validate(user_id: Uuid, req: LogSleepRequest) -> Result<CreateSleepLog, ApiError> {
        check_field("quality", validate_sleep_quality(req.quality))?;

        let minutes = (req.wake_time - req.bedtime).num_minutes();
        if minutes <= 0 {
            return Err(ValidationError::new("wake_time", "Wake time must be after bedtime").into());
        }
        if minutes > MAX_SLEEP_MINUTES {
            return Err(ValidationError::new("wake_time", "Sleep cannot exceed 24 hours").into());
        }

        let notes = req.notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        if notes.as_ref().is_some_and(|n| n.chars().count() > MAX_NOTES_LEN) {
            return Err(ValidationError::new(
                "notes",
                &format!("Must be at most {} characters", MAX_NOTES_LEN),
            )
            .into());
        }

        Ok(CreateSleepLog {
            user_id,
            bedtime: req.bedtime,
            wake_time: req.wake_time,
            duration_minutes: minutes as i32,
            quality: req.quality,
            notes,
        })
    }
}

pub(crate) fn to_response(record: &SleepLogRecord) -> SleepLogResponse {
    SleepLogResponse {
        id: record.id.to_string(),
        bedtime: record.bedtime,
        wake_time: record.wake_time,
        duration_minutes: record.duration_minutes,
        duration_hours: (record.duration_minutes as f64 / 60.0 * 10.0).round() / 10.0,
        quality: record.quality,
        notes: record.notes.clone(),
    }
}
