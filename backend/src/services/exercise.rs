//! Exercise logging and weekly totals

use super::dates::{check_query_date, resolve_range, shift_days, today};
use crate::db::{dec_to_f64, f64_to_dec};
use crate::error::ApiError;
use crate::repositories::{CreateExercise, ExerciseRecord, ExerciseRepository};
use chrono::{Datelike, Duration, NaiveDate};
use sqlx::PgPool;
use uuid::Uuid;
use wellness_shared::health_metrics::ActivityClass;
use wellness_shared::models::ExerciseCategory;
use wellness_shared::types::{
    CategoryTotals, DateRangeQuery, ExerciseResponse, LogExerciseRequest, WeeklyExerciseResponse,
};
use wellness_shared::validation::{
    check_field, validate_calories, validate_duration_minutes, validate_name, ValidationError,
};

const MAX_SETS_OR_REPS: i32 = 1000;
const DEFAULT_LIST_DAYS: i64 = 7;

const CATEGORY_ORDER: [ExerciseCategory; 5] = [
    ExerciseCategory::Strength,
    ExerciseCategory::Cardio,
    ExerciseCategory::Flexibility,
    ExerciseCategory::Sports,
    ExerciseCategory::Other,
];

pub struct ExerciseService;

impl ExerciseService {
    pub async fn log(
        db: &PgPool,
        user_id: Uuid,
        req: LogExerciseRequest,
    ) -> Result<ExerciseResponse, ApiError> {
        let input = Self::validate(user_id, &req, today())?;
        let record = ExerciseRepository::create(db, input)
            .await
            .map_err(ApiError::Internal)?;

        Ok(to_response(&record))
    }

    /// Exercises in `start..=end`, newest first (default: the last 7 days)
    pub async fn list(
        db: &PgPool,
        user_id: Uuid,
        query: DateRangeQuery,
    ) -> Result<Vec<ExerciseResponse>, ApiError> {
        let (start, end) = resolve_range(query.start, query.end, DEFAULT_LIST_DAYS)?;
        let records = ExerciseRepository::get_in_range(db, user_id, start, end)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.iter().map(to_response).collect())
    }

    /// Totals for the Monday-to-Sunday week containing `date`
    pub async fn weekly(
        db: &PgPool,
        user_id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<WeeklyExerciseResponse, ApiError> {
        let (monday, sunday) = week_bounds(date.unwrap_or_else(today))?;
        let records = ExerciseRepository::get_in_range(db, user_id, monday, sunday)
            .await
            .map_err(ApiError::Internal)?;

        Ok(weekly_totals(monday, sunday, &records))
    }

    /// Calories burned over the seven days ending on `end`
    pub(crate) async fn calories_burned_last_week(
        db: &PgPool,
        user_id: Uuid,
        end: NaiveDate,
    ) -> Result<f64, ApiError> {
        let records = ExerciseRepository::get_in_range(db, user_id, end - Duration::days(6), end)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.iter().map(|r| dec_to_f64(r.calories_burned)).sum())
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = ExerciseRepository::delete(db, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Exercise not found".to_string()));
        }
        Ok(())
    }

    fn validate(
        user_id: Uuid,
        req: &LogExerciseRequest,
        today: NaiveDate,
    ) -> Result<CreateExercise, ApiError> {
        check_field("name", validate_name(&req.name, 200))?;
        check_field("calories_burned", validate_calories(req.calories_burned))?;
        if let Some(minutes) = req.duration_minutes {
            check_field("duration_minutes", validate_duration_minutes(minutes))?;
        }
        for (field, value) in [("sets", req.sets), ("reps", req.reps)] {
            if !(0..=MAX_SETS_OR_REPS).contains(&value) {
                return Err(ValidationError::new(
                    field,
                    &format!("Must be between 0 and {}", MAX_SETS_OR_REPS),
                )
                .into());
            }
        }

        let category: ExerciseCategory = req
            .category
            .parse()
            .map_err(|e: String| ValidationError::new("category", &e))?;

        let date = req.date.unwrap_or(today);
        if date > today {
            return Err(ValidationError::new("date", "Cannot log exercise in the future").into());
        }

        Ok(CreateExercise {
            user_id,
            name: req.name.trim().to_string(),
            category: category.as_str().to_string(),
            sets: req.sets,
            reps: req.reps,
            duration_minutes: req.duration_minutes,
            calories_burned: f64_to_dec(req.calories_burned),
            date,
        })
    }
}

pub(crate) fn to_response(record: &ExerciseRecord) -> ExerciseResponse {
    ExerciseResponse {
        id: record.id.to_string(),
        name: record.name.clone(),
        category: record.category.clone(),
        sets: record.sets,
        reps: record.reps,
        duration_minutes: record.duration_minutes,
        calories_burned: dec_to_f64(record.calories_burned),
        date: record.date,
    }
}

/// Monday and Sunday of the week containing `date`
fn week_bounds(date: NaiveDate) -> Result<(NaiveDate, NaiveDate), ApiError> {
    let date = check_query_date(date)?;
    let monday = shift_days(date, -(date.weekday().num_days_from_monday() as i64))?;
    Ok((monday, shift_days(monday, 6)?))
}

fn weekly_totals(
    week_start: NaiveDate,
    week_end: NaiveDate,
    records: &[ExerciseRecord],
) -> WeeklyExerciseResponse {
    let by_category: Vec<CategoryTotals> = CATEGORY_ORDER
        .iter()
        .filter_map(|category| {
            let matching: Vec<&ExerciseRecord> = records
                .iter()
                .filter(|r| r.category == category.as_str())
                .collect();
            if matching.is_empty() {
                return None;
            }
            Some(CategoryTotals {
                category: category.as_str().to_string(),
                workouts: matching.len(),
                calories_burned: matching.iter().map(|r| dec_to_f64(r.calories_burned)).sum(),
                duration_minutes: matching
                    .iter()
                    .map(|r| r.duration_minutes.unwrap_or(0) as i64)
                    .sum(),
            })
        })
        .collect();

    let total_calories_burned: f64 = by_category.iter().map(|c| c.calories_burned).sum();

    WeeklyExerciseResponse {
        week_start,
        week_end,
        total_workouts: records.len(),
        total_calories_burned,
        total_duration_minutes: by_category.iter().map(|c| c.duration_minutes).sum(),
        activity_level: ActivityClass::from_weekly_calories(total_calories_burned)
            .label()
            .to_string(),
        by_category,
    }
}
