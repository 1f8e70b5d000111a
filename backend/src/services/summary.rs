//! Week and month dashboard summaries

use super::dates::{check_query_date, today};
use super::food::FoodService;
use super::sleep::SleepService;
use crate::db::dec_to_f64;
use crate::error::ApiError;
use crate::repositories::{ExerciseRecord, ExerciseRepository, FoodEntryRecord, SleepLogRecord};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;
use wellness_shared::summary::{bucket_daily, bucket_weekly, summarize, SummaryPoint, SummaryRange};
use wellness_shared::types::{SummaryQuery, SummaryResponse};
use wellness_shared::validation::ValidationError;

pub struct SummaryService;

impl SummaryService {
    pub async fn get(
        db: &PgPool,
        user_id: Uuid,
        query: SummaryQuery,
    ) -> Result<SummaryResponse, ApiError> {
        let range = match query.range.as_deref() {
            Some(r) => r
                .parse::<SummaryRange>()
                .map_err(|e| ValidationError::new("range", &e))?,
            None => SummaryRange::default(),
        };
        let (start, end) = summary_bounds(range, query.end.unwrap_or_else(today))?;

        let (food, exercise, sleep) = tokio::join!(
            FoodService::in_range(db, user_id, start, end),
            ExerciseRepository::get_in_range(db, user_id, start, end),
            SleepService::in_range(db, user_id, start, end),
        );
        let points = collect_points(&food?, &exercise.map_err(ApiError::Internal)?, &sleep?);

        Ok(SummaryResponse {
            range,
            summary: summarize(start, end, &points),
            daily: bucket_daily(start, end, &points),
            weekly: bucket_weekly(start, end, &points),
        })
    }
}

fn summary_bounds(range: SummaryRange, end: NaiveDate) -> Result<(NaiveDate, NaiveDate), ApiError> {
    range
        .bounds(check_query_date(end)?)
        .ok_or_else(|| ApiError::Validation("Summary range starts before the first valid date".to_string()))
}

/// Food is dated by when it was eaten and sleep by the morning it ended
fn collect_points(
    food: &[FoodEntryRecord],
    exercise: &[ExerciseRecord],
    sleep: &[SleepLogRecord],
) -> Vec<SummaryPoint> {
    let food = food.iter().map(|f| SummaryPoint::Food {
        date: f.recorded_at.date_naive(),
        calories: dec_to_f64(f.calories),
    });
    let exercise = exercise.iter().map(|e| SummaryPoint::Exercise {
        date: e.date,
        calories_burned: dec_to_f64(e.calories_burned),
    });
    let sleep = sleep.iter().map(|s| SummaryPoint::Sleep {
        date: s.wake_time.date_naive(),
        hours: s.duration_minutes as f64 / 60.0,
    });

    food.chain(exercise).chain(sleep).collect()
}
