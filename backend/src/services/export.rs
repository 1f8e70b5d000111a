//! Data export service for exporting user health data
//!
//! Supports multiple formats:
//! - JSON: every stored record, in the same shapes the API returns
//! - CSV: food and exercise logs for spreadsheets

use super::{diet_plan, exercise, food, goals, health_metrics, profile, report, sleep};
use crate::db::dec_to_f64;
use crate::error::ApiError;
use crate::repositories::{
    DietPlanRepository, ExerciseRecord, ExerciseRepository, FoodEntryRecord, FoodEntryRepository,
    GoalRepository, HealthMetricsRepository, HealthReportRepository, SleepLogRepository,
    UserRepository,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use wellness_shared::types::{
    DietPlanResponse, ExerciseResponse, FoodEntryResponse, GoalResponse, HealthMetricsResponse,
    HealthReportResponse, ProfileResponse, SleepLogResponse,
};

const EXPORT_VERSION: &str = "1.0";
const MAX_EXPORT_ROWS: i64 = 100_000;

/// Complete user data export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDataExport {
    pub export_version: String,
    pub exported_at: DateTime<Utc>,
    pub user_id: String,
    pub profile: Option<ProfileResponse>,
    pub health_metrics: Vec<HealthMetricsResponse>,
    pub food_entries: Vec<FoodEntryResponse>,
    pub exercises: Vec<ExerciseResponse>,
    pub sleep_logs: Vec<SleepLogResponse>,
    pub diet_plans: Vec<DietPlanResponse>,
    pub health_reports: Vec<HealthReportResponse>,
    pub goals: Vec<GoalResponse>,
}

/// CSV export row for food entries
#[derive(Debug, Clone, Serialize)]
pub struct FoodCsvRow {
    pub date: String,
    pub time: String,
    pub meal_type: String,
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// CSV export row for exercises
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseCsvRow {
    pub date: String,
    pub name: String,
    pub category: String,
    pub sets: i32,
    pub reps: i32,
    pub duration_minutes: Option<i32>,
    pub calories_burned: f64,
}

/// Data export service
pub struct ExportService;

impl ExportService {
    /// Export all user data as JSON
    pub async fn export_json(pool: &PgPool, user_id: Uuid) -> Result<UserDataExport, ApiError> {
        // Fetch all data in parallel
        let (
            profile_record,
            metrics,
            food_entries,
            exercise_logs,
            sleep_logs,
            plans,
            reports,
            goal_records,
        ) = tokio::join!(
            UserRepository::get_profile(pool, user_id),
            HealthMetricsRepository::get_history(pool, user_id, MAX_EXPORT_ROWS),
            FoodEntryRepository::get_all(pool, user_id),
            ExerciseRepository::get_all(pool, user_id),
            SleepLogRepository::get_all(pool, user_id),
            DietPlanRepository::get_by_user(pool, user_id),
            HealthReportRepository::get_by_user(pool, user_id, MAX_EXPORT_ROWS),
            GoalRepository::get_by_user(pool, user_id, None),
        );

        Ok(UserDataExport {
            export_version: EXPORT_VERSION.to_string(),
            exported_at: Utc::now(),
            user_id: user_id.to_string(),
            profile: profile_record
                .map_err(ApiError::Internal)?
                .map(profile::to_response),
            health_metrics: map_all(metrics, health_metrics::to_response)?,
            food_entries: map_all(food_entries, food::to_response)?,
            exercises: map_all(exercise_logs, exercise::to_response)?,
            sleep_logs: map_all(sleep_logs, sleep::to_response)?,
            diet_plans: map_all(plans, diet_plan::to_response)?,
            health_reports: map_all(reports, report::to_response)?,
            goals: map_all(goal_records, goals::to_response)?,
        })
    }

    /// Export food entries as CSV, oldest first
    pub async fn export_food_csv(pool: &PgPool, user_id: Uuid) -> Result<String, ApiError> {
        let entries = FoodEntryRepository::get_all(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        Self::to_csv(&food_rows(&entries))
    }

    /// Export exercises as CSV, oldest first
    pub async fn export_exercise_csv(pool: &PgPool, user_id: Uuid) -> Result<String, ApiError> {
        let records = ExerciseRepository::get_all(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        Self::to_csv(&exercise_rows(&records))
    }

    /// Convert data to CSV string
    fn to_csv<T: Serialize>(data: &[T]) -> Result<String, ApiError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV flush error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV encoding error: {}", e)))
    }
}

fn map_all<R, T>(records: anyhow::Result<Vec<R>>, f: fn(&R) -> T) -> Result<Vec<T>, ApiError> {
    Ok(records.map_err(ApiError::Internal)?.iter().map(f).collect())
}

fn food_rows(entries: &[FoodEntryRecord]) -> Vec<FoodCsvRow> {
    let mut rows: Vec<(DateTime<Utc>, FoodCsvRow)> = entries
        .iter()
        .map(|e| {
            (
                e.recorded_at,
                FoodCsvRow {
                    date: e.recorded_at.format("%Y-%m-%d").to_string(),
                    time: e.recorded_at.format("%H:%M").to_string(),
                    meal_type: e.meal_type.clone(),
                    name: e.name.clone(),
                    calories: dec_to_f64(e.calories),
                    protein_g: dec_to_f64(e.protein_g),
                    carbs_g: dec_to_f64(e.carbs_g),
                    fat_g: dec_to_f64(e.fat_g),
                },
            )
        })
        .collect();
    rows.sort_by_key(|(at, _)| *at);
    rows.into_iter().map(|(_, row)| row).collect()
}

fn exercise_rows(records: &[ExerciseRecord]) -> Vec<ExerciseCsvRow> {
    let mut records: Vec<&ExerciseRecord> = records.iter().collect();
    records.sort_by_key(|r| (r.date, r.created_at));
    records
        .into_iter()
        .map(|r| ExerciseCsvRow {
            date: r.date.format("%Y-%m-%d").to_string(),
            name: r.name.clone(),
            category: r.category.clone(),
            sets: r.sets,
            reps: r.reps,
            duration_minutes: r.duration_minutes,
            calories_burned: dec_to_f64(r.calories_burned),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::f64_to_dec;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    fn food_entry(name: &str, recorded_at: DateTime<Utc>) -> FoodEntryRecord {
        FoodEntryRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            calories: f64_to_dec(420.0),
            protein_g: f64_to_dec(30.0),
            carbs_g: f64_to_dec(40.0),
            fat_g: f64_to_dec(12.0),
            protein_pct: f64_to_dec(28.6),
            carbs_pct: f64_to_dec(38.1),
            fat_pct: f64_to_dec(25.7),
            meal_type: "lunch".to_string(),
            image_url: None,
            recorded_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_food_csv_is_chronological() {
        let noon: DateTime<Utc> = "2024-02-10T12:30:00Z".parse().unwrap();
        let entries = vec![
            food_entry("Salad, with dressing", noon),
            food_entry("Soup", noon - Duration::days(1)),
        ];

        let csv = ExportService::to_csv(&food_rows(&entries)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "date,time,meal_type,name,calories,protein_g,carbs_g,fat_g");
        assert!(lines[1].starts_with("2024-02-09,12:30,lunch,Soup,"));
        assert!(lines[2].contains("\"Salad, with dressing\""));
    }

    #[test]
    fn test_exercise_csv_empty_duration() {
        let record = ExerciseRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Squat".to_string(),
            category: "strength".to_string(),
            sets: 5,
            reps: 5,
            duration_minutes: None,
            calories_burned: f64_to_dec(120.0),
            date: NaiveDate::from_ymd_opt(2024, 2, 11).unwrap(),
            created_at: Utc::now(),
        };

        let csv = ExportService::to_csv(&exercise_rows(&[record])).unwrap();
        assert_eq!(csv.lines().nth(1), Some("2024-02-11,Squat,strength,5,5,,120.0"));
    }

    #[test]
    fn test_empty_csv_has_no_rows() {
        let csv = ExportService::to_csv::<ExerciseCsvRow>(&[]).unwrap();
        assert!(csv.is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: every food entry becomes exactly one CSV record
        #[test]
        fn prop_food_csv_one_row_per_entry(
            names in proptest::collection::vec("[a-zA-Z ,\"]{1,20}", 0..20),
        ) {
            let base: DateTime<Utc> = "2024-01-01T08:00:00Z".parse().unwrap();
            let entries: Vec<FoodEntryRecord> = names
                .iter()
                .enumerate()
                .map(|(i, n)| food_entry(n, base + Duration::minutes(i as i64)))
                .collect();

            let csv = ExportService::to_csv(&food_rows(&entries)).unwrap();
            let mut reader = csv::Reader::from_reader(csv.as_bytes());
            let parsed: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

            prop_assert_eq!(parsed.len(), entries.len());
            for (record, name) in parsed.iter().zip(names.iter()) {
                prop_assert_eq!(&record[3], name.as_str());
            }
        }
    }
}
