//! Vitals snapshots
//!
//! Input arrives in any supported unit and is stored metric. Snapshots are
//! never edited; the newest one is what reports and the health card read.

use crate::db::{dec_to_f64, f64_to_dec};
use crate::error::ApiError;
use crate::repositories::{CreateHealthMetrics, HealthMetricsRecord, HealthMetricsRepository};
use sqlx::PgPool;
use uuid::Uuid;
use wellness_shared::health_metrics::{calculate_bmi, classify_bmi, Gender};
use wellness_shared::models::MetricsSnapshot;
use wellness_shared::types::{HealthMetricsResponse, RecordHealthMetricsRequest};
use wellness_shared::units::{parse_unit_or_default, HeightUnit, WeightUnit};
use wellness_shared::validation::{
    check_field, validate_age, validate_blood_pressure, validate_heart_rate, validate_height_cm,
    validate_sleep_hours, validate_stress_level, validate_weight, ValidationError,
};

const DEFAULT_HISTORY_LIMIT: i64 = 30;
const MAX_HISTORY_LIMIT: i64 = 365;

pub struct HealthMetricsService;

impl HealthMetricsService {
    pub async fn record(
        db: &PgPool,
        user_id: Uuid,
        req: RecordHealthMetricsRequest,
    ) -> Result<HealthMetricsResponse, ApiError> {
        let input = Self::validate(user_id, &req)?;
        let record = HealthMetricsRepository::create(db, input)
            .await
            .map_err(ApiError::Internal)?;

        Ok(to_response(&record))
    }

    pub async fn latest(db: &PgPool, user_id: Uuid) -> Result<HealthMetricsResponse, ApiError> {
        HealthMetricsRepository::get_latest(db, user_id)
            .await
            .map_err(ApiError::Internal)?
            .map(|r| to_response(&r))
            .ok_or_else(|| ApiError::NotFound("No health metrics recorded yet".to_string()))
    }

    /// Snapshot history, newest first
    pub async fn history(
        db: &PgPool,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<HealthMetricsResponse>, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT).clamp(1, MAX_HISTORY_LIMIT);
        let records = HealthMetricsRepository::get_history(db, user_id, limit)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.iter().map(to_response).collect())
    }

    fn validate(
        user_id: Uuid,
        req: &RecordHealthMetricsRequest,
    ) -> Result<CreateHealthMetrics, ApiError> {
        let height_unit: HeightUnit = parse_unit_or_default(req.height_unit.as_deref())
            .map_err(|e| ValidationError::new("height_unit", &e))?;
        let weight_unit: WeightUnit = parse_unit_or_default(req.weight_unit.as_deref())
            .map_err(|e| ValidationError::new("weight_unit", &e))?;

        let height_cm = height_unit.to_cm(req.height);
        let weight_kg = weight_unit.to_kg(req.weight);
        let blood_pressure = req.blood_pressure.replace(' ', "");

        check_field("height", validate_height_cm(height_cm))?;
        check_field("weight", validate_weight(weight_kg))?;
        check_field("age", validate_age(req.age))?;
        check_field("blood_pressure", validate_blood_pressure(&blood_pressure))?;
        check_field("heart_rate", validate_heart_rate(req.heart_rate))?;
        check_field("sleep_hours", validate_sleep_hours(req.sleep_hours))?;
        check_field("stress_level", validate_stress_level(req.stress_level))?;

        let gender: Gender = req
            .gender
            .parse()
            .map_err(|_| ValidationError::new("gender", "Must be one of: male, female, other"))?;

        Ok(CreateHealthMetrics {
            user_id,
            height_cm: f64_to_dec(height_cm),
            weight_kg: f64_to_dec(weight_kg),
            age: req.age,
            gender: gender.as_str().to_string(),
            blood_pressure,
            heart_rate: req.heart_rate,
            sleep_hours: f64_to_dec(req.sleep_hours),
            stress_level: req.stress_level,
        })
    }
}

pub(crate) fn to_response(record: &HealthMetricsRecord) -> HealthMetricsResponse {
    let height_cm = dec_to_f64(record.height_cm);
    let weight_kg = dec_to_f64(record.weight_kg);
    let bmi = calculate_bmi(weight_kg, height_cm);

    HealthMetricsResponse {
        id: record.id.to_string(),
        height_cm,
        weight_kg,
        age: record.age,
        gender: record.gender.clone(),
        blood_pressure: record.blood_pressure.clone(),
        heart_rate: record.heart_rate,
        sleep_hours: dec_to_f64(record.sleep_hours),
        stress_level: record.stress_level,
        bmi: (bmi * 10.0).round() / 10.0,
        bmi_category: classify_bmi(bmi),
        created_at: record.created_at,
    }
}

/// Snapshot embedded in a health report
pub(crate) fn snapshot(
    record: &HealthMetricsRecord,
    weekly_calories_burned: f64,
    average_daily_calories: f64,
) -> MetricsSnapshot {
    MetricsSnapshot {
        height_cm: dec_to_f64(record.height_cm),
        weight_kg: dec_to_f64(record.weight_kg),
        age: record.age,
        gender: record.gender.clone(),
        blood_pressure: record.blood_pressure.clone(),
        heart_rate: record.heart_rate,
        sleep_hours: dec_to_f64(record.sleep_hours),
        stress_level: record.stress_level,
        weekly_calories_burned,
        average_daily_calories,
    }
}
