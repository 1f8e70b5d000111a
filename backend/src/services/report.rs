//! Health reports
//!
//! Scores and classifications are computed locally from the newest vitals
//! snapshot and the last week of activity and intake; the text model only
//! writes the narrative sections. Each request stores a new report.

use super::dates::today;
use super::exercise::ExerciseService;
use super::food::FoodService;
use super::health_metrics::snapshot;
use crate::ai::prompts::ReportFacts;
use crate::ai::{fallback, generate_structured, prompts, AiServices};
use crate::db::{dec_to_f64, f64_to_dec};
use crate::error::ApiError;
use crate::rate_limit::AiQuota;
use crate::repositories::{
    CreateHealthReport, HealthMetricsRecord, HealthMetricsRepository, HealthReportRecord,
    HealthReportRepository,
};
use chrono::Duration;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use wellness_shared::health_metrics::{
    calculate_bmi, calculate_health_score, classify_bmi, ActivityClass, BmiCategory, RiskLevel,
};
use wellness_shared::models::ReportSections;
use wellness_shared::types::{HealthReportResponse, HealthReportSummary};

const INTAKE_WINDOW_DAYS: i64 = 7;
const DEFAULT_LIST_LIMIT: i64 = 20;
const MAX_LIST_LIMIT: i64 = 100;

pub struct ReportService;

impl ReportService {
    pub async fn generate(
        db: &PgPool,
        ai: &AiServices,
        quota: &AiQuota,
        user_id: Uuid,
    ) -> Result<HealthReportResponse, ApiError> {
        let latest = HealthMetricsRepository::get_latest(db, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| {
                ApiError::Validation(
                    "Record your health metrics before generating a report".to_string(),
                )
            })?;

        quota.consume(user_id).await?;

        let end = today();
        let weekly_burned = ExerciseService::calories_burned_last_week(db, user_id, end).await?;
        let intake = FoodService::in_range(db, user_id, end - Duration::days(INTAKE_WINDOW_DAYS - 1), end)
            .await?
            .iter()
            .map(|e| dec_to_f64(e.calories))
            .sum::<f64>();
        let average_intake = (intake / INTAKE_WINDOW_DAYS as f64).round();

        let facts = build_facts(&latest, weekly_burned, average_intake);
        let prompt = prompts::health_report(&facts);
        let generated = generate_structured::<ReportSections, _>(
            ai.text.as_ref(),
            "health_report",
            &prompt,
            || fallback::report_sections(&facts),
        )
        .await;

        let record = HealthReportRepository::create(
            db,
            new_report(user_id, &facts, generated.value, generated.ai_generated),
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(
            report_id = %record.id,
            health_score = record.health_score,
            ai_generated = record.ai_generated,
            "Health report generated"
        );
        Ok(to_response(&record))
    }

    pub async fn list(
        db: &PgPool,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<HealthReportSummary>, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
        let records = HealthReportRepository::get_by_user(db, user_id, limit)
            .await
            .map_err(ApiError::Internal)?;
        Ok(records.iter().map(to_summary).collect())
    }

    pub async fn get(db: &PgPool, user_id: Uuid, id: Uuid) -> Result<HealthReportResponse, ApiError> {
        HealthReportRepository::get_by_id(db, id, user_id)
            .await
            .map_err(ApiError::Internal)?
            .map(|r| to_response(&r))
            .ok_or_else(|| ApiError::NotFound("Report not found".to_string()))
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = HealthReportRepository::delete(db, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Report not found".to_string()));
        }
        Ok(())
    }
}

fn build_facts(latest: &HealthMetricsRecord, weekly_burned: f64, average_intake: f64) -> ReportFacts {
    let snapshot = snapshot(latest, weekly_burned, average_intake);
    let bmi = calculate_bmi(snapshot.weight_kg, snapshot.height_cm);
    let score = calculate_health_score(
        &snapshot.blood_pressure,
        snapshot.heart_rate,
        bmi,
        snapshot.sleep_hours,
    );

    ReportFacts {
        bmi,
        bmi_category: classify_bmi(bmi),
        risk_level: RiskLevel::from_score(score.total),
        activity_label: ActivityClass::from_weekly_calories(weekly_burned).label(),
        score,
        snapshot,
    }
}

fn new_report(
    user_id: Uuid,
    facts: &ReportFacts,
    sections: ReportSections,
    ai_generated: bool,
) -> CreateHealthReport {
    CreateHealthReport {
        user_id,
        score_breakdown: facts.score,
        bmi: f64_to_dec((facts.bmi * 100.0).round() / 100.0),
        bmi_category: facts.bmi_category.label().to_string(),
        risk_level: facts.risk_level.as_str().to_string(),
        activity_level: facts.activity_label.to_string(),
        metrics: facts.snapshot.clone(),
        sections,
        ai_generated,
    }
}

/// Category as classified from the unrounded BMI at generation time; the
/// rounded column value is only consulted when the label is unreadable
fn stored_bmi_category(record: &HealthReportRecord) -> BmiCategory {
    record
        .bmi_category
        .parse()
        .unwrap_or_else(|_| classify_bmi(dec_to_f64(record.bmi)))
}

pub(crate) fn to_summary(record: &HealthReportRecord) -> HealthReportSummary {
    HealthReportSummary {
        id: record.id.to_string(),
        health_score: record.health_score.max(0) as u32,
        risk_level: RiskLevel::from_score(record.health_score.max(0) as u32),
        bmi_category: stored_bmi_category(record),
        ai_generated: record.ai_generated,
        created_at: record.created_at,
    }
}

pub(crate) fn to_response(record: &HealthReportRecord) -> HealthReportResponse {
    let score = record.health_score.max(0) as u32;
    let bmi = dec_to_f64(record.bmi);

    HealthReportResponse {
        id: record.id.to_string(),
        health_score: score,
        score_breakdown: record.score_breakdown.0,
        bmi,
        bmi_category: stored_bmi_category(record),
        risk_level: RiskLevel::from_score(score),
        activity_level: record.activity_level.clone(),
        metrics: record.metrics.0.clone(),
        sections: record.sections.0.clone(),
        ai_generated: record.ai_generated,
        created_at: record.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::CannedText;
    use chrono::Utc;
    use sqlx::types::Json;

    fn metrics(bp: &str, sleep: f64) -> HealthMetricsRecord {
        body_metrics(175.0, 70.0, bp, sleep)
    }

    fn body_metrics(height_cm: f64, weight_kg: f64, bp: &str, sleep: f64) -> HealthMetricsRecord {
        HealthMetricsRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            height_cm: f64_to_dec(height_cm),
            weight_kg: f64_to_dec(weight_kg),
            age: 30,
            gender: "male".to_string(),
            blood_pressure: bp.to_string(),
            heart_rate: 72,
            sleep_hours: f64_to_dec(sleep),
            stress_level: 5,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_facts_healthy() {
        let facts = build_facts(&metrics("115/75", 8.0), 1500.0, 2100.0);
        assert_eq!(facts.score.total, 100);
        assert_eq!(facts.risk_level, RiskLevel::Low);
        assert_eq!(facts.bmi_category, BmiCategory::Normal);
        assert_eq!(facts.activity_label, "Moderately Active");
        assert_eq!(facts.snapshot.average_daily_calories, 2100.0);
    }

    #[test]
    fn test_build_facts_at_risk() {
        let facts = build_facts(&metrics("150/95", 5.0), 0.0, 0.0);
        // 5 (stage 2) + 25 (hr) + 25 (bmi) + 5 (sleep)
        assert_eq!(facts.score.total, 60);
        assert_eq!(facts.risk_level, RiskLevel::Moderate);
        assert_eq!(facts.activity_label, "Sedentary");
    }

    /// Stored row as the repository would return it
    fn stored(input: CreateHealthReport) -> HealthReportRecord {
        HealthReportRecord {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            health_score: input.score_breakdown.total as i32,
            score_breakdown: Json(input.score_breakdown),
            bmi: input.bmi,
            bmi_category: input.bmi_category,
            risk_level: input.risk_level,
            activity_level: input.activity_level,
            metrics: Json(input.metrics),
            sections: Json(input.sections),
            ai_generated: input.ai_generated,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_category_survives_bmi_rounding_at_boundary() {
        // 57 / 1.51^2 = 24.9989, stored as 25.00
        let facts = build_facts(&body_metrics(151.0, 57.0, "115/75", 8.0), 1500.0, 2100.0);
        assert_eq!(facts.bmi_category, BmiCategory::Normal);
        assert_eq!(facts.score.bmi, 25);

        let sections = fallback::report_sections(&facts);
        let record = stored(new_report(Uuid::new_v4(), &facts, sections, false));
        assert_eq!(dec_to_f64(record.bmi), 25.0);

        let response = to_response(&record);
        assert_eq!(response.bmi_category, BmiCategory::Normal);
        assert_eq!(response.score_breakdown.bmi, 25);
        assert_eq!(to_summary(&record).bmi_category, BmiCategory::Normal);
    }

    #[test]
    fn test_extreme_accepted_body_fits_bmi_column() {
        use wellness_shared::validation::{validate_height_cm, validate_weight};

        assert!(validate_weight(500.0).is_ok());
        assert!(validate_height_cm(50.0).is_ok());

        let facts = build_facts(&body_metrics(50.0, 500.0, "115/75", 8.0), 0.0, 0.0);
        let input = new_report(Uuid::new_v4(), &facts, fallback::report_sections(&facts), false);
        assert_eq!(input.bmi, rust_decimal::Decimal::new(200_000, 2));
        // health_reports.bmi is NUMERIC(7, 2)
        assert!(input.bmi < rust_decimal::Decimal::new(10_000_000, 2));
        assert!(input.bmi.scale() <= 2);
    }

    #[test]
    fn test_unreadable_stored_category_reclassifies() {
        let facts = build_facts(&metrics("115/75", 8.0), 0.0, 0.0);
        let mut input = new_report(Uuid::new_v4(), &facts, fallback::report_sections(&facts), false);
        input.bmi_category = "??".to_string();
        assert_eq!(to_response(&stored(input)).bmi_category, BmiCategory::Normal);
    }

    #[tokio::test]
    async fn test_report_sections_use_model_reply_when_valid() {
        let facts = build_facts(&metrics("115/75", 8.0), 500.0, 2000.0);
        let reply = r#"Here you go: {"vital_signs": [{"name": "BP", "value": "115/75", "status": "normal", "comment": "ok"}],
            "predictions": [], "nutrition_advice": ["Eat greens"], "recommendations": ["Walk daily"]}"#;
        let text = CannedText::ok(reply);

        let generated = generate_structured::<ReportSections, _>(
            &text,
            "health_report",
            &prompts::health_report(&facts),
            || fallback::report_sections(&facts),
        )
        .await;

        assert!(generated.ai_generated);
        assert_eq!(generated.value.recommendations, vec!["Walk daily".to_string()]);
    }

    #[tokio::test]
    async fn test_report_sections_fall_back_on_schema_violation() {
        let facts = build_facts(&metrics("115/75", 8.0), 500.0, 2000.0);
        let text = CannedText::ok(r#"{"vital_signs": [], "nutrition_advice": [], "recommendations": []}"#);

        let generated = generate_structured::<ReportSections, _>(
            &text,
            "health_report",
            &prompts::health_report(&facts),
            || fallback::report_sections(&facts),
        )
        .await;

        assert!(!generated.ai_generated);
        assert!(!generated.value.vital_signs.is_empty());
    }
}
