//! Health card: a one-screen digest of the user's current state

use super::goals::GoalService;
use super::health_metrics::to_response as metrics_response;
use super::profile::age_from_dob;
use super::report::to_summary;
use crate::db::dec_to_f64;
use crate::error::ApiError;
use crate::repositories::{
    HealthMetricsRecord, HealthMetricsRepository, HealthReportRepository, ProfileRecord,
    UserRepository,
};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use wellness_shared::health_metrics::{calculate_bmi, calculate_health_score, RiskLevel};
use wellness_shared::types::HealthCardResponse;

pub struct HealthCardService;

impl HealthCardService {
    pub async fn get(db: &PgPool, user_id: Uuid) -> Result<HealthCardResponse, ApiError> {
        let (profile, latest, report, active_goals) = tokio::join!(
            UserRepository::get_profile(db, user_id),
            HealthMetricsRepository::get_latest(db, user_id),
            HealthReportRepository::get_latest(db, user_id),
            GoalService::count_active(db, user_id),
        );

        let profile = profile.map_err(ApiError::Internal)?;
        let latest = latest.map_err(ApiError::Internal)?;
        let report = report.map_err(ApiError::Internal)?;

        let mut card = build_card(user_id, profile.as_ref(), latest.as_ref(), active_goals?);
        card.latest_report = report.as_ref().map(to_summary);
        Ok(card)
    }
}

/// Profile fields win; the newest metrics fill in age and gender when the
/// profile has none
fn build_card(
    user_id: Uuid,
    profile: Option<&ProfileRecord>,
    latest: Option<&HealthMetricsRecord>,
    active_goals: usize,
) -> HealthCardResponse {
    let score = latest.map(|m| {
        let bmi = calculate_bmi(dec_to_f64(m.weight_kg), dec_to_f64(m.height_cm));
        calculate_health_score(&m.blood_pressure, m.heart_rate, bmi, dec_to_f64(m.sleep_hours))
    });

    let age = profile
        .and_then(|p| p.date_of_birth)
        .map(age_from_dob)
        .or_else(|| latest.map(|m| m.age));
    let gender = profile
        .and_then(|p| p.gender.clone())
        .or_else(|| latest.map(|m| m.gender.clone()));

    HealthCardResponse {
        user_id: user_id.to_string(),
        display_name: profile.and_then(|p| p.display_name.clone()),
        age,
        gender,
        latest_metrics: latest.map(metrics_response),
        risk_level: score.map(|s| RiskLevel::from_score(s.total)),
        health_score: score,
        latest_report: None,
        active_goals,
        generated_at: Utc::now(),
    }
}
