//! Health report repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;
use wellness_shared::health_metrics::HealthScoreBreakdown;
use wellness_shared::models::{MetricsSnapshot, ReportSections};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HealthReportRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub health_score: i32,
    pub score_breakdown: Json<HealthScoreBreakdown>,
    pub bmi: Decimal,
    pub bmi_category: String,
    pub risk_level: String,
    pub activity_level: String,
    pub metrics: Json<MetricsSnapshot>,
    pub sections: Json<ReportSections>,
    pub ai_generated: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateHealthReport {
    pub user_id: Uuid,
    pub score_breakdown: HealthScoreBreakdown,
    pub bmi: Decimal,
    pub bmi_category: String,
    pub risk_level: String,
    pub activity_level: String,
    pub metrics: MetricsSnapshot,
    pub sections: ReportSections,
    pub ai_generated: bool,
}

pub struct HealthReportRepository;

impl HealthReportRepository {
    pub async fn create(pool: &PgPool, input: CreateHealthReport) -> Result<HealthReportRecord> {
        let record = sqlx::query_as::<_, HealthReportRecord>(
            r#"
            INSERT INTO health_reports (user_id, health_score, score_breakdown, bmi, bmi_category,
                                        risk_level, activity_level, metrics, sections, ai_generated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, user_id, health_score, score_breakdown, bmi, bmi_category, risk_level,
                      activity_level, metrics, sections, ai_generated, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.score_breakdown.total as i32)
        .bind(Json(&input.score_breakdown))
        .bind(input.bmi)
        .bind(&input.bmi_category)
        .bind(&input.risk_level)
        .bind(&input.activity_level)
        .bind(Json(&input.metrics))
        .bind(Json(&input.sections))
        .bind(input.ai_generated)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    pub async fn get_by_id(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<HealthReportRecord>> {
        let record = sqlx::query_as::<_, HealthReportRecord>(
            r#"
            SELECT id, user_id, health_score, score_breakdown, bmi, bmi_category, risk_level,
                   activity_level, metrics, sections, ai_generated, created_at
            FROM health_reports
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Reports for the user, newest first
    pub async fn get_by_user(
        pool: &PgPool,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<HealthReportRecord>> {
        let records = sqlx::query_as::<_, HealthReportRecord>(
            r#"
            SELECT id, user_id, health_score, score_breakdown, bmi, bmi_category, risk_level,
                   activity_level, metrics, sections, ai_generated, created_at
            FROM health_reports
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn get_latest(pool: &PgPool, user_id: Uuid) -> Result<Option<HealthReportRecord>> {
        Ok(Self::get_by_user(pool, user_id, 1).await?.into_iter().next())
    }

    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM health_reports WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
