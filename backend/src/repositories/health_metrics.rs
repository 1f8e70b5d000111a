//! Health metrics snapshots. Rows are append-only.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HealthMetricsRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub height_cm: Decimal,
    pub weight_kg: Decimal,
    pub age: i32,
    pub gender: String,
    pub blood_pressure: String,
    pub heart_rate: i32,
    pub sleep_hours: Decimal,
    pub stress_level: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateHealthMetrics {
    pub user_id: Uuid,
    pub height_cm: Decimal,
    pub weight_kg: Decimal,
    pub age: i32,
    pub gender: String,
    pub blood_pressure: String,
    pub heart_rate: i32,
    pub sleep_hours: Decimal,
    pub stress_level: i32,
}

pub struct HealthMetricsRepository;

impl HealthMetricsRepository {
    pub async fn create(pool: &PgPool, input: CreateHealthMetrics) -> Result<HealthMetricsRecord> {
        let record = sqlx::query_as::<_, HealthMetricsRecord>(
            r#"
            INSERT INTO health_metrics (user_id, height_cm, weight_kg, age, gender,
                                        blood_pressure, heart_rate, sleep_hours, stress_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, height_cm, weight_kg, age, gender, blood_pressure,
                      heart_rate, sleep_hours, stress_level, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.height_cm)
        .bind(input.weight_kg)
        .bind(input.age)
        .bind(&input.gender)
        .bind(&input.blood_pressure)
        .bind(input.heart_rate)
        .bind(input.sleep_hours)
        .bind(input.stress_level)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Newest snapshot for the user
    pub async fn get_latest(pool: &PgPool, user_id: Uuid) -> Result<Option<HealthMetricsRecord>> {
        let record = sqlx::query_as::<_, HealthMetricsRecord>(
            r#"
            SELECT id, user_id, height_cm, weight_kg, age, gender, blood_pressure,
                   heart_rate, sleep_hours, stress_level, created_at
            FROM health_metrics
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Snapshot history, newest first
    pub async fn get_history(
        pool: &PgPool,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<HealthMetricsRecord>> {
        let records = sqlx::query_as::<_, HealthMetricsRecord>(
            r#"
            SELECT id, user_id, height_cm, weight_kg, age, gender, blood_pressure,
                   heart_rate, sleep_hours, stress_level, created_at
            FROM health_metrics
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
}
