//! Sleep repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Sleep log record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SleepLogRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bedtime: DateTime<Utc>,
    pub wake_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub quality: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a sleep log
#[derive(Debug, Clone)]
pub struct CreateSleepLog {
    pub user_id: Uuid,
    pub bedtime: DateTime<Utc>,
    pub wake_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub quality: i32,
    pub notes: Option<String>,
}

/// Sleep log repository
pub struct SleepLogRepository;

impl SleepLogRepository {
    /// Create a new sleep log entry
    pub async fn create(pool: &PgPool, input: CreateSleepLog) -> Result<SleepLogRecord> {
        let record = sqlx::query_as::<_, SleepLogRecord>(
            r#"
            INSERT INTO sleep_logs (user_id, bedtime, wake_time, duration_minutes, quality, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, bedtime, wake_time, duration_minutes, quality, notes, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.bedtime)
        .bind(input.wake_time)
        .bind(input.duration_minutes)
        .bind(input.quality)
        .bind(&input.notes)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Logs whose wake time falls in `[start, end)`, newest first
    pub async fn get_in_range(
        pool: &PgPool,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SleepLogRecord>> {
        let records = sqlx::query_as::<_, SleepLogRecord>(
            r#"
            SELECT id, user_id, bedtime, wake_time, duration_minutes, quality, notes, created_at
            FROM sleep_logs
            WHERE user_id = $1 AND wake_time >= $2 AND wake_time < $3
            ORDER BY wake_time DESC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Every sleep log for the user, oldest first
    pub async fn get_all(pool: &PgPool, user_id: Uuid) -> Result<Vec<SleepLogRecord>> {
        let records = sqlx::query_as::<_, SleepLogRecord>(
            r#"
            SELECT id, user_id, bedtime, wake_time, duration_minutes, quality, notes, created_at
            FROM sleep_logs
            WHERE user_id = $1
            ORDER BY wake_time ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Delete a sleep log entry
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM sleep_logs WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
