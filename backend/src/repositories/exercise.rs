//! Exercise repository for database operations

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Exercise record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExerciseRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    pub sets: i32,
    pub reps: i32,
    pub duration_minutes: Option<i32>,
    pub calories_burned: Decimal,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Input for logging an exercise
#[derive(Debug, Clone)]
pub struct CreateExercise {
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    pub sets: i32,
    pub reps: i32,
    pub duration_minutes: Option<i32>,
    pub calories_burned: Decimal,
    pub date: NaiveDate,
}

/// Exercise repository
pub struct ExerciseRepository;

impl ExerciseRepository {
    /// Log a new exercise
    pub async fn create(pool: &PgPool, input: CreateExercise) -> Result<ExerciseRecord> {
        let record = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            INSERT INTO exercises (user_id, name, category, sets, reps, duration_minutes,
                                   calories_burned, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, name, category, sets, reps, duration_minutes,
                      calories_burned, date, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.sets)
        .bind(input.reps)
        .bind(input.duration_minutes)
        .bind(input.calories_burned)
        .bind(input.date)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Exercises dated within `[start, end]`, newest first
    pub async fn get_in_range(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ExerciseRecord>> {
        let records = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT id, user_id, name, category, sets, reps, duration_minutes,
                   calories_burned, date, created_at
            FROM exercises
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Every exercise for the user, oldest first
    pub async fn get_all(pool: &PgPool, user_id: Uuid) -> Result<Vec<ExerciseRecord>> {
        let records = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT id, user_id, name, category, sets, reps, duration_minutes,
                   calories_burned, date, created_at
            FROM exercises
            WHERE user_id = $1
            ORDER BY date ASC, created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Delete an exercise
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM exercises WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
