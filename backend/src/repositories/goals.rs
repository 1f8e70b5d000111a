//! Goals repository for database operations

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Goal record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GoalRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub goal_type: String,
    pub target_value: Decimal,
    pub start_value: Decimal,
    pub current_value: Decimal,
    pub unit: Option<String>,
    pub direction: String,
    pub target_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a goal
#[derive(Debug, Clone)]
pub struct CreateGoal {
    pub user_id: Uuid,
    pub title: String,
    pub goal_type: String,
    pub target_value: Decimal,
    pub start_value: Decimal,
    pub unit: Option<String>,
    pub direction: String,
    pub target_date: Option<NaiveDate>,
}

/// Input for updating a goal
#[derive(Debug, Clone, Default)]
pub struct UpdateGoal {
    pub title: Option<String>,
    pub target_value: Option<Decimal>,
    pub current_value: Option<Decimal>,
    pub target_date: Option<NaiveDate>,
    pub status: Option<String>,
}

/// Goal repository
pub struct GoalRepository;

impl GoalRepository {
    /// Create a new goal; progress starts at the start value
    pub async fn create(pool: &PgPool, input: CreateGoal) -> Result<GoalRecord> {
        let record = sqlx::query_as::<_, GoalRecord>(
            r#"
            INSERT INTO health_goals (
                user_id, title, goal_type, target_value, start_value, current_value,
                unit, direction, target_date
            )
            VALUES ($1, $2, $3, $4, $5, $5, $6, $7, $8)
            RETURNING id, user_id, title, goal_type, target_value, start_value,
                      current_value, unit, direction, target_date, status,
                      created_at, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.title)
        .bind(&input.goal_type)
        .bind(input.target_value)
        .bind(input.start_value)
        .bind(&input.unit)
        .bind(&input.direction)
        .bind(input.target_date)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Get a goal by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<Option<GoalRecord>> {
        let record = sqlx::query_as::<_, GoalRecord>(
            r#"
            SELECT id, user_id, title, goal_type, target_value, start_value,
                   current_value, unit, direction, target_date, status,
                   created_at, updated_at
            FROM health_goals
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Get all goals for a user, optionally filtered by status
    pub async fn get_by_user(
        pool: &PgPool,
        user_id: Uuid,
        status: Option<&str>,
    ) -> Result<Vec<GoalRecord>> {
        let records = sqlx::query_as::<_, GoalRecord>(
            r#"
            SELECT id, user_id, title, goal_type, target_value, start_value,
                   current_value, unit, direction, target_date, status,
                   created_at, updated_at
            FROM health_goals
            WHERE user_id = $1 AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Number of active goals
    pub async fn count_active(pool: &PgPool, user_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM health_goals WHERE user_id = $1 AND status = 'active'"#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Update a goal
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        updates: UpdateGoal,
    ) -> Result<Option<GoalRecord>> {
        let record = sqlx::query_as::<_, GoalRecord>(
            r#"
            UPDATE health_goals SET
                title = COALESCE($3, title),
                target_value = COALESCE($4, target_value),
                current_value = COALESCE($5, current_value),
                target_date = COALESCE($6, target_date),
                status = COALESCE($7, status),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, goal_type, target_value, start_value,
                      current_value, unit, direction, target_date, status,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&updates.title)
        .bind(updates.target_value)
        .bind(updates.current_value)
        .bind(updates.target_date)
        .bind(&updates.status)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Delete a goal
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM health_goals WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
