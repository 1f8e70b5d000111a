//! Food entry repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Food entry record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FoodEntryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub calories: Decimal,
    pub protein_g: Decimal,
    pub carbs_g: Decimal,
    pub fat_g: Decimal,
    pub protein_pct: Decimal,
    pub carbs_pct: Decimal,
    pub fat_pct: Decimal,
    pub meal_type: String,
    pub image_url: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a food entry
#[derive(Debug, Clone)]
pub struct CreateFoodEntry {
    pub user_id: Uuid,
    pub name: String,
    pub calories: Decimal,
    pub protein_g: Decimal,
    pub carbs_g: Decimal,
    pub fat_g: Decimal,
    pub protein_pct: Decimal,
    pub carbs_pct: Decimal,
    pub fat_pct: Decimal,
    pub meal_type: String,
    pub image_url: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Food entry repository
pub struct FoodEntryRepository;

impl FoodEntryRepository {
    pub async fn create(pool: &PgPool, input: CreateFoodEntry) -> Result<FoodEntryRecord> {
        let record = sqlx::query_as::<_, FoodEntryRecord>(
            r#"
            INSERT INTO food_entries (user_id, name, calories, protein_g, carbs_g, fat_g,
                                      protein_pct, carbs_pct, fat_pct, meal_type, image_url,
                                      recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, user_id, name, calories, protein_g, carbs_g, fat_g,
                      protein_pct, carbs_pct, fat_pct, meal_type, image_url,
                      recorded_at, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.name)
        .bind(input.calories)
        .bind(input.protein_g)
        .bind(input.carbs_g)
        .bind(input.fat_g)
        .bind(input.protein_pct)
        .bind(input.carbs_pct)
        .bind(input.fat_pct)
        .bind(&input.meal_type)
        .bind(&input.image_url)
        .bind(input.recorded_at)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Entries recorded in `[start, end)`, oldest first
    pub async fn get_in_range(
        pool: &PgPool,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<FoodEntryRecord>> {
        let records = sqlx::query_as::<_, FoodEntryRecord>(
            r#"
            SELECT id, user_id, name, calories, protein_g, carbs_g, fat_g,
                   protein_pct, carbs_pct, fat_pct, meal_type, image_url,
                   recorded_at, created_at
            FROM food_entries
            WHERE user_id = $1 AND recorded_at >= $2 AND recorded_at < $3
            ORDER BY recorded_at ASC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Every entry for the user, oldest first
    pub async fn get_all(pool: &PgPool, user_id: Uuid) -> Result<Vec<FoodEntryRecord>> {
        let records = sqlx::query_as::<_, FoodEntryRecord>(
            r#"
            SELECT id, user_id, name, calories, protein_g, carbs_g, fat_g,
                   protein_pct, carbs_pct, fat_pct, meal_type, image_url,
                   recorded_at, created_at
            FROM food_entries
            WHERE user_id = $1
            ORDER BY recorded_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Delete a food entry
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM food_entries WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
