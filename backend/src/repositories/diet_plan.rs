//! Diet plan repository
//!
//! Single-day and weekly plans share one table; `content` is the tagged
//! `PlanContent` document and `is_weekly_plan` mirrors its variant.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;
use wellness_shared::health_metrics::{CalorieInputs, CalorieTargets};
use wellness_shared::models::PlanContent;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DietPlanRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub is_weekly_plan: bool,
    pub base_on_plan_id: Option<Uuid>,
    pub inputs: Json<CalorieInputs>,
    pub targets: Json<CalorieTargets>,
    pub dietary_preferences: Vec<String>,
    pub content: Json<PlanContent>,
    pub ai_generated: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateDietPlan {
    pub user_id: Uuid,
    pub title: String,
    pub base_on_plan_id: Option<Uuid>,
    pub inputs: CalorieInputs,
    pub targets: CalorieTargets,
    pub dietary_preferences: Vec<String>,
    pub content: PlanContent,
    pub ai_generated: bool,
}

pub struct DietPlanRepository;

impl DietPlanRepository {
    pub async fn create(pool: &PgPool, input: CreateDietPlan) -> Result<DietPlanRecord> {
        let record = sqlx::query_as::<_, DietPlanRecord>(
            r#"
            INSERT INTO diet_plans (user_id, title, is_weekly_plan, base_on_plan_id, inputs,
                                    targets, dietary_preferences, content, ai_generated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, title, is_weekly_plan, base_on_plan_id, inputs, targets,
                      dietary_preferences, content, ai_generated, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.title)
        .bind(input.content.is_weekly())
        .bind(input.base_on_plan_id)
        .bind(Json(&input.inputs))
        .bind(Json(&input.targets))
        .bind(&input.dietary_preferences)
        .bind(Json(&input.content))
        .bind(input.ai_generated)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<Option<DietPlanRecord>> {
        let record = sqlx::query_as::<_, DietPlanRecord>(
            r#"
            SELECT id, user_id, title, is_weekly_plan, base_on_plan_id, inputs, targets,
                   dietary_preferences, content, ai_generated, created_at
            FROM diet_plans
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Plans for the user, newest first
    pub async fn get_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<DietPlanRecord>> {
        let records = sqlx::query_as::<_, DietPlanRecord>(
            r#"
            SELECT id, user_id, title, is_weekly_plan, base_on_plan_id, inputs, targets,
                   dietary_preferences, content, ai_generated, created_at
            FROM diet_plans
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM diet_plans WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
