//! User and profile repository for database operations

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub height_cm: Option<Decimal>,
    pub activity_level: Option<String>,
    pub dietary_preferences: Vec<String>,
    pub timezone: String,
    pub updated_at: DateTime<Utc>,
}

/// Input for updating a profile; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub display_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub height_cm: Option<Decimal>,
    pub activity_level: Option<String>,
    pub dietary_preferences: Option<Vec<String>>,
    pub timezone: Option<String>,
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user together with an empty profile
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        display_name: Option<&str>,
    ) -> Result<UserRecord> {
        let mut tx = pool.begin().await?;

        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, display_name)
            VALUES ($1, $2)
            "#,
        )
        .bind(user.id)
        .bind(display_name)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Check if email exists
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Get the user's profile
    pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRecord>> {
        let profile = sqlx::query_as::<_, ProfileRecord>(
            r#"
            SELECT user_id, display_name, date_of_birth, gender, height_cm,
                   activity_level, dietary_preferences, timezone, updated_at
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Update the user's profile, creating it if it is missing
    pub async fn update_profile(
        pool: &PgPool,
        user_id: Uuid,
        updates: UpdateProfile,
    ) -> Result<ProfileRecord> {
        let profile = sqlx::query_as::<_, ProfileRecord>(
            r#"
            INSERT INTO user_profiles (user_id) VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET
                display_name = COALESCE($2, user_profiles.display_name),
                date_of_birth = COALESCE($3, user_profiles.date_of_birth),
                gender = COALESCE($4, user_profiles.gender),
                height_cm = COALESCE($5, user_profiles.height_cm),
                activity_level = COALESCE($6, user_profiles.activity_level),
                dietary_preferences = COALESCE($7, user_profiles.dietary_preferences),
                timezone = COALESCE($8, user_profiles.timezone),
                updated_at = NOW()
            RETURNING user_id, display_name, date_of_birth, gender, height_cm,
                      activity_level, dietary_preferences, timezone, updated_at
            "#,
        )
        .bind(user_id)
        .bind(updates.display_name)
        .bind(updates.date_of_birth)
        .bind(updates.gender)
        .bind(updates.height_cm)
        .bind(updates.activity_level)
        .bind(updates.dietary_preferences)
        .bind(updates.timezone)
        .fetch_one(pool)
        .await?;

        Ok(profile)
    }
}
