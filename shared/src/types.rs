//! API request and response types

use crate::health_metrics::{BmiCategory, CalorieTargets, HealthScoreBreakdown, RiskLevel};
use crate::models::{MetricsSnapshot, PlanContent, ReportSections};
use crate::summary::{RangeSummary, SummaryBucket, SummaryRange};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Common query types
// ============================================================================

/// Single-day query (defaults to today)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

/// Optional inclusive date range
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Food list query: either a single `date` or a `start`/`end` range
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodListQuery {
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

/// Generic deletion acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: bool,
    pub id: String,
}

// ============================================================================
// Auth
// ============================================================================

/// Authentication tokens response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Account info returned by `/api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health metrics
// ============================================================================

/// Health metrics snapshot request (height/weight in any supported unit)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordHealthMetricsRequest {
    pub height: f64,
    #[serde(default)]
    pub height_unit: Option<String>,
    pub weight: f64,
    #[serde(default)]
    pub weight_unit: Option<String>,
    pub age: i32,
    pub gender: String,
    pub blood_pressure: String,
    pub heart_rate: i32,
    pub sleep_hours: f64,
    pub stress_level: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMetricsResponse {
    pub id: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: i32,
    pub gender: String,
    pub blood_pressure: String,
    pub heart_rate: i32,
    pub sleep_hours: f64,
    pub stress_level: i32,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Food
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogFoodRequest {
    pub name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
    #[serde(default)]
    pub protein_pct: Option<f64>,
    #[serde(default)]
    pub carbs_pct: Option<f64>,
    #[serde(default)]
    pub fat_pct: Option<f64>,
    pub meal_type: String,
    #[serde(default = "Utc::now")]
    pub recorded_at: DateTime<Utc>,
    /// Ask the image API for an illustration of the dish
    #[serde(default)]
    pub generate_image: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntryResponse {
    pub id: String,
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fat_pct: f64,
    pub meal_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealTotals {
    pub meal_type: String,
    pub calories: f64,
    pub entries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyFoodResponse {
    pub date: NaiveDate,
    pub total_calories: f64,
    pub total_protein_g: f64,
    pub total_carbs_g: f64,
    pub total_fat_g: f64,
    pub by_meal: Vec<MealTotals>,
    pub entries: Vec<FoodEntryResponse>,
}

// ============================================================================
// Exercise
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogExerciseRequest {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub sets: i32,
    #[serde(default)]
    pub reps: i32,
    #[serde(default)]
    pub duration_minutes: Option<i32>,
    #[serde(default)]
    pub calories_burned: f64,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseResponse {
    pub id: String,
    pub name: String,
    pub category: String,
    pub sets: i32,
    pub reps: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    pub calories_burned: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub category: String,
    pub workouts: usize,
    pub calories_burned: f64,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyExerciseResponse {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_workouts: usize,
    pub total_calories_burned: f64,
    pub total_duration_minutes: i64,
    pub activity_level: String,
    pub by_category: Vec<CategoryTotals>,
}

// ============================================================================
// Sleep
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSleepRequest {
    pub bedtime: DateTime<Utc>,
    pub wake_time: DateTime<Utc>,
    pub quality: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepLogResponse {
    pub id: String,
    pub bedtime: DateTime<Utc>,
    pub wake_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub duration_hours: f64,
    pub quality: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ============================================================================
// Diet plans
// ============================================================================

/// Calculator inputs; any missing field is rejected with 400
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DietPlanRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub activity_level: Option<String>,
    #[serde(default)]
    pub goal_weight_kg: Option<f64>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyDietPlanRequest {
    pub base_on_plan_id: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietPlanResponse {
    pub id: String,
    pub title: String,
    pub is_weekly_plan: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_on_plan_id: Option<String>,
    pub targets: CalorieTargets,
    pub dietary_preferences: Vec<String>,
    pub content: PlanContent,
    pub ai_generated: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health reports
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReportResponse {
    pub id: String,
    pub health_score: u32,
    pub score_breakdown: HealthScoreBreakdown,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub risk_level: RiskLevel,
    pub activity_level: String,
    pub metrics: MetricsSnapshot,
    pub sections: ReportSections,
    pub ai_generated: bool,
    pub created_at: DateTime<Utc>,
}

/// Report list entry without the heavy sections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReportSummary {
    pub id: String,
    pub health_score: u32,
    pub risk_level: RiskLevel,
    pub bmi_category: BmiCategory,
    pub ai_generated: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health card
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCardResponse {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_metrics: Option<HealthMetricsResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_score: Option<HealthScoreBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_report: Option<HealthReportSummary>,
    pub active_goals: usize,
    pub generated_at: DateTime<Utc>,
}

// ============================================================================
// Goals
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGoalRequest {
    pub title: String,
    pub goal_type: String,
    pub target_value: f64,
    pub start_value: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGoalRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub target_value: Option<f64>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalResponse {
    pub id: String,
    pub title: String,
    pub goal_type: String,
    pub target_value: f64,
    pub start_value: f64,
    pub current_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub direction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    pub status: String,
    pub progress_percent: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgressResponse {
    pub goal_id: String,
    pub start_value: f64,
    pub current_value: f64,
    pub target_value: f64,
    pub progress_percent: f64,
    pub remaining: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
    pub completed: bool,
}

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
    pub dietary_preferences: Vec<String>,
    pub timezone: String,
    pub updated_at: DateTime<Utc>,
}

/// Profile update; omitted fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Height value in `height_unit` (cm when omitted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_preferences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

// ============================================================================
// Summary
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryQuery {
    pub range: Option<String>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub range: SummaryRange,
    pub summary: RangeSummary,
    pub daily: Vec<SummaryBucket>,
    pub weekly: Vec<SummaryBucket>,
}
