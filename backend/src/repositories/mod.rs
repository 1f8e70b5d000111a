//! Database repositories
//!
//! Provides data access layer for database operations. Every query is
//! scoped by the owning user's ID.

pub mod diet_plan;
pub mod exercise;
pub mod food;
pub mod goals;
pub mod health_metrics;
pub mod report;
pub mod sleep;
pub mod user;

pub use diet_plan::{CreateDietPlan, DietPlanRecord, DietPlanRepository};
pub use exercise::{CreateExercise, ExerciseRecord, ExerciseRepository};
pub use food::{CreateFoodEntry, FoodEntryRecord, FoodEntryRepository};
pub use goals::{CreateGoal, GoalRecord, GoalRepository, UpdateGoal};
pub use health_metrics::{CreateHealthMetrics, HealthMetricsRecord, HealthMetricsRepository};
pub use report::{CreateHealthReport, HealthReportRecord, HealthReportRepository};
pub use sleep::{CreateSleepLog, SleepLogRecord, SleepLogRepository};
pub use user::{ProfileRecord, UpdateProfile, UserRecord, UserRepository};
