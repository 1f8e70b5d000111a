//! Wellness Tracker Shared Library
//!
//! Calculators, domain types, API DTOs and validation shared by the
//! backend and the WASM bindings.

pub mod health_metrics;
pub mod models;
pub mod summary;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use health_metrics::*;
pub use models::{
    ExerciseCategory, GoalDirection, GoalStatus, GoalType, MealType, MetricsSnapshot, PlanContent,
    ReportSections,
};
pub use summary::{bucket_daily, bucket_weekly, summarize, SummaryPoint, SummaryRange};
pub use units::{HeightUnit, WeightUnit};
