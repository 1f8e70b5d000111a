//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories, the AI clients and the request quota.

pub mod dates;
pub mod diet_plan;
pub mod exercise;
pub mod export;
pub mod food;
pub mod goals;
pub mod health_card;
pub mod health_metrics;
pub mod profile;
pub mod report;
pub mod sleep;
pub mod summary;
pub mod user;

pub use diet_plan::DietPlanService;
pub use exercise::ExerciseService;
pub use export::ExportService;
pub use food::FoodService;
pub use goals::GoalService;
pub use health_card::HealthCardService;
pub use health_metrics::HealthMetricsService;
pub use profile::ProfileService;
pub use report::ReportService;
pub use sleep::SleepService;
pub use summary::SummaryService;
pub use user::UserService;
