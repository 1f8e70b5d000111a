//! Domain enums and the document shapes stored as JSON
//!
//! The AI payload schemas here are what generated text must deserialize into
//! (and pass `validator` checks for) before it is accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Implements `as_str`, `Display` and a case-insensitive `FromStr`
/// for simple snake_case enums.
macro_rules! string_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!(
                        "Invalid {}. Must be one of: {}",
                        stringify!($name),
                        [$($text),+].join(", ")
                    )),
                }
            }
        }
    };
}

// ============================================================================
// Logging enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

string_enum!(MealType {
    Breakfast => "breakfast",
    Lunch => "lunch",
    Dinner => "dinner",
    Snack => "snack",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    Strength,
    Cardio,
    Flexibility,
    Sports,
    Other,
}

string_enum!(ExerciseCategory {
    Strength => "strength",
    Cardio => "cardio",
    Flexibility => "flexibility",
    Sports => "sports",
    Other => "other",
});

// ============================================================================
// Goals
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    Weight,
    Exercise,
    Nutrition,
    Sleep,
    Custom,
}

string_enum!(GoalType {
    Weight => "weight",
    Exercise => "exercise",
    Nutrition => "nutrition",
    Sleep => "sleep",
    Custom => "custom",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Active,
    Completed,
    Abandoned,
}

string_enum!(GoalStatus {
    Active => "active",
    Completed => "completed",
    Abandoned => "abandoned",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalDirection {
    Increasing,
    Decreasing,
}

string_enum!(GoalDirection {
    Increasing => "increasing",
    Decreasing => "decreasing",
});

impl GoalDirection {
    /// Infer the direction from where the goal starts and where it ends
    pub fn infer(start_value: f64, target_value: f64) -> Self {
        if target_value < start_value {
            GoalDirection::Decreasing
        } else {
            GoalDirection::Increasing
        }
    }
}

/// Percent of the way from `start` to `target`, clamped to 0-100
pub fn goal_progress_percent(start: f64, current: f64, target: f64) -> f64 {
    let span = target - start;
    if span.abs() < f64::EPSILON {
        return if (current - target).abs() < f64::EPSILON { 100.0 } else { 0.0 };
    }
    ((current - start) / span * 100.0).clamp(0.0, 100.0)
}

// ============================================================================
// Diet plan documents
// ============================================================================

/// One food inside a generated meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PlannedFood {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub portion: String,
    #[validate(range(min = 0.0, max = 5000.0))]
    pub calories: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 500.0))]
    pub protein_g: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 1000.0))]
    pub carbs_g: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 500.0))]
    pub fat_g: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Meal {
    pub meal_type: MealType,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 20), nested)]
    pub foods: Vec<PlannedFood>,
    #[validate(range(min = 0.0, max = 10000.0))]
    pub total_calories: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DayPlan {
    #[validate(length(min = 1, max = 20))]
    pub day: String,
    #[validate(length(min = 1, max = 8), nested)]
    pub meals: Vec<Meal>,
}

/// Payload expected from the single-day plan prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DailyPlanPayload {
    #[validate(length(min = 1, max = 8), nested)]
    pub meals: Vec<Meal>,
}

/// Payload expected from the weekly plan prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WeeklyPlanPayload {
    #[validate(length(equal = 7), nested)]
    pub days: Vec<DayPlan>,
}

/// Stored diet plan content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanContent {
    Daily { meals: Vec<Meal> },
    Weekly { days: Vec<DayPlan> },
}

impl PlanContent {
    pub fn is_weekly(&self) -> bool {
        matches!(self, PlanContent::Weekly { .. })
    }

    /// Meals of a daily plan, or the first day of a weekly plan
    pub fn first_day_meals(&self) -> &[Meal] {
        match self {
            PlanContent::Daily { meals } => meals,
            PlanContent::Weekly { days } => days.first().map(|d| d.meals.as_slice()).unwrap_or(&[]),
        }
    }
}

impl From<DailyPlanPayload> for PlanContent {
    fn from(payload: DailyPlanPayload) -> Self {
        PlanContent::Daily { meals: payload.meals }
    }
}

impl From<WeeklyPlanPayload> for PlanContent {
    fn from(payload: WeeklyPlanPayload) -> Self {
        PlanContent::Weekly { days: payload.days }
    }
}

// ============================================================================
// Health report documents
// ============================================================================

/// Vitals captured at report time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: i32,
    pub gender: String,
    pub blood_pressure: String,
    pub heart_rate: i32,
    pub sleep_hours: f64,
    pub stress_level: i32,
    pub weekly_calories_burned: f64,
    pub average_daily_calories: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct VitalSignSummary {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub value: String,
    #[validate(length(min = 1, max = 50))]
    pub status: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Likelihood {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Prediction {
    #[validate(length(min = 1, max = 200))]
    pub condition: String,
    pub likelihood: Likelihood,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub timeframe: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub note: String,
}

/// Payload expected from the report prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ReportSections {
    #[validate(length(min = 1, max = 10), nested)]
    pub vital_signs: Vec<VitalSignSummary>,
    #[serde(default)]
    #[validate(length(max = 10), nested)]
    pub predictions: Vec<Prediction>,
    #[validate(length(min = 1, max = 10))]
    pub nutrition_advice: Vec<String>,
    #[validate(length(min = 1, max = 10))]
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn food(calories: f64) -> PlannedFood {
        PlannedFood {
            name: "Oatmeal".to_string(),
            portion: "1 cup".to_string(),
            calories,
            protein_g: 6.0,
            carbs_g: 27.0,
            fat_g: 3.0,
        }
    }

    fn meal() -> Meal {
        Meal {
            meal_type: MealType::Breakfast,
            name: "Oats".to_string(),
            foods: vec![food(150.0)],
            total_calories: 150.0,
        }
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("Dinner".parse::<MealType>().unwrap(), MealType::Dinner);
        assert_eq!("cardio".parse::<ExerciseCategory>().unwrap(), ExerciseCategory::Cardio);
        assert!("brunch".parse::<MealType>().is_err());
        assert_eq!(GoalStatus::Abandoned.to_string(), "abandoned");
    }

    #[rstest]
    #[case(80.0, 80.0, 70.0, 0.0)]
    #[case(80.0, 75.0, 70.0, 50.0)]
    #[case(80.0, 65.0, 70.0, 100.0)]
    #[case(10.0, 15.0, 20.0, 50.0)]
    #[case(10.0, 5.0, 20.0, 0.0)]
    #[case(10.0, 10.0, 10.0, 100.0)]
    fn test_goal_progress(#[case] start: f64, #[case] current: f64, #[case] target: f64, #[case] expected: f64) {
        assert!((goal_progress_percent(start, current, target) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_goal_direction_inference() {
        assert_eq!(GoalDirection::infer(80.0, 70.0), GoalDirection::Decreasing);
        assert_eq!(GoalDirection::infer(5.0, 10.0), GoalDirection::Increasing);
    }

    #[test]
    fn test_daily_payload_validation() {
        let payload = DailyPlanPayload { meals: vec![meal()] };
        assert!(payload.validate().is_ok());

        let empty = DailyPlanPayload { meals: vec![] };
        assert!(empty.validate().is_err());

        let mut bad = meal();
        bad.foods[0].calories = -10.0;
        assert!(DailyPlanPayload { meals: vec![bad] }.validate().is_err());
    }

    #[test]
    fn test_weekly_payload_requires_seven_days() {
        let day = DayPlan {
            day: "Monday".to_string(),
            meals: vec![meal()],
        };
        let six = WeeklyPlanPayload { days: vec![day.clone(); 6] };
        assert!(six.validate().is_err());
        let seven = WeeklyPlanPayload { days: vec![day; 7] };
        assert!(seven.validate().is_ok());
    }

    #[test]
    fn test_plan_content_tagging() {
        let content = PlanContent::from(DailyPlanPayload { meals: vec![meal()] });
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["kind"], "daily");
        assert!(!content.is_weekly());
        assert_eq!(content.first_day_meals().len(), 1);

        let back: PlanContent = serde_json::from_value(json).unwrap();
        assert_eq!(back, content);
    }

    #[test]
    fn test_report_sections_from_json() {
        let raw = r#"{
            "vital_signs": [{"name": "Heart rate", "value": "72 bpm", "status": "normal"}],
            "predictions": [{"condition": "Hypertension", "likelihood": "low"}],
            "nutrition_advice": ["Eat more fiber"],
            "recommendations": ["Walk daily"]
        }"#;
        let sections: ReportSections = serde_json::from_str(raw).unwrap();
        assert!(sections.validate().is_ok());
        assert_eq!(sections.predictions[0].likelihood, Likelihood::Low);

        let bad = r#"{"vital_signs": [], "nutrition_advice": ["x"], "recommendations": ["y"]}"#;
        let sections: ReportSections = serde_json::from_str(bad).unwrap();
        assert!(sections.validate().is_err());
    }
}
