//! Static payloads used when the model is unavailable or its reply is rejected

use super::prompts::ReportFacts;
use wellness_shared::health_metrics::{macro_targets, meal_distribution, BloodPressure, BmiCategory};
use wellness_shared::models::{
    DailyPlanPayload, DayPlan, Likelihood, Meal, MealType, PlannedFood, Prediction, ReportSections,
    VitalSignSummary, WeeklyPlanPayload,
};

const WEEKDAYS: [&str; 7] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

fn food(name: &str, portion: &str, calories: f64) -> PlannedFood {
    // Macros follow the same 30/40/30 split as the daily target
    let macros = macro_targets(calories);
    PlannedFood {
        name: name.to_string(),
        portion: portion.to_string(),
        calories,
        protein_g: macros.protein_g,
        carbs_g: macros.carbs_g,
        fat_g: macros.fat_g,
    }
}

fn meal(meal_type: MealType, name: &str, foods: &[(&str, &str, f64)]) -> Meal {
    let foods: Vec<PlannedFood> = foods.iter().map(|(n, p, c)| food(n, p, *c)).collect();
    Meal {
        meal_type,
        name: name.to_string(),
        total_calories: foods.iter().map(|f| f.calories).sum(),
        foods,
    }
}

/// Balanced single-day plan scaled to the calorie target
pub fn daily_plan(daily_calories: f64) -> DailyPlanPayload {
    let split = meal_distribution(daily_calories);
    let half = |v: f64| (v / 2.0).round();

    DailyPlanPayload {
        meals: vec![
            meal(
                MealType::Breakfast,
                "Oatmeal with fruit",
                &[("Rolled oats with milk", "1 bowl", half(split.breakfast)), ("Banana", "1 medium", split.breakfast - half(split.breakfast))],
            ),
            meal(
                MealType::Lunch,
                "Chicken and grain bowl",
                &[("Grilled chicken breast", "150 g", half(split.lunch)), ("Brown rice and vegetables", "1 cup", split.lunch - half(split.lunch))],
            ),
            meal(
                MealType::Dinner,
                "Salmon with vegetables",
                &[("Baked salmon", "150 g", half(split.dinner)), ("Roasted vegetables and potatoes", "1 plate", split.dinner - half(split.dinner))],
            ),
            meal(MealType::Snack, "Greek yogurt", &[("Greek yogurt with nuts", "1 cup", split.snack)]),
        ],
    }
}

/// Seven copies of the base day, or the default day when the base is empty
pub fn weekly_plan(base_meals: &[Meal], daily_calories: f64) -> WeeklyPlanPayload {
    let meals = if base_meals.is_empty() {
        daily_plan(daily_calories).meals
    } else {
        base_meals.to_vec()
    };

    WeeklyPlanPayload {
        days: WEEKDAYS
            .iter()
            .map(|day| DayPlan {
                day: day.to_string(),
                meals: meals.clone(),
            })
            .collect(),
    }
}

fn status(points: u32) -> &'static str {
    match points {
        25 => "normal",
        15..=24 => "borderline",
        _ => "attention",
    }
}

/// Rule-based report sections derived from the computed facts
pub fn report_sections(facts: &ReportFacts) -> ReportSections {
    let s = &facts.snapshot;

    let bp_comment = match s.blood_pressure.parse::<BloodPressure>() {
        Ok(_) if facts.score.blood_pressure == 25 => "Blood pressure is in the normal range.",
        Ok(_) => "Blood pressure is above the normal range; recheck regularly.",
        Err(_) => "Blood pressure reading could not be interpreted.",
    };

    let vital_signs = vec![
        VitalSignSummary {
            name: "Blood pressure".to_string(),
            value: s.blood_pressure.clone(),
            status: status(facts.score.blood_pressure).to_string(),
            comment: bp_comment.to_string(),
        },
        VitalSignSummary {
            name: "Resting heart rate".to_string(),
            value: format!("{} bpm", s.heart_rate),
            status: status(facts.score.heart_rate).to_string(),
            comment: String::new(),
        },
        VitalSignSummary {
            name: "BMI".to_string(),
            value: format!("{:.1}", facts.bmi),
            status: facts.bmi_category.label().to_lowercase(),
            comment: String::new(),
        },
        VitalSignSummary {
            name: "Sleep".to_string(),
            value: format!("{:.1} h", s.sleep_hours),
            status: status(facts.score.sleep).to_string(),
            comment: String::new(),
        },
    ];

    let mut predictions = Vec::new();
    if facts.score.blood_pressure <= 15 {
        predictions.push(Prediction {
            condition: "Hypertension".to_string(),
            likelihood: if facts.score.blood_pressure <= 5 { Likelihood::High } else { Likelihood::Moderate },
            timeframe: "5 years".to_string(),
            note: "Based on the current blood pressure reading.".to_string(),
        });
    }
    if facts.bmi_category == BmiCategory::Obese {
        predictions.push(Prediction {
            condition: "Type 2 diabetes".to_string(),
            likelihood: Likelihood::Moderate,
            timeframe: "10 years".to_string(),
            note: "Elevated BMI is a major risk factor.".to_string(),
        });
    }

    let mut nutrition_advice = vec!["Fill half of each plate with vegetables and fruit.".to_string()];
    match facts.bmi_category {
        BmiCategory::Underweight => nutrition_advice.push("Add calorie-dense whole foods such as nuts and legumes.".to_string()),
        BmiCategory::Overweight | BmiCategory::Obese => {
            nutrition_advice.push("Keep a moderate calorie deficit and limit sugary drinks.".to_string())
        }
        BmiCategory::Normal => nutrition_advice.push("Keep your current balanced intake.".to_string()),
    }
    if facts.score.blood_pressure < 25 {
        nutrition_advice.push("Reduce sodium to under 2,300 mg per day.".to_string());
    }

    let mut recommendations = vec!["Aim for at least 150 minutes of moderate activity per week.".to_string()];
    if facts.score.sleep < 25 {
        recommendations.push("Keep a consistent sleep schedule of 7 to 9 hours.".to_string());
    }
    if s.stress_level >= 7 {
        recommendations.push("Set aside time daily for stress reduction.".to_string());
    }

    ReportSections {
        vital_signs,
        predictions,
        nutrition_advice,
        recommendations,
    }
}
