//! Prompt builders
//!
//! Each prompt embeds the user's data and spells out the exact JSON shape
//! the reply must have.

use wellness_shared::health_metrics::{BmiCategory, CalorieTargets, HealthScoreBreakdown, RiskLevel};
use wellness_shared::models::{Meal, MetricsSnapshot};

const DAILY_PLAN_SHAPE: &str = r#"{"meals": [{"meal_type": "breakfast|lunch|dinner|snack", "name": string, "total_calories": number, "foods": [{"name": string, "portion": string, "calories": number, "protein_g": number, "carbs_g": number, "fat_g": number}]}]}"#;

const WEEKLY_PLAN_SHAPE: &str = r#"{"days": [{"day": "Monday", "meals": [<meal objects as in the daily plan>]}]}"#;

const REPORT_SHAPE: &str = r#"{"vital_signs": [{"name": string, "value": string, "status": string, "comment": string}], "predictions": [{"condition": string, "likelihood": "low|moderate|high", "timeframe": string, "note": string}], "nutrition_advice": [string], "recommendations": [string]}"#;

/// Everything a health report is computed from
#[derive(Debug, Clone)]
pub struct ReportFacts {
    pub snapshot: MetricsSnapshot,
    pub score: HealthScoreBreakdown,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub risk_level: RiskLevel,
    pub activity_label: &'static str,
}

fn preferences_line(preferences: &[String]) -> String {
    if preferences.is_empty() {
        "No dietary restrictions.".to_string()
    } else {
        format!("Dietary preferences: {}.", preferences.join(", "))
    }
}

pub fn daily_plan(targets: &CalorieTargets, preferences: &[String]) -> String {
    format!(
        "You are a registered dietitian. Create a one-day meal plan.\n\
         Daily target: {calories:.0} kcal ({protein:.0} g protein, {carbs:.0} g carbs, {fat:.0} g fat).\n\
         Calories per meal: breakfast {b:.0}, lunch {l:.0}, dinner {d:.0}, snack {s:.0}.\n\
         {prefs}\n\
         Respond with JSON only, exactly in this shape:\n{shape}",
        calories = targets.daily_calories,
        protein = targets.macros.protein_g,
        carbs = targets.macros.carbs_g,
        fat = targets.macros.fat_g,
        b = targets.meals.breakfast,
        l = targets.meals.lunch,
        d = targets.meals.dinner,
        s = targets.meals.snack,
        prefs = preferences_line(preferences),
        shape = DAILY_PLAN_SHAPE,
    )
}

pub fn weekly_plan(targets: &CalorieTargets, preferences: &[String], base_meals: &[Meal]) -> String {
    let base = base_meals
        .iter()
        .map(|m| format!("- {} ({}): {:.0} kcal", m.name, m.meal_type, m.total_calories))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a registered dietitian. Expand this one-day plan into a varied 7-day plan \
         (Monday through Sunday) keeping each day near {calories:.0} kcal.\n\
         Base day:\n{base}\n\
         {prefs}\n\
         Respond with JSON only containing exactly 7 days, in this shape:\n{shape}\n\
         Each meal object uses this shape: {meal_shape}",
        calories = targets.daily_calories,
        base = base,
        prefs = preferences_line(preferences),
        shape = WEEKLY_PLAN_SHAPE,
        meal_shape = DAILY_PLAN_SHAPE,
    )
}

pub fn health_report(facts: &ReportFacts) -> String {
    let s = &facts.snapshot;
    format!(
        "You are a preventive-care physician writing a short health report.\n\
         Patient: {age} years, {gender}, {height:.0} cm, {weight:.1} kg (BMI {bmi:.1}, {category}).\n\
         Blood pressure {bp}, resting heart rate {hr} bpm, sleep {sleep:.1} h/night, stress {stress}/10.\n\
         Activity: {activity} ({burned:.0} kcal burned this week). Average intake {intake:.0} kcal/day.\n\
         Health score {score}/100, risk level {risk}.\n\
         Respond with JSON only, exactly in this shape:\n{shape}",
        age = s.age,
        gender = s.gender,
        height = s.height_cm,
        weight = s.weight_kg,
        bmi = facts.bmi,
        category = facts.bmi_category,
        bp = s.blood_pressure,
        hr = s.heart_rate,
        sleep = s.sleep_hours,
        stress = s.stress_level,
        activity = facts.activity_label,
        burned = s.weekly_calories_burned,
        intake = s.average_daily_calories,
        score = facts.score.total,
        risk = facts.risk_level,
        shape = REPORT_SHAPE,
    )
}

pub fn food_image(name: &str) -> String {
    format!(
        "A bright, appetizing overhead photograph of {} on a plain plate, natural light",
        name.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellness_shared::health_metrics::{calculate_calorie_targets, CalorieInputs, Gender};

    fn targets() -> CalorieTargets {
        calculate_calorie_targets(&CalorieInputs {
            weight_kg: 70.0,
            height_cm: 175.0,
            age: 25,
            gender: Gender::Male,
            activity_level: "moderate".to_string(),
            goal_weight_kg: None,
        })
    }

    #[test]
    fn test_daily_prompt_embeds_targets() {
        let prompt = daily_plan(&targets(), &["vegetarian".to_string()]);
        assert!(prompt.contains("2594 kcal"));
        assert!(prompt.contains("vegetarian"));
        assert!(prompt.contains("\"meals\""));
    }

    #[test]
    fn test_daily_prompt_without_preferences() {
        assert!(daily_plan(&targets(), &[]).contains("No dietary restrictions."));
    }

    #[test]
    fn test_food_image_prompt() {
        assert!(food_image("  greek salad ").contains("of greek salad on"));
    }
}
