//! Wellness Tracker WASM Module
//!
//! Browser bindings for the calorie calculator and health score, so the
//! diet plan form can preview targets before anything is submitted.

use wasm_bindgen::prelude::*;
use wellness_shared::health_metrics::{self, CalorieInputs, Gender};

fn parse_gender(gender: &str) -> Gender {
    gender.parse().unwrap_or(Gender::Other)
}

/// Mifflin-St Jeor BMR; unknown genders use the midpoint offset
#[wasm_bindgen]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: i32, gender: &str) -> f64 {
    health_metrics::calculate_bmr_mifflin(weight_kg, height_cm, age_years, parse_gender(gender))
}

#[wasm_bindgen]
pub fn activity_multiplier(level: &str) -> f64 {
    health_metrics::activity_multiplier(level)
}

/// Calculate BMI from weight (kg) and height (cm)
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    health_metrics::calculate_bmi(weight_kg, height_cm)
}

/// BMI category label ("Underweight", "Normal", "Overweight", "Obese")
#[wasm_bindgen]
pub fn classify_bmi(bmi: f64) -> String {
    health_metrics::classify_bmi(bmi).label().to_string()
}

/// Daily calorie target after activity and goal adjustment
#[wasm_bindgen]
pub fn calculate_daily_calories(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    gender: &str,
    activity_level: &str,
    goal_weight_kg: Option<f64>,
) -> f64 {
    let inputs = CalorieInputs {
        weight_kg,
        height_cm,
        age: age_years,
        gender: parse_gender(gender),
        activity_level: activity_level.to_string(),
        goal_weight_kg,
    };
    health_metrics::calculate_calorie_targets(&inputs).daily_calories
}

/// Health score 0-100
#[wasm_bindgen]
pub fn calculate_health_score(blood_pressure: &str, heart_rate: i32, bmi: f64, sleep_hours: f64) -> u32 {
    health_metrics::calculate_health_score(blood_pressure, heart_rate, bmi, sleep_hours).total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmr() {
        assert!((calculate_bmr(70.0, 175.0, 25, "male") - 1673.75).abs() < 1e-9);
        assert!((calculate_bmr(70.0, 175.0, 30, "MALE") - 1648.75).abs() < 1e-9);
    }

    #[test]
    fn test_bmi() {
        let bmi = calculate_bmi(70.0, 175.0);
        assert!((bmi - 22.86).abs() < 0.1);
        assert_eq!(calculate_bmi(70.0, 0.0), 0.0);
        assert_eq!(classify_bmi(bmi), "Normal");
    }

    #[test]
    fn test_daily_calories() {
        assert_eq!(calculate_daily_calories(70.0, 175.0, 25, "male", "moderate", None), 2594.0);
        assert_eq!(activity_multiplier("unknown"), 1.55);
    }

    #[test]
    fn test_health_score() {
        assert_eq!(calculate_health_score("115/75", 70, 22.0, 8.0), 100);
    }
}
