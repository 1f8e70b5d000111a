//! Health metrics calculations module
//!
//! Calorie and macro targets (Mifflin-St Jeor BMR, activity multipliers,
//! goal adjustment), BMI classification, and the heuristic health score
//! used by reports and the health card.
//!
//! All functions here are pure; persistence and AI calls live in the backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Daily calorie targets never go below this value
pub const MIN_DAILY_CALORIES: f64 = 1200.0;

/// Calorie change applied when the goal weight differs from the current weight
pub const GOAL_ADJUSTMENT_KCAL: f64 = 500.0;

/// Multiplier used when the activity level is missing or unrecognized
pub const DEFAULT_ACTIVITY_MULTIPLIER: f64 = 1.55;

// ============================================================================
// Profile Types
// ============================================================================

/// Gender as used by the BMR formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    /// Constant term of the Mifflin-St Jeor equation
    pub fn bmr_offset(&self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
            // Midpoint of the male and female offsets
            Gender::Other => -78.0,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "non_binary" | "nonbinary" => Ok(Gender::Other),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// Activity level for the TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    #[default]
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or a physical job
    VeryActive,
}

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(|c: char| c == '-' || c == ' ', "_");
        match normalized.as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" | "lightly_active" => Ok(ActivityLevel::Light),
            "moderate" | "moderately_active" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" | "extra_active" => Ok(ActivityLevel::VeryActive),
            _ => Err(format!("Unknown activity level: {}", s)),
        }
    }
}

/// Look up the TDEE multiplier for a free-form activity level.
///
/// Unrecognized values use [`DEFAULT_ACTIVITY_MULTIPLIER`].
pub fn activity_multiplier(level: &str) -> f64 {
    level
        .parse::<ActivityLevel>()
        .map(|l| l.multiplier())
        .unwrap_or(DEFAULT_ACTIVITY_MULTIPLIER)
}

// ============================================================================
// BMI
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl FromStr for BmiCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "underweight" => Ok(BmiCategory::Underweight),
            "normal" => Ok(BmiCategory::Normal),
            "overweight" => Ok(BmiCategory::Overweight),
            "obese" => Ok(BmiCategory::Obese),
            _ => Err(format!("Unknown BMI category: {}", s)),
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Classify BMI; each boundary belongs to the higher category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

// ============================================================================
// BMR, TDEE and calorie targets
// ============================================================================

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + offset
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: i32, gender: Gender) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64 + gender.bmr_offset()
}

/// Calories added to maintenance to move toward the goal weight
pub fn goal_adjustment(current_weight_kg: f64, goal_weight_kg: Option<f64>) -> f64 {
    match goal_weight_kg {
        Some(goal) if goal < current_weight_kg => -GOAL_ADJUSTMENT_KCAL,
        Some(goal) if goal > current_weight_kg => GOAL_ADJUSTMENT_KCAL,
        _ => 0.0,
    }
}

/// Inputs for the calorie calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieInputs {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: i32,
    pub gender: Gender,
    pub activity_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_weight_kg: Option<f64>,
}

/// Daily macro targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Calories allotted to each meal of the day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MealDistribution {
    pub breakfast: f64,
    pub lunch: f64,
    pub dinner: f64,
    pub snack: f64,
}

/// Calculator output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieTargets {
    pub bmr: f64,
    pub tdee: f64,
    pub activity_multiplier: f64,
    pub goal_adjustment: f64,
    pub daily_calories: f64,
    pub macros: MacroTargets,
    pub meals: MealDistribution,
}

/// Split daily calories 30% protein / 40% carbs / 30% fat
pub fn macro_targets(daily_calories: f64) -> MacroTargets {
    MacroTargets {
        protein_g: (daily_calories * 0.30 / 4.0).round(),
        carbs_g: (daily_calories * 0.40 / 4.0).round(),
        fat_g: (daily_calories * 0.30 / 9.0).round(),
    }
}

/// Split daily calories 25/35/30/10 across breakfast, lunch, dinner and snack
pub fn meal_distribution(daily_calories: f64) -> MealDistribution {
    MealDistribution {
        breakfast: (daily_calories * 0.25).round(),
        lunch: (daily_calories * 0.35).round(),
        dinner: (daily_calories * 0.30).round(),
        snack: (daily_calories * 0.10).round(),
    }
}

pub fn calculate_calorie_targets(inputs: &CalorieInputs) -> CalorieTargets {
    let bmr = calculate_bmr_mifflin(inputs.weight_kg, inputs.height_cm, inputs.age, inputs.gender);
    let multiplier = activity_multiplier(&inputs.activity_level);
    let tdee = bmr * multiplier;
    let adjustment = goal_adjustment(inputs.weight_kg, inputs.goal_weight_kg);
    let daily_calories = (tdee + adjustment).round().max(MIN_DAILY_CALORIES);

    CalorieTargets {
        bmr,
        tdee,
        activity_multiplier: multiplier,
        goal_adjustment: adjustment,
        daily_calories,
        macros: macro_targets(daily_calories),
        meals: meal_distribution(daily_calories),
    }
}

/// Share of macro energy (protein, carbs, fat) in percent.
///
/// Returns zeros when no macro grams are given.
pub fn macro_energy_percentages(protein_g: f64, carbs_g: f64, fat_g: f64) -> (f64, f64, f64) {
    let protein_kcal = protein_g * 4.0;
    let carbs_kcal = carbs_g * 4.0;
    let fat_kcal = fat_g * 9.0;
    let total = protein_kcal + carbs_kcal + fat_kcal;
    if total <= 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let pct = |v: f64| (v / total * 1000.0).round() / 10.0;
    (pct(protein_kcal), pct(carbs_kcal), pct(fat_kcal))
}

// ============================================================================
// Health score
// ============================================================================

/// Parsed "systolic/diastolic" reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: i32,
    pub diastolic: i32,
}

impl FromStr for BloodPressure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sys, dia) = s
            .split_once('/')
            .ok_or_else(|| format!("Blood pressure must look like 120/80, got '{}'", s))?;
        let systolic = sys
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("Invalid systolic value: {}", sys))?;
        let diastolic = dia
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("Invalid diastolic value: {}", dia))?;
        if systolic <= 0 || diastolic <= 0 {
            return Err("Blood pressure values must be positive".to_string());
        }
        Ok(BloodPressure { systolic, diastolic })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BloodPressureCategory {
    Normal,
    Elevated,
    Stage1,
    Stage2,
}

impl BloodPressure {
    pub fn category(&self) -> BloodPressureCategory {
        let (s, d) = (self.systolic, self.diastolic);
        if s >= 140 || d >= 90 {
            BloodPressureCategory::Stage2
        } else if s >= 130 || d >= 80 {
            BloodPressureCategory::Stage1
        } else if s >= 120 {
            BloodPressureCategory::Elevated
        } else {
            BloodPressureCategory::Normal
        }
    }
}

/// 0-25 points; unparseable readings score 0
pub fn blood_pressure_points(reading: &str) -> u32 {
    match reading.parse::<BloodPressure>() {
        Ok(bp) => match bp.category() {
            BloodPressureCategory::Normal => 25,
            BloodPressureCategory::Elevated => 20,
            BloodPressureCategory::Stage1 => 15,
            BloodPressureCategory::Stage2 => 5,
        },
        Err(_) => 0,
    }
}

pub fn heart_rate_points(bpm: i32) -> u32 {
    match bpm {
        60..=100 => 25,
        50..=59 | 101..=110 => 15,
        _ => 5,
    }
}

pub fn bmi_points(bmi: f64) -> u32 {
    match classify_bmi(bmi) {
        BmiCategory::Normal => 25,
        BmiCategory::Overweight | BmiCategory::Underweight => 15,
        BmiCategory::Obese => 5,
    }
}

pub fn sleep_points(hours: f64) -> u32 {
    if (7.0..=9.0).contains(&hours) {
        25
    } else if (6.0..7.0).contains(&hours) || (hours > 9.0 && hours <= 10.0) {
        15
    } else {
        5
    }
}

/// Per-bucket points of a health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScoreBreakdown {
    pub blood_pressure: u32,
    pub heart_rate: u32,
    pub bmi: u32,
    pub sleep: u32,
    pub total: u32,
}

/// Sum of four independent 0-25 buckets
pub fn calculate_health_score(
    blood_pressure: &str,
    heart_rate: i32,
    bmi: f64,
    sleep_hours: f64,
) -> HealthScoreBreakdown {
    let bp = blood_pressure_points(blood_pressure);
    let hr = heart_rate_points(heart_rate);
    let bmi = bmi_points(bmi);
    let sleep = sleep_points(sleep_hours);
    HealthScoreBreakdown {
        blood_pressure: bp,
        heart_rate: hr,
        bmi,
        sleep,
        total: bp + hr + bmi + sleep,
    }
}

/// Activity classification from calories burned over the last week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityClass {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
}

impl ActivityClass {
    pub fn from_weekly_calories(calories_burned: f64) -> Self {
        if calories_burned < 200.0 {
            ActivityClass::Sedentary
        } else if calories_burned < 1000.0 {
            ActivityClass::LightlyActive
        } else if calories_burned < 2000.0 {
            ActivityClass::ModeratelyActive
        } else {
            ActivityClass::VeryActive
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityClass::Sedentary => "Sedentary",
            ActivityClass::LightlyActive => "Lightly Active",
            ActivityClass::ModeratelyActive => "Moderately Active",
            ActivityClass::VeryActive => "Very Active",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            RiskLevel::Low
        } else if score >= 60 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn inputs(activity: &str, goal: Option<f64>) -> CalorieInputs {
        CalorieInputs {
            weight_kg: 70.0,
            height_cm: 175.0,
            age: 25,
            gender: Gender::Male,
            activity_level: activity.to_string(),
            goal_weight_kg: goal,
        }
    }

    // =========================================================================
    // BMR / calorie targets
    // =========================================================================

    #[test]
    fn test_bmr_mifflin_known_values() {
        let bmr = calculate_bmr_mifflin(70.0, 175.0, 25, Gender::Male);
        assert!((bmr - 1673.75).abs() < 1e-9);

        let bmr = calculate_bmr_mifflin(70.0, 175.0, 30, Gender::Male);
        assert!((bmr - 1648.75).abs() < 1e-9);

        let bmr = calculate_bmr_mifflin(60.0, 165.0, 30, Gender::Female);
        assert!((bmr - 1320.25).abs() < 1e-9);
    }

    #[test]
    fn test_other_gender_sits_between() {
        let male = calculate_bmr_mifflin(70.0, 175.0, 30, Gender::Male);
        let female = calculate_bmr_mifflin(70.0, 175.0, 30, Gender::Female);
        let other = calculate_bmr_mifflin(70.0, 175.0, 30, Gender::Other);
        assert!((other - (male + female) / 2.0).abs() < 1e-9);
    }

    #[rstest]
    #[case("sedentary", 1.2)]
    #[case("light", 1.375)]
    #[case("lightly_active", 1.375)]
    #[case("moderate", 1.55)]
    #[case("Moderately_Active", 1.55)]
    #[case("active", 1.725)]
    #[case("very_active", 1.9)]
    #[case("extra_active", 1.9)]
    #[case("couch potato", 1.55)]
    #[case("", 1.55)]
    fn test_activity_multiplier(#[case] level: &str, #[case] expected: f64) {
        assert_eq!(activity_multiplier(level), expected);
    }

    #[test]
    fn test_goal_adjustment() {
        assert_eq!(goal_adjustment(80.0, Some(70.0)), -500.0);
        assert_eq!(goal_adjustment(60.0, Some(70.0)), 500.0);
        assert_eq!(goal_adjustment(70.0, Some(70.0)), 0.0);
        assert_eq!(goal_adjustment(70.0, None), 0.0);
    }

    #[test]
    fn test_calorie_targets_maintenance() {
        let targets = calculate_calorie_targets(&inputs("moderate", None));
        // 1673.75 * 1.55 = 2594.3125
        assert_eq!(targets.daily_calories, 2594.0);
        assert_eq!(targets.macros.protein_g, (2594.0_f64 * 0.30 / 4.0).round());
        assert_eq!(targets.macros.carbs_g, (2594.0_f64 * 0.40 / 4.0).round());
        assert_eq!(targets.macros.fat_g, (2594.0_f64 * 0.30 / 9.0).round());
        assert_eq!(targets.meals.breakfast, (2594.0_f64 * 0.25).round());
    }

    #[test]
    fn test_calorie_targets_loss_and_floor() {
        let targets = calculate_calorie_targets(&inputs("moderate", Some(60.0)));
        assert_eq!(targets.goal_adjustment, -500.0);
        assert_eq!(targets.daily_calories, 2094.0);

        let tiny = CalorieInputs {
            weight_kg: 35.0,
            height_cm: 140.0,
            age: 80,
            gender: Gender::Female,
            activity_level: "sedentary".to_string(),
            goal_weight_kg: Some(30.0),
        };
        let targets = calculate_calorie_targets(&tiny);
        assert_eq!(targets.daily_calories, MIN_DAILY_CALORIES);
    }

    #[test]
    fn test_macro_energy_percentages() {
        // 30g protein (120 kcal), 40g carbs (160 kcal), 10g fat (90 kcal)
        let (p, c, f) = macro_energy_percentages(30.0, 40.0, 10.0);
        assert!((p - 32.4).abs() < 0.05);
        assert!((c - 43.2).abs() < 0.05);
        assert!((f - 24.3).abs() < 0.05);
        assert_eq!(macro_energy_percentages(0.0, 0.0, 0.0), (0.0, 0.0, 0.0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: targets never drop below the floor
        #[test]
        fn prop_daily_calories_floored(
            weight in 30.0f64..200.0,
            height in 120.0f64..220.0,
            age in 18i32..100,
            goal in 30.0f64..200.0
        ) {
            let targets = calculate_calorie_targets(&CalorieInputs {
                weight_kg: weight,
                height_cm: height,
                age,
                gender: Gender::Female,
                activity_level: "sedentary".to_string(),
                goal_weight_kg: Some(goal),
            });
            prop_assert!(targets.daily_calories >= MIN_DAILY_CALORIES);
        }

        /// Property: Male BMR > Female BMR (same stats)
        #[test]
        fn prop_male_bmr_higher(
            weight in 50.0f64..100.0,
            height in 160.0f64..190.0,
            age in 20i32..60
        ) {
            let male = calculate_bmr_mifflin(weight, height, age, Gender::Male);
            let female = calculate_bmr_mifflin(weight, height, age, Gender::Female);
            prop_assert!(male > female);
        }

        /// Property: meal split sums to the daily target within rounding
        #[test]
        fn prop_meal_distribution_sums(calories in 1200.0f64..5000.0) {
            let daily = calories.round();
            let meals = meal_distribution(daily);
            let sum = meals.breakfast + meals.lunch + meals.dinner + meals.snack;
            prop_assert!((sum - daily).abs() <= 2.0);
        }
    }

    // =========================================================================
    // BMI
    // =========================================================================

    #[test]
    fn test_bmi_calculation() {
        let bmi = calculate_bmi(70.0, 175.0);
        assert!((bmi - 22.86).abs() < 0.01);
    }

    #[rstest]
    #[case(18.49, BmiCategory::Underweight)]
    #[case(18.5, BmiCategory::Normal)]
    #[case(24.99, BmiCategory::Normal)]
    #[case(25.0, BmiCategory::Overweight)]
    #[case(29.99, BmiCategory::Overweight)]
    #[case(30.0, BmiCategory::Obese)]
    fn test_bmi_boundaries(#[case] bmi: f64, #[case] expected: BmiCategory) {
        assert_eq!(classify_bmi(bmi), expected);
    }

    #[rstest]
    #[case(BmiCategory::Underweight)]
    #[case(BmiCategory::Normal)]
    #[case(BmiCategory::Overweight)]
    #[case(BmiCategory::Obese)]
    fn test_bmi_category_parses_from_label(#[case] category: BmiCategory) {
        assert_eq!(category.label().parse::<BmiCategory>(), Ok(category));
        assert!("chunky".parse::<BmiCategory>().is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: a weight at BMI 21.75 classifies as normal at any height
        #[test]
        fn prop_mid_normal_weight_classifies_normal(height in 150.0f64..200.0) {
            let height_m = height / 100.0;
            let bmi = calculate_bmi(21.75 * height_m * height_m, height);
            prop_assert_eq!(classify_bmi(bmi), BmiCategory::Normal);
        }
    }

    // =========================================================================
    // Health score
    // =========================================================================

    #[rstest]
    #[case("115/75", 25)]
    #[case("125/75", 20)]
    #[case("135/75", 15)]
    #[case("118/85", 15)]
    #[case("145/70", 5)]
    #[case("110/95", 5)]
    #[case("high", 0)]
    #[case("120-80", 0)]
    #[case("", 0)]
    fn test_blood_pressure_points(#[case] reading: &str, #[case] expected: u32) {
        assert_eq!(blood_pressure_points(reading), expected);
    }

    #[rstest]
    #[case(72, 25)]
    #[case(60, 25)]
    #[case(100, 25)]
    #[case(55, 15)]
    #[case(105, 15)]
    #[case(45, 5)]
    #[case(120, 5)]
    fn test_heart_rate_points(#[case] bpm: i32, #[case] expected: u32) {
        assert_eq!(heart_rate_points(bpm), expected);
    }

    #[rstest]
    #[case(8.0, 25)]
    #[case(7.0, 25)]
    #[case(9.0, 25)]
    #[case(6.5, 15)]
    #[case(9.5, 15)]
    #[case(10.0, 15)]
    #[case(5.0, 5)]
    #[case(11.0, 5)]
    fn test_sleep_points(#[case] hours: f64, #[case] expected: u32) {
        assert_eq!(sleep_points(hours), expected);
    }

    #[test]
    fn test_perfect_and_poor_scores() {
        let best = calculate_health_score("115/75", 70, 22.0, 8.0);
        assert_eq!(best.total, 100);
        assert_eq!(RiskLevel::from_score(best.total), RiskLevel::Low);

        let worst = calculate_health_score("garbage", 130, 35.0, 3.0);
        assert_eq!(worst.total, 15);
        assert_eq!(RiskLevel::from_score(worst.total), RiskLevel::High);
    }

    #[test]
    fn test_risk_level_boundaries() {
        assert_eq!(RiskLevel::from_score(80), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(79), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(59), RiskLevel::High);
    }

    #[test]
    fn test_activity_class_from_weekly_calories() {
        assert_eq!(ActivityClass::from_weekly_calories(0.0), ActivityClass::Sedentary);
        assert_eq!(ActivityClass::from_weekly_calories(200.0), ActivityClass::LightlyActive);
        assert_eq!(ActivityClass::from_weekly_calories(999.0), ActivityClass::LightlyActive);
        assert_eq!(ActivityClass::from_weekly_calories(1000.0), ActivityClass::ModeratelyActive);
        assert_eq!(ActivityClass::from_weekly_calories(2000.0), ActivityClass::VeryActive);
        assert_eq!(ActivityClass::VeryActive.label(), "Very Active");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: the score is the sum of its buckets and stays within 0-100
        #[test]
        fn prop_score_is_sum_of_buckets(
            sys in 80i32..200,
            dia in 40i32..130,
            hr in 30i32..200,
            bmi in 12.0f64..50.0,
            sleep in 0.0f64..14.0
        ) {
            let reading = format!("{}/{}", sys, dia);
            let score = calculate_health_score(&reading, hr, bmi, sleep);
            prop_assert_eq!(
                score.total,
                blood_pressure_points(&reading) + heart_rate_points(hr) + bmi_points(bmi) + sleep_points(sleep)
            );
            prop_assert!(score.total <= 100);
        }
    }
}
