//! Input validation functions
//!
//! Range and format checks for user input. Each returns a human-readable
//! message on failure; the backend turns that into a 400 response.

use crate::health_metrics::{ActivityLevel, BloodPressure, Gender};
use once_cell::sync::Lazy;
use regex_lite::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

fn check_finite(value: f64, what: &str) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err(format!("{} must be a valid number", what));
    }
    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !EMAIL_RE.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    check_finite(weight_kg, "Weight")?;
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    check_finite(height_cm, "Height")?;
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

pub fn validate_age(age: i32) -> Result<(), String> {
    if !(1..=150).contains(&age) {
        return Err("Age must be between 1 and 150".to_string());
    }
    Ok(())
}

/// Validate calorie value
pub fn validate_calories(calories: f64) -> Result<(), String> {
    check_finite(calories, "Calories")?;
    if calories < 0.0 {
        return Err("Calories cannot be negative".to_string());
    }
    if calories > 50000.0 {
        return Err("Calorie value unreasonably high".to_string());
    }
    Ok(())
}

/// Validate a macro amount in grams
pub fn validate_grams(grams: f64) -> Result<(), String> {
    check_finite(grams, "Amount")?;
    if grams < 0.0 {
        return Err("Amount cannot be negative".to_string());
    }
    if grams > 5000.0 {
        return Err("Amount unreasonably high".to_string());
    }
    Ok(())
}

/// Validate percentage value (0-100)
pub fn validate_percentage(value: f64) -> Result<(), String> {
    check_finite(value, "Percentage")?;
    if !(0.0..=100.0).contains(&value) {
        return Err("Percentage must be between 0 and 100".to_string());
    }
    Ok(())
}

/// Validate heart rate (bpm)
pub fn validate_heart_rate(bpm: i32) -> Result<(), String> {
    if bpm < 20 {
        return Err("Heart rate too low".to_string());
    }
    if bpm > 300 {
        return Err("Heart rate too high".to_string());
    }
    Ok(())
}

/// Validate a "systolic/diastolic" reading
pub fn validate_blood_pressure(reading: &str) -> Result<(), String> {
    let bp: BloodPressure = reading.parse()?;
    if !(50..=300).contains(&bp.systolic) || !(30..=200).contains(&bp.diastolic) {
        return Err("Blood pressure values out of range".to_string());
    }
    if bp.diastolic >= bp.systolic {
        return Err("Diastolic pressure must be lower than systolic".to_string());
    }
    Ok(())
}

pub fn validate_sleep_hours(hours: f64) -> Result<(), String> {
    check_finite(hours, "Sleep hours")?;
    if !(0.0..=24.0).contains(&hours) {
        return Err("Sleep hours must be between 0 and 24".to_string());
    }
    Ok(())
}

/// Stress is self-reported on a 1-10 scale
pub fn validate_stress_level(level: i32) -> Result<(), String> {
    if !(1..=10).contains(&level) {
        return Err("Stress level must be between 1 and 10".to_string());
    }
    Ok(())
}

/// Sleep quality is rated 1-5
pub fn validate_sleep_quality(quality: i32) -> Result<(), String> {
    if !(1..=5).contains(&quality) {
        return Err("Sleep quality must be between 1 and 5".to_string());
    }
    Ok(())
}

/// Validate duration in minutes
pub fn validate_duration_minutes(minutes: i32) -> Result<(), String> {
    if minutes < 0 {
        return Err("Duration cannot be negative".to_string());
    }
    if minutes > 1440 {
        return Err("Duration cannot exceed 24 hours".to_string());
    }
    Ok(())
}

/// Validate a required free-text name
pub fn validate_name(name: &str, max_len: usize) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("Name must be at most {} characters", max_len));
    }
    Ok(())
}

/// Validate date of birth
/// Must not be in the future, and age must be between 1 and 150 years
pub fn validate_date_of_birth(dob: chrono::NaiveDate) -> Result<(), String> {
    let today = chrono::Utc::now().date_naive();

    if dob > today {
        return Err("Date of birth cannot be in the future".to_string());
    }

    match today.years_since(dob) {
        Some(age) if age < 1 => Err("Age must be at least 1 year".to_string()),
        Some(age) if age > 150 => Err("Age cannot exceed 150 years".to_string()),
        None => Err("Invalid date of birth".to_string()),
        _ => Ok(()),
    }
}

/// Validate activity level (accepts the aliases understood by the calculator)
pub fn validate_activity_level(level: &str) -> Result<(), String> {
    level.parse::<ActivityLevel>().map(|_| ()).map_err(|_| {
        "Invalid activity level. Must be one of: sedentary, light, moderate, active, very_active"
            .to_string()
    })
}

pub fn validate_gender(gender: &str) -> Result<(), String> {
    gender
        .parse::<Gender>()
        .map(|_| ())
        .map_err(|_| "Invalid gender. Must be one of: male, female, other".to_string())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weight" | "weight_kg" => "Weight",
        "height" | "height_cm" => "Height",
        "age" => "Age",
        "gender" => "Gender",
        "activity_level" => "Activity Level",
        "goal_weight_kg" => "Goal Weight",
        "blood_pressure" => "Blood Pressure",
        "heart_rate" => "Heart Rate",
        "sleep_hours" => "Sleep Hours",
        "stress_level" => "Stress Level",
        "date_of_birth" => "Date of Birth",
        "timezone" => "Timezone",
        _ => field_name,
    }
}

/// Convert a list of technical field names to user-friendly labels
pub fn get_missing_fields_labels(fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .map(|f| get_field_display_label(f).to_string())
        .collect()
}

/// Validation error with field context
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Run a field check, tagging the failure with the field name
pub fn check_field(field: &str, result: Result<(), String>) -> Result<(), ValidationError> {
    result.map_err(|msg| ValidationError::new(field, &msg))
}
