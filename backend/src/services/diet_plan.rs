//! Diet plans
//!
//! Targets come from the calorie calculator; meals come from the text model
//! or, when that fails, from the static fallback plan. Weekly plans expand
//! an existing single-day plan into seven days.

use super::profile::age_from_dob;
use crate::ai::{fallback, generate_structured, prompts, AiServices};
use crate::db::dec_to_f64;
use crate::error::{parse_id, ApiError};
use crate::rate_limit::AiQuota;
use crate::repositories::{
    CreateDietPlan, DietPlanRecord, DietPlanRepository, HealthMetricsRecord,
    HealthMetricsRepository, ProfileRecord, UserRepository,
};
use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use wellness_shared::health_metrics::{
    calculate_calorie_targets, ActivityLevel, CalorieInputs, CalorieTargets, Gender,
};
use wellness_shared::models::{DailyPlanPayload, PlanContent, WeeklyPlanPayload};
use wellness_shared::types::{DietPlanRequest, DietPlanResponse, WeeklyDietPlanRequest};
use wellness_shared::validation::{
    check_field, get_missing_fields_labels, validate_age, validate_height_cm, validate_name,
    validate_weight, ValidationError,
};

const MAX_PREFERENCES: usize = 20;

pub struct DietPlanService;

impl DietPlanService {
    /// Calculator only; nothing is stored
    pub async fn calculate(
        db: &PgPool,
        user_id: Uuid,
        req: &DietPlanRequest,
    ) -> Result<CalorieTargets, ApiError> {
        let (inputs, _) = Self::load_inputs(db, user_id, req).await?;
        Ok(calculate_calorie_targets(&inputs))
    }

    /// Calculate targets, generate a single-day plan and store it
    pub async fn create(
        db: &PgPool,
        ai: &AiServices,
        quota: &AiQuota,
        user_id: Uuid,
        req: DietPlanRequest,
    ) -> Result<DietPlanResponse, ApiError> {
        let (inputs, preferences) = Self::load_inputs(db, user_id, &req).await?;
        let title = plan_title(req.title.as_deref(), "Diet plan")?;
        quota.consume(user_id).await?;

        let targets = calculate_calorie_targets(&inputs);
        let prompt = prompts::daily_plan(&targets, &preferences);
        let daily_calories = targets.daily_calories;
        let generated = generate_structured::<DailyPlanPayload, _>(
            ai.text.as_ref(),
            "daily_plan",
            &prompt,
            || fallback::daily_plan(daily_calories),
        )
        .await;

        let record = DietPlanRepository::create(
            db,
            CreateDietPlan {
                user_id,
                title,
                base_on_plan_id: None,
                inputs,
                targets,
                dietary_preferences: preferences,
                content: PlanContent::from(generated.value),
                ai_generated: generated.ai_generated,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(plan_id = %record.id, ai_generated = record.ai_generated, "Diet plan created");
        Ok(to_response(&record))
    }

    /// Expand a stored single-day plan into a seven-day plan
    pub async fn create_weekly(
        db: &PgPool,
        ai: &AiServices,
        quota: &AiQuota,
        user_id: Uuid,
        req: WeeklyDietPlanRequest,
    ) -> Result<DietPlanResponse, ApiError> {
        let base_id = parse_id(&req.base_on_plan_id, "plan")?;
        let base = DietPlanRepository::get_by_id(db, base_id, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Base diet plan not found".to_string()))?;

        if base.is_weekly_plan {
            return Err(ApiError::Validation(
                "A weekly plan must be based on a single-day plan".to_string(),
            ));
        }

        let title = plan_title(req.title.as_deref(), "Weekly plan")?;
        quota.consume(user_id).await?;

        let targets = base.targets.0.clone();
        let base_meals = base.content.first_day_meals().to_vec();
        let prompt = prompts::weekly_plan(&targets, &base.dietary_preferences, &base_meals);
        let daily_calories = targets.daily_calories;
        let generated = generate_structured::<WeeklyPlanPayload, _>(
            ai.text.as_ref(),
            "weekly_plan",
            &prompt,
            || fallback::weekly_plan(&base_meals, daily_calories),
        )
        .await;

        let record = DietPlanRepository::create(
            db,
            CreateDietPlan {
                user_id,
                title,
                base_on_plan_id: Some(base.id),
                inputs: base.inputs.0.clone(),
                targets,
                dietary_preferences: base.dietary_preferences.clone(),
                content: PlanContent::from(generated.value),
                ai_generated: generated.ai_generated,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(plan_id = %record.id, base_id = %base.id, ai_generated = record.ai_generated, "Weekly plan created");
        Ok(to_response(&record))
    }

    pub async fn list(db: &PgPool, user_id: Uuid) -> Result<Vec<DietPlanResponse>, ApiError> {
        let records = DietPlanRepository::get_by_user(db, user_id)
            .await
            .map_err(ApiError::Internal)?;
        Ok(records.iter().map(to_response).collect())
    }

    pub async fn get(db: &PgPool, user_id: Uuid, id: Uuid) -> Result<DietPlanResponse, ApiError> {
        DietPlanRepository::get_by_id(db, id, user_id)
            .await
            .map_err(ApiError::Internal)?
            .map(|r| to_response(&r))
            .ok_or_else(|| ApiError::NotFound("Diet plan not found".to_string()))
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = DietPlanRepository::delete(db, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Diet plan not found".to_string()));
        }
        Ok(())
    }

    async fn load_inputs(
        db: &PgPool,
        user_id: Uuid,
        req: &DietPlanRequest,
    ) -> Result<(CalorieInputs, Vec<String>), ApiError> {
        let profile = UserRepository::get_profile(db, user_id)
            .await
            .map_err(ApiError::Internal)?;
        let latest = HealthMetricsRepository::get_latest(db, user_id)
            .await
            .map_err(ApiError::Internal)?;

        resolve_inputs(req, profile.as_ref(), latest.as_ref())
    }
}

/// Fill calculator inputs from the request, then the newest vitals
/// snapshot, then the profile. Anything still missing is a 400.
fn resolve_inputs(
    req: &DietPlanRequest,
    profile: Option<&ProfileRecord>,
    latest: Option<&HealthMetricsRecord>,
) -> Result<(CalorieInputs, Vec<String>), ApiError> {
    let weight_kg = req.weight_kg.or(latest.map(|m| dec_to_f64(m.weight_kg)));
    let height_cm = req
        .height_cm
        .or(latest.map(|m| dec_to_f64(m.height_cm)))
        .or(profile.and_then(|p| p.height_cm).map(dec_to_f64));
    let age = req
        .age
        .or(latest.map(|m| m.age))
        .or(profile.and_then(|p| p.date_of_birth).map(age_from_dob));
    let gender = req
        .gender
        .clone()
        .or(latest.map(|m| m.gender.clone()))
        .or(profile.and_then(|p| p.gender.clone()));

    let missing: Vec<&str> = [
        ("weight_kg", weight_kg.is_none()),
        ("height_cm", height_cm.is_none()),
        ("age", age.is_none()),
        ("gender", gender.is_none()),
    ]
    .into_iter()
    .filter_map(|(field, absent)| absent.then_some(field))
    .collect();

    let (Some(weight_kg), Some(height_cm), Some(age), Some(gender)) =
        (weight_kg, height_cm, age, gender)
    else {
        return Err(ApiError::Validation(format!(
            "Missing required fields: {}",
            get_missing_fields_labels(&missing).join(", ")
        )));
    };

    check_field("weight_kg", validate_weight(weight_kg))?;
    check_field("height_cm", validate_height_cm(height_cm))?;
    check_field("age", validate_age(age))?;
    if let Some(goal) = req.goal_weight_kg {
        check_field("goal_weight_kg", validate_weight(goal))?;
    }
    let gender: Gender = gender
        .parse()
        .map_err(|_| ValidationError::new("gender", "Must be one of: male, female, other"))?;

    // Unrecognized levels are kept; the calculator treats them as moderate
    let activity_level = req
        .activity_level
        .clone()
        .or(profile.and_then(|p| p.activity_level.clone()))
        .unwrap_or_else(|| ActivityLevel::default().as_str().to_string());

    let preferences: Vec<String> = if req.dietary_preferences.is_empty() {
        profile.map(|p| p.dietary_preferences.clone()).unwrap_or_default()
    } else {
        req.dietary_preferences
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    };
    if preferences.len() > MAX_PREFERENCES {
        return Err(ValidationError::new(
            "dietary_preferences",
            &format!("At most {} preferences are allowed", MAX_PREFERENCES),
        )
        .into());
    }

    Ok((
        CalorieInputs {
            weight_kg,
            height_cm,
            age,
            gender,
            activity_level,
            goal_weight_kg: req.goal_weight_kg,
        },
        preferences,
    ))
}

fn plan_title(requested: Option<&str>, prefix: &str) -> Result<String, ApiError> {
    match requested.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => {
            check_field("title", validate_name(title, 200))?;
            Ok(title.to_string())
        }
        None => Ok(format!("{} {}", prefix, Utc::now().format("%Y-%m-%d"))),
    }
}

pub(crate) fn to_response(record: &DietPlanRecord) -> DietPlanResponse {
    DietPlanResponse {
        id: record.id.to_string(),
        title: record.title.clone(),
        is_weekly_plan: record.is_weekly_plan,
        base_on_plan_id: record.base_on_plan_id.map(|id| id.to_string()),
        targets: record.targets.0.clone(),
        dietary_preferences: record.dietary_preferences.clone(),
        content: record.content.0.clone(),
        ai_generated: record.ai_generated,
        created_at: record.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::f64_to_dec;
    use chrono::NaiveDate;

    fn full_request() -> DietPlanRequest {
        DietPlanRequest {
            title: None,
            weight_kg: Some(70.0),
            height_cm: Some(175.0),
            age: Some(25),
            gender: Some("male".to_string()),
            activity_level: Some("moderate".to_string()),
            goal_weight_kg: None,
            dietary_preferences: vec![" vegetarian ".to_string(), "".to_string()],
        }
    }

    fn profile() -> ProfileRecord {
        ProfileRecord {
            user_id: Uuid::new_v4(),
            display_name: None,
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1),
            gender: Some("female".to_string()),
            height_cm: Some(f64_to_dec(165.0)),
            activity_level: Some("light".to_string()),
            dietary_preferences: vec!["pescatarian".to_string()],
            timezone: "UTC".to_string(),
            updated_at: Utc::now(),
        }
    }

    fn metrics() -> HealthMetricsRecord {
        HealthMetricsRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            height_cm: f64_to_dec(170.0),
            weight_kg: f64_to_dec(62.0),
            age: 34,
            gender: "female".to_string(),
            blood_pressure: "118/76".to_string(),
            heart_rate: 64,
            sleep_hours: f64_to_dec(7.0),
            stress_level: 3,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_request_values_win() {
        let (inputs, prefs) = resolve_inputs(&full_request(), Some(&profile()), Some(&metrics())).unwrap();
        assert_eq!(inputs.weight_kg, 70.0);
        assert_eq!(inputs.gender, Gender::Male);
        assert_eq!(prefs, vec!["vegetarian".to_string()]);
        assert_eq!(calculate_calorie_targets(&inputs).daily_calories, 2594.0);
    }

    #[test]
    fn test_all_fields_from_request_alone() {
        let (inputs, prefs) = resolve_inputs(&full_request(), None, None).unwrap();
        assert_eq!(inputs.weight_kg, 70.0);
        assert_eq!(inputs.height_cm, 175.0);
        assert_eq!(inputs.age, 25);
        assert_eq!(inputs.gender, Gender::Male);
        assert_eq!(inputs.activity_level, "moderate");
        assert_eq!(prefs, vec!["vegetarian".to_string()]);
    }

    #[test]
    fn test_falls_back_to_metrics_then_profile() {
        let req = DietPlanRequest::default();
        let (inputs, prefs) = resolve_inputs(&req, Some(&profile()), Some(&metrics())).unwrap();
        assert_eq!(inputs.weight_kg, 62.0);
        assert_eq!(inputs.height_cm, 170.0);
        assert_eq!(inputs.age, 34);
        assert_eq!(inputs.activity_level, "light");
        assert_eq!(prefs, vec!["pescatarian".to_string()]);
    }

    #[test]
    fn test_missing_inputs_are_listed() {
        let req = DietPlanRequest {
            height_cm: Some(175.0),
            ..Default::default()
        };
        match resolve_inputs(&req, None, None) {
            Err(ApiError::Validation(msg)) => {
                assert!(msg.contains("Weight"));
                assert!(msg.contains("Age"));
                assert!(msg.contains("Gender"));
                assert!(!msg.contains("Height"));
            }
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_unknown_activity_is_kept_and_defaults_to_moderate() {
        let mut req = full_request();
        req.activity_level = Some("couch".to_string());
        let (inputs, _) = resolve_inputs(&req, None, None).unwrap();
        let targets = calculate_calorie_targets(&inputs);
        assert_eq!(targets.activity_multiplier, 1.55);

        req.activity_level = None;
        let (inputs, _) = resolve_inputs(&req, None, None).unwrap();
        assert_eq!(inputs.activity_level, "moderate");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut req = full_request();
        req.weight_kg = Some(-5.0);
        assert!(resolve_inputs(&req, None, None).is_err());

        let mut req = full_request();
        req.gender = Some("robot".to_string());
        assert!(resolve_inputs(&req, None, None).is_err());
    }

    #[test]
    fn test_plan_title() {
        assert_eq!(plan_title(Some("  Cut  "), "Diet plan").unwrap(), "Cut");
        assert!(plan_title(None, "Weekly plan").unwrap().starts_with("Weekly plan "));
    }
}
