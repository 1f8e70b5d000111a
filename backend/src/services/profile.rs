//! Profile service - business logic for user profile management

use crate::db::{dec_to_f64, f64_to_dec};
use crate::error::ApiError;
use crate::repositories::{ProfileRecord, UpdateProfile, UserRepository};
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use wellness_shared::health_metrics::{ActivityLevel, Gender};
use wellness_shared::types::{ProfileResponse, UpdateProfileRequest};
use wellness_shared::units::{parse_unit_or_default, HeightUnit};
use wellness_shared::validation::{
    check_field, validate_date_of_birth, validate_height_cm, validate_name, ValidationError,
};

const MAX_PREFERENCES: usize = 20;

/// Profile service for user profile operations
pub struct ProfileService;

impl ProfileService {
    /// Get user profile
    pub async fn get_profile(db: &PgPool, user_id: Uuid) -> Result<ProfileResponse, ApiError> {
        let profile = UserRepository::get_profile(db, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

        Ok(to_response(profile))
    }

    /// Update user profile with validation
    pub async fn update_profile(
        db: &PgPool,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<ProfileResponse, ApiError> {
        let updates = Self::validate_profile_update(req)?;

        let profile = UserRepository::update_profile(db, user_id, updates)
            .await
            .map_err(ApiError::Internal)?;

        Ok(to_response(profile))
    }

    /// Validate and normalize a profile update
    fn validate_profile_update(req: UpdateProfileRequest) -> Result<UpdateProfile, ApiError> {
        let display_name = match req.display_name {
            Some(name) => {
                check_field("display_name", validate_name(&name, 100))?;
                Some(name.trim().to_string())
            }
            None => None,
        };

        let height_cm = match req.height {
            Some(height) => {
                let unit: HeightUnit = parse_unit_or_default(req.height_unit.as_deref())
                    .map_err(|e| ValidationError::new("height_unit", &e))?;
                let cm = unit.to_cm(height);
                check_field("height", validate_height_cm(cm))?;
                Some(f64_to_dec(cm))
            }
            None => None,
        };

        if let Some(dob) = req.date_of_birth {
            check_field("date_of_birth", validate_date_of_birth(dob))?;
        }

        let gender = req
            .gender
            .map(|g| {
                g.parse::<Gender>()
                    .map(|g| g.as_str().to_string())
                    .map_err(|_| ValidationError::new("gender", "Must be one of: male, female, other"))
            })
            .transpose()?;

        let activity_level = req
            .activity_level
            .map(|level| {
                level
                    .parse::<ActivityLevel>()
                    .map(|l| l.as_str().to_string())
                    .map_err(|e| ValidationError::new("activity_level", &e))
            })
            .transpose()?;

        let dietary_preferences = match req.dietary_preferences {
            Some(prefs) => {
                let prefs: Vec<String> = prefs
                    .iter()
                    .map(|p| p.trim().to_lowercase())
                    .filter(|p| !p.is_empty())
                    .collect();
                if prefs.len() > MAX_PREFERENCES {
                    return Err(ValidationError::new(
                        "dietary_preferences",
                        &format!("At most {} preferences are allowed", MAX_PREFERENCES),
                    )
                    .into());
                }
                Some(prefs)
            }
            None => None,
        };

        let timezone = req
            .timezone
            .map(|tz| {
                let tz = tz.trim().to_string();
                check_field("timezone", validate_timezone(&tz)).map(|_| tz)
            })
            .transpose()?;

        Ok(UpdateProfile {
            display_name,
            date_of_birth: req.date_of_birth,
            gender,
            height_cm,
            activity_level,
            dietary_preferences,
            timezone,
        })
    }
}

/// Whole years between `dob` and today
pub(crate) fn age_from_dob(dob: NaiveDate) -> i32 {
    Utc::now().date_naive().years_since(dob).unwrap_or(0) as i32
}

/// IANA-style zone name such as `Europe/Berlin` or `UTC`
fn validate_timezone(tz: &str) -> Result<(), String> {
    let valid_chars = tz
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '-' | '+'));
    if tz.is_empty() || tz.len() > 64 || !valid_chars {
        return Err("Invalid timezone".to_string());
    }
    Ok(())
}

pub(crate) fn to_response(profile: ProfileRecord) -> ProfileResponse {
    ProfileResponse {
        age: profile.date_of_birth.map(age_from_dob),
        display_name: profile.display_name,
        date_of_birth: profile.date_of_birth,
        gender: profile.gender,
        height_cm: profile.height_cm.map(dec_to_f64),
        activity_level: profile.activity_level,
        dietary_preferences: profile.dietary_preferences,
        timezone: profile.timezone,
        updated_at: profile.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_normalizes_values() {
        let updates = ProfileService::validate_profile_update(UpdateProfileRequest {
            display_name: Some("  Sam ".to_string()),
            gender: Some("F".to_string()),
            height: Some(70.0),
            height_unit: Some("in".to_string()),
            activity_level: Some("Very Active".to_string()),
            dietary_preferences: Some(vec!["Vegan".to_string(), " ".to_string()]),
            timezone: Some("Europe/Berlin".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(updates.display_name.as_deref(), Some("Sam"));
        assert_eq!(updates.gender.as_deref(), Some("female"));
        assert_eq!(updates.activity_level.as_deref(), Some("very_active"));
        assert!((dec_to_f64(updates.height_cm.unwrap()) - 177.8).abs() < 0.01);
        assert_eq!(updates.dietary_preferences, Some(vec!["vegan".to_string()]));
        assert_eq!(updates.timezone.as_deref(), Some("Europe/Berlin"));
    }

    #[test]
    fn test_update_rejects_invalid_fields() {
        let bad_dob = UpdateProfileRequest {
            date_of_birth: NaiveDate::from_ymd_opt(2999, 1, 1),
            ..Default::default()
        };
        assert!(ProfileService::validate_profile_update(bad_dob).is_err());

        let bad_tz = UpdateProfileRequest {
            timezone: Some("Mars; DROP".to_string()),
            ..Default::default()
        };
        assert!(ProfileService::validate_profile_update(bad_tz).is_err());

        let bad_level = UpdateProfileRequest {
            activity_level: Some("couch".to_string()),
            ..Default::default()
        };
        assert!(ProfileService::validate_profile_update(bad_level).is_err());
    }

    #[test]
    fn test_empty_update_changes_nothing() {
        let updates = ProfileService::validate_profile_update(UpdateProfileRequest::default()).unwrap();
        assert!(updates.display_name.is_none());
        assert!(updates.height_cm.is_none());
        assert!(updates.dietary_preferences.is_none());
    }
}
