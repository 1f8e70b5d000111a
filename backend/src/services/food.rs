//! Food logging
//!
//! Macro energy shares are derived from the gram values unless the client
//! supplies all three. An entry can optionally get a generated picture;
//! when image generation fails the entry is stored without one.

use super::dates::{instant_bounds, resolve_range, today};
use crate::ai::{prompts, try_generate_image, AiServices};
use crate::db::{dec_to_f64, f64_to_dec};
use crate::error::ApiError;
use crate::repositories::{CreateFoodEntry, FoodEntryRecord, FoodEntryRepository};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;
use wellness_shared::health_metrics::macro_energy_percentages;
use wellness_shared::models::MealType;
use wellness_shared::types::{
    DailyFoodResponse, FoodEntryResponse, FoodListQuery, LogFoodRequest, MealTotals,
};
use wellness_shared::validation::{
    check_field, validate_calories, validate_grams, validate_name, validate_percentage,
    ValidationError,
};

const MEAL_ORDER: [MealType; 4] = [
    MealType::Breakfast,
    MealType::Lunch,
    MealType::Dinner,
    MealType::Snack,
];

pub struct FoodService;

impl FoodService {
    pub async fn log(
        db: &PgPool,
        ai: &AiServices,
        user_id: Uuid,
        req: LogFoodRequest,
    ) -> Result<FoodEntryResponse, ApiError> {
        let mut input = Self::validate(user_id, &req)?;

        if req.generate_image {
            let prompt = prompts::food_image(&input.name);
            input.image_url = try_generate_image(ai.image.as_ref(), &prompt, &input.name).await;
        }

        let record = FoodEntryRepository::create(db, input)
            .await
            .map_err(ApiError::Internal)?;

        Ok(to_response(&record))
    }

    /// Entries for a single `date`, or for `start..=end` (default: today)
    pub async fn list(
        db: &PgPool,
        user_id: Uuid,
        query: FoodListQuery,
    ) -> Result<Vec<FoodEntryResponse>, ApiError> {
        let (start, end) = match query.date {
            Some(date) => (date, date),
            None => resolve_range(query.start, query.end.or(query.start), 1)?,
        };

        let records = Self::in_range(db, user_id, start, end).await?;
        Ok(records.iter().map(to_response).collect())
    }

    pub async fn daily(
        db: &PgPool,
        user_id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<DailyFoodResponse, ApiError> {
        let date = date.unwrap_or_else(today);
        let records = Self::in_range(db, user_id, date, date).await?;
        let entries: Vec<FoodEntryResponse> = records.iter().map(to_response).collect();
        Ok(daily_totals(date, entries))
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = FoodEntryRepository::delete(db, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Food entry not found".to_string()));
        }
        Ok(())
    }

    pub(crate) async fn in_range(
        db: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FoodEntryRecord>, ApiError> {
        let (from, until) = instant_bounds(start, end)?;
        FoodEntryRepository::get_in_range(db, user_id, from, until)
            .await
            .map_err(ApiError::Internal)
    }

    fn validate(user_id: Uuid, req: &LogFoodRequest) -> Result<CreateFoodEntry, ApiError> {
        check_field("name", validate_name(&req.name, 200))?;
        check_field("calories", validate_calories(req.calories))?;
        check_field("protein_g", validate_grams(req.protein_g))?;
        check_field("carbs_g", validate_grams(req.carbs_g))?;
        check_field("fat_g", validate_grams(req.fat_g))?;

        let meal_type: MealType = req
            .meal_type
            .parse()
            .map_err(|e: String| ValidationError::new("meal_type", &e))?;

        let (protein_pct, carbs_pct, fat_pct) = match (req.protein_pct, req.carbs_pct, req.fat_pct) {
            (Some(p), Some(c), Some(f)) => {
                check_field("protein_pct", validate_percentage(p))?;
                check_field("carbs_pct", validate_percentage(c))?;
                check_field("fat_pct", validate_percentage(f))?;
                (p, c, f)
            }
            _ => macro_energy_percentages(req.protein_g, req.carbs_g, req.fat_g),
        };

        Ok(CreateFoodEntry {
            user_id,
            name: req.name.trim().to_string(),
            calories: f64_to_dec(req.calories),
            protein_g: f64_to_dec(req.protein_g),
            carbs_g: f64_to_dec(req.carbs_g),
            fat_g: f64_to_dec(req.fat_g),
            protein_pct: f64_to_dec(protein_pct),
            carbs_pct: f64_to_dec(carbs_pct),
            fat_pct: f64_to_dec(fat_pct),
            meal_type: meal_type.as_str().to_string(),
            image_url: None,
            recorded_at: req.recorded_at,
        })
    }
}

pub(crate) fn to_response(record: &FoodEntryRecord) -> FoodEntryResponse {
    FoodEntryResponse {
        id: record.id.to_string(),
        name: record.name.clone(),
        calories: dec_to_f64(record.calories),
        protein_g: dec_to_f64(record.protein_g),
        carbs_g: dec_to_f64(record.carbs_g),
        fat_g: dec_to_f64(record.fat_g),
        protein_pct: dec_to_f64(record.protein_pct),
        carbs_pct: dec_to_f64(record.carbs_pct),
        fat_pct: dec_to_f64(record.fat_pct),
        meal_type: record.meal_type.clone(),
        image_url: record.image_url.clone(),
        recorded_at: record.recorded_at,
    }
}

/// Day totals with one row per meal type, in meal order
fn daily_totals(date: NaiveDate, entries: Vec<FoodEntryResponse>) -> DailyFoodResponse {
    let by_meal = MEAL_ORDER
        .iter()
        .map(|meal| {
            let matching: Vec<&FoodEntryResponse> =
                entries.iter().filter(|e| e.meal_type == meal.as_str()).collect();
            MealTotals {
                meal_type: meal.as_str().to_string(),
                calories: matching.iter().map(|e| e.calories).sum(),
                entries: matching.len(),
            }
        })
        .collect();

    DailyFoodResponse {
        date,
        total_calories: entries.iter().map(|e| e.calories).sum(),
        total_protein_g: entries.iter().map(|e| e.protein_g).sum(),
        total_carbs_g: entries.iter().map(|e| e.carbs_g).sum(),
        total_fat_g: entries.iter().map(|e| e.fat_g).sum(),
        by_meal,
        entries,
    }
}
