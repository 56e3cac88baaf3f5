use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;

use super::owner::OwnerId;
use super::workouts::CreatedResponse;
use super::AppState;
use crate::errors::Result;
use crate::models::{FoodItem, NewNutritionEntry, RecordKind};
use crate::services::DailyNutrition;

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: Option<NaiveDate>,
}

/// A meal is logged either from a library food or as a bare calorie figure
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LogMealRequest {
    Food {
        food: FoodItem,
        #[serde(default = "crate::models::nutrition::default_quantity")]
        quantity: f64,
        date: Option<NaiveDate>,
    },
    Quick {
        food_name: String,
        calories: u32,
        #[serde(default = "crate::models::nutrition::default_quantity")]
        quantity: f64,
        date: Option<NaiveDate>,
    },
}

pub fn nutrition_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(daily_nutrition).post(log_meal))
        .route("/:entry_id", delete(delete_meal))
        .with_state(state)
}

pub async fn daily_nutrition(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Query(query): Query<DayQuery>,
) -> Result<Json<DailyNutrition>> {
    let date = query
        .date
        .unwrap_or_else(|| state.analytics.today(Utc::now()));
    let daily = state.analytics.daily_nutrition(&owner_id, date).await?;
    Ok(Json(daily))
}

pub async fn log_meal(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Json(request): Json<LogMealRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let now = Utc::now();
    let today = state.analytics.today(now);

    let entry = match request {
        LogMealRequest::Food {
            food,
            quantity,
            date,
        } => NewNutritionEntry::from_food(&food, quantity, date.unwrap_or(today), now)?,
        LogMealRequest::Quick {
            food_name,
            calories,
            quantity,
            date,
        } => NewNutritionEntry::quick_meal(&food_name, calories, quantity, date.unwrap_or(today), now)?,
    };

    let id = state.records.create_nutrition(&owner_id, entry).await?;
    info!(owner_id, entry_id = %id, "Meal logged");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn delete_meal(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(entry_id): Path<String>,
) -> Result<StatusCode> {
    state
        .records
        .delete(&owner_id, RecordKind::Nutrition, &entry_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
