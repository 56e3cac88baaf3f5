use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::owner::OwnerId;
use super::AppState;
use crate::errors::Result;
use crate::models::{BmiCategory, NutritionGoals, UpdateProfileRequest, UserProfile};
use crate::services::goal_evaluator;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
    pub goals: NutritionGoals,
}

impl ProfileResponse {
    fn from_profile(profile: UserProfile) -> Self {
        Self {
            bmi: profile.bmi(),
            bmi_category: profile.bmi_category(),
            goals: goal_evaluator::nutrition_goals(Some(&profile)),
            profile,
        }
    }
}

pub fn profile_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_profile).put(update_profile))
        .with_state(state)
}

/// Owners without a stored profile get an empty one
pub async fn get_profile(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
) -> Result<Json<ProfileResponse>> {
    let profile = state
        .records
        .get_profile(&owner_id)
        .await?
        .unwrap_or_else(|| UserProfile::new(&owner_id));

    Ok(Json(ProfileResponse::from_profile(profile)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Json(update): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    let mut profile = state
        .records
        .get_profile(&owner_id)
        .await?
        .unwrap_or_else(|| UserProfile::new(&owner_id));

    profile.apply(update, Utc::now())?;
    state.records.put_profile(profile.clone()).await?;
    info!(owner_id, "Profile updated");

    Ok(Json(ProfileResponse::from_profile(profile)))
}
