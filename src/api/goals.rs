use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;

use super::nutrition::DayQuery;
use super::owner::OwnerId;
use super::AppState;
use crate::errors::Result;
use crate::models::GoalReport;

pub fn goals_routes(state: AppState) -> Router {
    Router::new()
        .route("/nutrition", get(nutrition_progress))
        .with_state(state)
}

/// Progress against the owner's nutrition goals for one day
pub async fn nutrition_progress(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Query(query): Query<DayQuery>,
) -> Result<Json<GoalReport>> {
    let date = query
        .date
        .unwrap_or_else(|| state.analytics.today(Utc::now()));
    let daily = state.analytics.daily_nutrition(&owner_id, date).await?;
    Ok(Json(daily.report))
}
