use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use super::analytics::AtQuery;
use super::owner::OwnerId;
use super::AppState;
use crate::errors::Result;
use crate::models::Reminder;

#[derive(Debug, Serialize)]
pub struct RemindersResponse {
    pub reminders: Vec<Reminder>,
}

pub fn reminder_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(active_reminders))
        .route("/:reminder_id/dismiss", post(dismiss_reminder))
        .with_state(state)
}

pub async fn active_reminders(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Query(query): Query<AtQuery>,
) -> Result<Json<RemindersResponse>> {
    let reminders = state
        .analytics
        .active_reminders(&owner_id, query.instant())
        .await?;
    Ok(Json(RemindersResponse { reminders }))
}

pub async fn dismiss_reminder(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(reminder_id): Path<String>,
    Query(query): Query<AtQuery>,
) -> Result<StatusCode> {
    state
        .analytics
        .dismiss_reminder(&owner_id, &reminder_id, query.instant())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
