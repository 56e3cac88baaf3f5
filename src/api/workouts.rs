use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::owner::OwnerId;
use super::AppState;
use crate::errors::Result;
use crate::models::{
    Exercise, NewWorkout, RecordKind, WorkoutCompletion, WorkoutRecord, QUICK_LOG_MINUTES,
};
use crate::services::aggregation_service;

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    pub name: String,
    pub exercises: Vec<Exercise>,
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_minutes: u32,
}

#[derive(Debug, Deserialize)]
pub struct QuickWorkoutRequest {
    pub name: String,
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

pub fn workout_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_workouts).post(create_workout))
        .route("/quick", post(quick_log_workout))
        .route("/:workout_id/complete", post(complete_workout))
        .route("/:workout_id", delete(delete_workout))
        .with_state(state)
}

pub async fn list_workouts(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
) -> Result<Json<Vec<WorkoutRecord>>> {
    let mut workouts = state.records.list_workouts(&owner_id).await?;
    aggregation_service::newest_first(&mut workouts);
    Ok(Json(workouts))
}

pub async fn create_workout(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Json(request): Json<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let workout = NewWorkout::planned(
        &request.name,
        request.exercises,
        request.scheduled_for,
        request.duration_minutes,
        Utc::now(),
    )?;

    let id = state.records.create_workout(&owner_id, workout).await?;
    info!(owner_id, workout_id = %id, "Workout planned");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn quick_log_workout(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Json(request): Json<QuickWorkoutRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let duration = request.duration_minutes.unwrap_or(QUICK_LOG_MINUTES);
    let workout = NewWorkout::quick_log(&request.name, duration, Utc::now())?;

    let id = state.records.create_workout(&owner_id, workout).await?;
    info!(owner_id, workout_id = %id, "Workout quick-logged");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn complete_workout(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(workout_id): Path<String>,
) -> Result<StatusCode> {
    state
        .records
        .update_workout(&owner_id, &workout_id, WorkoutCompletion::completed_at(Utc::now()))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_workout(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(workout_id): Path<String>,
) -> Result<StatusCode> {
    state
        .records
        .delete(&owner_id, RecordKind::Workout, &workout_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
