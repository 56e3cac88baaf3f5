use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::analytics::analytics_routes;
use super::goals::goals_routes;
use super::health::health_check;
use super::nutrition::nutrition_routes;
use super::profile::profile_routes;
use super::reminders::reminder_routes;
use super::workouts::workout_routes;
use super::AppState;

pub fn create_routes(state: AppState) -> Router {
    let api_v1 = Router::new()
        .nest("/workouts", workout_routes(state.clone()))
        .nest("/nutrition", nutrition_routes(state.clone()))
        .nest("/profile", profile_routes(state.clone()))
        .nest("/analytics", analytics_routes(state.clone()))
        .nest("/goals", goals_routes(state.clone()))
        .nest("/reminders", reminder_routes(state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_v1)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
