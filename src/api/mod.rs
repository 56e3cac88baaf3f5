// HTTP API routes and handlers

pub mod analytics;
pub mod goals;
pub mod health;
pub mod nutrition;
pub mod owner;
pub mod profile;
pub mod reminders;
pub mod routes;
pub mod workouts;

use std::sync::Arc;

use crate::services::AnalyticsService;
use crate::store::RecordStore;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordStore>,
    pub analytics: AnalyticsService,
    pub default_window_days: i64,
}
