use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use super::owner::OwnerId;
use super::AppState;
use crate::errors::Result;
use crate::models::{AnalyticsReport, DashboardSummary};

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub days: Option<i64>,
    pub end: Option<NaiveDate>,
}

/// Optional evaluation instant; defaults to now
#[derive(Debug, Deserialize)]
pub struct AtQuery {
    pub at: Option<DateTime<Utc>>,
}

impl AtQuery {
    pub fn instant(&self) -> DateTime<Utc> {
        self.at.unwrap_or_else(Utc::now)
    }
}

pub fn analytics_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(window_report))
        .route("/dashboard", get(dashboard))
        .with_state(state)
}

/// Aggregated window ending at `end` (today by default)
pub async fn window_report(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Query(query): Query<WindowQuery>,
) -> Result<Json<AnalyticsReport>> {
    let days = query.days.unwrap_or(state.default_window_days);
    let end = query
        .end
        .unwrap_or_else(|| state.analytics.today(Utc::now()));

    let report = state.analytics.window_report(&owner_id, end, days).await?;
    Ok(Json(report))
}

pub async fn dashboard(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Query(query): Query<AtQuery>,
) -> Result<Json<DashboardSummary>> {
    let summary = state.analytics.dashboard(&owner_id, query.instant()).await?;
    Ok(Json(summary))
}
