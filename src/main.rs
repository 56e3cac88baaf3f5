use std::sync::Arc;

use anyhow::Result;
use fittrack::api::{routes::create_routes, AppState};
use fittrack::config::AppConfig;
use fittrack::services::AnalyticsService;
use fittrack::store::InMemoryStore;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let zone = config.bucket_zone()?;
    let store = Arc::new(InMemoryStore::new());
    let state = AppState {
        records: store.clone(),
        analytics: AnalyticsService::new(store.clone(), store, zone),
        default_window_days: config.default_window_days,
    };

    let app = create_routes(state);

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("FitTrack server starting on http://{}", address);
    info!("Day buckets use UTC offset {}", zone);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
