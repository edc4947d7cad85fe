use std::sync::Arc;

use tons_of_stats::{
    router, stats::start_reset_task, AppState, Config, Database, StatsLedger,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tons_of_stats=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LoLdle stats bot");

    if let Err(e) = dotenvy::dotenv() {
        warn!(error = %e, "No .env file loaded");
    }
    let config = Config::from_env()?;

    let db = Database::connect(&config.database_url, config.max_connections).await?;
    db.bootstrap().await?;

    // Dependencies are created once here and shared through the app state
    let ledger = Arc::new(StatsLedger::new(db.clone()));
    tokio::spawn(start_reset_task(Arc::clone(&ledger)));

    let bind_address = config.bind_address;
    let app = router(AppState::new(ledger, Arc::new(config)));

    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!(address = %bind_address, "Server running");
    axum::serve(listener, app).await?;

    db.close().await;
    Ok(())
}
