use std::sync::Arc;

use quickflex_admin::config;
use quickflex_admin::database::PgStore;
use quickflex_admin::{app, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and friends
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")))
        .init();

    let config = config::config();
    tracing::info!("Starting QuickFlex admin backend in {:?} mode", config.environment);

    let store = PgStore::from_config(&config.database)?;
    let state = AppState::new(Arc::new(store), &config.onboarding.pending_status);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("QuickFlex admin backend listening on http://{}", bind_addr);

    axum::serve(listener, app(state, config)).await?;
    Ok(())
}
