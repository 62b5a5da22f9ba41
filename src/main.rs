use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::sync::broadcast;
use tracing::info;

use ecolink_backend::{app, app_state::AppState, config, db, i18n, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = config::init()?.clone();
    let telemetry = telemetry::init_telemetry(None).await?;

    let pool = db::init_pool().await?;
    let localizer = Arc::new(i18n::init_i18n()?);
    let (events, _) = broadcast::channel(64);

    let state = AppState::new(pool, config.clone(), localizer, events);
    let router = app::create_router(state);

    let addr = config.server_addr();
    info!("{} listening on {}", config.app.name, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, router)
        .await
        .context("Failed to serve application")?;

    telemetry.shutdown().await?;

    Ok(())
}
