use mimalloc::MiMalloc;
use shelfcast::config::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Arc::new(Config::from_env()?);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        loglevel = %cfg.loglevel,
        listen_addr = %cfg.listen_addr,
        poll_count = cfg.poll_count,
        poll_interval_ms = cfg.poll_interval_ms,
        max_connections = cfg.max_connections
    );

    // Checked again on every request; this is only an early hint.
    if let Err(e) = cfg.require_database_url() {
        warn!(error = %e, "book endpoints will fail until DATABASE_URL is set");
    }

    let state = shelfcast::router::ShelfState::from_config(cfg.clone());
    let app = shelfcast::router::shelf_router(state);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c; shutting down");
    }
}
