//! ShrinkShield API server binary.

use std::sync::Arc;

use anyhow::Context;
use shrinkshield_api::{router, shutdown_signal, ApiConfig, AppState};
use shrinkshield_db::{Database, DbConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting ShrinkShield API server...");

    // Load configuration
    let config = ApiConfig::load().context("loading configuration")?;
    info!(
        addr = %config.socket_addr(),
        database = %config.database_path.display(),
        max_upload_bytes = config.max_upload_bytes,
        "Configuration loaded"
    );

    // Open database (runs migrations)
    let db = Database::new(
        DbConfig::new(&config.database_path).max_connections(config.db_max_connections),
    )
    .await
    .context("opening database")?;

    let addr = config.socket_addr();
    let state = Arc::new(AppState::new(db.clone(), config));
    let app = router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}
