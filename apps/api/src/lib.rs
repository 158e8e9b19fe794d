//! # ShrinkShield API
//!
//! HTTP backend that ingests grocery receipts.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShrinkShield API Server                          │
//! │                                                                         │
//! │  Client ───► HTTP (8000) ───► routes ───► ingest ───► SQLite           │
//! │                                             │                           │
//! │                                             ▼                           │
//! │                                         OcrEngine                       │
//! │                                          (stub)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The binary in `main.rs` only loads configuration, opens the database and
//! serves [`router`]. Integration tests build the same router around an
//! in-memory database.

pub mod config;
pub mod error;
pub mod ingest;
pub mod ocr;
pub mod routes;

use std::sync::Arc;

use shrinkshield_db::Database;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use ocr::{OcrEngine, StubOcr};
pub use routes::router;

/// Shared application state.
pub struct AppState {
    pub db: Database,
    pub ocr: Arc<dyn OcrEngine>,
    pub config: ApiConfig,
}

impl AppState {
    /// State with the stub OCR engine.
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            db,
            ocr: Arc::new(StubOcr),
            config,
        }
    }
}

/// Graceful shutdown signal handler.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(?e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
