//! Health check endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` when the database answers, `"degraded"` otherwise.
    pub status: &'static str,
    pub message: &'static str,
    pub database: bool,
}

/// `GET /health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = state.db.health_check().await;
    if !database {
        tracing::warn!("Health check: database did not answer");
    }

    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        message: "ShrinkShield backend is running",
        database,
    })
}
