//! # HTTP Routes
//!
//! ## Route Organization
//! ```text
//! routes/
//! ├── mod.rs        ◄─── You are here (router assembly)
//! ├── health.rs     ◄─── Liveness + database ping
//! ├── receipts.rs   ◄─── Upload, list, detail, delete
//! ├── users.rs      ◄─── Registration and lookup
//! └── normalize.rs  ◄─── Size/unit-price calculator over the core
//! ```
//!
//! ## Endpoints
//! | Method | Path             | Success          |
//! |--------|------------------|------------------|
//! | GET    | `/health`        | 200              |
//! | POST   | `/receipts`      | 201 detail       |
//! | GET    | `/receipts`      | 200 list         |
//! | GET    | `/receipts/{id}` | 200 detail / 404 |
//! | DELETE | `/receipts/{id}` | 204 / 404        |
//! | POST   | `/users`         | 201 / 400 / 409  |
//! | GET    | `/users/{id}`    | 200 / 404        |
//! | POST   | `/normalize`     | 200              |

pub mod health;
pub mod normalize;
pub mod receipts;
pub mod users;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::AppState;

/// Multipart framing (boundaries, part headers, the `user_id` field) on top
/// of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health))
        .route(
            "/receipts",
            post(receipts::upload_receipt).get(receipts::list_receipts),
        )
        .route(
            "/receipts/{id}",
            get(receipts::get_receipt).delete(receipts::delete_receipt),
        )
        .route("/users", post(users::create_user))
        .route("/users/{id}", get(users::get_user))
        .route("/normalize", post(normalize::normalize))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
