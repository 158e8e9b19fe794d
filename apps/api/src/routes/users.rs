//! User registration and lookup.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use shrinkshield_core::validation::validate_email;
use shrinkshield_core::{CoreError, User};

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
}

/// `POST /users`
///
/// 409 when the email is already registered (compared case-insensitively).
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(request) = body?;
    validate_email(&request.email)?;

    let user = state.db.users().create(&request.email).await?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/{id}`
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let user = state
        .db
        .users()
        .get_by_id(&id)
        .await?
        .ok_or(CoreError::UserNotFound(id))?;

    Ok(Json(user))
}
