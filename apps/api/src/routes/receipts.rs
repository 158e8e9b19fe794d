//! # Receipt Endpoints
//!
//! Upload goes through [`crate::ingest::ingest_upload`]; everything else is a
//! thin read/delete over `ReceiptRepository`.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use shrinkshield_core::validation::validate_list_limit;
use shrinkshield_core::{
    CoreError, Receipt, ReceiptDetail, ValidationError, DEFAULT_RECEIPT_LIST_LIMIT,
};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::ingest::{ingest_upload, Upload};
use crate::AppState;

// =============================================================================
// Upload
// =============================================================================

/// `POST /receipts`
///
/// ## Multipart Fields
/// - `file` (required): the receipt image, PDF or text
/// - `user_id` (optional): uploading user
pub async fn upload_receipt(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ReceiptDetail>)> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut user_id: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await?;
                file = Some((filename, content_type, bytes.to_vec()));
            }
            Some("user_id") => {
                user_id = Some(field.text().await?);
            }
            other => {
                debug!(field = ?other, "Ignoring unknown multipart field");
            }
        }
    }

    let (filename, content_type, bytes) = file.ok_or_else(|| {
        ApiError::from(ValidationError::Required {
            field: "file".to_string(),
        })
    })?;

    let upload = Upload {
        filename,
        content_type,
        bytes,
        user_id,
    };

    let detail = ingest_upload(
        &state.db,
        state.ocr.as_ref(),
        upload,
        state.config.max_upload_bytes,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

// =============================================================================
// Queries
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub user_id: Option<String>,
}

/// `GET /receipts?limit=N&user_id=...`
///
/// Newest first.
pub async fn list_receipts(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Receipt>>> {
    let Query(params) = params?;
    let limit = params.limit.unwrap_or(DEFAULT_RECEIPT_LIST_LIMIT);
    validate_list_limit(limit)?;

    let receipts = match params.user_id.as_deref() {
        Some(user_id) => state.db.receipts().list_for_user(user_id, limit).await?,
        None => state.db.receipts().list_recent(limit).await?,
    };

    Ok(Json(receipts))
}

/// `GET /receipts/{id}`
pub async fn get_receipt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ReceiptDetail>> {
    let detail = state
        .db
        .receipts()
        .get_detail(&id)
        .await?
        .ok_or(CoreError::ReceiptNotFound(id))?;

    Ok(Json(detail))
}

/// `DELETE /receipts/{id}`
///
/// Raw and product lines go with the receipt.
pub async fn delete_receipt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.db.receipts().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
