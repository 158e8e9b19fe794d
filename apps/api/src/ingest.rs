//! # Ingestion Pipeline
//!
//! One upload from bytes to stored rows.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Upload                                                                 │
//! │    │ validate_upload (size, type, filename)                             │
//! │    ▼                                                                    │
//! │  OcrEngine::extract ──► lines                                           │
//! │    │ parse_line_items                                                   │
//! │    ▼                                                                    │
//! │  LineItem::enrich ──► normalized ml + unit price (per item)             │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  ReceiptRepository::ingest (one transaction)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is written unless every step before persistence succeeds, and the
//! persistence step itself is all-or-nothing.

use shrinkshield_core::line::parse_line_items;
use shrinkshield_core::validation::{essence, validate_upload};
use shrinkshield_core::{CoreError, EnrichedLineItem, LineItem, NewReceipt, ReceiptDetail};
use shrinkshield_db::Database;
use tracing::{info, instrument};

use crate::error::ApiResult;
use crate::ocr::OcrEngine;

/// A receipt file as received from a client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub user_id: Option<String>,
}

/// Validates, OCRs, enriches and stores one upload.
#[instrument(skip_all, fields(filename = %upload.filename, bytes = upload.bytes.len()))]
pub async fn ingest_upload(
    db: &Database,
    ocr: &dyn OcrEngine,
    upload: Upload,
    max_bytes: usize,
) -> ApiResult<ReceiptDetail> {
    validate_upload(
        &upload.filename,
        &upload.content_type,
        upload.bytes.len(),
        max_bytes,
    )
    .map_err(CoreError::from)?;

    let content_type = essence(&upload.content_type);

    let user_id = upload
        .user_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());

    if let Some(id) = &user_id {
        if db.users().get_by_id(id).await?.is_none() {
            return Err(CoreError::UserNotFound(id.clone()).into());
        }
    }

    let output = ocr.extract(&upload.bytes, &content_type).await?;

    let items: Vec<EnrichedLineItem> = parse_line_items(output.lines.iter().map(String::as_str))
        .into_iter()
        .map(LineItem::enrich)
        .collect();

    let new_receipt = NewReceipt {
        user_id,
        filename: upload.filename.trim().to_string(),
        content_type,
        byte_size: upload.bytes.len() as i64,
        ocr_engine: output.meta.engine,
    };

    let detail = db
        .receipts()
        .ingest(new_receipt, &output.lines, &items)
        .await?;

    info!(
        receipt_id = %detail.receipt.id,
        lines = detail.raw_lines.len(),
        products = detail.product_lines.len(),
        "Receipt ingested"
    );

    Ok(detail)
}
