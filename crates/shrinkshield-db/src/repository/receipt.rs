//! # Receipt Repository
//!
//! Database operations for receipts, their raw OCR lines and their
//! structured product lines.
//!
//! ## Ingest Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   SINGLE TRANSACTION per upload                         │
//! │                                                                         │
//! │  1. INSERT INTO receipts        (one row)                              │
//! │  2. INSERT INTO receipt_lines   (one row per OCR line)                 │
//! │  3. INSERT INTO product_lines   (one row per enriched item)            │
//! │                                                                         │
//! │  COMMIT ← all rows or none                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A receipt is never visible without its lines, and a failed upload leaves
//! nothing behind.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use shrinkshield_core::{
    EnrichedLineItem, NewReceipt, ProductLine, RawLine, Receipt, ReceiptDetail,
};

/// Repository for receipt database operations.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
}

impl ReceiptRepository {
    /// Creates a new ReceiptRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceiptRepository { pool }
    }

    /// Persists a receipt with its raw lines and product lines atomically.
    ///
    /// ## Arguments
    /// * `new_receipt` - Upload metadata
    /// * `lines` - OCR text lines, stored in order
    /// * `items` - Enriched line items, stored in order
    ///
    /// ## Returns
    /// The stored receipt with generated ids.
    pub async fn ingest(
        &self,
        new_receipt: NewReceipt,
        lines: &[String],
        items: &[EnrichedLineItem],
    ) -> DbResult<ReceiptDetail> {
        let receipt = Receipt {
            id: Uuid::new_v4().to_string(),
            user_id: new_receipt.user_id,
            filename: new_receipt.filename,
            content_type: new_receipt.content_type,
            byte_size: new_receipt.byte_size,
            ocr_engine: new_receipt.ocr_engine,
            created_at: Utc::now(),
        };

        debug!(
            id = %receipt.id,
            lines = lines.len(),
            items = items.len(),
            "Ingesting receipt"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO receipts (
                id, user_id, filename, content_type,
                byte_size, ocr_engine, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&receipt.id)
        .bind(&receipt.user_id)
        .bind(&receipt.filename)
        .bind(&receipt.content_type)
        .bind(receipt.byte_size)
        .bind(&receipt.ocr_engine)
        .bind(receipt.created_at)
        .execute(&mut *tx)
        .await?;

        let mut raw_lines = Vec::with_capacity(lines.len());
        for (line_no, text) in lines.iter().enumerate() {
            let raw = RawLine {
                id: Uuid::new_v4().to_string(),
                receipt_id: receipt.id.clone(),
                line_no: line_no as i64,
                text: text.clone(),
            };

            sqlx::query(
                r#"
                INSERT INTO receipt_lines (id, receipt_id, line_no, text)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(&raw.id)
            .bind(&raw.receipt_id)
            .bind(raw.line_no)
            .bind(&raw.text)
            .execute(&mut *tx)
            .await?;

            raw_lines.push(raw);
        }

        let mut product_lines = Vec::with_capacity(items.len());
        for (line_no, enriched) in items.iter().enumerate() {
            let product = ProductLine {
                id: Uuid::new_v4().to_string(),
                receipt_id: receipt.id.clone(),
                line_no: line_no as i64,
                name: enriched.item.name.clone(),
                raw_size: enriched.item.size.clone(),
                normalized_size_ml: enriched.normalized_size_ml,
                price: enriched.item.price,
                unit_price_per_ml: enriched.unit_price_per_ml,
            };

            sqlx::query(
                r#"
                INSERT INTO product_lines (
                    id, receipt_id, line_no, name, raw_size,
                    normalized_size_ml, price, unit_price_per_ml
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(&product.id)
            .bind(&product.receipt_id)
            .bind(product.line_no)
            .bind(&product.name)
            .bind(&product.raw_size)
            .bind(product.normalized_size_ml)
            .bind(product.price)
            .bind(product.unit_price_per_ml)
            .execute(&mut *tx)
            .await?;

            product_lines.push(product);
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            id = %receipt.id,
            raw_lines = raw_lines.len(),
            product_lines = product_lines.len(),
            "Receipt stored"
        );

        Ok(ReceiptDetail {
            receipt,
            raw_lines,
            product_lines,
        })
    }

    /// Gets a receipt by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Receipt>> {
        let receipt = sqlx::query_as::<_, Receipt>(
            r#"
            SELECT id, user_id, filename, content_type,
                   byte_size, ocr_engine, created_at
            FROM receipts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(receipt)
    }

    /// Gets a receipt with its raw and product lines.
    pub async fn get_detail(&self, id: &str) -> DbResult<Option<ReceiptDetail>> {
        let Some(receipt) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let raw_lines = self.raw_lines(id).await?;
        let product_lines = self.product_lines(id).await?;

        Ok(Some(ReceiptDetail {
            receipt,
            raw_lines,
            product_lines,
        }))
    }

    /// Lists the most recent receipts, newest first.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Receipt>> {
        debug!(limit = %limit, "Listing receipts");

        let receipts = sqlx::query_as::<_, Receipt>(
            r#"
            SELECT id, user_id, filename, content_type,
                   byte_size, ocr_engine, created_at
            FROM receipts
            ORDER BY created_at DESC, id
            LIMIT ?1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(receipts)
    }

    /// Lists a user's receipts, newest first.
    pub async fn list_for_user(&self, user_id: &str, limit: u32) -> DbResult<Vec<Receipt>> {
        let receipts = sqlx::query_as::<_, Receipt>(
            r#"
            SELECT id, user_id, filename, content_type,
                   byte_size, ocr_engine, created_at
            FROM receipts
            WHERE user_id = ?1
            ORDER BY created_at DESC, id
            LIMIT ?2
            "#,
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(receipts)
    }

    /// Gets the raw OCR lines for a receipt, in OCR order.
    pub async fn raw_lines(&self, receipt_id: &str) -> DbResult<Vec<RawLine>> {
        let lines = sqlx::query_as::<_, RawLine>(
            r#"
            SELECT id, receipt_id, line_no, text
            FROM receipt_lines
            WHERE receipt_id = ?1
            ORDER BY line_no
            "#,
        )
        .bind(receipt_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Gets the product lines for a receipt, in receipt order.
    pub async fn product_lines(&self, receipt_id: &str) -> DbResult<Vec<ProductLine>> {
        let lines = sqlx::query_as::<_, ProductLine>(
            r#"
            SELECT id, receipt_id, line_no, name, raw_size,
                   normalized_size_ml, price, unit_price_per_ml
            FROM product_lines
            WHERE receipt_id = ?1
            ORDER BY line_no
            "#,
        )
        .bind(receipt_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Deletes a receipt. Its lines go with it (ON DELETE CASCADE).
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM receipts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Receipt", id));
        }

        info!(id = %id, "Receipt deleted");
        Ok(())
    }

    /// Counts stored receipts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM receipts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use shrinkshield_core::LineItem;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_receipt(user_id: Option<String>) -> NewReceipt {
        NewReceipt {
            user_id,
            filename: "receipt.txt".to_string(),
            content_type: "text/plain".to_string(),
            byte_size: 64,
            ocr_engine: "stub".to_string(),
        }
    }

    fn sample_items() -> Vec<EnrichedLineItem> {
        vec![
            LineItem::new("Distilled Water", Some("1 L".to_string()), Some(1.29)).enrich(),
            LineItem::new("Eggs", Some("12 ct".to_string()), Some(3.49)).enrich(),
            LineItem::new("Bananas", None, Some(0.99)).enrich(),
        ]
    }

    #[tokio::test]
    async fn test_ingest_and_read_back() {
        let db = test_db().await;
        let repo = db.receipts();
        let lines = vec!["Distilled Water 1 L 1.29".to_string(), "TOTAL".to_string()];

        let stored = repo
            .ingest(new_receipt(None), &lines, &sample_items())
            .await
            .unwrap();

        assert_eq!(stored.raw_lines.len(), 2);
        assert_eq!(stored.product_lines.len(), 3);

        let detail = repo.get_detail(&stored.receipt.id).await.unwrap().unwrap();
        assert_eq!(detail.receipt.id, stored.receipt.id);
        assert_eq!(detail.receipt.filename, "receipt.txt");
        assert_eq!(detail.raw_lines[1].text, "TOTAL");
        assert_eq!(detail.raw_lines[1].line_no, 1);

        let water = &detail.product_lines[0];
        assert_eq!(water.raw_size.as_deref(), Some("1 L"));
        assert_eq!(water.normalized_size_ml, Some(1000.0));
        assert_eq!(water.unit_price_per_ml, Some(1.29 / 1000.0));

        let eggs = &detail.product_lines[1];
        assert_eq!(eggs.raw_size.as_deref(), Some("12 ct"));
        assert_eq!(eggs.normalized_size_ml, None);
        assert_eq!(eggs.unit_price_per_ml, None);
        assert_eq!(eggs.price, Some(3.49));
    }

    #[tokio::test]
    async fn test_ingest_with_no_items() {
        let db = test_db().await;
        let lines = vec!["[placeholder OCR] bytes=64 mimetype=image/png".to_string()];

        let stored = db
            .receipts()
            .ingest(new_receipt(None), &lines, &[])
            .await
            .unwrap();

        assert!(stored.product_lines.is_empty());
        assert_eq!(db.receipts().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ingest_rolls_back_on_failure() {
        let db = test_db().await;
        let mut items = sample_items();
        // Fails the CHECK on the last product line, after receipt and raw lines were written
        items.push(EnrichedLineItem {
            item: LineItem::new("Broken", Some("-1 ml".to_string()), None),
            normalized_size_ml: Some(-1.0),
            unit_price_per_ml: None,
        });

        let err = db
            .receipts()
            .ingest(new_receipt(None), &["a".to_string(), "b".to_string()], &items)
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::CheckViolation { .. }));
        assert_eq!(db.receipts().count().await.unwrap(), 0);

        let raw: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM receipt_lines")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product_lines")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(raw, 0);
        assert_eq!(products, 0);
    }

    #[tokio::test]
    async fn test_ingest_unknown_user() {
        let db = test_db().await;

        let err = db
            .receipts()
            .ingest(
                new_receipt(Some("no-such-user".to_string())),
                &["line".to_string()],
                &sample_items(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(db.receipts().count().await.unwrap(), 0);

        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product_lines")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[tokio::test]
    async fn test_get_missing_receipt() {
        let db = test_db().await;

        assert!(db.receipts().get_detail("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_recent_respects_limit() {
        let db = test_db().await;
        let repo = db.receipts();

        for _ in 0..3 {
            repo.ingest(new_receipt(None), &[], &[]).await.unwrap();
        }

        assert_eq!(repo.list_recent(2).await.unwrap().len(), 2);
        assert_eq!(repo.list_recent(10).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_list_for_user() {
        let db = test_db().await;
        let user = db.users().create("shopper@example.com").await.unwrap();

        db.receipts()
            .ingest(new_receipt(Some(user.id.clone())), &[], &[])
            .await
            .unwrap();
        db.receipts().ingest(new_receipt(None), &[], &[]).await.unwrap();

        let mine = db.receipts().list_for_user(&user.id, 10).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].user_id.as_deref(), Some(user.id.as_str()));
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let db = test_db().await;
        let repo = db.receipts();
        let stored = repo
            .ingest(new_receipt(None), &["a".to_string()], &sample_items())
            .await
            .unwrap();

        repo.delete(&stored.receipt.id).await.unwrap();

        assert!(repo.get_by_id(&stored.receipt.id).await.unwrap().is_none());
        assert!(repo.product_lines(&stored.receipt.id).await.unwrap().is_empty());
        assert!(repo.raw_lines(&stored.receipt.id).await.unwrap().is_empty());

        let err = repo.delete(&stored.receipt.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
