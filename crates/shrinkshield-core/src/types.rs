//! # Domain Types
//!
//! Core domain types used throughout ShrinkShield.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Receipt      │   │    RawLine      │   │  ProductLine    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  receipt_id(FK) │   │  receipt_id(FK) │──►    │
//! │  │  filename       │   │  line_no        │   │  name, raw_size │       │
//! │  │  content_type   │   │  text           │   │  normalized ml  │       │
//! │  │  ocr_engine     │   └─────────────────┘   │  unit price     │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐                            │
//! │  │    LineItem     │──►│ EnrichedLineItem │  (transient, per upload)   │
//! │  │  name/size/price│   │ + ml + unit price│                            │
//! │  └─────────────────┘   └──────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persisted entities use UUID v4 strings as ids and UTC timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::pricing::unit_price_per_ml;
use crate::size::normalize_size;

// =============================================================================
// Line Items (transient)
// =============================================================================

/// One product entry read off a receipt by OCR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product name as printed.
    pub name: String,

    /// Raw package size text, e.g. "500 mL".
    pub size: Option<String>,

    /// Shelf price in currency units.
    pub price: Option<f64>,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(name: impl Into<String>, size: Option<String>, price: Option<f64>) -> Self {
        LineItem {
            name: name.into(),
            size,
            price,
        }
    }

    /// Normalizes the size and derives the unit price.
    ///
    /// Each item is enriched on its own; an unparseable size only clears
    /// this item's derived fields.
    pub fn enrich(self) -> EnrichedLineItem {
        let normalized = normalize_size(self.size.as_deref());
        let unit_price = unit_price_per_ml(normalized, self.price);

        EnrichedLineItem {
            normalized_size_ml: normalized.map(|ml| ml.value()),
            unit_price_per_ml: unit_price,
            item: self,
        }
    }
}

/// A line item with its normalized size and derived unit price attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EnrichedLineItem {
    #[serde(flatten)]
    pub item: LineItem,

    /// Size in millilitres, absent when the size was missing or unreadable.
    pub normalized_size_ml: Option<f64>,

    /// Price per millilitre, absent without a positive size and a price.
    pub unit_price_per_ml: Option<f64>,
}

// =============================================================================
// Receipt
// =============================================================================

/// An uploaded receipt document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Receipt {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Uploading user, when known.
    pub user_id: Option<String>,

    /// Original filename supplied by the client.
    pub filename: String,

    /// MIME type of the upload.
    pub content_type: String,

    /// Size of the uploaded file in bytes.
    pub byte_size: i64,

    /// Name of the OCR engine that produced the lines.
    pub ocr_engine: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a receipt row. Id and timestamp are assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReceipt {
    pub user_id: Option<String>,
    pub filename: String,
    pub content_type: String,
    pub byte_size: i64,
    pub ocr_engine: String,
}

// =============================================================================
// Raw Line
// =============================================================================

/// A line of OCR text exactly as extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct RawLine {
    pub id: String,
    pub receipt_id: String,
    /// Zero-based position in the OCR output.
    pub line_no: i64,
    pub text: String,
}

// =============================================================================
// Product Line
// =============================================================================

/// A structured product entry stored for a receipt.
///
/// Stores the raw size next to the derived values so normalization can be
/// audited or re-run later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ProductLine {
    pub id: String,
    pub receipt_id: String,
    /// Zero-based position among the receipt's product lines.
    pub line_no: i64,
    pub name: String,
    pub raw_size: Option<String>,
    pub normalized_size_ml: Option<f64>,
    pub price: Option<f64>,
    pub unit_price_per_ml: Option<f64>,
}

/// A receipt together with everything stored for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptDetail {
    pub receipt: Receipt,
    pub raw_lines: Vec<RawLine>,
    pub product_lines: Vec<ProductLine>,
}

// =============================================================================
// User
// =============================================================================

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}
