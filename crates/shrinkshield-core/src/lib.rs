//! # shrinkshield-core: Pure Business Logic for ShrinkShield
//!
//! This crate contains the receipt-processing logic as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ShrinkShield Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                              │   │
//! │  │    POST /receipts ──► OCR ──► enrich ──► persist               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ shrinkshield-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   size    │  │  pricing  │  │   line    │  │ validation│  │   │
//! │  │   │ "1 L" →   │  │ price/mL  │  │ OCR text →│  │  uploads  │  │   │
//! │  │   │  1000 mL  │  │           │  │ LineItem  │  │  emails   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 shrinkshield-db (Database Layer)                │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`size`] - Package-size normalization to millilitres
//! - [`pricing`] - Unit price (per mL) derivation
//! - [`line`] - OCR text line → line item parsing
//! - [`types`] - Domain types (Receipt, ProductLine, etc.)
//! - [`validation`] - Upload and user input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shrinkshield_core::LineItem;
//!
//! let item = LineItem::new("Distilled Water", Some("1 L".to_string()), Some(1.29));
//! let enriched = item.enrich();
//!
//! assert_eq!(enriched.normalized_size_ml, Some(1000.0));
//! assert_eq!(enriched.unit_price_per_ml, Some(1.29 / 1000.0));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod line;
pub mod pricing;
pub mod size;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use pricing::unit_price_per_ml;
pub use size::{normalize_size, Millilitres, VolumeUnit};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Content types accepted for receipt uploads.
///
/// `text/plain` lets clients submit already-transcribed receipts.
pub const ACCEPTED_CONTENT_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "application/pdf",
    "text/plain",
];

/// Default upload limit (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default page size for receipt listings.
pub const DEFAULT_RECEIPT_LIST_LIMIT: u32 = 20;

/// Largest page size a client may request.
pub const MAX_RECEIPT_LIST_LIMIT: u32 = 100;
