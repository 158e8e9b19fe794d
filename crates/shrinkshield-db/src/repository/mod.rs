//! # Repository Module
//!
//! Database repository implementations for ShrinkShield.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.receipts().ingest(new_receipt, lines, items)               │
//! │       ▼                                                                 │
//! │  ReceiptRepository                                                     │
//! │  ├── ingest(&self, ..)          ← one transaction                      │
//! │  ├── get_detail(&self, id)                                             │
//! │  ├── list_recent(&self, limit)                                         │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ReceiptRepository`](receipt::ReceiptRepository) - Receipts, raw lines, product lines
//! - [`UserRepository`](user::UserRepository) - User registration and lookup

pub mod receipt;
pub mod user;
