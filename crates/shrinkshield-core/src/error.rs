//! # Error Types
//!
//! Domain-specific error types for shrinkshield-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shrinkshield-core errors (this file)                                  │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shrinkshield-db errors (separate crate)                               │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What HTTP clients see (JSON)                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Client                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An unparseable package size is NOT an error anywhere in this hierarchy:
//! it is an absent value (`None`).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Receipt cannot be found.
    #[error("Receipt not found: {0}")]
    ReceiptNotFound(String),

    /// User cannot be found.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// OCR produced nothing usable from the upload.
    ///
    /// ## When This Occurs
    /// - The engine returned zero lines
    /// - A text upload was not valid UTF-8
    #[error("OCR failed: {reason}")]
    OcrFailed { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any OCR or database work happens.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Upload exceeds the configured byte limit.
    #[error("{field} must be at most {max} bytes, got {actual}")]
    TooLarge {
        field: String,
        max: usize,
        actual: usize,
    },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::OcrFailed {
            reason: "no lines".to_string(),
        };
        assert_eq!(err.to_string(), "OCR failed: no lines");

        let err = CoreError::ReceiptNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Receipt not found: abc");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "file".to_string(),
        };
        assert_eq!(err.to_string(), "file is required");

        let err = ValidationError::TooLarge {
            field: "file".to_string(),
            max: 10,
            actual: 11,
        };
        assert_eq!(err.to_string(), "file must be at most 10 bytes, got 11");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "file".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
