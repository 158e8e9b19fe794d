//! # Validation Module
//!
//! Input validation for uploads and user registration.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extraction (axum)                                       │
//! │  ├── Multipart / JSON shape                                            │
//! │  └── Body size limit                                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Non-empty file, byte limit                                        │
//! │  ├── Accepted content types                                            │
//! │  └── Email format                                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE constraints                                     │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{ACCEPTED_CONTENT_TYPES, MAX_RECEIPT_LIST_LIMIT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest filename we store.
pub const MAX_FILENAME_LEN: usize = 255;

/// Longest email we store.
pub const MAX_EMAIL_LEN: usize = 255;

// =============================================================================
// Upload Validators
// =============================================================================

/// Validates an uploaded receipt file before OCR runs.
///
/// ## Rules
/// - File must not be empty
/// - File must not exceed `max_bytes`
/// - Content type must be an accepted receipt format
/// - Filename must not be blank or longer than 255 characters
///
/// ## Example
/// ```rust
/// use shrinkshield_core::validation::validate_upload;
///
/// assert!(validate_upload("r.png", "image/png", 1024, 4096).is_ok());
/// assert!(validate_upload("r.png", "image/png", 0, 4096).is_err());
/// assert!(validate_upload("r.gif", "image/gif", 10, 4096).is_err());
/// ```
pub fn validate_upload(
    filename: &str,
    content_type: &str,
    byte_len: usize,
    max_bytes: usize,
) -> ValidationResult<()> {
    if byte_len == 0 {
        return Err(ValidationError::Required {
            field: "file".to_string(),
        });
    }

    if byte_len > max_bytes {
        return Err(ValidationError::TooLarge {
            field: "file".to_string(),
            max: max_bytes,
            actual: byte_len,
        });
    }

    validate_content_type(content_type)?;

    let filename = filename.trim();
    if filename.is_empty() {
        return Err(ValidationError::Required {
            field: "filename".to_string(),
        });
    }
    if filename.chars().count() > MAX_FILENAME_LEN {
        return Err(ValidationError::TooLong {
            field: "filename".to_string(),
            max: MAX_FILENAME_LEN,
        });
    }

    Ok(())
}

/// Validates that a content type is an accepted receipt format.
///
/// Parameters such as `; charset=utf-8` are ignored.
pub fn validate_content_type(content_type: &str) -> ValidationResult<()> {
    let essence = essence(content_type);

    if ACCEPTED_CONTENT_TYPES.contains(&essence.as_str()) {
        Ok(())
    } else {
        Err(ValidationError::NotAllowed {
            field: "content_type".to_string(),
            allowed: ACCEPTED_CONTENT_TYPES.iter().map(|s| s.to_string()).collect(),
        })
    }
}

/// Returns the lowercase `type/subtype` part of a MIME string.
pub fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

// =============================================================================
// User Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty, at most 255 characters
/// - Exactly one `@` with a non-empty local part
/// - Domain must contain a `.` that is neither first nor last
///
/// ## Example
/// ```rust
/// use shrinkshield_core::validation::validate_email;
///
/// assert!(validate_email("shopper@example.com").is_ok());
/// assert!(validate_email("no-at-sign").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let mut parts = email.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().ok_or_else(|| invalid("missing '@'"))?;
    if parts.next().is_some() {
        return Err(invalid("more than one '@'"));
    }
    if local.is_empty() {
        return Err(invalid("empty local part"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid("contains whitespace"));
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(())
}

// =============================================================================
// Query Validators
// =============================================================================

/// Validates a list page size.
pub fn validate_list_limit(limit: u32) -> ValidationResult<()> {
    if limit == 0 || limit > MAX_RECEIPT_LIST_LIMIT {
        return Err(ValidationError::OutOfRange {
            field: "limit".to_string(),
            min: 1,
            max: MAX_RECEIPT_LIST_LIMIT as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_upload() {
        assert!(validate_upload("receipt.pdf", "application/pdf", 100, 1000).is_ok());
        assert!(validate_upload("receipt.txt", "text/plain; charset=utf-8", 100, 1000).is_ok());
        assert!(validate_upload("receipt.JPG", "IMAGE/JPEG", 100, 1000).is_ok());
    }

    #[test]
    fn test_validate_upload_empty_file() {
        let err = validate_upload("r.png", "image/png", 0, 1000).unwrap_err();
        assert!(matches!(err, ValidationError::Required { ref field } if field == "file"));
    }

    #[test]
    fn test_validate_upload_too_large() {
        let err = validate_upload("r.png", "image/png", 1001, 1000).unwrap_err();
        assert!(matches!(err, ValidationError::TooLarge { actual: 1001, .. }));
    }

    #[test]
    fn test_validate_upload_content_type() {
        let err = validate_upload("r.gif", "image/gif", 10, 1000).unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn test_validate_upload_filename() {
        assert!(validate_upload("  ", "image/png", 10, 1000).is_err());
        let long = "a".repeat(300);
        assert!(validate_upload(&long, "image/png", 10, 1000).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("@b.co").is_err());
        assert!(validate_email("a@@b.co").is_err());
        assert!(validate_email("a b@c.co").is_err());
        assert!(validate_email(&format!("{}@x.io", "a".repeat(260))).is_err());
    }

    #[test]
    fn test_validate_list_limit() {
        assert!(validate_list_limit(1).is_ok());
        assert!(validate_list_limit(100).is_ok());
        assert!(validate_list_limit(0).is_err());
        assert!(validate_list_limit(101).is_err());
    }

    #[test]
    fn test_essence() {
        assert_eq!(essence("Text/Plain; charset=UTF-8"), "text/plain");
    }
}
