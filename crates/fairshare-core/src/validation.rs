//! # Validation Module
//!
//! Input validation for values that cross into the engine from a user or
//! from a URL.
//!
//! ## Usage
//! ```rust
//! use fairshare_core::validation::{validate_participant_name, validate_receipt_id};
//!
//! assert_eq!(validate_participant_name("  Dana ").unwrap(), "Dana");
//! assert!(validate_receipt_id("8c6f1f0e-2b7d-4f7e-9a51-0f3b2d4c5e6a").is_ok());
//! ```

use crate::error::ValidationError;
use crate::MAX_RECEIPT_ID_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a participant display name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming surrounding whitespace
/// - No length limit; long names are the view's problem to truncate
/// - Duplicates are allowed (two people may share a name)
pub fn validate_participant_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(name.to_string())
}

/// Validates a receipt identifier before it is placed in a request path.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 64 characters
/// - Only letters, digits, hyphens and underscores
///
/// ## Returns
/// The trimmed identifier.
///
/// ```rust
/// use fairshare_core::validation::validate_receipt_id;
///
/// assert!(validate_receipt_id("../etc").is_err());
/// assert!(validate_receipt_id("").is_err());
/// ```
pub fn validate_receipt_id(id: &str) -> ValidationResult<String> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "receipt id".to_string(),
        });
    }

    if id.len() > MAX_RECEIPT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "receipt id".to_string(),
            max: MAX_RECEIPT_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "receipt id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(id.to_string())
}
