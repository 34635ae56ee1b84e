//! # Error Types
//!
//! Domain-specific error types for fairshare-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fairshare-core errors (this file)                                     │
//! │  ├── CoreError        - Index misuse against the current bill          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  fairshare-client errors (separate crate)                              │
//! │  └── ClientError      - Upload / lookup / config failures              │
//! │                                                                         │
//! │  receipt-api errors (app)                                              │
//! │  └── ApiError         - What HTTP callers see (JSON body)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Index Errors
//! `ItemOutOfRange` and `ParticipantOutOfRange` are contract violations: the
//! bill view only offers cells that exist. They are still returned as values
//! so a bad caller gets a typed error instead of a silently ignored click.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core engine errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Line item index does not exist on the loaded receipt.
    #[error("Line item {index} out of range (receipt has {len} items)")]
    ItemOutOfRange { index: usize, len: usize },

    /// Participant position does not exist in the current roster.
    ///
    /// ## When This Occurs
    /// - Toggling a column after its participant was removed
    /// - Removing the same position twice from a stale view
    #[error("Participant position {position} out of range (roster has {len} participants)")]
    ParticipantOutOfRange { position: usize, len: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., malformed amount, bad receipt id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ParticipantOutOfRange {
            position: 4,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "Participant position 4 out of range (roster has 2 participants)"
        );

        let err = CoreError::ItemOutOfRange { index: 9, len: 3 };
        assert_eq!(
            err.to_string(),
            "Line item 9 out of range (receipt has 3 items)"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(validation_err.to_string(), "name is required");

        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
