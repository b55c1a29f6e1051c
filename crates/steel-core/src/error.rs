//! # Error Types
//!
//! Domain-specific error types for steel-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  steel-core errors (this file)                                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  steel-db errors (separate crate)                                      │
//! │  └── StoreError       - Snapshot store failures                        │
//! │                                                                         │
//! │  steel-client errors (separate crate)                                  │
//! │  └── ApiError         - Classified transport failures                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pure cart operations never fail: removing an absent item and setting
//! the quantity of an absent id are defined no-ops, so there is no cart
//! error type to model.

use thiserror::Error;

/// Input validation errors.
///
/// These errors occur when caller-supplied data doesn't meet requirements.
/// Used for early validation before a payload leaves the process.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. non-numeric phone characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "items".to_string(),
        };
        assert_eq!(err.to_string(), "items is required");

        let err = ValidationError::TooLong {
            field: "customer name".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "customer name must be at most 100 characters");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }
}
