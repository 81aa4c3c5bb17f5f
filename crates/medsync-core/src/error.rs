//! # Error Types
//!
//! Domain-specific error types for medsync-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (record id, field name)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain-level errors.
///
/// These represent violations of domain rules, independent of any transport
/// or storage concern. They should be caught and translated to user-facing
/// messages by the layer that owns the presentation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record with the given identifier is not present in the collection
    /// being operated on.
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. Used for early
/// validation before a record is submitted to the remote endpoint.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Minimum stock level exceeds the maximum.
    #[error("minimum stock {min} exceeds maximum stock {max}")]
    MinAboveMax { min: i64, max: i64 },

    /// Invalid format (e.g., malformed email address).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

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
        let err = CoreError::RecordNotFound("INV042".to_string());
        assert_eq!(err.to_string(), "Record not found: INV042");

        let err = ValidationError::MinAboveMax { min: 500, max: 100 };
        assert_eq!(err.to_string(), "minimum stock 500 exceeds maximum stock 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
