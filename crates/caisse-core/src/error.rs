//! # Error Types
//!
//! Domain-specific error types for caisse-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  caisse-core errors (this file)                                     │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  caisse-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  caisse-engine errors (separate crate)                              │
//! │  └── EngineError      - What callers of the engine see              │
//! │                                                                     │
//! │  Flow: ValidationError → EngineError → caller                       │
//! │        DbError         → EngineError → caller                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, ID, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any persistence runs, so a rejected
/// request never partially persists.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., invalid UUID, unparsable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Session dates can be backdated but never post-dated.
    #[error("{field} cannot be in the future")]
    DateInFuture { field: String },

    /// A conditionally-required field is missing (e.g., product for a
    /// stock-purchase expense).
    #[error("{field} is required when {condition}")]
    RequiredWhen { field: String, condition: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "description".to_string(),
        };
        assert_eq!(err.to_string(), "description is required");

        let err = ValidationError::RequiredWhen {
            field: "product_id".to_string(),
            condition: "category is stock_purchase".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "product_id is required when category is stock_purchase"
        );

        let err = ValidationError::MustBePositive {
            field: "unit_amount".to_string(),
        };
        assert_eq!(err.to_string(), "unit_amount must be positive");
    }
}
