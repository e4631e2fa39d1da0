//! # Validation Module
//!
//! Input validation for the cash session engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Calling layer (UI / API)                                  │
//! │  ├── Basic format checks, immediate user feedback                   │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - business rule validation                    │
//! │  ├── runs before any persistence, so a rejected request             │
//! │  └── never partially persists                                       │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  ├── NOT NULL / CHECK constraints                                   │
//! │  ├── UNIQUE (restaurant_id, session_date)                           │
//! │  └── Foreign key constraints                                        │
//! │                                                                     │
//! │  Defense in depth: multiple layers catch different errors           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::{MAX_AMOUNT_FCFA, MAX_DESCRIPTION_LEN, MAX_LINE_QUANTITY, MAX_NOTES_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a revenue/expense description.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Returns
/// The trimmed description.
///
/// ## Example
/// ```rust
/// use caisse_core::validation::validate_description;
///
/// assert_eq!(validate_description("  Vente comptoir ").unwrap(), "Vente comptoir");
/// assert!(validate_description("   ").is_err());
/// ```
pub fn validate_description(description: &str) -> ValidationResult<String> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(description.to_string())
}

/// Validates optional free-form notes.
///
/// ## Rules
/// - Empty/whitespace-only notes collapse to None
/// - At most 500 characters
pub fn validate_notes(notes: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(notes) = notes else {
        return Ok(None);
    };

    let notes = notes.trim();
    if notes.is_empty() {
        return Ok(None);
    }

    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LEN,
        });
    }

    Ok(Some(notes.to_string()))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a revenue line quantity.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a strictly positive amount (unit amount, expense amount).
///
/// ## Example
/// ```rust
/// use caisse_core::validation::validate_positive_amount;
///
/// assert!(validate_positive_amount("unit_amount", 1_500).is_ok());
/// assert!(validate_positive_amount("unit_amount", 0).is_err());
/// assert!(validate_positive_amount("amount", -100).is_err());
/// ```
pub fn validate_positive_amount(field: &str, fcfa: i64) -> ValidationResult<()> {
    if fcfa <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if fcfa > MAX_AMOUNT_FCFA {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: MAX_AMOUNT_FCFA,
        });
    }

    Ok(())
}

/// Validates a drawer balance (opening or counted closing).
///
/// ## Rules
/// - Must be zero or greater (an empty drawer is legal)
pub fn validate_balance(field: &str, fcfa: i64) -> ValidationResult<()> {
    if fcfa < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    if fcfa > MAX_AMOUNT_FCFA {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_AMOUNT_FCFA,
        });
    }

    Ok(())
}

/// Validates the quantity added by a stock-purchase expense.
pub fn validate_quantity_added(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity_added".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates a session date against "today".
///
/// ## Rules
/// - Any date up to and including today (backdated/historical entry is
///   supported); future dates are rejected.
pub fn validate_session_date(session_date: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if session_date > today {
        return Err(ValidationError::DateInFuture {
            field: "session_date".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use caisse_core::validation::validate_uuid;
///
/// assert!(validate_uuid("session_id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("session_id", "not-a-uuid").is_err());
/// ```
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_description() {
        assert_eq!(
            validate_description("Vente comptoir").unwrap(),
            "Vente comptoir"
        );
        assert_eq!(validate_description("  Achat légumes  ").unwrap(), "Achat légumes");

        assert!(validate_description("").is_err());
        assert!(validate_description("   ").is_err());
        assert!(validate_description(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_notes() {
        assert_eq!(validate_notes(None).unwrap(), None);
        assert_eq!(validate_notes(Some("  ")).unwrap(), None);
        assert_eq!(
            validate_notes(Some(" fond de caisse ")).unwrap(),
            Some("fond de caisse".to_string())
        );
        assert!(validate_notes(Some(&"x".repeat(501))).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1_000).is_err());
    }

    #[test]
    fn test_validate_positive_amount() {
        assert!(validate_positive_amount("amount", 1_200).is_ok());
        assert!(validate_positive_amount("amount", 0).is_err());
        assert!(validate_positive_amount("amount", -1).is_err());
        assert!(validate_positive_amount("amount", MAX_AMOUNT_FCFA + 1).is_err());
    }

    #[test]
    fn test_validate_balance() {
        assert!(validate_balance("opening_balance", 0).is_ok());
        assert!(validate_balance("opening_balance", 5_000).is_ok());
        assert!(validate_balance("opening_balance", -1).is_err());
    }

    #[test]
    fn test_validate_session_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();

        assert!(validate_session_date(today, today).is_ok());
        assert!(validate_session_date(yesterday, today).is_ok());
        assert!(validate_session_date(tomorrow, today).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("id", "").is_err());
        assert!(validate_uuid("id", "not-a-uuid").is_err());
    }
}
