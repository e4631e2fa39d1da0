//! # Engine Error Types
//!
//! The error taxonomy callers of the engine see.
//!
//! ## Propagation Policy
//! Every error is a typed variant surfaced to the immediate caller; the
//! engine performs no silent swallowing and no automatic retry. Retrying a
//! money-affecting operation blindly could double-count a transaction, so
//! retry decisions belong to a human.

use chrono::NaiveDate;
use thiserror::Error;

use caisse_core::ValidationError;
use caisse_db::DbError;

/// Errors surfaced by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or out-of-range input. Never partially persists; the
    /// caller is expected to re-prompt.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A session already exists for this restaurant and date.
    ///
    /// ## When This Occurs
    /// The UNIQUE (restaurant_id, session_date) index fired — either a
    /// plain duplicate open, or the losing side of a concurrent-open race.
    #[error("A session already exists for restaurant {restaurant_id} on {session_date}")]
    DuplicateSession {
        restaurant_id: String,
        session_date: NaiveDate,
    },

    /// Attempted to append a revenue/expense to a closed session.
    #[error("Session {0} is closed; no further entries can be recorded")]
    SessionClosed(String),

    /// Attempted to close a session twice. Closing is terminal.
    #[error("Session {0} is already closed")]
    SessionAlreadyClosed(String),

    /// Referenced session or product does not exist — or belongs to a
    /// different restaurant, which must be indistinguishable from missing.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The stock mutation of a stock-purchase expense failed after
    /// validation. The whole transaction was rolled back; nothing was
    /// persisted.
    #[error("Stock update failed for product {product_id}: {reason}")]
    StockUpdate { product_id: String, reason: String },

    /// Underlying database failure.
    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

impl EngineError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        EngineError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::DuplicateSession {
            restaurant_id: "resto-1".to_string(),
            session_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "A session already exists for restaurant resto-1 on 2024-03-01"
        );

        let err = EngineError::SessionClosed("abc".to_string());
        assert_eq!(
            err.to_string(),
            "Session abc is closed; no further entries can be recorded"
        );
    }

    #[test]
    fn test_validation_converts() {
        let err: EngineError = ValidationError::Required {
            field: "description".to_string(),
        }
        .into();
        assert!(matches!(err, EngineError::Validation(_)));
    }
}
