//! # caisse-engine: Cash Session Reconciliation Engine
//!
//! The service layer of the caisse system: it drives the session
//! lifecycle and the manual ledgers on top of `caisse-core` (pure rules)
//! and `caisse-db` (SQLite persistence).
//!
//! ## Quick Start
//! ```rust,no_run
//! use caisse_db::{Database, DbConfig};
//! use caisse_engine::{CaisseEngine, OpenSessionInput};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(DbConfig::in_memory()).await?;
//!     let engine = CaisseEngine::new(db);
//!
//!     let session = engine
//!         .open_session(
//!             "resto-1",
//!             OpenSessionInput {
//!                 session_date: None,
//!                 opening_balance_fcfa: 5_000,
//!                 notes: None,
//!             },
//!         )
//!         .await?;
//!
//!     println!("opened session {}", session.id);
//!     Ok(())
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use engine::{CaisseEngine, ExpenseInput, OpenSessionInput, RevenueInput, SessionDetail};
pub use error::{EngineError, EngineResult};

// Domain types callers need alongside the engine API
pub use caisse_core::{
    CashSession, Expense, ExpenseCategory, ManualRevenue, PaymentMethod, RevenueType,
    SessionStatus, SessionSummary, Variance, TOLERANCE_FCFA,
};
