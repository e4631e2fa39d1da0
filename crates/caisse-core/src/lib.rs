//! # caisse-core: Pure Business Logic for the Cash Session Engine
//!
//! This crate is the **heart** of the caisse reconciliation engine. It
//! contains all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Caisse Architecture                            │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                 Calling Layer (UI / HTTP API)                 │  │
//! │  │    open session ──► add revenue/expense ──► close ──► audit   │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │                    caisse-engine                              │  │
//! │  │    lifecycle state machine, revenue/expense ledgers           │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │               ★ caisse-core (THIS CRATE) ★                    │  │
//! │  │                                                               │  │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌────────┐ │  │
//! │  │   │  types  │ │  money  │ │ balance │ │ history │ │validate│ │  │
//! │  │   │ Session │ │ Amount  │ │ theo.   │ │ filters │ │ rules  │ │  │
//! │  │   │ Revenue │ │ (FCFA)  │ │ variance│ │ sorting │ │ checks │ │  │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └────────┘ │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │                    caisse-db (Database Layer)                 │  │
//! │  │             SQLite queries, migrations, repositories          │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CashSession, ManualRevenue, Expense, etc.)
//! - [`money`] - Amount type with integer arithmetic (no floating point!)
//! - [`balance`] - Theoretical/cash-only balance math and variance bands
//! - [`history`] - Pure filter/sort/index helpers for the audit views
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole FCFA (i64), never floats
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use caisse_core::money::Amount;
//! use caisse_core::balance::{classify_counted, Variance};
//!
//! // Create an amount from whole francs (never from floats!)
//! let theoretical = Amount::from_fcfa(6_800);
//! let counted = Amount::from_fcfa(6_300);
//!
//! // A 500 FCFA gap sits exactly on the tolerance boundary
//! assert_eq!(classify_counted(counted, theoretical), Variance::Minor);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod balance;
pub mod error;
pub mod history;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use caisse_core::Amount` instead of
// `use caisse_core::money::Amount`

pub use balance::{classify_counted, classify_variance, Variance, TOLERANCE_FCFA};
pub use error::ValidationError;
pub use money::Amount;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a revenue/expense description.
///
/// ## Business Reason
/// Descriptions are free text typed by cashiers ("Vente comptoir",
/// "Achat légumes"). A cap keeps audit exports and receipts readable.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Maximum quantity on a single manual revenue line.
///
/// ## Business Reason
/// Prevents accidental over-entry (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum length of free-form session/transaction notes.
pub const MAX_NOTES_LEN: usize = 500;

/// Upper bound for any single monetary input, in whole francs.
///
/// ## Business Reason
/// One billion FCFA is far beyond any plausible drawer movement; the cap
/// catches fat-fingered input and keeps quantity × unit-amount products
/// comfortably inside i64.
pub const MAX_AMOUNT_FCFA: i64 = 1_000_000_000;
