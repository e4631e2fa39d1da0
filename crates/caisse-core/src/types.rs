//! # Domain Types
//!
//! Core domain types for the cash session engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐      │
//! │  │  CashSession   │   │ ManualRevenue  │   │    Expense     │      │
//! │  │  ────────────  │   │  ────────────  │   │  ────────────  │      │
//! │  │  id (UUID)     │◄──│  session_id    │   │  session_id    │──┐   │
//! │  │  restaurant_id │   │  description   │   │  description   │  │   │
//! │  │  session_date  │   │  qty × unit    │   │  amount        │  │   │
//! │  │  status        │   │  payment       │   │  category      │  │   │
//! │  │  balances      │   │  revenue_type  │   │  payment       │  │   │
//! │  └────────────────┘   └────────────────┘   └───────┬────────┘  │   │
//! │          ▲                                         │           │   │
//! │          └─────────────────────────────────────────┼───────────┘   │
//! │                                                    ▼               │
//! │  ┌────────────────┐                        ┌────────────────┐      │
//! │  │ SessionSummary │                        │    Product     │      │
//! │  │  (audit view)  │                        │ stock_quantity │      │
//! │  └────────────────┘                        └────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has a UUID v4 `id` used for database relations. The
//! business key of a session is `(restaurant_id, session_date)` — at most
//! one session may exist per restaurant per calendar day.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::balance::{classify_variance, Variance};
use crate::money::Amount;

// =============================================================================
// Session Status
// =============================================================================

/// The lifecycle state of a cash session.
///
/// Only two states exist: a session is appendable while `Open` and frozen
/// forever once `Closed`. There is no reopen or void transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Session accepts revenue/expense entries.
    Open,
    /// Session was reconciled and frozen (terminal).
    Closed,
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Open
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a revenue or expense was settled.
///
/// Modeled as a closed enum so an invalid method is a compile-time
/// impossibility, not a runtime string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash in the drawer.
    Cash,
    /// Airtel Money mobile payment.
    AirtelMoney,
    /// Moov Money mobile payment.
    MoovMoney,
}

impl PaymentMethod {
    /// Whether this method moves physical drawer cash.
    #[inline]
    pub const fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

// =============================================================================
// Revenue Type
// =============================================================================

/// What kind of thing a manual revenue entry sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum RevenueType {
    /// A service (delivery fee, table charge, ...).
    Service,
    /// A physical good. Links a product for reporting; manual revenue
    /// never deducts stock (POS-side deduction is a separate flow).
    Good,
}

// =============================================================================
// Expense Category
// =============================================================================

/// Fixed set of expense categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Outflow that also increases a product's stock quantity.
    StockPurchase,
    Salary,
    Utilities,
    Transport,
    Maintenance,
    Marketing,
    Rent,
    Other,
}

impl ExpenseCategory {
    /// Stock purchases are the only category with a stock side effect.
    #[inline]
    pub const fn moves_stock(&self) -> bool {
        matches!(self, ExpenseCategory::StockPurchase)
    }
}

// =============================================================================
// Cash Session
// =============================================================================

/// One calendar day's cash-drawer accounting period for a restaurant.
///
/// ## Invariants
/// - At most one session per `(restaurant_id, session_date)` — enforced by
///   a UNIQUE constraint at the storage layer.
/// - `closing_balance_fcfa`, `theoretical_balance_fcfa` and
///   `balance_difference_fcfa` are null while open, non-null and immutable
///   once closed.
/// - All monetary fields are non-negative except the signed
///   `balance_difference_fcfa`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CashSession {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Restaurant (tenant) this session belongs to. Always threaded
    /// explicitly through engine calls; there is no ambient tenant.
    pub restaurant_id: String,

    /// Calendar date of the session, normalized to a date (no time-of-day).
    pub session_date: NaiveDate,

    /// Lifecycle state.
    pub status: SessionStatus,

    /// True when the session was opened for a past date (backdated entry).
    pub is_historical: bool,

    /// Cash physically placed in the drawer at opening.
    pub opening_balance_fcfa: i64,

    /// Cash physically counted at close. Null while open.
    pub closing_balance_fcfa: Option<i64>,

    /// Snapshot computed at close: opening + Σrevenues − Σexpenses.
    /// Persisted once, never recomputed live after close.
    pub theoretical_balance_fcfa: Option<i64>,

    /// Signed variance: closing − theoretical. Null while open.
    pub balance_difference_fcfa: Option<i64>,

    /// Free-form notes from opening/closing.
    pub notes: Option<String>,

    /// When the session row was created.
    pub opened_at: DateTime<Utc>,

    /// When the session was closed. Null while open.
    pub closed_at: Option<DateTime<Utc>>,
}

impl CashSession {
    /// Returns the opening balance as an Amount.
    #[inline]
    pub fn opening_balance(&self) -> Amount {
        Amount::from_fcfa(self.opening_balance_fcfa)
    }

    /// Returns the counted closing balance, if closed.
    #[inline]
    pub fn closing_balance(&self) -> Option<Amount> {
        self.closing_balance_fcfa.map(Amount::from_fcfa)
    }

    /// Returns the signed counted-minus-theoretical difference, if closed.
    #[inline]
    pub fn difference(&self) -> Option<Amount> {
        self.balance_difference_fcfa.map(Amount::from_fcfa)
    }

    /// Classifies the close variance against the tolerance band.
    pub fn variance(&self) -> Option<Variance> {
        self.difference().map(classify_variance)
    }

    /// Whether the session still accepts ledger entries.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == SessionStatus::Open
    }
}

// =============================================================================
// Manual Revenue
// =============================================================================

/// A manual sales entry recorded against an open session.
///
/// Immutable once created: corrections are new entries, never edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ManualRevenue {
    pub id: String,
    pub session_id: String,
    /// What was sold ("Vente comptoir", ...). Trimmed, never empty.
    pub description: String,
    /// Units sold, at least 1.
    pub quantity: i64,
    /// Price per unit in whole francs, strictly positive.
    pub unit_amount_fcfa: i64,
    /// quantity × unit_amount, derived at creation time and stored.
    pub total_amount_fcfa: i64,
    pub payment_method: PaymentMethod,
    pub revenue_type: RevenueType,
    /// Linked product for `Good` revenues (reporting only, no stock move).
    pub product_id: Option<String>,
    /// Denormalized product name for display, filled on read.
    pub product_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ManualRevenue {
    /// Returns the line total as an Amount.
    #[inline]
    pub fn total_amount(&self) -> Amount {
        Amount::from_fcfa(self.total_amount_fcfa)
    }

    /// Returns the unit amount as an Amount.
    #[inline]
    pub fn unit_amount(&self) -> Amount {
        Amount::from_fcfa(self.unit_amount_fcfa)
    }
}

// =============================================================================
// Expense
// =============================================================================

/// An outflow recorded against an open session.
///
/// A `StockPurchase` expense documents the cash outflow AND increments the
/// referenced product's stock, atomically. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Expense {
    pub id: String,
    pub session_id: String,
    pub description: String,
    /// Outflow in whole francs, strictly positive.
    pub amount_fcfa: i64,
    pub category: ExpenseCategory,
    pub payment_method: PaymentMethod,
    /// Product restocked by a `StockPurchase` expense.
    pub product_id: Option<String>,
    /// Denormalized product name for display, filled on read.
    pub product_name: Option<String>,
    /// Units added to stock for a `StockPurchase` expense, at least 1.
    pub quantity_added: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Returns the expense amount as an Amount.
    #[inline]
    pub fn amount(&self) -> Amount {
        Amount::from_fcfa(self.amount_fcfa)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product with operational stock.
///
/// Reference data for the engine: read for validation/display, mutated
/// only as the stock side effect of a stock-purchase expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    /// Current operational stock level.
    pub stock_quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Session Summary
// =============================================================================

/// Flat session projection for calendar and tabular audit views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SessionSummary {
    pub id: String,
    pub session_date: NaiveDate,
    pub status: SessionStatus,
    pub is_historical: bool,
    pub opening_balance_fcfa: i64,
    pub closing_balance_fcfa: Option<i64>,
    pub theoretical_balance_fcfa: Option<i64>,
    pub balance_difference_fcfa: Option<i64>,
}

impl SessionSummary {
    /// Returns the signed difference as an Amount, if closed.
    #[inline]
    pub fn difference(&self) -> Option<Amount> {
        self.balance_difference_fcfa.map(Amount::from_fcfa)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_status_default() {
        assert_eq!(SessionStatus::default(), SessionStatus::Open);
    }

    #[test]
    fn test_payment_method_is_cash() {
        assert!(PaymentMethod::Cash.is_cash());
        assert!(!PaymentMethod::AirtelMoney.is_cash());
        assert!(!PaymentMethod::MoovMoney.is_cash());
    }

    #[test]
    fn test_only_stock_purchase_moves_stock() {
        assert!(ExpenseCategory::StockPurchase.moves_stock());
        assert!(!ExpenseCategory::Salary.moves_stock());
        assert!(!ExpenseCategory::Other.moves_stock());
    }

    #[test]
    fn test_enum_serde_representation() {
        let method = serde_json::to_string(&PaymentMethod::AirtelMoney).unwrap();
        assert_eq!(method, "\"airtel_money\"");

        let category = serde_json::to_string(&ExpenseCategory::StockPurchase).unwrap();
        assert_eq!(category, "\"stock_purchase\"");

        let status = serde_json::to_string(&SessionStatus::Closed).unwrap();
        assert_eq!(status, "\"closed\"");
    }
}
