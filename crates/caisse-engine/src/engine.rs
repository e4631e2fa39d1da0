//! # Cash Session Engine
//!
//! The inbound operation surface: session lifecycle, revenue/expense
//! ledgers and audit reads.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                │
//! │                                                                     │
//! │   (none) ──open_session──► open ──close_session──► closed           │
//! │                             │ ▲                      │              │
//! │                             ▼ │                      ▼              │
//! │                    add_manual_revenue          (terminal: no        │
//! │                    add_expense                  reopen exists)      │
//! │                                                                     │
//! │  open_session    : fails DuplicateSession for a taken date          │
//! │  add_*           : fails SessionClosed once closed                  │
//! │  close_session   : fails SessionAlreadyClosed on a second close     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tenant Discipline
//! Every operation takes an explicit `restaurant_id`. There is no ambient
//! "current restaurant": tenant resolution belongs to the calling layer,
//! and a session or product of another restaurant is indistinguishable
//! from a missing one.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use caisse_core::balance::{cash_only_balance, theoretical_balance};
use caisse_core::validation::{
    validate_balance, validate_description, validate_notes, validate_positive_amount,
    validate_quantity, validate_quantity_added, validate_session_date, validate_uuid,
};
use caisse_core::{
    CashSession, Expense, ExpenseCategory, ManualRevenue, PaymentMethod, RevenueType,
    SessionStatus, SessionSummary, ValidationError,
};
use caisse_db::{Database, DbError};

use crate::error::{EngineError, EngineResult};

// =============================================================================
// Operation Inputs
// =============================================================================

/// Input for [`CaisseEngine::open_session`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenSessionInput {
    /// Calendar date of the session. Defaults to today; any past date is
    /// accepted for backdated ("historical") entry. Future dates are not.
    pub session_date: Option<NaiveDate>,
    /// Cash physically placed in the drawer, zero or more.
    pub opening_balance_fcfa: i64,
    pub notes: Option<String>,
}

/// Input for [`CaisseEngine::add_manual_revenue`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueInput {
    pub session_id: String,
    pub description: String,
    /// Units sold. Defaults to 1.
    pub quantity: Option<i64>,
    /// Price per unit, strictly positive.
    pub unit_amount_fcfa: i64,
    pub payment_method: PaymentMethod,
    pub revenue_type: RevenueType,
    /// Required when `revenue_type` is `Good`; links the product for
    /// reporting. Manual revenue never moves stock.
    pub product_id: Option<String>,
    pub notes: Option<String>,
}

/// Input for [`CaisseEngine::add_expense`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseInput {
    pub session_id: String,
    pub description: String,
    /// Outflow, strictly positive.
    pub amount_fcfa: i64,
    pub category: ExpenseCategory,
    pub payment_method: PaymentMethod,
    /// Required for `StockPurchase`; optional product link otherwise.
    pub product_id: Option<String>,
    /// Units added to stock. Required (≥1) for `StockPurchase`, rejected
    /// for every other category.
    pub quantity_added: Option<i64>,
}

// =============================================================================
// Read Models
// =============================================================================

/// A session with its loaded ledger and live derived balances.
///
/// The derived fields are recomputed by the balance calculator on every
/// read — never cached — so a refresh is idempotent and an auditor can
/// re-derive them from the ledger rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDetail {
    pub session: CashSession,
    /// Newest first (presentation order; totals are order-independent).
    pub revenues: Vec<ManualRevenue>,
    /// Newest first.
    pub expenses: Vec<Expense>,
    /// opening + Σrevenues − Σexpenses over the current ledger.
    pub running_theoretical_fcfa: i64,
    /// Expected physical drawer contents: cash-method transactions only.
    pub cash_only_fcfa: i64,
}

// =============================================================================
// Engine
// =============================================================================

/// The cash session reconciliation engine.
///
/// Thin orchestration over `caisse-core` (rules, balance math) and
/// `caisse-db` (persistence). Cheap to clone.
#[derive(Debug, Clone)]
pub struct CaisseEngine {
    db: Database,
}

impl CaisseEngine {
    /// Creates an engine over an initialized database.
    pub fn new(db: Database) -> Self {
        CaisseEngine { db }
    }

    /// Access to the underlying database, for callers that also manage
    /// catalog data (seeding, product administration).
    pub fn db(&self) -> &Database {
        &self.db
    }

    // -------------------------------------------------------------------------
    // Lifecycle: open
    // -------------------------------------------------------------------------

    /// Opens the cash session for a restaurant and date.
    ///
    /// ## Preconditions
    /// - No session exists yet for `(restaurant_id, session_date)`
    /// - `opening_balance_fcfa >= 0`
    /// - `session_date` is today or earlier
    ///
    /// ## Concurrency
    /// The one-session-per-day invariant is enforced by the UNIQUE index
    /// at the storage layer, not by a check-then-insert: of two concurrent
    /// opens for the same date exactly one succeeds, the other gets
    /// [`EngineError::DuplicateSession`].
    pub async fn open_session(
        &self,
        restaurant_id: &str,
        input: OpenSessionInput,
    ) -> EngineResult<CashSession> {
        validate_balance("opening_balance", input.opening_balance_fcfa)?;
        let notes = validate_notes(input.notes.as_deref())?;

        let today = Utc::now().date_naive();
        let session_date = input.session_date.unwrap_or(today);
        validate_session_date(session_date, today)?;

        let session = CashSession {
            id: Uuid::new_v4().to_string(),
            restaurant_id: restaurant_id.to_string(),
            session_date,
            status: SessionStatus::Open,
            is_historical: session_date < today,
            opening_balance_fcfa: input.opening_balance_fcfa,
            closing_balance_fcfa: None,
            theoretical_balance_fcfa: None,
            balance_difference_fcfa: None,
            notes,
            opened_at: Utc::now(),
            closed_at: None,
        };

        match self.db.sessions().insert_session(&session).await {
            Ok(()) => {}
            Err(err) if err.is_unique_violation() => {
                return Err(EngineError::DuplicateSession {
                    restaurant_id: restaurant_id.to_string(),
                    session_date,
                });
            }
            Err(err) => return Err(err.into()),
        }

        info!(
            session_id = %session.id,
            restaurant_id = %restaurant_id,
            session_date = %session_date,
            historical = session.is_historical,
            opening = session.opening_balance_fcfa,
            "Cash session opened"
        );

        Ok(session)
    }

    // -------------------------------------------------------------------------
    // Revenue ledger
    // -------------------------------------------------------------------------

    /// Records a manual sales entry against an open session.
    ///
    /// `total_amount = quantity × unit_amount` is derived here, once, and
    /// stored; it never drifts afterwards. Stock is not touched: manual
    /// revenue of type `Good` links a product for reporting only.
    pub async fn add_manual_revenue(
        &self,
        restaurant_id: &str,
        input: RevenueInput,
    ) -> EngineResult<ManualRevenue> {
        validate_uuid("session_id", &input.session_id)?;
        let description = validate_description(&input.description)?;
        let quantity = input.quantity.unwrap_or(1);
        validate_quantity(quantity)?;
        validate_positive_amount("unit_amount", input.unit_amount_fcfa)?;
        let notes = validate_notes(input.notes.as_deref())?;

        let session = self.open_session_or_fail(restaurant_id, &input.session_id).await?;

        // A "good" revenue must point at a real product of this restaurant
        let product_name = match (input.revenue_type, &input.product_id) {
            (RevenueType::Good, None) => {
                return Err(ValidationError::RequiredWhen {
                    field: "product_id".to_string(),
                    condition: "revenue_type is good".to_string(),
                }
                .into());
            }
            (_, Some(product_id)) => Some(self.product_name(restaurant_id, product_id).await?),
            (RevenueType::Service, None) => None,
        };

        let revenue = ManualRevenue {
            id: Uuid::new_v4().to_string(),
            session_id: session.id.clone(),
            description,
            quantity,
            unit_amount_fcfa: input.unit_amount_fcfa,
            total_amount_fcfa: input.unit_amount_fcfa * quantity,
            payment_method: input.payment_method,
            revenue_type: input.revenue_type,
            product_id: input.product_id,
            product_name,
            notes,
            created_at: Utc::now(),
        };

        self.db.sessions().insert_revenue(&revenue).await?;

        info!(
            session_id = %session.id,
            revenue_id = %revenue.id,
            total = revenue.total_amount_fcfa,
            method = ?revenue.payment_method,
            "Manual revenue recorded"
        );

        Ok(revenue)
    }

    // -------------------------------------------------------------------------
    // Expense ledger
    // -------------------------------------------------------------------------

    /// Records an outflow against an open session.
    ///
    /// ## Stock Purchases
    /// `StockPurchase` expenses require `product_id` and `quantity_added`
    /// and increment the product's stock in the same transaction as the
    /// expense insert — both writes land or neither does. A stock update
    /// that fails after validation rolls everything back and surfaces as
    /// [`EngineError::StockUpdate`], so a stock mutation happens at most
    /// once per expense.
    pub async fn add_expense(
        &self,
        restaurant_id: &str,
        input: ExpenseInput,
    ) -> EngineResult<Expense> {
        validate_uuid("session_id", &input.session_id)?;
        let description = validate_description(&input.description)?;
        validate_positive_amount("amount", input.amount_fcfa)?;

        if input.quantity_added.is_some() && !input.category.moves_stock() {
            return Err(ValidationError::InvalidFormat {
                field: "quantity_added".to_string(),
                reason: "only allowed for stock_purchase expenses".to_string(),
            }
            .into());
        }

        let session = self.open_session_or_fail(restaurant_id, &input.session_id).await?;

        if input.category.moves_stock() {
            let product_id = input.product_id.clone().ok_or(ValidationError::RequiredWhen {
                field: "product_id".to_string(),
                condition: "category is stock_purchase".to_string(),
            })?;
            let quantity_added = input.quantity_added.ok_or(ValidationError::RequiredWhen {
                field: "quantity_added".to_string(),
                condition: "category is stock_purchase".to_string(),
            })?;
            validate_quantity_added(quantity_added)?;

            let product_name = self.product_name(restaurant_id, &product_id).await?;

            let expense = Expense {
                id: Uuid::new_v4().to_string(),
                session_id: session.id.clone(),
                description,
                amount_fcfa: input.amount_fcfa,
                category: input.category,
                payment_method: input.payment_method,
                product_id: Some(product_id.clone()),
                product_name: Some(product_name),
                quantity_added: Some(quantity_added),
                created_at: Utc::now(),
            };

            match self
                .db
                .sessions()
                .insert_stock_purchase(&expense, restaurant_id, &product_id, quantity_added)
                .await
            {
                Ok(()) => {}
                // The product vanished between validation and the guarded
                // update; the transaction was rolled back
                Err(DbError::NotFound { .. }) => {
                    return Err(EngineError::StockUpdate {
                        product_id,
                        reason: "product disappeared before the stock increment".to_string(),
                    });
                }
                Err(err) => return Err(err.into()),
            }

            info!(
                session_id = %session.id,
                expense_id = %expense.id,
                amount = expense.amount_fcfa,
                product_id = %product_id,
                quantity_added,
                "Stock-purchase expense recorded"
            );

            return Ok(expense);
        }

        // Non-stock expense; an optional product link is still verified
        let product_name = match &input.product_id {
            Some(product_id) => Some(self.product_name(restaurant_id, product_id).await?),
            None => None,
        };

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            session_id: session.id.clone(),
            description,
            amount_fcfa: input.amount_fcfa,
            category: input.category,
            payment_method: input.payment_method,
            product_id: input.product_id,
            product_name,
            quantity_added: None,
            created_at: Utc::now(),
        };

        self.db.sessions().insert_expense(&expense).await?;

        info!(
            session_id = %session.id,
            expense_id = %expense.id,
            amount = expense.amount_fcfa,
            category = ?expense.category,
            "Expense recorded"
        );

        Ok(expense)
    }

    // -------------------------------------------------------------------------
    // Lifecycle: close
    // -------------------------------------------------------------------------

    /// Closes a session with the physically counted drawer amount.
    ///
    /// Computes the theoretical balance over the session's current ledger,
    /// snapshots it together with the signed variance, and freezes the
    /// session. Terminal: nothing reopens a closed session.
    ///
    /// ## Concurrency
    /// The update is guarded by `WHERE status = 'open'`, so of two
    /// concurrent closes exactly one succeeds and the other gets
    /// [`EngineError::SessionAlreadyClosed`].
    pub async fn close_session(
        &self,
        restaurant_id: &str,
        session_id: &str,
        closing_balance_fcfa: i64,
        notes: Option<String>,
    ) -> EngineResult<CashSession> {
        validate_uuid("session_id", session_id)?;
        validate_balance("closing_balance", closing_balance_fcfa)?;
        let notes = validate_notes(notes.as_deref())?;

        let sessions = self.db.sessions();
        let session = sessions
            .get_by_id(restaurant_id, session_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Session", session_id))?;

        if session.status == SessionStatus::Closed {
            return Err(EngineError::SessionAlreadyClosed(session_id.to_string()));
        }

        let revenues = sessions.get_revenues(session_id).await?;
        let expenses = sessions.get_expenses(session_id).await?;

        let theoretical =
            theoretical_balance(session.opening_balance(), &revenues, &expenses).fcfa();
        let difference = closing_balance_fcfa - theoretical;

        let affected = sessions
            .close_session(
                restaurant_id,
                session_id,
                closing_balance_fcfa,
                theoretical,
                difference,
                notes.as_deref(),
                Utc::now(),
            )
            .await?;

        if affected == 0 {
            // Lost a close race (or the row vanished): re-read to tell which
            return match sessions.get_by_id(restaurant_id, session_id).await? {
                Some(s) if s.status == SessionStatus::Closed => {
                    Err(EngineError::SessionAlreadyClosed(session_id.to_string()))
                }
                _ => Err(EngineError::not_found("Session", session_id)),
            };
        }

        let closed = sessions
            .get_by_id(restaurant_id, session_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Session", session_id))?;

        info!(
            session_id = %session_id,
            counted = closing_balance_fcfa,
            theoretical,
            difference,
            variance = ?closed.variance(),
            "Cash session closed"
        );

        Ok(closed)
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Loads a session with its ledger and freshly derived balances.
    pub async fn get_session(
        &self,
        restaurant_id: &str,
        session_id: &str,
    ) -> EngineResult<SessionDetail> {
        validate_uuid("session_id", session_id)?;

        let sessions = self.db.sessions();
        let session = sessions
            .get_by_id(restaurant_id, session_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Session", session_id))?;

        let revenues = sessions.get_revenues(session_id).await?;
        let expenses = sessions.get_expenses(session_id).await?;

        let opening = session.opening_balance();
        let running_theoretical_fcfa = theoretical_balance(opening, &revenues, &expenses).fcfa();
        let cash_only_fcfa = cash_only_balance(opening, &revenues, &expenses).fcfa();

        Ok(SessionDetail {
            session,
            revenues,
            expenses,
            running_theoretical_fcfa,
            cash_only_fcfa,
        })
    }

    /// Looks up the session for a calendar date, if one exists.
    ///
    /// Backs the month-grid view: at most one session exists per
    /// restaurant per day, and a day without one renders empty rather
    /// than erroring.
    pub async fn get_session_by_date(
        &self,
        restaurant_id: &str,
        session_date: NaiveDate,
    ) -> EngineResult<Option<CashSession>> {
        Ok(self
            .db
            .sessions()
            .get_by_date(restaurant_id, session_date)
            .await?)
    }

    /// Lists session summaries for the audit views, newest first.
    pub async fn list_session_summaries(
        &self,
        restaurant_id: &str,
        date_range: Option<(NaiveDate, NaiveDate)>,
    ) -> EngineResult<Vec<SessionSummary>> {
        Ok(self.db.sessions().get_summaries(restaurant_id, date_range).await?)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Loads a session and requires it to be open.
    async fn open_session_or_fail(
        &self,
        restaurant_id: &str,
        session_id: &str,
    ) -> EngineResult<CashSession> {
        let session = self
            .db
            .sessions()
            .get_by_id(restaurant_id, session_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Session", session_id))?;

        if session.status == SessionStatus::Closed {
            return Err(EngineError::SessionClosed(session_id.to_string()));
        }

        Ok(session)
    }

    /// Resolves a product name, tenant-scoped.
    async fn product_name(&self, restaurant_id: &str, product_id: &str) -> EngineResult<String> {
        let product = self
            .db
            .products()
            .get_by_id(restaurant_id, product_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Product", product_id))?;

        Ok(product.name)
    }
}
