//! # Session Repository
//!
//! Database operations for cash sessions and their child ledger rows.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Cash Session Lifecycle                          │
//! │                                                                     │
//! │  1. OPEN                                                            │
//! │     └── insert_session() → CashSession { status: Open }             │
//! │         (UNIQUE (restaurant_id, session_date) settles the           │
//! │          duplicate-open race at the storage layer)                  │
//! │                                                                     │
//! │  2. APPEND (while open)                                             │
//! │     └── insert_revenue() → ManualRevenue                            │
//! │     └── insert_expense() → Expense                                  │
//! │     └── insert_stock_purchase() → Expense + stock increment         │
//! │         (single transaction, both-or-neither)                       │
//! │                                                                     │
//! │  3. CLOSE (terminal)                                                │
//! │     └── close_session() → UPDATE ... WHERE status = 'open'          │
//! │         (conditional update: two concurrent closes yield exactly    │
//! │          one success)                                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use caisse_core::{CashSession, Expense, ManualRevenue, SessionSummary};

/// Repository for cash session database operations.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Creates a new SessionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SessionRepository { pool }
    }

    // -------------------------------------------------------------------------
    // Sessions
    // -------------------------------------------------------------------------

    /// Inserts a freshly opened session.
    ///
    /// A second open for the same `(restaurant_id, session_date)` hits the
    /// UNIQUE index and surfaces as [`DbError::UniqueViolation`].
    pub async fn insert_session(&self, session: &CashSession) -> DbResult<()> {
        debug!(
            id = %session.id,
            restaurant_id = %session.restaurant_id,
            session_date = %session.session_date,
            "Inserting cash session"
        );

        sqlx::query(
            r#"
            INSERT INTO cash_sessions (
                id, restaurant_id, session_date, status, is_historical,
                opening_balance_fcfa, closing_balance_fcfa,
                theoretical_balance_fcfa, balance_difference_fcfa,
                notes, opened_at, closed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&session.id)
        .bind(&session.restaurant_id)
        .bind(session.session_date)
        .bind(session.status)
        .bind(session.is_historical)
        .bind(session.opening_balance_fcfa)
        .bind(session.closing_balance_fcfa)
        .bind(session.theoretical_balance_fcfa)
        .bind(session.balance_difference_fcfa)
        .bind(&session.notes)
        .bind(session.opened_at)
        .bind(session.closed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a session by ID, scoped to a restaurant.
    ///
    /// The restaurant scope is the tenant-isolation precondition: a session
    /// belonging to another restaurant behaves exactly like a missing one.
    pub async fn get_by_id(&self, restaurant_id: &str, id: &str) -> DbResult<Option<CashSession>> {
        let session = sqlx::query_as::<_, CashSession>(
            r#"
            SELECT
                id, restaurant_id, session_date, status, is_historical,
                opening_balance_fcfa, closing_balance_fcfa,
                theoretical_balance_fcfa, balance_difference_fcfa,
                notes, opened_at, closed_at
            FROM cash_sessions
            WHERE id = ?1 AND restaurant_id = ?2
            "#,
        )
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Gets a session by its business key `(restaurant_id, session_date)`.
    pub async fn get_by_date(
        &self,
        restaurant_id: &str,
        session_date: NaiveDate,
    ) -> DbResult<Option<CashSession>> {
        let session = sqlx::query_as::<_, CashSession>(
            r#"
            SELECT
                id, restaurant_id, session_date, status, is_historical,
                opening_balance_fcfa, closing_balance_fcfa,
                theoretical_balance_fcfa, balance_difference_fcfa,
                notes, opened_at, closed_at
            FROM cash_sessions
            WHERE restaurant_id = ?1 AND session_date = ?2
            "#,
        )
        .bind(restaurant_id)
        .bind(session_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Lists session summaries for a restaurant, newest first, optionally
    /// bounded to an inclusive date range.
    pub async fn get_summaries(
        &self,
        restaurant_id: &str,
        date_range: Option<(NaiveDate, NaiveDate)>,
    ) -> DbResult<Vec<SessionSummary>> {
        let summaries = match date_range {
            Some((from, to)) => {
                sqlx::query_as::<_, SessionSummary>(
                    r#"
                    SELECT
                        id, session_date, status, is_historical,
                        opening_balance_fcfa, closing_balance_fcfa,
                        theoretical_balance_fcfa, balance_difference_fcfa
                    FROM cash_sessions
                    WHERE restaurant_id = ?1
                      AND session_date >= ?2
                      AND session_date <= ?3
                    ORDER BY session_date DESC
                    "#,
                )
                .bind(restaurant_id)
                .bind(from)
                .bind(to)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, SessionSummary>(
                    r#"
                    SELECT
                        id, session_date, status, is_historical,
                        opening_balance_fcfa, closing_balance_fcfa,
                        theoretical_balance_fcfa, balance_difference_fcfa
                    FROM cash_sessions
                    WHERE restaurant_id = ?1
                    ORDER BY session_date DESC
                    "#,
                )
                .bind(restaurant_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(summaries)
    }

    /// Closes a session with its reconciliation snapshot.
    ///
    /// ## Conditional Update
    /// The `WHERE status = 'open'` guard makes the close race-safe: two
    /// concurrent close attempts result in exactly one row update. The
    /// caller disambiguates a zero-row result (missing vs. already closed)
    /// by re-reading the session.
    ///
    /// ## Returns
    /// Number of rows affected (0 or 1).
    pub async fn close_session(
        &self,
        restaurant_id: &str,
        id: &str,
        closing_balance_fcfa: i64,
        theoretical_balance_fcfa: i64,
        balance_difference_fcfa: i64,
        notes: Option<&str>,
        closed_at: DateTime<Utc>,
    ) -> DbResult<u64> {
        debug!(id = %id, closing = closing_balance_fcfa, "Closing cash session");

        let result = sqlx::query(
            r#"
            UPDATE cash_sessions SET
                status = 'closed',
                closing_balance_fcfa = ?3,
                theoretical_balance_fcfa = ?4,
                balance_difference_fcfa = ?5,
                notes = COALESCE(?6, notes),
                closed_at = ?7
            WHERE id = ?1 AND restaurant_id = ?2 AND status = 'open'
            "#,
        )
        .bind(id)
        .bind(restaurant_id)
        .bind(closing_balance_fcfa)
        .bind(theoretical_balance_fcfa)
        .bind(balance_difference_fcfa)
        .bind(notes)
        .bind(closed_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    // -------------------------------------------------------------------------
    // Manual revenues
    // -------------------------------------------------------------------------

    /// Inserts a manual revenue row linked to its session.
    pub async fn insert_revenue(&self, revenue: &ManualRevenue) -> DbResult<()> {
        debug!(
            session_id = %revenue.session_id,
            total = revenue.total_amount_fcfa,
            "Inserting manual revenue"
        );

        sqlx::query(
            r#"
            INSERT INTO manual_revenues (
                id, session_id, description, quantity,
                unit_amount_fcfa, total_amount_fcfa,
                payment_method, revenue_type, product_id, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&revenue.id)
        .bind(&revenue.session_id)
        .bind(&revenue.description)
        .bind(revenue.quantity)
        .bind(revenue.unit_amount_fcfa)
        .bind(revenue.total_amount_fcfa)
        .bind(revenue.payment_method)
        .bind(revenue.revenue_type)
        .bind(&revenue.product_id)
        .bind(&revenue.notes)
        .bind(revenue.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets all revenues for a session, newest first, with the product name
    /// denormalized for display.
    pub async fn get_revenues(&self, session_id: &str) -> DbResult<Vec<ManualRevenue>> {
        let revenues = sqlx::query_as::<_, ManualRevenue>(
            r#"
            SELECT
                r.id, r.session_id, r.description, r.quantity,
                r.unit_amount_fcfa, r.total_amount_fcfa,
                r.payment_method, r.revenue_type, r.product_id,
                p.name AS product_name,
                r.notes, r.created_at
            FROM manual_revenues r
            LEFT JOIN products p ON p.id = r.product_id
            WHERE r.session_id = ?1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(revenues)
    }

    // -------------------------------------------------------------------------
    // Expenses
    // -------------------------------------------------------------------------

    /// Inserts an expense with no stock side effect.
    pub async fn insert_expense(&self, expense: &Expense) -> DbResult<()> {
        debug!(
            session_id = %expense.session_id,
            amount = expense.amount_fcfa,
            "Inserting expense"
        );

        sqlx::query(
            r#"
            INSERT INTO expenses (
                id, session_id, description, amount_fcfa,
                category, payment_method, product_id, quantity_added, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.session_id)
        .bind(&expense.description)
        .bind(expense.amount_fcfa)
        .bind(expense.category)
        .bind(expense.payment_method)
        .bind(&expense.product_id)
        .bind(expense.quantity_added)
        .bind(expense.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts a stock-purchase expense and increments the product's stock
    /// as a single atomic unit.
    ///
    /// ## Atomicity
    /// Both writes run in one transaction: either the expense row and the
    /// stock increment are both observable afterwards, or neither is.
    ///
    /// ## Write Ordering
    /// The guarded stock UPDATE runs first. A missing (or foreign-tenant)
    /// product touches zero rows and rolls back as [`DbError::NotFound`]
    /// before the expense row — with its `product_id` foreign key — is
    /// ever attempted, so the caller sees a not-found, not an FK failure.
    pub async fn insert_stock_purchase(
        &self,
        expense: &Expense,
        restaurant_id: &str,
        product_id: &str,
        quantity_added: i64,
    ) -> DbResult<()> {
        debug!(
            session_id = %expense.session_id,
            product_id = %product_id,
            quantity_added,
            "Inserting stock-purchase expense"
        );

        let mut tx = self.pool.begin().await?;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE products SET
                stock_quantity = stock_quantity + ?3,
                updated_at = ?4
            WHERE id = ?1 AND restaurant_id = ?2
            "#,
        )
        .bind(product_id)
        .bind(restaurant_id)
        .bind(quantity_added)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(DbError::not_found("Product", product_id));
        }

        sqlx::query(
            r#"
            INSERT INTO expenses (
                id, session_id, description, amount_fcfa,
                category, payment_method, product_id, quantity_added, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.session_id)
        .bind(&expense.description)
        .bind(expense.amount_fcfa)
        .bind(expense.category)
        .bind(expense.payment_method)
        .bind(&expense.product_id)
        .bind(expense.quantity_added)
        .bind(expense.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Gets all expenses for a session, newest first, with the product name
    /// denormalized for display.
    pub async fn get_expenses(&self, session_id: &str) -> DbResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT
                e.id, e.session_id, e.description, e.amount_fcfa,
                e.category, e.payment_method, e.product_id,
                p.name AS product_name,
                e.quantity_added, e.created_at
            FROM expenses e
            LEFT JOIN products p ON p.id = e.product_id
            WHERE e.session_id = ?1
            ORDER BY e.created_at DESC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
