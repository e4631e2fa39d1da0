//! # Balance Calculator
//!
//! Pure, side-effect-free balance math over a session's loaded transaction
//! collections.
//!
//! ## Reconciliation Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                 Theoretical vs. Counted Balance                     │
//! │                                                                     │
//! │  opening_balance                                                    │
//! │        + Σ revenue.total_amount      (all payment methods)          │
//! │        − Σ expense.amount            (all payment methods)          │
//! │        ─────────────────────────                                    │
//! │        = theoretical_balance                                        │
//! │                                                                     │
//! │  counted_closing − theoretical = balance_difference (signed)        │
//! │                                                                     │
//! │        diff == 0          → Perfect                                 │
//! │        |diff| <= 500 FCFA → Minor   (rounding noise)                │
//! │        |diff| >  500 FCFA → Major   (reportable discrepancy)        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity Guarantee
//! Every function here is a commutative sum over its inputs: computing
//! twice from the same transaction set yields identical results, in any
//! insertion order. Required for idempotent UI refresh and for audit
//! reproducibility.

use serde::{Deserialize, Serialize};

use crate::money::Amount;
use crate::types::{Expense, ManualRevenue};

/// Tolerance band for variance classification, in whole francs.
///
/// A counted drawer within ±500 FCFA of the theoretical balance is treated
/// as rounding noise ("minor") rather than a reportable discrepancy.
pub const TOLERANCE_FCFA: i64 = 500;

// =============================================================================
// Totals
// =============================================================================

/// Sum of all revenue line totals, regardless of payment method.
pub fn total_revenues(revenues: &[ManualRevenue]) -> Amount {
    revenues
        .iter()
        .fold(Amount::zero(), |acc, r| acc + r.total_amount())
}

/// Sum of all expense amounts, regardless of payment method.
pub fn total_expenses(expenses: &[Expense]) -> Amount {
    expenses
        .iter()
        .fold(Amount::zero(), |acc, e| acc + e.amount())
}

/// Theoretical balance: opening + Σrevenues − Σexpenses (all methods).
pub fn theoretical_balance(
    opening: Amount,
    revenues: &[ManualRevenue],
    expenses: &[Expense],
) -> Amount {
    opening + total_revenues(revenues) - total_expenses(expenses)
}

/// Cash-only balance: the theoretical balance restricted to cash-method
/// transactions. Represents expected physical drawer contents — mobile
/// money never touches the drawer.
pub fn cash_only_balance(
    opening: Amount,
    revenues: &[ManualRevenue],
    expenses: &[Expense],
) -> Amount {
    let cash_in = revenues
        .iter()
        .filter(|r| r.payment_method.is_cash())
        .fold(Amount::zero(), |acc, r| acc + r.total_amount());

    let cash_out = expenses
        .iter()
        .filter(|e| e.payment_method.is_cash())
        .fold(Amount::zero(), |acc, e| acc + e.amount());

    opening + cash_in - cash_out
}

// =============================================================================
// Variance Classification
// =============================================================================

/// Severity band of a close variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variance {
    /// Counted matches theoretical to the franc.
    Perfect,
    /// Within the tolerance band (inclusive).
    Minor,
    /// Outside the tolerance band; needs investigation.
    Major,
}

/// Classifies a signed counted-minus-theoretical difference.
///
/// ## Example
/// ```rust
/// use caisse_core::balance::{classify_variance, Variance};
/// use caisse_core::money::Amount;
///
/// assert_eq!(classify_variance(Amount::zero()), Variance::Perfect);
/// assert_eq!(classify_variance(Amount::from_fcfa(-500)), Variance::Minor);
/// assert_eq!(classify_variance(Amount::from_fcfa(501)), Variance::Major);
/// ```
pub fn classify_variance(diff: Amount) -> Variance {
    if diff.is_zero() {
        Variance::Perfect
    } else if diff.abs().fcfa() <= TOLERANCE_FCFA {
        Variance::Minor
    } else {
        Variance::Major
    }
}

/// Classifies a physically counted amount against the theoretical balance.
pub fn classify_counted(counted: Amount, theoretical: Amount) -> Variance {
    classify_variance(counted - theoretical)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExpenseCategory, PaymentMethod, RevenueType};
    use chrono::Utc;

    fn revenue(total: i64, method: PaymentMethod) -> ManualRevenue {
        ManualRevenue {
            id: "r".to_string(),
            session_id: "s".to_string(),
            description: "Vente comptoir".to_string(),
            quantity: 1,
            unit_amount_fcfa: total,
            total_amount_fcfa: total,
            payment_method: method,
            revenue_type: RevenueType::Service,
            product_id: None,
            product_name: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn expense(amount: i64, method: PaymentMethod) -> Expense {
        Expense {
            id: "e".to_string(),
            session_id: "s".to_string(),
            description: "Achat légumes".to_string(),
            amount_fcfa: amount,
            category: ExpenseCategory::Other,
            payment_method: method,
            product_id: None,
            product_name: None,
            quantity_added: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_theoretical_balance() {
        let revenues = vec![revenue(3_000, PaymentMethod::Cash)];
        let expenses = vec![expense(1_200, PaymentMethod::Cash)];

        let theoretical = theoretical_balance(Amount::from_fcfa(5_000), &revenues, &expenses);
        assert_eq!(theoretical.fcfa(), 6_800);
    }

    #[test]
    fn test_theoretical_balance_is_order_independent() {
        let mut revenues = vec![
            revenue(3_000, PaymentMethod::Cash),
            revenue(750, PaymentMethod::AirtelMoney),
            revenue(2_500, PaymentMethod::MoovMoney),
        ];
        let mut expenses = vec![
            expense(1_200, PaymentMethod::Cash),
            expense(400, PaymentMethod::AirtelMoney),
        ];

        let opening = Amount::from_fcfa(5_000);
        let forward = theoretical_balance(opening, &revenues, &expenses);

        revenues.reverse();
        expenses.reverse();
        let reversed = theoretical_balance(opening, &revenues, &expenses);

        assert_eq!(forward, reversed);
        // And re-derivable identically from the same set
        assert_eq!(forward, theoretical_balance(opening, &revenues, &expenses));
    }

    #[test]
    fn test_cash_only_balance_ignores_mobile_money() {
        let revenues = vec![
            revenue(3_000, PaymentMethod::Cash),
            revenue(2_000, PaymentMethod::AirtelMoney),
        ];
        let expenses = vec![
            expense(1_200, PaymentMethod::Cash),
            expense(500, PaymentMethod::MoovMoney),
        ];

        let cash = cash_only_balance(Amount::from_fcfa(5_000), &revenues, &expenses);
        // 5000 + 3000 − 1200; the mobile-money lines never touch the drawer
        assert_eq!(cash.fcfa(), 6_800);
    }

    #[test]
    fn test_empty_session_balances() {
        let opening = Amount::from_fcfa(10_000);
        assert_eq!(theoretical_balance(opening, &[], &[]), opening);
        assert_eq!(cash_only_balance(opening, &[], &[]), opening);
    }

    #[test]
    fn test_variance_banding() {
        // Perfect iff exactly zero
        assert_eq!(classify_variance(Amount::zero()), Variance::Perfect);

        // Minor: 0 < |diff| <= 500, boundary inclusive
        assert_eq!(classify_variance(Amount::from_fcfa(1)), Variance::Minor);
        assert_eq!(classify_variance(Amount::from_fcfa(500)), Variance::Minor);
        assert_eq!(classify_variance(Amount::from_fcfa(-500)), Variance::Minor);

        // Major: |diff| > 500
        assert_eq!(classify_variance(Amount::from_fcfa(501)), Variance::Major);
        assert_eq!(classify_variance(Amount::from_fcfa(-800)), Variance::Major);
    }

    #[test]
    fn test_classify_counted() {
        let theoretical = Amount::from_fcfa(6_800);
        assert_eq!(
            classify_counted(Amount::from_fcfa(6_800), theoretical),
            Variance::Perfect
        );
        assert_eq!(
            classify_counted(Amount::from_fcfa(6_300), theoretical),
            Variance::Minor
        );
        assert_eq!(
            classify_counted(Amount::from_fcfa(6_000), theoretical),
            Variance::Major
        );
    }
}
