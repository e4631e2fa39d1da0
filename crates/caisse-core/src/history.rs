//! # History / Reporting View
//!
//! Pure helpers over bounded lists of [`SessionSummary`] for the calendar
//! and tabular audit views. No I/O here: the db layer loads summaries,
//! this module filters, sorts and indexes them.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::balance::TOLERANCE_FCFA;
use crate::types::{SessionStatus, SessionSummary};

// =============================================================================
// Gap Classification
// =============================================================================

/// True when a closed session's variance falls outside the tolerance band.
///
/// Open sessions never have a significant gap: their variance does not
/// exist yet.
pub fn has_significant_gap(summary: &SessionSummary) -> bool {
    summary.status == SessionStatus::Closed
        && summary
            .balance_difference_fcfa
            .map(|diff| diff.abs() > TOLERANCE_FCFA)
            .unwrap_or(false)
}

/// True when a session closed with its variance inside the tolerance band.
pub fn is_closed_ok(summary: &SessionSummary) -> bool {
    summary.status == SessionStatus::Closed && !has_significant_gap(summary)
}

// =============================================================================
// Filtering
// =============================================================================

/// Filter predicates for the audit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionFilter {
    /// Everything.
    All,
    /// Still-open sessions.
    Open,
    /// Any closed session.
    Closed,
    /// Closed within tolerance.
    ClosedOk,
    /// Closed with a reportable discrepancy.
    SignificantGap,
}

impl SessionFilter {
    /// Applies the predicate to one summary.
    pub fn matches(&self, summary: &SessionSummary) -> bool {
        match self {
            SessionFilter::All => true,
            SessionFilter::Open => summary.status == SessionStatus::Open,
            SessionFilter::Closed => summary.status == SessionStatus::Closed,
            SessionFilter::ClosedOk => is_closed_ok(summary),
            SessionFilter::SignificantGap => has_significant_gap(summary),
        }
    }
}

/// Returns the summaries matching `filter`, preserving input order.
pub fn filter_summaries(summaries: &[SessionSummary], filter: SessionFilter) -> Vec<SessionSummary> {
    summaries
        .iter()
        .filter(|s| filter.matches(s))
        .cloned()
        .collect()
}

// =============================================================================
// Sorting
// =============================================================================

/// Sort keys for the audit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionSortKey {
    /// Session calendar date.
    Date,
    /// Opening drawer balance.
    OpeningBalance,
    /// Counted closing balance (open sessions sort first).
    ClosingBalance,
    /// Absolute variance magnitude (open sessions sort first).
    AbsDifference,
}

/// Sorts summaries ascending by `key`. Stable, so a date pre-sort survives
/// as a secondary order.
pub fn sort_summaries(summaries: &mut [SessionSummary], key: SessionSortKey) {
    match key {
        SessionSortKey::Date => summaries.sort_by_key(|s| s.session_date),
        SessionSortKey::OpeningBalance => summaries.sort_by_key(|s| s.opening_balance_fcfa),
        SessionSortKey::ClosingBalance => summaries.sort_by_key(|s| s.closing_balance_fcfa),
        SessionSortKey::AbsDifference => {
            summaries.sort_by_key(|s| s.balance_difference_fcfa.map(i64::abs))
        }
    }
}

// =============================================================================
// Calendar Indexing
// =============================================================================

/// Indexes summaries by their normalized calendar-date key for O(1) lookup
/// when rendering a month grid.
///
/// At most one session exists per date per restaurant, so a later duplicate
/// date in the input (which would indicate mixed-restaurant input) simply
/// wins.
pub fn index_by_date(summaries: &[SessionSummary]) -> HashMap<NaiveDate, &SessionSummary> {
    summaries.iter().map(|s| (s.session_date, s)).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(
        id: &str,
        date: (i32, u32, u32),
        status: SessionStatus,
        difference: Option<i64>,
    ) -> SessionSummary {
        SessionSummary {
            id: id.to_string(),
            session_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            status,
            is_historical: false,
            opening_balance_fcfa: 5_000,
            closing_balance_fcfa: difference.map(|d| 6_800 + d),
            theoretical_balance_fcfa: difference.map(|_| 6_800),
            balance_difference_fcfa: difference,
        }
    }

    #[test]
    fn test_gap_classification() {
        let open = summary("a", (2024, 3, 1), SessionStatus::Open, None);
        let perfect = summary("b", (2024, 3, 2), SessionStatus::Closed, Some(0));
        let minor = summary("c", (2024, 3, 3), SessionStatus::Closed, Some(-500));
        let major = summary("d", (2024, 3, 4), SessionStatus::Closed, Some(-800));

        assert!(!has_significant_gap(&open));
        assert!(!has_significant_gap(&perfect));
        assert!(!has_significant_gap(&minor));
        assert!(has_significant_gap(&major));

        assert!(!is_closed_ok(&open));
        assert!(is_closed_ok(&perfect));
        assert!(is_closed_ok(&minor));
        assert!(!is_closed_ok(&major));
    }

    #[test]
    fn test_filters() {
        let summaries = vec![
            summary("a", (2024, 3, 1), SessionStatus::Open, None),
            summary("b", (2024, 3, 2), SessionStatus::Closed, Some(0)),
            summary("c", (2024, 3, 3), SessionStatus::Closed, Some(900)),
        ];

        assert_eq!(filter_summaries(&summaries, SessionFilter::All).len(), 3);
        assert_eq!(filter_summaries(&summaries, SessionFilter::Open).len(), 1);
        assert_eq!(filter_summaries(&summaries, SessionFilter::Closed).len(), 2);

        let ok = filter_summaries(&summaries, SessionFilter::ClosedOk);
        assert_eq!(ok.len(), 1);
        assert_eq!(ok[0].id, "b");

        let gaps = filter_summaries(&summaries, SessionFilter::SignificantGap);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].id, "c");
    }

    #[test]
    fn test_sort_by_abs_difference() {
        let mut summaries = vec![
            summary("big", (2024, 3, 1), SessionStatus::Closed, Some(-900)),
            summary("open", (2024, 3, 2), SessionStatus::Open, None),
            summary("small", (2024, 3, 3), SessionStatus::Closed, Some(100)),
        ];

        sort_summaries(&mut summaries, SessionSortKey::AbsDifference);

        // None sorts before Some, then by magnitude regardless of sign
        assert_eq!(summaries[0].id, "open");
        assert_eq!(summaries[1].id, "small");
        assert_eq!(summaries[2].id, "big");
    }

    #[test]
    fn test_sort_by_date() {
        let mut summaries = vec![
            summary("later", (2024, 3, 5), SessionStatus::Open, None),
            summary("earlier", (2024, 2, 28), SessionStatus::Open, None),
        ];

        sort_summaries(&mut summaries, SessionSortKey::Date);
        assert_eq!(summaries[0].id, "earlier");
    }

    #[test]
    fn test_index_by_date() {
        let summaries = vec![
            summary("a", (2024, 3, 1), SessionStatus::Open, None),
            summary("b", (2024, 3, 2), SessionStatus::Closed, Some(0)),
        ];

        let index = index_by_date(&summaries);
        let key = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(index.get(&key).map(|s| s.id.as_str()), Some("b"));
        assert!(index
            .get(&NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
            .is_none());
    }
}
