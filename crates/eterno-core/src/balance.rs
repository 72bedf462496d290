//! # Balance Classification
//!
//! Decides whether an order's balance is still outstanding.
//!
//! ## State Machine
//! ```text
//!                 order created
//!                      │
//!        balance_remaining > 0 ?
//!           │                 │
//!          yes                no
//!           ▼                 ▼
//!      ┌─────────┐       ┌─────────┐
//!      │ Pending │──────►│ Settled │
//!      └─────────┘       └─────────┘
//!            (a) marked as paid
//!            (b) session_date <= today   (re-derived on every read)
//! ```
//! There is no way back from Settled to Pending. Nothing here is persisted:
//! the status is recomputed from the row and "today" on every read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Derived status of an order's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    /// Money still to collect.
    Pending,
    /// Nothing left to collect, or assumed collected.
    Settled,
}

impl BalanceStatus {
    /// Classifies a balance. See [`is_balance_pending`].
    pub fn classify(
        balance_remaining: Money,
        balance_paid: bool,
        session_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        if is_balance_pending(balance_remaining, balance_paid, session_date, today) {
            BalanceStatus::Pending
        } else {
            BalanceStatus::Settled
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, BalanceStatus::Pending)
    }
}

/// Is the balance still to be collected?
///
/// ## Rules (first match wins)
/// 1. Nothing remaining (`<= 0`) → not pending
/// 2. Marked as paid → not pending
/// 3. Session scheduled → pending only while the session is in the future;
///    once the session day arrives the balance is assumed collected
/// 4. No session date → pending
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use eterno_core::balance::is_balance_pending;
/// use eterno_core::money::Money;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
/// let tomorrow = today.succ_opt().unwrap();
/// let owed = Money::from_major(2000);
///
/// assert!(is_balance_pending(owed, false, Some(tomorrow), today));
/// assert!(!is_balance_pending(owed, false, Some(today), today));
/// assert!(is_balance_pending(owed, false, None, today));
/// ```
pub fn is_balance_pending(
    balance_remaining: Money,
    balance_paid: bool,
    session_date: Option<NaiveDate>,
    today: NaiveDate,
) -> bool {
    if !balance_remaining.is_positive() || balance_paid {
        return false;
    }

    match session_date {
        Some(session) => session > today,
        None => true,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn owed() -> Money {
        Money::from_major(2000)
    }

    #[test]
    fn test_nothing_remaining_is_never_pending() {
        let future = today().succ_opt();
        for remaining in [Money::zero(), Money::from_major(-50)] {
            assert!(!is_balance_pending(remaining, false, None, today()));
            assert!(!is_balance_pending(remaining, false, future, today()));
            assert!(!is_balance_pending(remaining, true, None, today()));
        }
    }

    #[test]
    fn test_paid_is_never_pending() {
        assert!(!is_balance_pending(owed(), true, None, today()));
        assert!(!is_balance_pending(owed(), true, today().succ_opt(), today()));
    }

    #[test]
    fn test_past_or_today_session_settles() {
        let yesterday = today().pred_opt();
        assert!(!is_balance_pending(owed(), false, yesterday, today()));
        assert!(!is_balance_pending(owed(), false, Some(today()), today()));
    }

    #[test]
    fn test_future_session_is_pending() {
        assert!(is_balance_pending(owed(), false, today().succ_opt(), today()));
    }

    #[test]
    fn test_no_session_date_is_pending() {
        assert!(is_balance_pending(owed(), false, None, today()));
        assert!(is_balance_pending(Money::from_cents(1), false, None, today()));
    }

    #[test]
    fn test_status_ages_out_as_today_moves() {
        let session = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let before = BalanceStatus::classify(owed(), false, Some(session), today());
        let after = BalanceStatus::classify(
            owed(),
            false,
            Some(session),
            NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
        );

        assert_eq!(before, BalanceStatus::Pending);
        assert!(before.is_pending());
        assert_eq!(after, BalanceStatus::Settled);
    }
}
