//! Lock ordering for balance updates
//!
//! Two transfers between the same pair of accounts always update the
//! lower-id account first, whichever direction the money moves. Every
//! transaction therefore acquires the two row locks in the same global order
//! and opposite-direction transfers cannot deadlock on each other.

use crate::domain::{Amount, TransferRequest};

/// A signed balance change for one account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceDelta {
    pub account_id: i64,
    pub delta: i64,
}

/// Balance deltas of a transfer, in the order their row locks must be taken.
///
/// The debit always lands on `from_account_id` and the credit on
/// `to_account_id`; only the order of the two updates depends on the ids.
pub fn lock_order(request: &TransferRequest, amount: Amount) -> [BalanceDelta; 2] {
    let debit = BalanceDelta {
        account_id: request.from_account_id,
        delta: amount.debit(),
    };
    let credit = BalanceDelta {
        account_id: request.to_account_id,
        delta: amount.credit(),
    };

    if request.from_account_id < request.to_account_id {
        [debit, credit]
    } else {
        [credit, debit]
    }
}
