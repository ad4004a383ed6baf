//! Ledger rows
//!
//! Row types for the `accounts`, `entries` and `transfers` tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An account holding a balance in minor currency units.
///
/// The balance is signed; no overdraft rule is enforced at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub owner: String,
    pub balance: i64,
    /// ISO 4217 code, e.g. `EUR`
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// One signed leg of a transfer on a single account. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: i64,
    pub account_id: i64,
    /// Negative for the debit leg, positive for the credit leg
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// The logical transfer event between two accounts. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Transfer {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    /// Always positive
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}
