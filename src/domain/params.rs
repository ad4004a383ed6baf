//! Parameter definitions
//!
//! Inputs for the row-level ledger operations.

use serde::{Deserialize, Serialize};

/// Default page size for list operations
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Input for creating an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountParams {
    pub owner: String,
    pub balance: i64,
    pub currency: String,
}

impl CreateAccountParams {
    pub fn new(owner: impl Into<String>, balance: i64, currency: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            balance,
            currency: currency.into(),
        }
    }
}

/// Input for overwriting an account balance.
///
/// Only for administrative collaborators; transfers go through signed deltas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdateAccountParams {
    pub id: i64,
    pub balance: i64,
}

/// LIMIT/OFFSET paging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    pub limit: i64,
    pub offset: i64,
}

impl ListParams {
    /// Negative values are clamped to zero
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.max(0),
            offset: offset.max(0),
        }
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, 0)
    }
}

/// Entries of one account
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListEntriesParams {
    pub account_id: i64,
    pub page: ListParams,
}

/// Transfers leaving `from_account_id` or arriving at `to_account_id`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListTransfersParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub page: ListParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_clamp() {
        let page = ListParams::new(-5, -1);
        assert_eq!(page, ListParams { limit: 0, offset: 0 });

        assert_eq!(ListParams::default().limit, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_create_account_params() {
        let params = CreateAccountParams::new("alice", 100, "EUR");
        assert_eq!(params.owner, "alice");
        assert_eq!(params.balance, 100);
        assert_eq!(params.currency, "EUR");
    }
}
