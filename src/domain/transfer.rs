//! Transfer request and result
//!
//! The input and output of the transfer coordinator.

use serde::{Deserialize, Serialize};

use super::{Account, Amount, Entry, Transfer};
use crate::error::StoreError;

/// Request to move `amount` minor units between two accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

impl TransferRequest {
    pub fn new(from_account_id: i64, to_account_id: i64, amount: i64) -> Self {
        Self {
            from_account_id,
            to_account_id,
            amount,
        }
    }

    /// Check the preconditions that do not need the database.
    ///
    /// Self-transfers are rejected.
    pub fn validate(&self) -> Result<Amount, StoreError> {
        let amount = Amount::new(self.amount).map_err(|_| StoreError::InvalidAmount(self.amount))?;

        if self.from_account_id == self.to_account_id {
            return Err(StoreError::SameAccountTransfer(self.from_account_id));
        }

        Ok(amount)
    }
}

/// Every row written by one transfer, as this transfer's transaction left them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    pub transfer: Transfer,
    pub from_account: Account,
    pub to_account: Account,
    pub from_entry: Entry,
    pub to_entry: Entry,
}
