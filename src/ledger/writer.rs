//! Ledger writes used by a transfer
//!
//! The three writes a transfer performs, behind a trait so the coordinator's
//! step sequence does not depend on a live connection.

use std::ops::DerefMut;

use async_trait::async_trait;
use sqlx::PgConnection;

use super::Ledger;
use crate::domain::{Account, Entry, Transfer};
use crate::error::StoreResult;

#[async_trait]
pub trait LedgerWriter: Send {
    async fn create_transfer(
        &mut self,
        from_account_id: i64,
        to_account_id: i64,
        amount: i64,
    ) -> StoreResult<Transfer>;

    async fn create_entry(&mut self, account_id: i64, amount: i64) -> StoreResult<Entry>;

    /// Apply a signed delta to a single account, returning its post-state
    async fn add_account_balance(&mut self, account_id: i64, delta: i64) -> StoreResult<Account>;
}

#[async_trait]
impl<C> LedgerWriter for Ledger<C>
where
    C: DerefMut<Target = PgConnection> + Send,
{
    async fn create_transfer(
        &mut self,
        from_account_id: i64,
        to_account_id: i64,
        amount: i64,
    ) -> StoreResult<Transfer> {
        Ledger::create_transfer(self, from_account_id, to_account_id, amount).await
    }

    async fn create_entry(&mut self, account_id: i64, amount: i64) -> StoreResult<Entry> {
        Ledger::create_entry(self, account_id, amount).await
    }

    async fn add_account_balance(&mut self, account_id: i64, delta: i64) -> StoreResult<Account> {
        Ledger::add_account_balance(self, account_id, delta).await
    }
}
