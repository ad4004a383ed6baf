//! Ledger Repository
//!
//! Row-level queries for accounts, entries and transfers.
//! A `Ledger` runs on whatever connection it wraps: a pooled connection for
//! standalone reads and writes, or the connection of an open transaction when
//! the transfer coordinator drives it.

use std::ops::DerefMut;

use sqlx::PgConnection;

use crate::domain::{
    Account, CreateAccountParams, Entry, ListEntriesParams, ListParams, ListTransfersParams,
    Transfer, UpdateAccountParams,
};
use crate::error::{StoreError, StoreResult};

/// Row-level data access bound to one connection
#[derive(Debug)]
pub struct Ledger<C> {
    conn: C,
}

impl<C> Ledger<C>
where
    C: DerefMut<Target = PgConnection>,
{
    /// Bind a ledger to a connection.
    ///
    /// Pass `&mut *tx` to run every call inside an open transaction.
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    pub async fn create_account(&mut self, params: &CreateAccountParams) -> StoreResult<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (owner, balance, currency)
            VALUES ($1, $2, $3)
            RETURNING id, owner, balance, currency, created_at
            "#,
        )
        .bind(&params.owner)
        .bind(params.balance)
        .bind(&params.currency)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(account)
    }

    pub async fn get_account(&mut self, id: i64) -> StoreResult<Account> {
        sqlx::query_as::<_, Account>(
            "SELECT id, owner, balance, currency, created_at FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| StoreError::not_found("account", id))
    }

    /// Read an account and hold its row lock until the transaction ends.
    ///
    /// `FOR NO KEY UPDATE` so concurrent inserts of entries and transfers that
    /// reference the account through a foreign key are not blocked.
    pub async fn get_account_for_update(&mut self, id: i64) -> StoreResult<Account> {
        sqlx::query_as::<_, Account>(
            "SELECT id, owner, balance, currency, created_at FROM accounts WHERE id = $1 FOR NO KEY UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| StoreError::not_found("account", id))
    }

    pub async fn list_accounts(&mut self, page: ListParams) -> StoreResult<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, owner, balance, currency, created_at FROM accounts
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(accounts)
    }

    /// Overwrite an account balance
    pub async fn update_account(&mut self, params: &UpdateAccountParams) -> StoreResult<Account> {
        sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts SET balance = $2
            WHERE id = $1
            RETURNING id, owner, balance, currency, created_at
            "#,
        )
        .bind(params.id)
        .bind(params.balance)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| StoreError::not_found("account", params.id))
    }

    /// Apply a signed delta to one account and return its new state.
    ///
    /// Takes the row lock on that single account.
    pub async fn add_account_balance(&mut self, id: i64, delta: i64) -> StoreResult<Account> {
        sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts SET balance = balance + $2
            WHERE id = $1
            RETURNING id, owner, balance, currency, created_at
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| StoreError::not_found("account", id))
    }

    pub async fn delete_account(&mut self, id: i64) -> StoreResult<()> {
        let rows_affected = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(StoreError::not_found("account", id));
        }

        Ok(())
    }

    // =========================================================================
    // Entries
    // =========================================================================

    pub async fn create_entry(&mut self, account_id: i64, amount: i64) -> StoreResult<Entry> {
        let entry = sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO entries (account_id, amount)
            VALUES ($1, $2)
            RETURNING id, account_id, amount, created_at
            "#,
        )
        .bind(account_id)
        .bind(amount)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(entry)
    }

    pub async fn get_entry(&mut self, id: i64) -> StoreResult<Entry> {
        sqlx::query_as::<_, Entry>(
            "SELECT id, account_id, amount, created_at FROM entries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| StoreError::not_found("entry", id))
    }

    pub async fn list_entries(&mut self, params: ListEntriesParams) -> StoreResult<Vec<Entry>> {
        let entries = sqlx::query_as::<_, Entry>(
            r#"
            SELECT id, account_id, amount, created_at FROM entries
            WHERE account_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(params.account_id)
        .bind(params.page.limit)
        .bind(params.page.offset)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(entries)
    }

    // =========================================================================
    // Transfers
    // =========================================================================

    pub async fn create_transfer(
        &mut self,
        from_account_id: i64,
        to_account_id: i64,
        amount: i64,
    ) -> StoreResult<Transfer> {
        let transfer = sqlx::query_as::<_, Transfer>(
            r#"
            INSERT INTO transfers (from_account_id, to_account_id, amount)
            VALUES ($1, $2, $3)
            RETURNING id, from_account_id, to_account_id, amount, created_at
            "#,
        )
        .bind(from_account_id)
        .bind(to_account_id)
        .bind(amount)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(transfer)
    }

    pub async fn get_transfer(&mut self, id: i64) -> StoreResult<Transfer> {
        sqlx::query_as::<_, Transfer>(
            r#"
            SELECT id, from_account_id, to_account_id, amount, created_at
            FROM transfers WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| StoreError::not_found("transfer", id))
    }

    /// Transfers leaving `from_account_id` or arriving at `to_account_id`
    pub async fn list_transfers(
        &mut self,
        params: ListTransfersParams,
    ) -> StoreResult<Vec<Transfer>> {
        let transfers = sqlx::query_as::<_, Transfer>(
            r#"
            SELECT id, from_account_id, to_account_id, amount, created_at
            FROM transfers
            WHERE from_account_id = $1 OR to_account_id = $2
            ORDER BY id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(params.from_account_id)
        .bind(params.to_account_id)
        .bind(params.page.limit)
        .bind(params.page.offset)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(transfers)
    }
}
