//! Transfer Coordinator
//!
//! Runs the writes of one transfer inside one database transaction.

use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{Amount, TransferRequest, TransferResult};
use crate::error::{StoreError, StoreResult};
use crate::ledger::{Ledger, LedgerWriter};

use super::order::lock_order;

/// Transfer coordinator over a connection pool.
///
/// Holds no state besides the pool; clones share it.
#[derive(Debug, Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Create a new Store with a database pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Row-level ledger access on a pooled connection, outside any transfer
    pub async fn ledger(&self) -> StoreResult<Ledger<PoolConnection<Postgres>>> {
        let conn = self.pool.acquire().await?;
        Ok(Ledger::new(conn))
    }

    // =========================================================================
    // transfer
    // =========================================================================

    /// Move money between two accounts atomically.
    ///
    /// Creates the transfer row, a debit and a credit entry, and applies both
    /// balance deltas in ascending account-id order, all in one transaction.
    /// On failure the transaction is rolled back and nothing is visible.
    ///
    /// Dropping the returned future before it completes rolls the
    /// transaction back as well. There is no retry here: when
    /// [`StoreError::is_retryable`] holds, the caller may submit the same
    /// request again, which creates a new transfer.
    #[tracing::instrument(
        name = "transfer",
        skip_all,
        fields(
            from = request.from_account_id,
            to = request.to_account_id,
            amount = request.amount
        )
    )]
    pub async fn transfer(&self, request: TransferRequest) -> StoreResult<TransferResult> {
        let amount = request.validate()?;

        let mut tx = self.pool.begin().await.map_err(StoreError::Begin)?;

        let outcome = {
            let mut ledger = Ledger::new(&mut *tx);
            execute_transfer(&mut ledger, &request, amount).await
        };

        match outcome {
            Ok(result) => {
                tx.commit().await.map_err(StoreError::Commit)?;
                tracing::debug!(
                    transfer_id = result.transfer.id,
                    from_balance = result.from_account.balance,
                    to_balance = result.to_account.balance,
                    "Transfer committed"
                );
                Ok(result)
            }
            Err(cause) => Err(rollback(tx, cause).await),
        }
    }
}

/// Roll back after a failed step, keeping the original cause
async fn rollback(tx: Transaction<'static, Postgres>, cause: StoreError) -> StoreError {
    match tx.rollback().await {
        Ok(()) => {
            tracing::warn!(error = %cause, "Transfer rolled back");
            cause
        }
        Err(rollback) => {
            tracing::error!(error = %cause, rollback_error = %rollback, "Transfer rollback failed");
            StoreError::Rollback {
                source: Box::new(cause),
                rollback,
            }
        }
    }
}

/// The fixed write sequence of a transfer.
///
/// The result is assembled from the rows each write returned, never from a
/// second read, so it reflects this transfer's own deltas.
pub(crate) async fn execute_transfer<L>(
    ledger: &mut L,
    request: &TransferRequest,
    amount: Amount,
) -> StoreResult<TransferResult>
where
    L: LedgerWriter,
{
    let transfer = ledger
        .create_transfer(request.from_account_id, request.to_account_id, amount.value())
        .await?;

    let from_entry = ledger
        .create_entry(request.from_account_id, amount.debit())
        .await?;
    let to_entry = ledger
        .create_entry(request.to_account_id, amount.credit())
        .await?;

    // Two single-row updates, lower account id first
    let [first, second] = lock_order(request, amount);
    let first_account = ledger
        .add_account_balance(first.account_id, first.delta)
        .await?;
    let second_account = ledger
        .add_account_balance(second.account_id, second.delta)
        .await?;

    let (from_account, to_account) = if first.account_id == request.from_account_id {
        (first_account, second_account)
    } else {
        (second_account, first_account)
    };

    Ok(TransferResult {
        transfer,
        from_account,
        to_account,
        from_entry,
        to_entry,
    })
}
