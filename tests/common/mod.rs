//! Common test utilities

#![allow(dead_code)]

use simple_bank::domain::CreateAccountParams;
use simple_bank::random::RandomData;
use simple_bank::{Account, Store};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

const SCHEMA: &str = include_str!("../../migrations/0001_init.sql");

/// Advisory lock key serializing schema setup across test binaries
const SCHEMA_LOCK_KEY: i64 = 0x5b_a4_c0_01;

/// Connect to the test database and make sure the ledger tables exist.
///
/// Tables are not truncated: tests run in parallel and only look at the
/// accounts they create themselves.
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(12)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    let mut tx = pool.begin().await.expect("Failed to begin transaction");

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await
        .expect("Failed to take schema lock");

    (&mut *tx)
        .execute(SCHEMA)
        .await
        .expect("Failed to apply schema");

    tx.commit().await.expect("Failed to commit transaction");

    pool
}

pub async fn setup_store() -> Store {
    Store::new(setup_test_db().await)
}

/// Create an account with random owner and currency
pub async fn create_account(store: &Store, balance: i64) -> Account {
    let mut random = RandomData::new();
    let params = CreateAccountParams::new(random.owner(), balance, random.currency());

    let account = store
        .ledger()
        .await
        .expect("Failed to acquire connection")
        .create_account(&params)
        .await
        .expect("Failed to create account");

    assert_eq!(account.owner, params.owner);
    assert_eq!(account.balance, balance);
    assert_eq!(account.currency, params.currency);
    assert!(account.id > 0);

    account
}

/// Create an account with a random balance
pub async fn create_random_account(store: &Store) -> Account {
    let balance = RandomData::new().money();
    create_account(store, balance).await
}

pub async fn balance_of(store: &Store, account_id: i64) -> i64 {
    store
        .ledger()
        .await
        .unwrap()
        .get_account(account_id)
        .await
        .unwrap()
        .balance
}

/// Transfers in either direction between two accounts
pub async fn count_transfers_between(pool: &PgPool, a: i64, b: i64) -> i64 {
    sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM transfers
        WHERE (from_account_id = $1 AND to_account_id = $2)
           OR (from_account_id = $2 AND to_account_id = $1)
        "#,
    )
    .bind(a)
    .bind(b)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_entries(pool: &PgPool, account_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM entries WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
