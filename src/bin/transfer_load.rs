//! Transfer Load Tool
//!
//! Seeds two random accounts and races alternating-direction transfers
//! between them. Balances must end where they started.
//!
//! Run with: cargo run --bin transfer_load --release -- --transfers 1000 --amount 10

use std::time::Instant;

use simple_bank::random::RandomData;
use simple_bank::{db, Config, Store, TransferRequest};
use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "simple_bank=debug,transfer_load=info".into());

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn arg_value(args: &[String], flag: &str) -> Option<i64> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config);

    let args: Vec<String> = std::env::args().collect();
    let transfer_count = arg_value(&args, "--transfers").unwrap_or(1000).max(1);
    let amount = arg_value(&args, "--amount").unwrap_or(10);

    tracing::info!("Connecting to database...");
    let pool = db::connect(&config).await?;
    db::verify_connection(&pool).await?;
    if !db::check_schema(&pool).await? {
        anyhow::bail!("Database schema incomplete; apply migrations/0001_init.sql");
    }

    let store = Store::new(pool.clone());
    let mut random = RandomData::new();

    let (account_a, account_b) = {
        let mut ledger = store.ledger().await?;
        let a = ledger.create_account(&random.account_params()).await?;
        let b = ledger.create_account(&random.account_params()).await?;
        (a, b)
    };

    tracing::info!(
        account_a = account_a.id,
        account_b = account_b.id,
        transfer_count,
        amount,
        "Starting transfer load"
    );

    let start = Instant::now();
    let mut tasks = JoinSet::new();

    for i in 0..transfer_count {
        let store = store.clone();
        let request = if i % 2 == 0 {
            TransferRequest::new(account_a.id, account_b.id, amount)
        } else {
            TransferRequest::new(account_b.id, account_a.id, amount)
        };
        tasks.spawn(async move { store.transfer(request).await });
    }

    let mut success_count = 0u64;
    let mut retryable_count = 0u64;
    let mut failure_count = 0u64;

    while let Some(joined) = tasks.join_next().await {
        match joined? {
            Ok(_) => success_count += 1,
            Err(e) if e.is_retryable() => {
                retryable_count += 1;
                tracing::warn!(error = %e, "Retryable transfer failure");
            }
            Err(e) => {
                failure_count += 1;
                tracing::error!(error = %e, "Transfer failed");
            }
        }
    }

    let elapsed = start.elapsed();
    let rate = success_count as f64 / elapsed.as_secs_f64();

    let mut ledger = store.ledger().await?;
    let final_a = ledger.get_account(account_a.id).await?;
    let final_b = ledger.get_account(account_b.id).await?;
    drop(ledger);

    println!("\n=== Transfer Load Results ===");
    println!("Total transfers: {}", transfer_count);
    println!("Successful: {}", success_count);
    println!("Retryable failures: {}", retryable_count);
    println!("Other failures: {}", failure_count);
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Rate: {:.0} transfers/sec", rate);
    println!(
        "Account {}: {} -> {}",
        account_a.id, account_a.balance, final_a.balance
    );
    println!(
        "Account {}: {} -> {}",
        account_b.id, account_b.balance, final_b.balance
    );

    pool.close().await;

    if final_a.balance + final_b.balance != account_a.balance + account_b.balance {
        anyhow::bail!("Balances not conserved");
    }

    Ok(())
}
