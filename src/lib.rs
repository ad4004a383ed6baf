//! simple_bank Library
//!
//! Money transfers over a PostgreSQL ledger. [`Store::transfer`] writes a
//! transfer, its two entries and both balance changes in one transaction,
//! taking account row locks in ascending id order so concurrent transfers
//! over the same accounts do not deadlock.

pub mod config;
pub mod db;
pub mod domain;
pub mod ledger;
pub mod random;
pub mod store;

mod error;

pub use config::Config;
pub use domain::{Account, Amount, AmountError, Entry, Transfer, TransferRequest, TransferResult};
pub use error::{StoreError, StoreResult};
pub use ledger::{Ledger, LedgerWriter};
pub use store::Store;
