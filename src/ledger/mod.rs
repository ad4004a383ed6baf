//! Ledger module
//!
//! Row-level data access for accounts, entries and transfers.

mod repository;
mod writer;

pub use repository::Ledger;
pub use writer::LedgerWriter;
