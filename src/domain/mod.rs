//! Domain module
//!
//! Ledger rows, validated amounts and the transfer request/result types.

pub mod amount;
pub mod models;
pub mod params;
pub mod transfer;

pub use amount::{Amount, AmountError};
pub use models::{Account, Entry, Transfer};
pub use params::{
    CreateAccountParams, ListEntriesParams, ListParams, ListTransfersParams, UpdateAccountParams,
    DEFAULT_PAGE_SIZE,
};
pub use transfer::{TransferRequest, TransferResult};
