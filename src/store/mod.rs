//! Store module
//!
//! The transfer coordinator: atomic, deadlock-free money transfers on top of
//! the ledger. Balance row locks are always taken in ascending account-id
//! order (see [`lock_order`]).

mod coordinator;
mod order;

pub use coordinator::Store;
pub use order::{lock_order, BalanceDelta};
