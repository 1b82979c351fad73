//! Core domain entities
//!
//! Pure data structures and validation logic - no I/O.

mod account;
mod amount;
pub mod credential;
pub mod result;

pub use account::{Account, AccountSummary, Role};
pub use amount::{max_ledger_amount, parse_amount, within_ledger_range};
