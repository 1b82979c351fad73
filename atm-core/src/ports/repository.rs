//! Repository port - account store abstraction

use rust_decimal::Decimal;

use crate::domain::result::Result;
use crate::domain::{Account, AccountSummary};

/// Persistent account ledger
///
/// Every call is its own unit of work. Nothing spans two calls, so a caller
/// that reads a balance and then adjusts it can race with another writer.
pub trait AccountRepository: Send + Sync {
    /// Ensure the schema exists and the admin account is seeded.
    ///
    /// Safe to call any number of times.
    fn initialize(&self) -> Result<()>;

    /// Look up an account by its unique username
    fn find_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Apply `balance += delta` to the named account.
    ///
    /// An unknown username is a silent no-op.
    fn adjust_balance(&self, username: &str, delta: Decimal) -> Result<()>;

    /// Hash `secret` and insert a new account.
    ///
    /// Returns `false` if the username is already taken.
    fn create_account(&self, username: &str, secret: &str, is_admin: bool) -> Result<bool>;

    /// Hard-delete an account. Returns whether a row was removed.
    fn delete_account(&self, username: &str) -> Result<bool>;

    /// Snapshot of every account in insertion order
    fn list_accounts(&self) -> Result<Vec<AccountSummary>>;
}
