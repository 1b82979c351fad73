//! Teller service - balance, deposit and withdrawal for a signed-in user

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::within_ledger_range;
use crate::ports::AccountRepository;

/// Outcome of a withdrawal request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Withdrawal {
    Completed,
    InsufficientFunds,
}

/// User-facing balance operations
pub struct TellerService {
    repository: Arc<dyn AccountRepository>,
}

impl TellerService {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    /// Current balance, re-read from the store
    pub fn balance(&self, username: &str) -> Result<Decimal> {
        self.repository
            .find_by_username(username)?
            .map(|a| a.balance)
            .ok_or_else(|| Error::not_found(format!("account {}", username)))
    }

    /// Credit `amount` with no check on its sign.
    ///
    /// A negative amount goes through and acts as a withdrawal that skips the
    /// sufficiency check. Only a resulting balance the ledger cannot hold is
    /// refused, as [`Error::InvalidAmount`].
    pub fn deposit(&self, username: &str, amount: Decimal) -> Result<()> {
        let balance = self.balance(username)?;
        ensure_in_range(balance, amount)?;
        self.repository.adjust_balance(username, amount)
    }

    /// Debit `amount` if the current balance covers it.
    ///
    /// The balance read and the debit are separate store calls with nothing
    /// held in between. A second writer could slip in after the check and
    /// drive the balance negative. Single-session use never hits this.
    pub fn withdraw(&self, username: &str, amount: Decimal) -> Result<Withdrawal> {
        let balance = self.balance(username)?;
        if balance >= amount {
            ensure_in_range(balance, -amount)?;
            self.repository.adjust_balance(username, -amount)?;
            Ok(Withdrawal::Completed)
        } else {
            Ok(Withdrawal::InsufficientFunds)
        }
    }
}

fn ensure_in_range(balance: Decimal, delta: Decimal) -> Result<()> {
    match balance.checked_add(delta) {
        Some(total) if within_ledger_range(total) => Ok(()),
        _ => Err(Error::InvalidAmount(delta.abs().to_string())),
    }
}
