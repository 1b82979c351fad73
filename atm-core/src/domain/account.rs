//! Account domain model

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A row of the `users` table: one identity, its credential digest,
/// its balance and its role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    /// SHA-256 hex digest of the secret (see [`crate::domain::credential`])
    pub credential_hash: String,
    pub balance: Decimal,
    pub is_admin: bool,
}

impl Account {
    pub fn role(&self) -> Role {
        Role::from_flag(self.is_admin)
    }

    /// Equality-only comparison of a candidate digest against the stored one
    pub fn credential_matches(&self, digest: &str) -> bool {
        self.credential_hash == digest
    }
}

/// Listing projection of an account (no credential digest)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: i64,
    pub username: String,
    pub balance: Decimal,
    pub is_admin: bool,
}

impl AccountSummary {
    pub fn role(&self) -> Role {
        Role::from_flag(self.is_admin)
    }

    /// Render one line of the admin user listing
    pub fn listing_line(&self) -> String {
        let balance = format!("{:.2}", self.balance);
        format!(
            "ID: {} | Username: {:<15} | Balance: ${:<10} | Role: {}",
            self.id,
            self.username,
            balance,
            self.role()
        )
    }
}

impl From<Account> for AccountSummary {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            balance: account.balance,
            is_admin: account.is_admin,
        }
    }
}

/// Administrative vs. standard capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn from_flag(is_admin: bool) -> Self {
        if is_admin {
            Role::Admin
        } else {
            Role::User
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("Admin"),
            Role::User => f.write_str("User"),
        }
    }
}
