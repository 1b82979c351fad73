//! Admin service - account management

use std::sync::Arc;

use crate::domain::result::Result;
use crate::domain::AccountSummary;
use crate::ports::AccountRepository;

/// Administrative account operations
pub struct AdminService {
    repository: Arc<dyn AccountRepository>,
}

impl AdminService {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    /// Create a regular (non-admin) account. `false` means the name is taken.
    pub fn add_user(&self, username: &str, secret: &str) -> Result<bool> {
        self.repository.create_account(username, secret, false)
    }

    /// `false` means no such account existed
    pub fn delete_user(&self, username: &str) -> Result<bool> {
        self.repository.delete_account(username)
    }

    pub fn list_users(&self) -> Result<Vec<AccountSummary>> {
        self.repository.list_accounts()
    }
}
