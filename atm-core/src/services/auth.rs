//! Authentication service - credential checks and the login prompt

use std::sync::Arc;

use crate::domain::credential::hash_secret;
use crate::domain::result::Result;
use crate::domain::Account;
use crate::ports::{AccountRepository, Terminal, Tone};
use crate::services::logging::{record, LogEvent, LoggingService};

/// Verifies identity/secret pairs against the account store
pub struct AuthService {
    repository: Arc<dyn AccountRepository>,
    logger: Option<Arc<LoggingService>>,
}

impl AuthService {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        logger: Option<Arc<LoggingService>>,
    ) -> Self {
        Self { repository, logger }
    }

    /// Return the account if `secret` hashes to its stored digest
    pub fn authenticate(&self, username: &str, secret: &str) -> Result<Option<Account>> {
        let digest = hash_secret(secret);
        let account = self.repository.find_by_username(username)?;
        Ok(account.filter(|a| a.credential_matches(&digest)))
    }

    /// Prompt until a valid identity/secret pair is entered.
    ///
    /// There is no attempt limit and no backoff. Unknown usernames and wrong
    /// secrets get the same message. The loop only ends early if the terminal
    /// fails.
    pub fn login_prompt(&self, terminal: &mut dyn Terminal) -> Result<Account> {
        loop {
            terminal.write_line(Tone::Plain, "");
            terminal.write_line(Tone::Heading, "=== ATM Login ===");
            let username = terminal.read_line("Username")?;
            let secret = terminal.read_secret("Password")?;

            if let Some(account) = self.authenticate(&username, &secret)? {
                let role = account.role().to_string().to_lowercase();
                record(
                    self.logger.as_deref(),
                    LogEvent::new("login_succeeded").with_command(role),
                );
                return Ok(account);
            }

            record(self.logger.as_deref(), LogEvent::new("login_failed"));
            terminal.write_line(Tone::Error, "Invalid credentials. Try again.");
        }
    }
}
