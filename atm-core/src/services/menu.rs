//! Menu controller - the login/menu loop driving a console session
//!
//! ```text
//!   login ──admin──> admin menu ──4──┐
//!     ^  └──user───> user menu ───4──┤
//!     └──────────────────────────────┘
//! ```
//!
//! Both menus are closed loops: anything other than a listed choice prints a
//! message and re-prompts. Only the logout choice leaves a menu.

use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};
use crate::domain::{parse_amount, Account, Role};
use crate::ports::{Terminal, Tone};
use crate::services::logging::{record, LogEvent, LoggingService};
use crate::services::{AdminService, AuthService, TellerService, Withdrawal};
use crate::AtmContext;

const USER_MENU: [&str; 4] = ["1. Check Balance", "2. Deposit", "3. Withdraw", "4. Logout"];
const ADMIN_MENU: [&str; 4] = ["1. Add User", "2. Delete User", "3. View All Users", "4. Logout"];

/// Drives login and the role-specific menus over a [`Terminal`]
pub struct MenuController<'a> {
    auth: &'a AuthService,
    teller: &'a TellerService,
    admin: &'a AdminService,
    logger: Option<&'a LoggingService>,
    terminal: &'a mut dyn Terminal,
}

impl<'a> MenuController<'a> {
    pub fn new(ctx: &'a AtmContext, terminal: &'a mut dyn Terminal) -> Self {
        Self {
            auth: &ctx.auth_service,
            teller: &ctx.teller_service,
            admin: &ctx.admin_service,
            logger: ctx.logger.as_deref(),
            terminal,
        }
    }

    /// Authenticate, run the matching menu, and start over after logout.
    ///
    /// Never returns `Ok`. It ends only when the terminal or the store fails;
    /// [`Error::InputClosed`] is the normal way out.
    pub fn run(&mut self) -> Result<()> {
        record(self.logger, LogEvent::new("session_started"));
        loop {
            let account = self.auth.login_prompt(&mut *self.terminal)?;
            self.run_session(&account)?;
        }
    }

    /// Dispatch one signed-in account to its menu until it logs out
    pub fn run_session(&mut self, account: &Account) -> Result<()> {
        match account.role() {
            Role::Admin => self.admin_menu()?,
            Role::User => self.user_menu(&account.username)?,
        }
        record(self.logger, LogEvent::new("logout"));
        Ok(())
    }

    fn show_menu(&mut self, title: &str, items: &[&str]) {
        self.terminal.write_line(Tone::Plain, "");
        self.terminal.write_line(Tone::Heading, title);
        for item in items {
            self.terminal.write_line(Tone::Plain, item);
        }
    }

    fn user_menu(&mut self, username: &str) -> Result<()> {
        loop {
            self.show_menu("=== User Menu ===", &USER_MENU);
            let choice = self.terminal.read_line("Enter choice")?;

            match choice.trim() {
                "1" => {
                    let balance = self.teller.balance(username)?;
                    self.terminal
                        .write_line(Tone::Plain, &format!("Your balance: ${:.2}", balance));
                }
                "2" => {
                    let Some(amount) = self.read_amount("Deposit amount ($)", "deposit")? else {
                        continue;
                    };
                    match self.teller.deposit(username, amount) {
                        Ok(()) => {
                            record(
                                self.logger,
                                LogEvent::new("deposit_completed").with_command("deposit"),
                            );
                            self.terminal.write_line(Tone::Success, "Deposit successful!");
                        }
                        Err(Error::InvalidAmount(_)) => {
                            self.reject_amount("deposit", "out of range")
                        }
                        Err(e) => return Err(e),
                    }
                }
                "3" => {
                    let Some(amount) = self.read_amount("Withdraw amount ($)", "withdraw")? else {
                        continue;
                    };
                    match self.teller.withdraw(username, amount) {
                        Ok(Withdrawal::Completed) => {
                            record(
                                self.logger,
                                LogEvent::new("withdrawal_completed").with_command("withdraw"),
                            );
                            self.terminal.write_line(Tone::Success, "Withdrawal successful!");
                        }
                        Ok(Withdrawal::InsufficientFunds) => {
                            record(
                                self.logger,
                                LogEvent::new("withdrawal_rejected").with_command("withdraw"),
                            );
                            self.terminal.write_line(Tone::Error, "Insufficient funds!");
                        }
                        Err(Error::InvalidAmount(_)) => {
                            self.reject_amount("withdraw", "out of range")
                        }
                        Err(e) => return Err(e),
                    }
                }
                "4" => return Ok(()),
                _ => self.terminal.write_line(Tone::Warning, "Invalid choice!"),
            }
        }
    }

    fn admin_menu(&mut self) -> Result<()> {
        loop {
            self.show_menu("=== Admin Menu ===", &ADMIN_MENU);
            let choice = self.terminal.read_line("Enter choice")?;

            match choice.trim() {
                "1" => {
                    let username = self.terminal.read_line("New username")?;
                    let secret = self.terminal.read_secret("New password")?;
                    if self.admin.add_user(&username, &secret)? {
                        record(self.logger, LogEvent::new("user_added").with_command("add_user"));
                        self.terminal.write_line(Tone::Success, "User added successfully!");
                    } else {
                        record(
                            self.logger,
                            LogEvent::new("user_add_rejected").with_command("add_user"),
                        );
                        self.terminal.write_line(Tone::Error, "Username already exists!");
                    }
                }
                "2" => {
                    let username = self.terminal.read_line("Username to delete")?;
                    if self.admin.delete_user(&username)? {
                        record(
                            self.logger,
                            LogEvent::new("user_deleted").with_command("delete_user"),
                        );
                        self.terminal.write_line(Tone::Success, "User deleted successfully!");
                    } else {
                        record(
                            self.logger,
                            LogEvent::new("user_delete_missed").with_command("delete_user"),
                        );
                        self.terminal.write_line(Tone::Error, "User not found!");
                    }
                }
                "3" => {
                    let users = self.admin.list_users()?;
                    record(self.logger, LogEvent::new("users_listed").with_command("list_users"));
                    self.terminal.write_line(Tone::Plain, "");
                    self.terminal.write_line(Tone::Heading, "=== All Users ===");
                    for user in &users {
                        self.terminal.write_line(Tone::Plain, &user.listing_line());
                    }
                }
                "4" => return Ok(()),
                _ => self
                    .terminal
                    .write_line(Tone::Warning, "Invalid choice! Please enter 1-4"),
            }
        }
    }

    /// Read an amount; a malformed one is reported and yields `None`
    fn read_amount(&mut self, prompt: &str, command: &str) -> Result<Option<Decimal>> {
        let input = self.terminal.read_line(prompt)?;
        match parse_amount(&input) {
            Ok(amount) => Ok(Some(amount)),
            Err(Error::InvalidAmount(_)) => {
                self.reject_amount(command, "unparseable amount");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn reject_amount(&mut self, command: &str, reason: &str) {
        record(
            self.logger,
            LogEvent::new("invalid_amount")
                .with_command(command)
                .with_error(reason),
        );
        self.terminal.write_line(Tone::Error, "Invalid amount!");
    }
}
