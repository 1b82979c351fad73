//! DuckDB repository implementation

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use duckdb::{params, Connection};
use rust_decimal::Decimal;

use crate::domain::credential::{hash_secret, SEED_ADMIN_SECRET, SEED_ADMIN_USERNAME};
use crate::domain::result::{Error, Result};
use crate::domain::{Account, AccountSummary};
use crate::migrations::MIGRATIONS;
use crate::ports::AccountRepository;
use crate::services::{MigrationResult, MigrationService};

/// Check if an error message comes from a UNIQUE / PRIMARY KEY violation
///
/// Other constraint errors (NOT NULL, CHECK) are not duplicates.
fn is_unique_violation(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    lower.contains("duplicate key")
        || lower.contains("violates unique constraint")
        || lower.contains("violates primary key constraint")
}

fn parse_balance(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw).map_err(|e| Error::database(format!("Bad balance {:?}: {}", raw, e)))
}

/// DuckDB repository implementation
///
/// Holds a single connection for the life of the process. Each operation
/// takes the connection lock for its own statement(s) and releases it when
/// the guard drops, on success and on error alike.
pub struct DuckDbRepository {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl DuckDbRepository {
    /// Open (or create) the database file
    pub fn new(db_path: &Path) -> Result<Self> {
        // Extension autoloading stays off: nothing here needs network-fetched extensions
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = Connection::open_with_flags(db_path, config)?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| Error::database(format!("Lock poisoned: {}", e)))
    }

    /// Run pending migrations, then seed the admin account if it is missing.
    ///
    /// Returns what the migration step did so the caller can report it.
    pub fn setup(&self) -> Result<MigrationResult> {
        let migrations = self.run_migrations()?;
        self.seed_admin()?;
        Ok(migrations)
    }

    fn run_migrations(&self) -> Result<MigrationResult> {
        let conn = self.conn()?;
        MigrationService::new(&conn, MIGRATIONS).run_pending()
    }

    /// Insert the well-known admin account unless the username is taken
    fn seed_admin(&self) -> Result<()> {
        self.create_account(SEED_ADMIN_USERNAME, SEED_ADMIN_SECRET, true)?;
        Ok(())
    }

    /// Number of rows in the users table
    pub fn account_count(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl AccountRepository for DuckDbRepository {
    fn initialize(&self) -> Result<()> {
        self.setup().map(|_| ())
    }

    fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, username, password, balance::VARCHAR, is_admin
             FROM users WHERE username = ?",
        )?;

        let row = stmt.query_row([username], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, bool>(4)?,
            ))
        });

        match row {
            Ok((id, username, credential_hash, balance, is_admin)) => Ok(Some(Account {
                id,
                username,
                credential_hash,
                balance: parse_balance(&balance)?,
                is_admin,
            })),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn adjust_balance(&self, username: &str, delta: Decimal) -> Result<()> {
        let conn = self.conn()?;
        // Delta travels as text so the DECIMAL column never sees a float
        conn.execute(
            "UPDATE users SET balance = balance + CAST(? AS DECIMAL(18, 2)) WHERE username = ?",
            params![delta.to_string(), username],
        )?;
        Ok(())
    }

    fn create_account(&self, username: &str, secret: &str, is_admin: bool) -> Result<bool> {
        let conn = self.conn()?;
        let digest = hash_secret(secret);

        match conn.execute(
            "INSERT INTO users (username, password, is_admin) VALUES (?, ?, ?)",
            params![username, digest, is_admin],
        ) {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e.to_string()) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn delete_account(&self, username: &str) -> Result<bool> {
        let conn = self.conn()?;
        let affected = conn.execute("DELETE FROM users WHERE username = ?", [username])?;
        Ok(affected > 0)
    }

    fn list_accounts(&self) -> Result<Vec<AccountSummary>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, username, balance::VARCHAR, is_admin FROM users ORDER BY id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, bool>(3)?,
            ))
        })?;

        let mut accounts = Vec::new();
        for row in rows {
            let (id, username, balance, is_admin) = row?;
            accounts.push(AccountSummary {
                id,
                username,
                balance: parse_balance(&balance)?,
                is_admin,
            });
        }
        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_detection() {
        assert!(is_unique_violation(
            "Constraint Error: Duplicate key \"username: alice\" violates unique constraint."
        ));
        assert!(!is_unique_violation("IO Error: Could not set lock on file"));
    }

    #[test]
    fn test_other_constraint_errors_are_not_duplicates() {
        assert!(!is_unique_violation(
            "Constraint Error: NOT NULL constraint failed: users.password"
        ));
        assert!(!is_unique_violation("Constraint Error: CHECK constraint failed: users"));
    }

    #[test]
    fn test_not_null_failure_is_an_error_not_a_duplicate() {
        let repo = DuckDbRepository::new(Path::new(":memory:")).unwrap();
        repo.initialize().unwrap();

        let conn = repo.conn().unwrap();
        let err = conn
            .execute("INSERT INTO users (username, password) VALUES (?, NULL)", ["bob"])
            .unwrap_err();
        assert!(!is_unique_violation(&err.to_string()));
    }

    #[test]
    fn test_parse_balance() {
        assert_eq!(parse_balance("30.00").unwrap(), Decimal::new(30, 0));
        assert_eq!(parse_balance("-0.50").unwrap(), Decimal::new(-5, 1));
        assert!(parse_balance("n/a").is_err());
    }
}
