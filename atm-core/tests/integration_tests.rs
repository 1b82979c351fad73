//! Integration tests for the account store and services
//!
//! Every test runs against a real DuckDB file in a temporary directory.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::sync::Arc;

use rust_decimal::Decimal;
use tempfile::TempDir;

use atm_core::adapters::duckdb::DuckDbRepository;
use atm_core::domain::credential::{hash_secret, SEED_ADMIN_SECRET, SEED_ADMIN_USERNAME};
use atm_core::domain::max_ledger_amount;
use atm_core::ports::AccountRepository;
use atm_core::services::{AdminService, AuthService, TellerService, Withdrawal};
use atm_core::AtmContext;

// ============================================================================
// Test Helpers
// ============================================================================

/// Create a test repository with schema initialized and admin seeded
fn create_test_repo(temp_dir: &TempDir) -> Arc<DuckDbRepository> {
    let db_path = temp_dir.path().join("test.duckdb");
    let repo = DuckDbRepository::new(&db_path).expect("Failed to create repository");
    repo.initialize().expect("Failed to initialize store");
    Arc::new(repo)
}

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

// ============================================================================
// Initialization
// ============================================================================

#[test]
fn test_initialize_seeds_admin() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);

    let admin = repo.find_by_username(SEED_ADMIN_USERNAME).unwrap().unwrap();
    assert!(admin.is_admin);
    assert_eq!(admin.balance, Decimal::ZERO);
    assert_eq!(admin.credential_hash, hash_secret(SEED_ADMIN_SECRET));
}

#[test]
fn test_initialize_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);

    repo.initialize().unwrap();
    repo.initialize().unwrap();

    assert_eq!(repo.account_count().unwrap(), 1);
}

#[test]
fn test_reopening_file_keeps_accounts() {
    let temp_dir = TempDir::new().unwrap();
    {
        let repo = create_test_repo(&temp_dir);
        assert!(repo.create_account("alice", "pw1", false).unwrap());
        repo.adjust_balance("alice", cents(1250)).unwrap();
    }

    let repo = create_test_repo(&temp_dir);
    let alice = repo.find_by_username("alice").unwrap().unwrap();
    assert_eq!(alice.balance, cents(1250));
    assert_eq!(repo.account_count().unwrap(), 2);
}

// ============================================================================
// Account Store Operations
// ============================================================================

#[test]
fn test_create_then_find_returns_fresh_account() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);

    assert!(repo.create_account("alice", "pw1", false).unwrap());

    let alice = repo.find_by_username("alice").unwrap().unwrap();
    assert_eq!(alice.username, "alice");
    assert_eq!(alice.balance, Decimal::ZERO);
    assert!(!alice.is_admin);
    assert_eq!(alice.credential_hash, hash_secret("pw1"));
    assert_ne!(alice.credential_hash, "pw1", "Secret must not be stored in plaintext");
}

#[test]
fn test_create_admin_account() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);

    assert!(repo.create_account("root", "s3cret", true).unwrap());
    assert!(repo.find_by_username("root").unwrap().unwrap().is_admin);
}

#[test]
fn test_duplicate_create_reports_false() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);

    assert!(repo.create_account("alice", "pw1", false).unwrap());
    assert!(!repo.create_account("alice", "other", false).unwrap());

    let rows: Vec<_> = repo
        .list_accounts()
        .unwrap()
        .into_iter()
        .filter(|a| a.username == "alice")
        .collect();
    assert_eq!(rows.len(), 1, "Exactly one row for alice");

    // Original credential untouched
    let alice = repo.find_by_username("alice").unwrap().unwrap();
    assert_eq!(alice.credential_hash, hash_secret("pw1"));
}

#[test]
fn test_ids_are_assigned_in_insertion_order() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);

    repo.create_account("alice", "pw1", false).unwrap();
    repo.create_account("bob", "pw2", false).unwrap();

    let accounts = repo.list_accounts().unwrap();
    let names: Vec<_> = accounts.iter().map(|a| a.username.as_str()).collect();
    assert_eq!(names, vec!["admin", "alice", "bob"]);
    assert!(accounts[0].id < accounts[1].id);
    assert!(accounts[1].id < accounts[2].id);
}

#[test]
fn test_find_unknown_returns_none() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);

    assert!(repo.find_by_username("nobody").unwrap().is_none());
}

#[test]
fn test_adjust_balance_applies_delta() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);
    repo.create_account("alice", "pw1", false).unwrap();

    repo.adjust_balance("alice", cents(5000)).unwrap();
    repo.adjust_balance("alice", cents(-1999)).unwrap();

    let alice = repo.find_by_username("alice").unwrap().unwrap();
    assert_eq!(alice.balance, cents(3001));
}

#[test]
fn test_adjust_balance_unknown_user_is_noop() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);
    repo.create_account("alice", "pw1", false).unwrap();
    repo.adjust_balance("alice", cents(100)).unwrap();

    let before = repo.list_accounts().unwrap();
    repo.adjust_balance("ghost", cents(99999))
        .expect("Adjusting a missing account must not error");
    let after = repo.list_accounts().unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_delete_account() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);
    repo.create_account("alice", "pw1", false).unwrap();

    assert!(repo.delete_account("alice").unwrap());
    assert!(repo.find_by_username("alice").unwrap().is_none());
    assert!(!repo.delete_account("alice").unwrap(), "Second delete finds nothing");
}

#[test]
fn test_delete_unknown_reports_false_and_keeps_others() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);
    repo.create_account("alice", "pw1", false).unwrap();

    assert!(!repo.delete_account("nobody").unwrap());
    assert_eq!(repo.account_count().unwrap(), 2);
}

#[test]
fn test_username_reusable_after_delete() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);
    repo.create_account("alice", "pw1", false).unwrap();
    repo.adjust_balance("alice", cents(700)).unwrap();
    repo.delete_account("alice").unwrap();

    assert!(repo.create_account("alice", "pw2", false).unwrap());
    let alice = repo.find_by_username("alice").unwrap().unwrap();
    assert_eq!(alice.balance, Decimal::ZERO, "Hard delete leaves nothing behind");
    assert_eq!(alice.credential_hash, hash_secret("pw2"));
}

// ============================================================================
// Services
// ============================================================================

#[test]
fn test_authenticate() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);
    let auth = AuthService::new(repo.clone(), None);

    let admin = auth.authenticate("admin", "admin123").unwrap().unwrap();
    assert!(admin.is_admin);

    assert!(auth.authenticate("admin", "wrong").unwrap().is_none());
    assert!(auth.authenticate("nobody", "admin123").unwrap().is_none());
}

#[test]
fn test_withdraw_within_balance() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);
    repo.create_account("alice", "pw1", false).unwrap();
    let teller = TellerService::new(repo.clone());

    for (balance, amount) in [(5000, 2000), (3000, 3000), (100, 1)] {
        repo.adjust_balance("alice", -teller.balance("alice").unwrap()).unwrap();
        teller.deposit("alice", cents(balance)).unwrap();

        assert_eq!(teller.withdraw("alice", cents(amount)).unwrap(), Withdrawal::Completed);
        assert_eq!(teller.balance("alice").unwrap(), cents(balance - amount));
    }
}

#[test]
fn test_withdraw_over_balance_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);
    repo.create_account("alice", "pw1", false).unwrap();
    let teller = TellerService::new(repo.clone());
    teller.deposit("alice", cents(3000)).unwrap();

    assert_eq!(
        teller.withdraw("alice", cents(10000)).unwrap(),
        Withdrawal::InsufficientFunds
    );
    assert_eq!(
        teller.withdraw("alice", cents(3001)).unwrap(),
        Withdrawal::InsufficientFunds
    );
    assert_eq!(teller.balance("alice").unwrap(), cents(3000));
}

#[test]
fn test_negative_deposit_is_not_validated() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);
    repo.create_account("alice", "pw1", false).unwrap();
    let teller = TellerService::new(repo.clone());

    teller.deposit("alice", cents(-2500)).unwrap();
    assert_eq!(teller.balance("alice").unwrap(), cents(-2500));
}

#[test]
fn test_deposit_past_ledger_limit_is_refused() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);
    repo.create_account("alice", "pw1", false).unwrap();
    let teller = TellerService::new(repo.clone());

    teller.deposit("alice", max_ledger_amount()).unwrap();
    assert!(matches!(
        teller.deposit("alice", cents(1)),
        Err(atm_core::Error::InvalidAmount(_))
    ));
    assert!(matches!(
        teller.withdraw("alice", -cents(1)),
        Err(atm_core::Error::InvalidAmount(_))
    ));
    assert_eq!(teller.balance("alice").unwrap(), max_ledger_amount());

    // Moving back inside the range still works
    assert_eq!(teller.withdraw("alice", cents(1)).unwrap(), Withdrawal::Completed);
}

#[test]
fn test_balance_of_missing_account_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);
    let teller = TellerService::new(repo);

    assert!(matches!(teller.balance("ghost"), Err(atm_core::Error::NotFound(_))));
}

#[test]
fn test_admin_service_manages_regular_users() {
    let temp_dir = TempDir::new().unwrap();
    let repo = create_test_repo(&temp_dir);
    let admin = AdminService::new(repo.clone());

    assert!(admin.add_user("alice", "pw1").unwrap());
    assert!(!admin.add_user("alice", "pw1").unwrap());
    assert!(!admin.add_user("admin", "x").unwrap());

    let users = admin.list_users().unwrap();
    let alice = users.iter().find(|u| u.username == "alice").unwrap();
    assert!(!alice.is_admin);
    assert_eq!(alice.role().to_string(), "User");

    assert!(admin.delete_user("alice").unwrap());
    assert!(!admin.delete_user("alice").unwrap());
}

// ============================================================================
// Context
// ============================================================================

#[test]
fn test_context_opens_default_database_file() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = AtmContext::new(temp_dir.path()).unwrap();

    assert!(ctx.repository.db_path().ends_with(&ctx.config.database_file));
    assert!(ctx.repository.db_path().exists());
    assert!(ctx
        .auth_service
        .authenticate(SEED_ADMIN_USERNAME, SEED_ADMIN_SECRET)
        .unwrap()
        .is_some());
}

#[test]
fn test_context_records_schema_migration_once() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = AtmContext::new(temp_dir.path()).unwrap();
    let Some(logger) = ctx.logger.clone() else {
        // Event logging disabled through the environment
        return;
    };
    drop(ctx);

    let migrated = |logger: &atm_core::LoggingService| {
        logger
            .get_recent(100)
            .unwrap()
            .into_iter()
            .filter(|e| e.event == "schema_migrated")
            .count()
    };
    assert_eq!(migrated(&logger), 1);

    // Reopening applies nothing new
    drop(logger);
    let ctx = AtmContext::new(temp_dir.path()).unwrap();
    let logger = ctx.logger.clone().unwrap();
    assert_eq!(migrated(&logger), 1);
}
