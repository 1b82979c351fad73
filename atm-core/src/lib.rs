//! ATM Core - account ledger and console session logic
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Core entities (Account, Role) and pure helpers
//! - **ports**: Traits for the account store and the interactive terminal
//! - **services**: Authentication, teller/admin operations, the menu loop
//! - **adapters**: Concrete implementations (DuckDB)
//!
//! The seeded administrator uses the well-known credentials
//! `admin` / `admin123`. Change them before letting anyone else near the
//! console: delete the account and add a new one.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use adapters::duckdb::DuckDbRepository;
use config::Config;
use ports::AccountRepository;
use services::logging::record;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result};
pub use domain::{Account, AccountSummary, Role};
pub use ports::{Terminal, Tone};
pub use services::{LogEvent, LoggingService, MenuController};

/// Main context for ATM operations
///
/// Owns the storage handle and hands it to every service explicitly.
pub struct AtmContext {
    pub config: Config,
    pub repository: Arc<DuckDbRepository>,
    pub logger: Option<Arc<LoggingService>>,
    pub auth_service: AuthService,
    pub teller_service: TellerService,
    pub admin_service: AdminService,
}

impl AtmContext {
    /// Open the ledger in `data_dir`, initialize it, and wire the services.
    ///
    /// Event logging is best-effort: if `logs.duckdb` cannot be opened the
    /// context is built without a logger. Ledger migrations applied while
    /// opening are recorded as a `schema_migrated` event.
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;

        let db_path = data_dir.join(&config.database_file);
        let repository = Arc::new(DuckDbRepository::new(&db_path)?);
        let migrations = repository.setup()?;

        let logger = if config.event_logging {
            LoggingService::new(data_dir, env!("CARGO_PKG_VERSION"))
                .ok()
                .map(Arc::new)
        } else {
            None
        };

        if !migrations.applied.is_empty() {
            record(
                logger.as_deref(),
                LogEvent::new("schema_migrated").with_command(migrations.applied.join(",")),
            );
        }

        let store: Arc<dyn AccountRepository> = repository.clone();
        let auth_service = AuthService::new(Arc::clone(&store), logger.clone());
        let teller_service = TellerService::new(Arc::clone(&store));
        let admin_service = AdminService::new(store);

        Ok(Self {
            config,
            repository,
            logger,
            auth_service,
            teller_service,
            admin_service,
        })
    }
}
