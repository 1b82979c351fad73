//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on one area of the console session.

mod admin;
mod auth;
pub mod logging;
mod menu;
pub mod migration;
mod teller;

pub use admin::AdminService;
pub use auth::AuthService;
pub use logging::{LogEntry, LogEvent, LoggingService};
pub use menu::MenuController;
pub use migration::{MigrationResult, MigrationService};
pub use teller::{TellerService, Withdrawal};
