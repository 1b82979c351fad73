//! CLI command implementations

pub mod logs;
pub mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use atm_core::{AtmContext, LoggingService};

/// Get the data directory from `ATM_DIR` or default to `~/.atm`
pub fn get_atm_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("ATM_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".atm"))
        .context("Could not find home directory; set ATM_DIR")
}

/// Create the data directory if needed and open the ATM context
pub fn get_context() -> Result<AtmContext> {
    let atm_dir = get_atm_dir()?;

    std::fs::create_dir_all(&atm_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", atm_dir))?;

    AtmContext::new(&atm_dir).context("Failed to initialize ATM context")
}

/// Open the event log directly, without touching the ledger
pub fn get_logging_service() -> Result<LoggingService> {
    let atm_dir = get_atm_dir()?;
    std::fs::create_dir_all(&atm_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", atm_dir))?;
    LoggingService::new(&atm_dir, env!("CARGO_PKG_VERSION")).context("Failed to open event log")
}
