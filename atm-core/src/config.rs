//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "app": { "databaseFile": "atm.duckdb", "eventLogging": true }
//! }
//! ```
//! Unknown keys are ignored.

use std::path::Path;

use serde::Deserialize;

use crate::domain::result::Result;

/// Default ledger file name inside the data directory
pub const DEFAULT_DATABASE_FILE: &str = "atm.duckdb";

/// Environment override for event logging
pub const EVENT_LOGGING_ENV: &str = "ATM_EVENT_LOGGING";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    database_file: Option<String>,
    #[serde(default)]
    event_logging: Option<bool>,
}

/// ATM configuration (resolved view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_file: String,
    pub event_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_file: DEFAULT_DATABASE_FILE.to_string(),
            event_logging: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "true" | "1" | "yes" | "TRUE" | "YES" => Some(true),
        "false" | "0" | "no" | "FALSE" | "NO" => Some(false),
        _ => None,
    }
}

fn read_settings(settings_path: &Path) -> Result<SettingsFile> {
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(settings_path)?;
    // A hand-edited file that no longer parses falls back to defaults
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

impl Config {
    /// Load config from the data directory
    ///
    /// `ATM_EVENT_LOGGING` overrides the file's `eventLogging` when it holds
    /// a recognizable boolean.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(&data_dir.join("settings.json"))?;
        let defaults = Self::default();

        let event_logging = std::env::var(EVENT_LOGGING_ENV)
            .ok()
            .and_then(|v| parse_flag(&v))
            .or(raw.app.event_logging)
            .unwrap_or(defaults.event_logging);

        let database_file = raw
            .app
            .database_file
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(defaults.database_file);

        Ok(Self {
            database_file,
            event_logging,
        })
    }
}
