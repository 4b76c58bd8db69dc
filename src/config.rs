//! Storage-directory resolution
//!
//! The registry lives at `<dir>/db.json` where `<dir>` is taken from the
//! `FAKE_SMS_DB_DIR` environment variable, or `$HOME/.fake-sms` when the
//! variable is absent. Resolution happens once at startup; the resolved
//! path is handed to [`crate::store::RegistryStore`] as plain
//! configuration so the store itself never consults the environment.

use crate::ConfigError;
use std::path::PathBuf;

/// Environment variable overriding the registry directory
pub const DB_DIR_ENV: &str = "FAKE_SMS_DB_DIR";

/// Resolves the directory that holds the registry file.
pub fn resolve_db_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(dir) = std::env::var(DB_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => Ok(PathBuf::from(home).join(".fake-sms")),
        _ => Err(ConfigError::NoDatabaseDir),
    }
}
