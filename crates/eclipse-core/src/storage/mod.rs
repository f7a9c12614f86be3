mod config;
pub mod database;
pub mod migrations;

pub use config::{AnalyticsConfig, Config, ProfileConfig, SchedulerSection};
pub use database::{Completion, Database, Profile};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the directory holding `config.toml` and `eclipse.db`.
///
/// `ECLIPSE_DATA_DIR` wins if set. Otherwise `~/.config/eclipse[-dev]/`,
/// where the `-dev` suffix is used when `ECLIPSE_ENV=dev`.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("ECLIPSE_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("ECLIPSE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("eclipse-dev")
            } else {
                base_dir.join("eclipse")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
