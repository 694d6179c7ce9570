mod config;
pub mod database;
pub mod state;

pub use config::{Config, ContentConfig, TimingConfig, UiConfig};
pub use database::Database;
pub use state::{MemoryStore, Mode, PersistedState, Sound, StateKey, StateStore, StateWrite};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `$CANDLELIGHT_HOME` if set, otherwise
/// `~/.config/candlelight[-dev]/` based on CANDLELIGHT_ENV.
///
/// Set CANDLELIGHT_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("CANDLELIGHT_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("CANDLELIGHT_ENV").unwrap_or_else(|_| "production".into());
            if env == "dev" {
                base_dir.join("candlelight-dev")
            } else {
                base_dir.join("candlelight")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
