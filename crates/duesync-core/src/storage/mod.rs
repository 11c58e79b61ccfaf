mod config;

pub use config::{CalendarConfig, Config, LmsConfig, SyncConfig};

use std::io;
use std::path::PathBuf;

/// Returns `~/.config/duesync[-dev]/` based on DUESYNC_ENV.
///
/// Set DUESYNC_ENV=dev to use a separate development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DUESYNC_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("duesync-dev")
    } else {
        base_dir.join("duesync")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
