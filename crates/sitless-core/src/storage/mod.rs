mod settings_store;

pub use settings_store::SettingsStore;

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/sitless[-dev]/` based on SITLESS_ENV.
///
/// Set SITLESS_ENV=dev to use a separate development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SITLESS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("sitless-dev")
    } else {
        base_dir.join("sitless")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
