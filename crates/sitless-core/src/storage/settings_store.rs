//! JSON settings persistence.
//!
//! Loading never fails: a missing file yields the defaults and an
//! unparsable file is logged and replaced by the defaults. Saving is
//! best-effort; callers log the error and keep going rather than surface
//! it to the user.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Result, SettingsError};
use crate::settings::Settings;

/// Handle to the on-disk settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at the default location (`<data dir>/settings.json`).
    pub fn open() -> Result<Self> {
        Ok(Self {
            path: super::data_dir()?.join("settings.json"),
        })
    }

    /// Store at an explicit path. The parent directory must exist.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults on any failure.
    ///
    /// Missing fields in the file merge over the defaults; a file that
    /// cannot be read or parsed yields `Settings::default()` entirely.
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "using default settings");
                Settings::default()
            }
        }
    }

    /// Strict variant of [`SettingsStore::load`]. A missing file still
    /// yields the defaults; any other failure is surfaced.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn try_load(&self) -> Result<Settings, SettingsError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default());
            }
            Err(e) => {
                return Err(SettingsError::LoadFailed {
                    path: self.path.clone(),
                    message: e.to_string(),
                });
            }
        };
        serde_json::from_str(&content).map_err(|e| SettingsError::LoadFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Persist settings wholesale.
    ///
    /// # Errors
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let content =
            serde_json::to_string_pretty(settings).map_err(|e| SettingsError::SaveFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        std::fs::write(&self.path, content).map_err(|e| SettingsError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}
