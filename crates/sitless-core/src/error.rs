//! Core error types for sitless-core.
//!
//! The taxonomy is deliberately small: persistence failures are recoverable
//! (callers fall back to defaults or log and continue) and nothing in the
//! engine itself can fail.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for sitless-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings persistence errors
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Settings-specific errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to load the settings file
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save the settings file
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid settings value
    #[error("Invalid settings value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
