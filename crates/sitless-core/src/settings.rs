//! User-facing reminder settings.
//!
//! Serialized as a camelCase JSON object. Every field carries a serde
//! default so a partially written file merges over the defaults on load;
//! an absent file yields `Settings::default()` wholesale.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Reminder cadence. Only a small fixed set of minute values is offered.
///
/// On the wire this is a plain number (`30`, `45` or `60`); anything else
/// is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum Interval {
    Minutes30,
    Minutes45,
    Minutes60,
}

impl Interval {
    pub fn minutes(self) -> u32 {
        match self {
            Self::Minutes30 => 30,
            Self::Minutes45 => 45,
            Self::Minutes60 => 60,
        }
    }
}

impl From<Interval> for u32 {
    fn from(interval: Interval) -> u32 {
        interval.minutes()
    }
}

impl TryFrom<u32> for Interval {
    type Error = SettingsError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            30 => Ok(Self::Minutes30),
            45 => Ok(Self::Minutes45),
            60 => Ok(Self::Minutes60),
            other => Err(SettingsError::InvalidValue {
                key: "intervalMinutes".to_string(),
                message: format!("unsupported interval: {other} minutes (expected 30, 45 or 60)"),
            }),
        }
    }
}

/// Persisted configuration, saved wholesale on every edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Baseline reminder threshold.
    #[serde(default = "default_interval")]
    pub interval_minutes: Interval,
    /// Whether notifications request a sound.
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    /// Register a login-launch entry with the OS.
    #[serde(default)]
    pub auto_start: bool,
    /// Gates whether the notification collaborator is invoked at all.
    #[serde(default = "default_true")]
    pub notification_enabled: bool,
}

fn default_interval() -> Interval {
    Interval::Minutes60
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval_minutes: Interval::Minutes60,
            sound_enabled: true,
            auto_start: false,
            notification_enabled: true,
        }
    }
}
