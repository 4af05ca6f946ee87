//! The event contract between the host and the display layer.
//!
//! Tag values keep the wire names of the original IPC channel so any
//! display implementation can route on `type` alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::task::Task;

/// Outbound events the host pushes across the display boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Emitted once per second while running, and once on reset with the
    /// zeroed value.
    #[serde(rename = "timer:tick", rename_all = "camelCase")]
    Tick {
        elapsed_seconds: u64,
        at: DateTime<Utc>,
    },
    /// A threshold fired and this task was selected.
    #[serde(rename = "task:triggered", rename_all = "camelCase")]
    TaskTriggered { task: Task, at: DateTime<Utc> },
    /// The active task was cleared; the timer has been reset.
    #[serde(rename = "task:completed", rename_all = "camelCase")]
    TaskCompleted { at: DateTime<Utc> },
    /// The full configuration object after an edit.
    #[serde(rename = "settings:updated", rename_all = "camelCase")]
    SettingsChanged {
        settings: Settings,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn tick(elapsed_seconds: u64) -> Self {
        Self::Tick {
            elapsed_seconds,
            at: Utc::now(),
        }
    }

    pub fn task_triggered(task: Task) -> Self {
        Self::TaskTriggered {
            task,
            at: Utc::now(),
        }
    }

    pub fn task_completed() -> Self {
        Self::TaskCompleted { at: Utc::now() }
    }

    pub fn settings_changed(settings: Settings) -> Self {
        Self::SettingsChanged {
            settings,
            at: Utc::now(),
        }
    }
}
