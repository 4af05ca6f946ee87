//! Micro-break task catalog.
//!
//! Tasks are stateless value objects drawn uniformly at random when a
//! reminder fires. Selection is a pure function over an explicit catalog;
//! there is no global random state.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Category of a micro-break activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Water,
    Break,
    Eye,
}

/// An immutable catalog entry describing one micro-break activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    /// Suggested duration of the activity, in seconds.
    #[serde(rename = "duration", default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Task {
    fn new(id: &str, title: &str, kind: TaskKind, duration_secs: u64, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            duration_secs: Some(duration_secs),
            icon: Some(icon.to_string()),
        }
    }
}

/// The built-in micro-break catalog.
pub fn default_catalog() -> Vec<Task> {
    vec![
        Task::new(
            "drink_water",
            "Drink a sip of water 💧",
            TaskKind::Water,
            30,
            "💧",
        ),
        Task::new(
            "stand_up",
            "Stand up and move for 2 minutes 🚶",
            TaskKind::Break,
            120,
            "🚶",
        ),
        Task::new(
            "eye_rest",
            "Look into the distance for 20 seconds (20-20-20 rule) 👀",
            TaskKind::Eye,
            20,
            "👀",
        ),
    ]
}

/// Pick one task uniformly at random. Returns `None` for an empty catalog.
pub fn pick_random<'a, R: Rng + ?Sized>(catalog: &'a [Task], rng: &mut R) -> Option<&'a Task> {
    catalog.choose(rng)
}

/// Convenience wrapper over [`pick_random`] using the thread-local RNG.
pub fn random_task(catalog: &[Task]) -> Option<&Task> {
    pick_random(catalog, &mut rand::thread_rng())
}
