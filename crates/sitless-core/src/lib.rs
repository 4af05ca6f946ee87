//! # Sitless Core Library
//!
//! Core logic for Sitless, a desktop sitting-time reminder. The library is
//! host-agnostic: a host process (the CLI binary, or any other shell) owns a
//! [`Session`], ticks it once per second, and renders the events it emits.
//!
//! ## Architecture
//!
//! - **Timer Engine**: an elapsed-seconds state machine that requires the
//!   caller to invoke `tick()` on a 1 Hz cadence; fires a callback whenever
//!   elapsed time crosses the configured threshold, with one-shot snooze
//!   overrides that revert automatically
//! - **Settings**: camelCase JSON persistence with merge-over-defaults load
//! - **Tasks**: a fixed micro-break catalog with uniform random selection
//! - **Session**: the owner object wiring engine, settings and the
//!   display/notification collaborators together
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: core timer state machine
//! - [`Session`]: host-side coordinator
//! - [`Settings`] / [`SettingsStore`]: persisted configuration
//! - [`Event`]: the host-to-display event contract

pub mod error;
pub mod events;
pub mod session;
pub mod settings;
pub mod storage;
pub mod task;
pub mod timer;

pub use error::{CoreError, Result, SettingsError};
pub use events::Event;
pub use session::{DisplaySink, LoginLauncher, Notifier, NullLauncher, Session};
pub use settings::{Interval, Settings};
pub use storage::SettingsStore;
pub use task::{default_catalog, pick_random, random_task, Task, TaskKind};
pub use timer::{TickSink, TimerEngine, TimerStatus};
