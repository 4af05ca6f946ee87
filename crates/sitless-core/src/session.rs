//! Host-side coordinator.
//!
//! `Session` is the explicit owner object constructed at host startup: it
//! owns the timer engine, the loaded settings and the active task, and
//! holds the display/notification collaborators behind trait seams. There
//! is no ambient global state; whoever needs the session gets a reference
//! to it.
//!
//! All methods are driven from the host's single-threaded loop. The shared
//! cell exists only because the engine's threshold callback needs access to
//! the same settings/task state the session mutates.

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::error::Result;
use crate::events::Event;
use crate::settings::{Interval, Settings};
use crate::storage::SettingsStore;
use crate::task::{default_catalog, random_task, Task};
use crate::timer::{TickSink, TimerEngine, TimerStatus};

/// Write-only event sink on the display side of the boundary.
pub trait DisplaySink: Send {
    fn emit(&mut self, event: Event);
}

/// Renders system notifications. `sound` mirrors the user's sound toggle.
pub trait Notifier: Send + Sync {
    /// A threshold fired and `task` was selected.
    fn task_reminder(&self, task: &Task, sound: bool);
    /// A snooze was requested: remind again in `minutes`, then return to
    /// the `baseline_minutes` cadence.
    fn snoozed(&self, minutes: u32, baseline_minutes: u32, sound: bool);
}

/// Registers or removes the OS login-launch entry.
pub trait LoginLauncher: Send {
    fn set_enabled(&self, enabled: bool) -> Result<()>;
}

/// `LoginLauncher` that does nothing. For tests and headless hosts.
pub struct NullLauncher;

impl LoginLauncher for NullLauncher {
    fn set_enabled(&self, _enabled: bool) -> Result<()> {
        Ok(())
    }
}

/// State shared between the session and the engine's threshold callback.
struct SharedState {
    settings: Settings,
    current_task: Option<Task>,
}

/// Forwards engine ticks to the display as wire events.
struct TickForwarder {
    display: Arc<Mutex<dyn DisplaySink>>,
}

impl TickSink for TickForwarder {
    fn on_tick(&mut self, elapsed_secs: u64) {
        if let Ok(mut display) = self.display.lock() {
            display.emit(Event::tick(elapsed_secs));
        }
    }
}

/// One reminder session: engine + settings + collaborators.
pub struct Session {
    engine: TimerEngine,
    shared: Arc<Mutex<SharedState>>,
    display: Arc<Mutex<dyn DisplaySink>>,
    notifier: Arc<dyn Notifier>,
    store: SettingsStore,
    launcher: Box<dyn LoginLauncher>,
}

impl Session {
    /// Build a session from persisted settings and wire the engine's
    /// collaborators. The timer starts idle; call [`Session::start_timer`].
    pub fn new(
        store: SettingsStore,
        display: Arc<Mutex<dyn DisplaySink>>,
        notifier: Arc<dyn Notifier>,
        launcher: Box<dyn LoginLauncher>,
    ) -> Self {
        let settings = store.load();
        info!(interval_minutes = settings.interval_minutes.minutes(), "session starting");

        let mut engine = TimerEngine::new(settings.interval_minutes.minutes());
        engine.set_sink(TickForwarder {
            display: Arc::clone(&display),
        });

        let shared = Arc::new(Mutex::new(SharedState {
            settings,
            current_task: None,
        }));

        let catalog = default_catalog();
        {
            let shared = Arc::clone(&shared);
            let display = Arc::clone(&display);
            let notifier = Arc::clone(&notifier);
            engine.on_threshold_reached(move || {
                let Ok(mut state) = shared.lock() else { return };
                let Some(task) = random_task(&catalog).cloned() else { return };
                info!(task_id = %task.id, "break reminder triggered");
                state.current_task = Some(task.clone());
                if state.settings.notification_enabled {
                    notifier.task_reminder(&task, state.settings.sound_enabled);
                }
                drop(state);
                if let Ok(mut display) = display.lock() {
                    display.emit(Event::task_triggered(task));
                }
            });
        }

        Self {
            engine,
            shared,
            display,
            notifier,
            store,
            launcher,
        }
    }

    // ── Tick driving ─────────────────────────────────────────────────

    /// Advance the engine by one second. Call on the host's 1 Hz cadence.
    pub fn tick(&mut self) {
        self.engine.tick();
    }

    // ── Inbound control requests ─────────────────────────────────────

    pub fn start_timer(&mut self) {
        self.engine.start();
    }

    pub fn pause_timer(&mut self) {
        self.engine.pause();
    }

    /// Stop and zero the timer, discarding any active task.
    pub fn reset_timer(&mut self) {
        if self.engine.is_destroyed() {
            return;
        }
        self.engine.reset();
        self.clear_task();
    }

    /// Mark the active task done; the sitting clock restarts from zero.
    pub fn task_done(&mut self, task_id: &str) {
        if self.engine.is_destroyed() {
            return;
        }
        info!(task_id, "task completed");
        self.engine.reset();
        self.engine.start();
        self.clear_task();
    }

    /// Push the reminder back by `minutes`, once. The baseline cadence
    /// resumes after the snoozed reminder fires. Zero minutes is ignored.
    pub fn snooze(&mut self, minutes: u32) {
        if minutes == 0 || self.engine.is_destroyed() {
            return;
        }
        info!(minutes, "reminder snoozed");
        self.engine.reset();
        self.engine.set_snooze_threshold(minutes);
        self.engine.start();
        self.clear_task();

        let (notification_enabled, sound) = {
            let Ok(state) = self.shared.lock() else { return };
            (
                state.settings.notification_enabled,
                state.settings.sound_enabled,
            )
        };
        if notification_enabled {
            self.notifier
                .snoozed(minutes, self.engine.baseline_threshold_minutes(), sound);
        }
    }

    /// Current settings, as loaded or last saved.
    pub fn settings(&self) -> Settings {
        self.shared
            .lock()
            .map(|state| state.settings.clone())
            .unwrap_or_default()
    }

    /// Re-baseline the timer for this session only: the override lives in
    /// memory, so nothing is written to disk and the login-launch entry is
    /// untouched. The cycle restarts from zero.
    pub fn override_interval(&mut self, interval: Interval) {
        if self.engine.is_destroyed() {
            return;
        }
        info!(interval_minutes = interval.minutes(), "interval overridden for this session");
        self.engine.set_threshold(interval.minutes());
        self.engine.reset();
        if let Ok(mut state) = self.shared.lock() {
            state.settings.interval_minutes = interval;
        }
    }

    /// Persist and apply new settings wholesale: save to disk, update the
    /// login-launch entry, re-baseline the timer and restart the cycle.
    /// Persistence and launcher failures are logged, never surfaced.
    pub fn save_settings(&mut self, settings: Settings) {
        if self.engine.is_destroyed() {
            return;
        }
        if let Err(e) = self.store.save(&settings) {
            warn!(error = %e, "failed to persist settings");
        }
        if let Err(e) = self.launcher.set_enabled(settings.auto_start) {
            warn!(error = %e, "failed to update login launch entry");
        }

        self.engine.set_threshold(settings.interval_minutes.minutes());
        self.engine.reset();
        self.engine.start();

        if let Ok(mut state) = self.shared.lock() {
            state.settings = settings.clone();
        }
        self.emit(Event::settings_changed(settings));
    }

    pub fn timer_status(&self) -> TimerStatus {
        self.engine.status()
    }

    pub fn current_task(&self) -> Option<Task> {
        self.shared
            .lock()
            .ok()
            .and_then(|state| state.current_task.clone())
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.engine.elapsed_secs()
    }

    /// Tear down the engine. Later control calls are safe no-ops.
    pub fn destroy(&mut self) {
        self.engine.destroy();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn clear_task(&mut self) {
        if let Ok(mut state) = self.shared.lock() {
            state.current_task = None;
        }
        self.emit(Event::task_completed());
    }

    fn emit(&self, event: Event) {
        if let Ok(mut display) = self.display.lock() {
            display.emit(event);
        }
    }
}
