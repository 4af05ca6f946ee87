//! Timer/threshold engine.
//!
//! The engine is a tick-driven state machine. It owns no thread - the host
//! is responsible for calling `tick()` once per second while the timer is
//! meant to run; `start()` and `pause()` gate whether a tick advances.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Idle
//! ```
//!
//! ## Threshold semantics
//!
//! A reminder fires whenever `elapsed_secs` is a positive multiple of the
//! active threshold (`elapsed % threshold == 0`), not "N seconds since the
//! last fire". Lowering the threshold mid-cycle therefore fires on the next
//! tick that lands on a multiple. This divisibility contract is intentional
//! and load-bearing; do not replace it with a delta-based trigger.
//!
//! A snooze installs a one-shot threshold override; the moment it fires,
//! the baseline threshold is restored (before the callback runs).

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Write-only sink for per-second elapsed-time updates.
pub trait TickSink: Send {
    fn on_tick(&mut self, elapsed_secs: u64);
}

type ThresholdCallback = Box<dyn FnMut() + Send>;

/// Snapshot of the threshold/snooze state, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStatus {
    pub snoozed: bool,
    pub current_threshold_minutes: u32,
    pub baseline_threshold_minutes: u32,
}

/// Core timer engine.
///
/// Holds at most one tick sink and one threshold callback; registering a
/// new one silently replaces the previous. After `destroy()` every
/// operation is a safe no-op.
pub struct TimerEngine {
    elapsed_secs: u64,
    running: bool,
    /// Active trigger threshold, seconds. Always > 0.
    threshold_secs: u64,
    /// Threshold to restore after a snooze fires. Always > 0.
    baseline_threshold_secs: u64,
    snoozed: bool,
    destroyed: bool,
    sink: Option<Box<dyn TickSink>>,
    on_threshold: Option<ThresholdCallback>,
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("elapsed_secs", &self.elapsed_secs)
            .field("running", &self.running)
            .field("threshold_secs", &self.threshold_secs)
            .field("baseline_threshold_secs", &self.baseline_threshold_secs)
            .field("snoozed", &self.snoozed)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl TimerEngine {
    /// Create an engine with the given baseline threshold in minutes.
    ///
    /// A zero baseline is treated as one minute: the divisibility check is
    /// ill-defined for a zero threshold.
    pub fn new(baseline_minutes: u32) -> Self {
        let secs = u64::from(baseline_minutes.max(1)) * 60;
        Self {
            elapsed_secs: 0,
            running: false,
            threshold_secs: secs,
            baseline_threshold_secs: secs,
            snoozed: false,
            destroyed: false,
            sink: None,
            on_threshold: None,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting. No-op when already running.
    pub fn start(&mut self) {
        if self.destroyed || self.running {
            return;
        }
        self.running = true;
        debug!("timer started");
    }

    /// Stop counting; elapsed time is retained.
    pub fn pause(&mut self) {
        if self.destroyed {
            return;
        }
        self.running = false;
        debug!("timer paused");
    }

    /// Zero the clock and stop, from either state. Emits an immediate tick
    /// with the zeroed value so the display can repaint.
    pub fn reset(&mut self) {
        if self.destroyed {
            return;
        }
        self.running = false;
        self.elapsed_secs = 0;
        self.emit_tick();
        debug!("timer reset");
    }

    /// Advance by one second. The host calls this on its 1 Hz cadence; the
    /// call is ignored while paused or after `destroy()`.
    pub fn tick(&mut self) {
        if self.destroyed || !self.running {
            return;
        }
        self.elapsed_secs += 1;
        self.emit_tick();

        if self.elapsed_secs % self.threshold_secs == 0 {
            debug!(elapsed_secs = self.elapsed_secs, "threshold reached");
            if self.snoozed {
                // One-shot override spent: revert before the callback runs.
                self.threshold_secs = self.baseline_threshold_secs;
                self.snoozed = false;
            }
            if let Some(callback) = self.on_threshold.as_mut() {
                callback();
            }
        }
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Set both the active and baseline thresholds and clear any snooze.
    ///
    /// Does not touch elapsed time or the running state; callers reset
    /// explicitly when they want a clean cycle. A zero value is ignored.
    pub fn set_threshold(&mut self, minutes: u32) {
        if self.destroyed || minutes == 0 {
            return;
        }
        let secs = u64::from(minutes) * 60;
        self.threshold_secs = secs;
        self.baseline_threshold_secs = secs;
        self.snoozed = false;
        debug!(minutes, "threshold set");
    }

    /// Install a one-shot threshold override, leaving the baseline intact.
    ///
    /// Pair with a preceding `reset()` so the snooze window starts from
    /// zero. A zero value is ignored.
    pub fn set_snooze_threshold(&mut self, minutes: u32) {
        if self.destroyed || minutes == 0 {
            return;
        }
        self.threshold_secs = u64::from(minutes) * 60;
        self.snoozed = true;
        debug!(
            minutes,
            baseline_minutes = self.baseline_threshold_minutes(),
            "snooze threshold set"
        );
    }

    /// Register the threshold callback. At most one subscriber: a new
    /// registration replaces the previous one.
    pub fn on_threshold_reached(&mut self, callback: impl FnMut() + Send + 'static) {
        if self.destroyed {
            return;
        }
        self.on_threshold = Some(Box::new(callback));
    }

    /// Register the tick sink. Replace semantics, same as the callback.
    pub fn set_sink(&mut self, sink: impl TickSink + 'static) {
        if self.destroyed {
            return;
        }
        self.sink = Some(Box::new(sink));
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn threshold_minutes(&self) -> u32 {
        (self.threshold_secs / 60) as u32
    }

    pub fn baseline_threshold_minutes(&self) -> u32 {
        (self.baseline_threshold_secs / 60) as u32
    }

    pub fn is_snoozed(&self) -> bool {
        self.snoozed
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn status(&self) -> TimerStatus {
        TimerStatus {
            snoozed: self.snoozed,
            current_threshold_minutes: self.threshold_minutes(),
            baseline_threshold_minutes: self.baseline_threshold_minutes(),
        }
    }

    // ── Teardown ─────────────────────────────────────────────────────

    /// Terminal teardown: stops ticking and releases both collaborators.
    /// Safe to call repeatedly; every later mutator is a no-op.
    pub fn destroy(&mut self) {
        self.running = false;
        self.sink = None;
        self.on_threshold = None;
        self.destroyed = true;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn emit_tick(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            sink.on_tick(self.elapsed_secs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct Recorder(Arc<Mutex<Vec<u64>>>);

    impl TickSink for Recorder {
        fn on_tick(&mut self, elapsed_secs: u64) {
            self.0.lock().unwrap().push(elapsed_secs);
        }
    }

    fn with_fire_counter(engine: &mut TimerEngine) -> Arc<AtomicUsize> {
        let fires = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fires);
        engine.on_threshold_reached(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        fires
    }

    fn with_tick_recorder(engine: &mut TimerEngine) -> Arc<Mutex<Vec<u64>>> {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        engine.set_sink(Recorder(Arc::clone(&ticks)));
        ticks
    }

    #[test]
    fn start_pause_transitions() {
        let mut engine = TimerEngine::new(60);
        assert!(!engine.is_running());

        engine.start();
        assert!(engine.is_running());

        engine.start(); // No-op when already running.
        assert!(engine.is_running());

        engine.pause();
        assert!(!engine.is_running());
    }

    #[test]
    fn tick_only_advances_while_running() {
        let mut engine = TimerEngine::new(60);
        engine.tick();
        assert_eq!(engine.elapsed_secs(), 0);

        engine.start();
        engine.tick();
        engine.tick();
        assert_eq!(engine.elapsed_secs(), 2);

        engine.pause();
        engine.tick();
        assert_eq!(engine.elapsed_secs(), 2);
    }

    #[test]
    fn pause_retains_elapsed_and_emits_nothing() {
        let mut engine = TimerEngine::new(1);
        let ticks = with_tick_recorder(&mut engine);
        let fires = with_fire_counter(&mut engine);

        engine.start();
        for _ in 0..30 {
            engine.tick();
        }
        engine.pause();
        let emitted = ticks.lock().unwrap().len();
        for _ in 0..120 {
            engine.tick();
        }
        assert_eq!(engine.elapsed_secs(), 30);
        assert_eq!(ticks.lock().unwrap().len(), emitted);
        assert_eq!(fires.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn reset_zeroes_stops_and_emits_zero_tick() {
        let mut engine = TimerEngine::new(60);
        let ticks = with_tick_recorder(&mut engine);

        engine.start();
        engine.tick();
        engine.tick();
        engine.reset();

        assert_eq!(engine.elapsed_secs(), 0);
        assert!(!engine.is_running());
        assert_eq!(*ticks.lock().unwrap(), vec![1, 2, 0]);

        // Idempotent from idle.
        engine.reset();
        assert_eq!(engine.elapsed_secs(), 0);
        assert!(!engine.is_running());
    }

    #[test]
    fn fires_exactly_k_times_at_multiples() {
        let mut engine = TimerEngine::new(1); // 60 second threshold
        let ticks = with_tick_recorder(&mut engine);
        let fires = with_fire_counter(&mut engine);

        engine.start();
        for _ in 0..180 {
            engine.tick();
        }

        assert_eq!(fires.load(Ordering::SeqCst), 3);
        let emitted = ticks.lock().unwrap();
        assert_eq!(emitted.len(), 180);
        assert_eq!(emitted[59], 60);
        assert_eq!(emitted[179], 180);
    }

    #[test]
    fn no_fire_before_first_multiple() {
        let mut engine = TimerEngine::new(1);
        let fires = with_fire_counter(&mut engine);
        engine.start();
        for _ in 0..59 {
            engine.tick();
        }
        assert_eq!(fires.load(Ordering::SeqCst), 0);
        engine.tick();
        assert_eq!(fires.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn lowering_threshold_mid_cycle_fires_on_next_multiple() {
        let mut engine = TimerEngine::new(3);
        let fires = with_fire_counter(&mut engine);
        engine.start();
        for _ in 0..100 {
            engine.tick();
        }
        assert_eq!(fires.load(Ordering::SeqCst), 0);

        // Divisibility contract: next multiple of the new 60s threshold is
        // at elapsed 120, i.e. 20 ticks away - not 60.
        engine.set_threshold(1);
        for _ in 0..19 {
            engine.tick();
        }
        assert_eq!(fires.load(Ordering::SeqCst), 0);
        engine.tick();
        assert_eq!(fires.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn set_threshold_updates_baseline_and_clears_snooze() {
        let mut engine = TimerEngine::new(60);
        engine.set_snooze_threshold(5);
        assert!(engine.is_snoozed());

        engine.set_threshold(45);
        assert!(!engine.is_snoozed());
        assert_eq!(engine.threshold_minutes(), 45);
        assert_eq!(engine.baseline_threshold_minutes(), 45);
    }

    #[test]
    fn set_threshold_keeps_elapsed_and_running_state() {
        let mut engine = TimerEngine::new(60);
        engine.start();
        for _ in 0..10 {
            engine.tick();
        }
        engine.set_threshold(30);
        assert_eq!(engine.elapsed_secs(), 10);
        assert!(engine.is_running());
    }

    #[test]
    fn snooze_round_trip_restores_baseline() {
        let mut engine = TimerEngine::new(60);
        let fires = with_fire_counter(&mut engine);

        engine.set_snooze_threshold(5);
        engine.reset();
        engine.start();
        assert!(engine.is_snoozed());
        assert_eq!(engine.threshold_minutes(), 5);
        assert_eq!(engine.baseline_threshold_minutes(), 60);

        for _ in 0..300 {
            engine.tick();
        }
        assert_eq!(fires.load(Ordering::SeqCst), 1);
        assert!(!engine.is_snoozed());
        assert_eq!(engine.threshold_minutes(), 60);

        // Divisibility contract: with no reset after the snoozed fire at
        // elapsed 300, the next fire lands on the 3600 multiple - 3300
        // ticks away, not 3600.
        for _ in 0..3299 {
            engine.tick();
        }
        assert_eq!(fires.load(Ordering::SeqCst), 1);
        engine.tick();
        assert_eq!(fires.load(Ordering::SeqCst), 2);
        assert_eq!(engine.elapsed_secs(), 3600);
    }

    #[test]
    fn callback_registration_replaces_previous() {
        let mut engine = TimerEngine::new(1);
        let first = with_fire_counter(&mut engine);
        let second = with_fire_counter(&mut engine);

        engine.start();
        for _ in 0..60 {
            engine.tick();
        }
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_threshold_values_are_ignored() {
        let mut engine = TimerEngine::new(0);
        assert_eq!(engine.threshold_minutes(), 1);

        engine.set_threshold(0);
        assert_eq!(engine.threshold_minutes(), 1);
        engine.set_snooze_threshold(0);
        assert!(!engine.is_snoozed());
    }

    #[test]
    fn destroy_silences_everything_and_is_idempotent() {
        let mut engine = TimerEngine::new(1);
        let ticks = with_tick_recorder(&mut engine);
        let fires = with_fire_counter(&mut engine);
        engine.start();
        assert!(!engine.is_destroyed());

        engine.destroy();
        engine.destroy();
        assert!(engine.is_destroyed());

        // Every mutator must be a safe no-op now.
        engine.start();
        engine.pause();
        engine.reset();
        engine.set_threshold(30);
        engine.set_snooze_threshold(5);
        engine.on_threshold_reached(|| {});
        for _ in 0..120 {
            engine.tick();
        }

        assert!(!engine.is_running());
        assert!(ticks.lock().unwrap().is_empty());
        assert_eq!(fires.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn status_snapshot_reflects_snooze_state() {
        let mut engine = TimerEngine::new(45);
        engine.set_snooze_threshold(10);
        let status = engine.status();
        assert!(status.snoozed);
        assert_eq!(status.current_threshold_minutes, 10);
        assert_eq!(status.baseline_threshold_minutes, 45);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Ticking for k*T seconds fires exactly k times, for any
            // threshold T and k >= 1.
            #[test]
            fn fires_once_per_threshold_multiple(minutes in 1u32..=3, k in 1u64..=4) {
                let mut engine = TimerEngine::new(minutes);
                let fires = with_fire_counter(&mut engine);
                engine.start();
                let total = k * u64::from(minutes) * 60;
                for _ in 0..total {
                    engine.tick();
                }
                prop_assert_eq!(fires.load(Ordering::SeqCst) as u64, k);
            }
        }
    }
}
