//! End-to-end reminder cycle through the public API.
//!
//! Drives a full session the way a host would: load settings, start the
//! timer, snooze, and tick through whole cycles at the 1 Hz contract.

use std::sync::{Arc, Mutex};

use sitless_core::{
    DisplaySink, Event, Notifier, NullLauncher, Session, Settings, SettingsStore, Task,
};

#[derive(Default)]
struct EventLog {
    events: Vec<Event>,
}

impl DisplaySink for EventLog {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}

#[derive(Default)]
struct NotificationLog {
    reminders: Mutex<usize>,
    snoozes: Mutex<Vec<(u32, u32)>>,
}

impl Notifier for NotificationLog {
    fn task_reminder(&self, _task: &Task, _sound: bool) {
        *self.reminders.lock().unwrap() += 1;
    }

    fn snoozed(&self, minutes: u32, baseline_minutes: u32, _sound: bool) {
        self.snoozes.lock().unwrap().push((minutes, baseline_minutes));
    }
}

fn fired_count(log: &Arc<Mutex<EventLog>>) -> usize {
    log.lock()
        .unwrap()
        .events
        .iter()
        .filter(|e| matches!(e, Event::TaskTriggered { .. }))
        .count()
}

#[test]
fn snooze_cycle_reverts_to_baseline_cadence() {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::at(dir.path().join("settings.json"));
    let display = Arc::new(Mutex::new(EventLog::default()));
    let notifier = Arc::new(NotificationLog::default());
    let mut session = Session::new(
        store,
        display.clone(),
        notifier.clone(),
        Box::new(NullLauncher),
    );

    // No settings file: defaults apply, 60 minute baseline.
    assert_eq!(session.settings(), Settings::default());
    assert_eq!(session.timer_status().baseline_threshold_minutes, 60);

    session.start_timer();
    session.snooze(5);
    assert_eq!(*notifier.snoozes.lock().unwrap(), vec![(5, 60)]);

    // The snoozed reminder fires after 300 seconds, exactly once.
    for _ in 0..299 {
        session.tick();
    }
    assert_eq!(fired_count(&display), 0);
    session.tick();
    assert_eq!(fired_count(&display), 1);
    assert_eq!(*notifier.reminders.lock().unwrap(), 1);

    // The one-shot override is spent: back on the 3600 second baseline.
    let status = session.timer_status();
    assert!(!status.snoozed);
    assert_eq!(status.current_threshold_minutes, 60);

    // The user completes the task, restarting the sitting clock; the next
    // reminder is a full baseline cycle away.
    let task = session.current_task().expect("fire selects a task");
    session.task_done(&task.id);
    assert_eq!(session.elapsed_secs(), 0);

    for _ in 0..3599 {
        session.tick();
    }
    assert_eq!(fired_count(&display), 1);
    session.tick();
    assert_eq!(fired_count(&display), 2);

    session.destroy();
    for _ in 0..600 {
        session.tick();
    }
    assert_eq!(fired_count(&display), 2);
}
