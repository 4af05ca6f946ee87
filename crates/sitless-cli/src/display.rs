//! Terminal-side collaborators: event rendering and desktop notifications.

use std::io::Write;

use notify_rust::Notification;
use tracing::warn;

use sitless_core::{DisplaySink, Event, Notifier, Task};

/// Renders host events on the terminal.
pub struct TerminalDisplay {
    quiet: bool,
}

impl TerminalDisplay {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl DisplaySink for TerminalDisplay {
    fn emit(&mut self, event: Event) {
        match event {
            Event::Tick {
                elapsed_seconds, ..
            } => {
                if !self.quiet {
                    let h = elapsed_seconds / 3600;
                    let m = elapsed_seconds % 3600 / 60;
                    let s = elapsed_seconds % 60;
                    print!("\rsitting {h:02}:{m:02}:{s:02}");
                    let _ = std::io::stdout().flush();
                }
            }
            Event::TaskTriggered { task, .. } => {
                println!("\n>> break time: {} (done | snooze <min>)", task.title);
            }
            Event::TaskCompleted { .. } => {
                println!("\n>> task cleared, timer restarted");
            }
            Event::SettingsChanged { settings, .. } => {
                println!(
                    "\n>> settings updated: reminder every {} min",
                    settings.interval_minutes.minutes()
                );
            }
        }
    }
}

/// System toasts via the desktop notification service. Failures are logged
/// and swallowed; a missing notification daemon must not break the loop.
pub struct DesktopNotifier;

impl DesktopNotifier {
    fn show(&self, summary: &str, body: &str, sound: bool) {
        let mut notification = Notification::new();
        notification
            .appname("sitless")
            .summary(summary)
            .body(body)
            .icon("alarm-clock");
        if sound {
            notification.sound_name("message-new-instant");
        }
        if let Err(e) = notification.show() {
            warn!(error = %e, "failed to show desktop notification");
        }
    }
}

impl Notifier for DesktopNotifier {
    fn task_reminder(&self, task: &Task, sound: bool) {
        self.show("Time to move", &task.title, sound);
    }

    fn snoozed(&self, minutes: u32, baseline_minutes: u32, sound: bool) {
        self.show(
            "Reminder snoozed",
            &format!(
                "Next reminder in {minutes} min, then back to the {baseline_minutes} min cycle"
            ),
            sound,
        );
    }
}
