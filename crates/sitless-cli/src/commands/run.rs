//! The reminder loop: the host process that owns the session.
//!
//! A current-thread tokio runtime keeps everything on one event loop, the
//! way the engine expects: a 1 Hz interval drives `tick()`, stdin lines
//! carry the inbound control requests, and ctrl-c tears the session down.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use sitless_core::{DisplaySink, Interval, Session, SettingsStore};

use crate::autostart::XdgAutostart;
use crate::display::{DesktopNotifier, TerminalDisplay};

#[derive(Args)]
pub struct RunArgs {
    /// Override the configured reminder interval (minutes: 30, 45 or 60)
    #[arg(long)]
    interval: Option<u32>,
    /// Suppress the per-second countdown line
    #[arg(long)]
    quiet: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .enable_io()
        .build()?;
    runtime.block_on(run_loop(args))
}

async fn run_loop(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = SettingsStore::open()?;
    let display: Arc<Mutex<dyn DisplaySink>> =
        Arc::new(Mutex::new(TerminalDisplay::new(args.quiet)));
    let mut session = Session::new(
        store,
        display,
        Arc::new(DesktopNotifier),
        Box::new(XdgAutostart),
    );

    // A flag override lasts for this run only; the saved settings and the
    // login-launch entry stay as they are.
    if let Some(minutes) = args.interval {
        session.override_interval(Interval::try_from(minutes)?);
    }

    session.start_timer();
    info!(
        interval_minutes = session.timer_status().baseline_threshold_minutes,
        "reminder loop started"
    );
    println!("sitless running; commands: start, pause, reset, done, snooze <min>, status, settings, quit");

    // Best-effort 1 Hz: a missed tick is skipped, never compensated.
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = ticker.tick() => session.tick(),
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => {
                    if handle_command(&mut session, line.trim()) {
                        break;
                    }
                }
                Ok(None) => stdin_open = false,
                Err(e) => {
                    warn!(error = %e, "stdin read failed");
                    stdin_open = false;
                }
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    session.destroy();
    info!("reminder loop stopped");
    Ok(())
}

/// Dispatch one control line. Returns true when the loop should exit.
fn handle_command(session: &mut Session, input: &str) -> bool {
    let mut parts = input.split_whitespace();
    match parts.next() {
        Some("start") => session.start_timer(),
        Some("pause") => session.pause_timer(),
        Some("reset") => session.reset_timer(),
        Some("done") => match session.current_task() {
            Some(task) => session.task_done(&task.id),
            None => println!("no active task"),
        },
        Some("snooze") => match parts.next().and_then(|m| m.parse::<u32>().ok()) {
            Some(minutes) if minutes > 0 => session.snooze(minutes),
            _ => println!("usage: snooze <minutes>"),
        },
        Some("status") => print_json(&session.timer_status()),
        Some("settings") => print_json(&session.settings()),
        Some("quit") | Some("exit") => return true,
        Some(other) => println!("unknown command: {other}"),
        None => {}
    }
    false
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => warn!(error = %e, "failed to serialize"),
    }
}
