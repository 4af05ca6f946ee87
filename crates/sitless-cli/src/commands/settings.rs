use clap::Subcommand;

use sitless_core::{CoreError, Interval, LoginLauncher, Settings, SettingsStore};

use crate::autostart::XdgAutostart;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print current settings as JSON
    Show,
    /// Update one or more settings fields
    Set {
        /// Reminder interval in minutes (30, 45 or 60)
        #[arg(long)]
        interval: Option<u32>,
        /// Request a sound with notifications
        #[arg(long)]
        sound: Option<bool>,
        /// Show desktop notifications at all
        #[arg(long)]
        notifications: Option<bool>,
        /// Launch at login
        #[arg(long)]
        autostart: Option<bool>,
    },
    /// Reset all settings to their defaults
    Reset,
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SettingsStore::open()?;
    match action {
        SettingsAction::Show => {
            print_settings(&store.load())?;
        }
        SettingsAction::Set {
            interval,
            sound,
            notifications,
            autostart,
        } => {
            let mut settings = store.load();
            if let Some(minutes) = interval {
                settings.interval_minutes = Interval::try_from(minutes)?;
            }
            if let Some(enabled) = sound {
                settings.sound_enabled = enabled;
            }
            if let Some(enabled) = notifications {
                settings.notification_enabled = enabled;
            }
            if let Some(enabled) = autostart {
                settings.auto_start = enabled;
                XdgAutostart.set_enabled(enabled)?;
            }
            store.save(&settings).map_err(CoreError::from)?;
            print_settings(&settings)?;
        }
        SettingsAction::Reset => {
            let settings = Settings::default();
            store.save(&settings).map_err(CoreError::from)?;
            print_settings(&settings)?;
        }
    }
    Ok(())
}

fn print_settings(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}
