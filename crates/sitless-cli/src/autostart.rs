//! Login-launch registration.
//!
//! Linux gets a real XDG autostart entry; other platforms are a logged
//! no-op so toggling the setting never fails the save.

use sitless_core::LoginLauncher;

pub struct XdgAutostart;

#[cfg(target_os = "linux")]
impl LoginLauncher for XdgAutostart {
    fn set_enabled(&self, enabled: bool) -> sitless_core::Result<()> {
        use sitless_core::CoreError;

        let dir = dirs::config_dir()
            .ok_or_else(|| CoreError::Custom("no config directory".into()))?
            .join("autostart");
        let entry = dir.join("sitless.desktop");

        if enabled {
            std::fs::create_dir_all(&dir)?;
            let exe = std::env::current_exe()?;
            let contents = format!(
                "[Desktop Entry]\n\
                 Type=Application\n\
                 Name=Sitless\n\
                 Exec={} run --quiet\n\
                 X-GNOME-Autostart-enabled=true\n",
                exe.display()
            );
            std::fs::write(&entry, contents)?;
            tracing::info!(path = %entry.display(), "autostart entry written");
        } else if entry.exists() {
            std::fs::remove_file(&entry)?;
            tracing::info!(path = %entry.display(), "autostart entry removed");
        }
        Ok(())
    }
}

#[cfg(not(target_os = "linux"))]
impl LoginLauncher for XdgAutostart {
    fn set_enabled(&self, enabled: bool) -> sitless_core::Result<()> {
        tracing::warn!(enabled, "login launch registration not supported on this platform");
        Ok(())
    }
}
