//! External browser host - one app-mode browser window per pane

use std::process::{Child, Command, Stdio};

use tracing::{debug, info, warn};

use crate::config::BrowserSettings;
use crate::host::{HostError, RenderHost};
use crate::layout::{Pane, PaneGeometry};
use crate::profile::BrowserProfile;

/// Launches browser processes sharing one storage profile.
///
/// Every pane gets the same `--user-data-dir`. Chromium-family browsers keep
/// one process per profile: the first launch owns all windows and later
/// launches hand their `--app` window over to it and exit at once. `wait`
/// therefore returns when the owning process exits, and dropping the host
/// closes every pane by killing that process; the short-lived launchers are
/// already reaped by then.
pub struct BrowserHost<'a> {
    settings: BrowserSettings,
    profile: &'a BrowserProfile,
    /// Fullscreen kiosk windows, used for single-view modes
    kiosk: bool,
    children: Vec<(String, Child)>,
}

impl<'a> BrowserHost<'a> {
    pub fn new(settings: BrowserSettings, profile: &'a BrowserProfile, kiosk: bool) -> Self {
        BrowserHost {
            settings,
            profile,
            kiosk,
            children: Vec::new(),
        }
    }

    /// Command-line arguments for one pane, after the configured extra args
    pub fn pane_args(&self, pane: &Pane, geometry: PaneGeometry) -> Vec<String> {
        let mut args = self.settings.args.clone();
        args.push(format!(
            "--user-data-dir={}",
            self.profile.storage_path().display()
        ));
        args.push(format!(
            "--disk-cache-dir={}",
            self.profile.cache_path().display()
        ));
        args.push(format!("--window-position={},{}", geometry.x, geometry.y));
        args.push(format!("--window-size={},{}", geometry.width, geometry.height));
        if self.kiosk {
            args.push("--kiosk".to_string());
        }
        args.push(format!("--app={}", pane.url));
        args
    }
}

impl RenderHost for BrowserHost<'_> {
    fn render_url(&mut self, pane: &Pane, geometry: PaneGeometry) -> Result<(), HostError> {
        let args = self.pane_args(pane, geometry);
        debug!(command = %self.settings.command, ?args, "Launching browser");

        let child = Command::new(&self.settings.command)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| HostError::Launch {
                command: self.settings.command.clone(),
                source,
            })?;

        info!(label = %pane.label, pid = child.id(), "Browser started");
        self.children.push((pane.label.clone(), child));
        Ok(())
    }

    // hand-off launchers return immediately, the owning process blocks
    fn wait(&mut self) -> Result<(), HostError> {
        for (label, mut child) in self.children.drain(..) {
            let status = child.wait()?;
            if status.success() {
                info!(label = %label, "Browser closed");
            } else {
                warn!(label = %label, %status, "Browser exited abnormally");
            }
        }
        Ok(())
    }
}

impl Drop for BrowserHost<'_> {
    fn drop(&mut self) {
        for (label, child) in self.children.iter_mut() {
            if let Err(e) = child.kill() {
                debug!(label = %label, error = %e, "Browser already gone");
            }
            let _ = child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn pane() -> Pane {
        Pane {
            label: "Console 3".to_string(),
            url: "http://10.0.0.5:8080/?app=equeueorc&platform=all&orcnumber=3".to_string(),
            console_number: Some(3),
        }
    }

    fn geometry() -> PaneGeometry {
        PaneGeometry { x: 652, y: 0, width: 640, height: 720 }
    }

    #[test]
    fn test_pane_args_place_window_and_share_profile() {
        let dir = tempdir().unwrap();
        let profile = BrowserProfile::create("EQueueBrowser", dir.path()).unwrap();
        let settings = BrowserSettings {
            command: "chromium".to_string(),
            args: vec!["--noerrdialogs".to_string()],
        };
        let host = BrowserHost::new(settings, &profile, false);
        let args = host.pane_args(&pane(), geometry());

        assert_eq!(args[0], "--noerrdialogs");
        assert!(args.contains(&format!(
            "--user-data-dir={}",
            profile.storage_path().display()
        )));
        assert!(args.contains(&"--window-position=652,0".to_string()));
        assert!(args.contains(&"--window-size=640,720".to_string()));
        assert!(!args.contains(&"--kiosk".to_string()));
        assert_eq!(args.last().unwrap(), &format!("--app={}", pane().url));
    }

    #[test]
    fn test_kiosk_flag_for_single_view() {
        let dir = tempdir().unwrap();
        let profile = BrowserProfile::create("EQueueBrowser", dir.path()).unwrap();
        let host = BrowserHost::new(BrowserSettings::default(), &profile, true);
        assert!(host
            .pane_args(&pane(), geometry())
            .contains(&"--kiosk".to_string()));
    }

    #[test]
    fn test_missing_browser_fails_to_launch() {
        let dir = tempdir().unwrap();
        let profile = BrowserProfile::create("EQueueBrowser", dir.path()).unwrap();
        let settings = BrowserSettings {
            command: dir.path().join("no-such-browser").display().to_string(),
            args: Vec::new(),
        };
        let mut host = BrowserHost::new(settings, &profile, false);
        let err = host.render_url(&pane(), geometry()).unwrap_err();
        assert!(matches!(err, HostError::Launch { .. }));
        assert!(host.children.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_wait_reaps_launchers_that_exit_at_once() {
        // `true` ignores its arguments and exits, like a hand-off launch
        let dir = tempdir().unwrap();
        let profile = BrowserProfile::create("EQueueBrowser", dir.path()).unwrap();
        let settings = BrowserSettings {
            command: "true".to_string(),
            args: Vec::new(),
        };
        let mut host = BrowserHost::new(settings, &profile, false);
        host.render_url(&pane(), geometry()).unwrap();
        host.render_url(&pane(), geometry()).unwrap();
        assert_eq!(host.children.len(), 2);

        host.wait().unwrap();
        assert!(host.children.is_empty());
    }
}
