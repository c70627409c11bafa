//! Host commands: the operations the user can invoke on the host.

use std::path::{Path, PathBuf};

use super::controller::{PanelController, SurfaceHost};
use super::core::LazypaneApp;
use super::webview_bridge::WindowSurfaceHost;

/// An operation requested by the user of the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// Open a panel for a directory. `None` when no folder was chosen.
    OpenForDirectory(Option<PathBuf>),
    /// Restart the tool in the active panel.
    RefreshCurrent,
}

/// One open command per directory given on the command line.
pub fn startup_commands(directories: &[PathBuf]) -> Vec<HostCommand> {
    directories
        .iter()
        .map(|dir| HostCommand::OpenForDirectory(Some(absolutize(dir))))
        .collect()
}

fn absolutize(dir: &Path) -> PathBuf {
    std::fs::canonicalize(dir)
        .or_else(|_| std::path::absolute(dir))
        .unwrap_or_else(|_| dir.to_path_buf())
}

impl LazypaneApp {
    /// Restore saved panels, then run the command-line commands.
    ///
    /// With nothing restored and nothing requested, an open without a folder
    /// runs so the user is told to pick one.
    pub(super) fn run_startup(&mut self) {
        if self.restore_on_launch {
            self.with_host(|controller, host| controller.restore_all(host));
        }

        let mut startup = std::mem::take(&mut self.startup);
        if startup.is_empty() && self.controller.session_count() == 0 {
            startup.push(HostCommand::OpenForDirectory(None));
        }
        for command in startup {
            self.run_command(command);
        }
        self.check_exit();
    }

    pub(super) fn run_command(&mut self, command: HostCommand) {
        tracing::debug!(?command, "Running host command");
        match command {
            HostCommand::OpenForDirectory(dir) => {
                // Failures are queued as notifications by the controller.
                let _ = self.with_host(|controller, host| {
                    controller.open_for_directory(dir.as_deref(), host)
                });
            }
            HostCommand::RefreshCurrent => self.controller.refresh_current(),
        }
        self.sync_layout();
        self.check_exit();
    }

    /// Run `f` with a surface host bound to the window, if one exists.
    fn with_host<R>(
        &mut self,
        f: impl FnOnce(&mut PanelController, &mut dyn SurfaceHost) -> R,
    ) -> Option<R> {
        let (Some(window), Some(manager)) = (self.window.as_deref(), self.webviews.as_ref()) else {
            tracing::warn!("Cannot open panels: window not initialized");
            return None;
        };
        let mut host = WindowSurfaceHost {
            window,
            manager,
            panel: &self.config.panel,
        };
        Some(f(&mut self.controller, &mut host))
    }
}
