//! Panel controller: owns every session and drives its lifecycle.
//!
//! Single-threaded. The host calls into it from the event loop:
//! commands (`open_for_directory`, `refresh_current`), surface events
//! (`handle_event`), and periodic `poll_processes`. Failures that the user
//! should see are queued as notifications instead of returned.

mod dispatch;
mod registry;
mod restore;
mod session;
mod surface;

#[cfg(test)]
mod tests;

pub use registry::SessionRegistry;
pub use restore::StateStore;
pub use session::{Session, SessionState};
pub use surface::{panel_title, Surface, SurfaceHost};

use std::path::{Path, PathBuf};

use lazypane_common::{
    LazypaneError, Notification, NotificationQueue, Rect, RestorationRecord, SessionError,
    SurfaceId,
};
use lazypane_webview::HostMessage;

use crate::app_state::pty_bridge::Launcher;
use crate::app_state::webview_bridge::column_rects;

/// Shown when a panel is opened without a folder.
pub const MISSING_FOLDER_MESSAGE: &str = "Please choose a folder to open Lazygit.";

/// Why a session is being torn down. Decides whether its record survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisposeReason {
    /// The user closed the surface.
    SurfaceClosed,
    /// The tool exited on its own.
    ProcessExited,
    /// Relaunching after a refresh failed.
    SpawnFailed,
    /// Posting to the surface or writing to the process failed.
    BridgeFailed,
    /// The host is shutting down; the panel should come back next launch.
    Shutdown,
}

impl DisposeReason {
    fn keeps_record(self) -> bool {
        matches!(self, DisposeReason::Shutdown)
    }
}

pub struct PanelController {
    registry: SessionRegistry,
    launcher: Box<dyn Launcher>,
    store: StateStore,
    notifications: NotificationQueue,
    default_size: (u16, u16),
    shut_down: bool,
}

impl PanelController {
    pub fn new(launcher: Box<dyn Launcher>, store: StateStore, default_size: (u16, u16)) -> Self {
        Self {
            registry: SessionRegistry::new(),
            launcher,
            store,
            notifications: NotificationQueue::default(),
            default_size,
            shut_down: false,
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn session(&self, id: &SurfaceId) -> Option<&Session> {
        self.registry.get(id)
    }

    pub fn session_count(&self) -> usize {
        self.registry.len()
    }

    pub fn active(&self) -> Option<&SurfaceId> {
        self.registry.active()
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    // =========================================================================
    // OPEN / RESTORE
    // =========================================================================

    /// Open a panel running the tool in `dir`.
    ///
    /// A directory that already has a live panel gets that panel focused
    /// instead of a second one. Without a directory nothing is spawned and
    /// the user is told to pick one. Spawn failures are reported the same way.
    pub fn open_for_directory(
        &mut self,
        dir: Option<&Path>,
        host: &mut dyn SurfaceHost,
    ) -> Result<SurfaceId, SessionError> {
        let result = match dir {
            None => Err(SessionError::MissingArgument(MISSING_FOLDER_MESSAGE.to_string())),
            Some(dir) if !dir.is_dir() => Err(SessionError::MissingArgument(format!(
                "{} is not a folder. {MISSING_FOLDER_MESSAGE}",
                dir.display()
            ))),
            Some(dir) => match self.find_by_cwd(dir) {
                Some(id) => {
                    tracing::debug!(surface = %id, cwd = %dir.display(), "Folder already open");
                    self.activate(&id);
                    Ok(id)
                }
                None => self.start_session(SurfaceId::new(), dir.to_path_buf(), host),
            },
        };
        if let Err(e) = &result {
            tracing::error!(error = %e, "Failed to open panel");
            self.notifications
                .push(Notification::error("Lazygit", e.to_string()));
        }
        result
    }

    /// Revive a persisted panel under its old surface id.
    ///
    /// Records without a usable directory, or for a directory another live
    /// panel already shows, are discarded without telling the user.
    pub fn restore(
        &mut self,
        id: SurfaceId,
        record: &RestorationRecord,
        host: &mut dyn SurfaceHost,
    ) -> Result<SurfaceId, SessionError> {
        let cwd = match record.working_directory() {
            Ok(cwd) if cwd.is_dir() && self.find_by_cwd(&cwd).is_none() => cwd,
            Ok(_) | Err(_) => {
                tracing::debug!(surface = %id, record = ?record, "Discarding restoration record");
                self.store.remove(&id);
                return Err(SessionError::Restoration);
            }
        };
        let result = self.start_session(id.clone(), cwd, host);
        if let Err(e) = &result {
            tracing::error!(surface = %id, error = %e, "Failed to restore panel");
            self.notifications
                .push(Notification::error("Lazygit", e.to_string()));
            self.store.remove(&id);
        }
        result
    }

    /// Restore every stored panel. Returns how many came back.
    pub fn restore_all(&mut self, host: &mut dyn SurfaceHost) -> usize {
        let mut restored = 0;
        for (id, record) in self.store.records() {
            if self.registry.contains(&id) {
                continue;
            }
            if self.restore(id, &record, host).is_ok() {
                restored += 1;
            }
        }
        tracing::info!(restored, "Panels restored");
        restored
    }

    fn start_session(
        &mut self,
        id: SurfaceId,
        cwd: PathBuf,
        host: &mut dyn SurfaceHost,
    ) -> Result<SurfaceId, SessionError> {
        let (cols, rows) = self.default_size;
        // Spawn first so a failure leaves no empty surface behind.
        let process = self.launcher.launch(&cwd, cols, rows)?;

        let surface = match host.open_surface(&id, &cwd) {
            Ok(surface) => surface,
            Err(e) => {
                let mut process = process;
                process.kill();
                return Err(SessionError::Surface(e.to_string()));
            }
        };

        let mut session = Session::new(id.clone(), cwd, process, surface, (cols, rows));
        let record = session.record();
        self.store.save(&id, record.clone());
        if let Err(e) = session.send(HostMessage::SetState { state: record }) {
            tracing::warn!(surface = %id, error = %e, "Failed to hand state to surface");
        }

        tracing::info!(surface = %id, cwd = %session.cwd().display(), "Panel opened");
        self.registry.insert(session);
        Ok(id)
    }

    /// The live session showing `dir`, if any.
    fn find_by_cwd(&self, dir: &Path) -> Option<SurfaceId> {
        self.registry
            .ids()
            .into_iter()
            .find(|id| {
                self.registry
                    .get(id)
                    .is_some_and(|session| same_directory(session.cwd(), dir))
            })
    }

    /// Make `id` the active panel and focus it.
    pub fn activate(&mut self, id: &SurfaceId) -> bool {
        if !self.registry.set_active(id) {
            return false;
        }
        if let Some(session) = self.registry.get_mut(id) {
            session.focus();
        }
        true
    }

    // =========================================================================
    // REFRESH
    // =========================================================================

    /// Restart the tool in the active panel and focus it.
    pub fn refresh_current(&mut self) {
        match self.registry.active().cloned() {
            Some(id) => {
                self.activate(&id);
                self.refresh(&id);
            }
            None => {
                tracing::debug!("Refresh requested with no active panel");
                self.notifications
                    .push(Notification::info("Lazygit", "No panel to refresh."));
            }
        }
    }

    /// Kill the panel's process and launch a fresh one in the same directory.
    pub fn refresh(&mut self, id: &SurfaceId) {
        let Some(session) = self.registry.get_mut(id) else {
            tracing::debug!(surface = %id, "Refresh for unknown surface");
            return;
        };
        let (cols, rows) = session.size();
        let cwd = session.cwd().to_path_buf();

        match self.launcher.launch(&cwd, cols, rows) {
            Ok(process) => {
                session.replace_process(process);
                let posted = session.send(HostMessage::Refresh);
                tracing::info!(surface = %id, "Panel refreshed");
                if let Err(e) = posted {
                    self.bridge_failed(id, &e);
                }
            }
            Err(e) => {
                tracing::error!(surface = %id, error = %e, "Refresh failed");
                self.notifications
                    .push(Notification::error("Lazygit", e.to_string()));
                self.dispose(id, DisposeReason::SpawnFailed);
            }
        }
    }

    // =========================================================================
    // POLLING
    // =========================================================================

    /// Move process output to surfaces and retire sessions whose process ended.
    pub fn poll_processes(&mut self) {
        for id in self.registry.ids() {
            let Some(session) = self.registry.get_mut(&id) else {
                continue;
            };
            let drained = session.drain_process();
            let mut failure = None;
            for chunk in &drained.chunks {
                if let Err(e) = session.on_output(chunk) {
                    failure = Some(e);
                    break;
                }
            }
            if let Some(e) = failure {
                self.bridge_failed(&id, &e);
            } else if drained.finished {
                tracing::info!(surface = %id, "Tool exited");
                self.dispose(&id, DisposeReason::ProcessExited);
            }
        }
    }

    /// Place surfaces side by side in equal columns across `viewport`.
    pub fn layout(&mut self, viewport: Rect) {
        let ids = self.registry.ids();
        let rects = column_rects(viewport, ids.len());
        for (id, rect) in ids.iter().zip(rects) {
            if let Some(session) = self.registry.get_mut(id) {
                session.set_bounds(rect);
            }
        }
    }

    // =========================================================================
    // TEARDOWN
    // =========================================================================

    /// The surface went away; kill its process and forget it.
    pub fn surface_closed(&mut self, id: &SurfaceId) {
        self.dispose(id, DisposeReason::SurfaceClosed);
    }

    /// Tear down one session. Returns `false` if it was not live.
    pub fn dispose(&mut self, id: &SurfaceId, reason: DisposeReason) -> bool {
        let Some(mut session) = self.registry.remove(id) else {
            return false;
        };
        if reason == DisposeReason::ProcessExited && session.state() == SessionState::Created {
            let body = match session.last_output_line() {
                Some(line) => format!("Lazygit exited in {}: {line}", session.cwd().display()),
                None => format!("Lazygit exited in {}.", session.cwd().display()),
            };
            tracing::warn!(surface = %id, "Tool exited before its panel was ready");
            self.notifications.push(Notification::error("Lazygit", body));
        }
        session.dispose();
        if !reason.keeps_record() {
            self.store.remove(id);
        }
        tracing::info!(surface = %id, reason = ?reason, remaining = self.registry.len(), "Panel closed");
        true
    }

    fn bridge_failed(&mut self, id: &SurfaceId, error: &LazypaneError) {
        tracing::warn!(surface = %id, error = %error, "Panel bridge failed");
        self.dispose(id, DisposeReason::BridgeFailed);
    }

    /// Dispose every session, keeping records for the next launch.
    ///
    /// Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        let sessions = self.registry.drain();
        let count = sessions.len();
        for mut session in sessions {
            session.dispose();
        }
        tracing::info!(count, "Panels shut down");
    }
}

/// Whether two paths name the same directory, resolving links when both exist.
fn same_directory(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
