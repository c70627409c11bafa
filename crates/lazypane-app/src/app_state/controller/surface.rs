//! Seams between the controller and whatever displays a session.

use std::path::Path;

use lazypane_common::{LazypaneError, Rect, SurfaceId};
use lazypane_webview::HostMessage;

/// A panel showing one session's terminal.
pub trait Surface {
    /// Deliver a message to the panel.
    fn post(&mut self, msg: &HostMessage) -> Result<(), LazypaneError>;

    /// Move the panel within the host window.
    fn set_bounds(&mut self, _bounds: Rect) {}

    /// Give the panel keyboard focus.
    fn focus(&mut self) {}

    /// Tear the panel down. Called at most once per session.
    fn close(&mut self);
}

/// Creates surfaces on demand.
pub trait SurfaceHost {
    fn open_surface(
        &mut self,
        surface: &SurfaceId,
        cwd: &Path,
    ) -> Result<Box<dyn Surface>, LazypaneError>;
}

/// Panel title for a session rooted at `cwd`: `Lazygit: <basename>`.
pub fn panel_title(cwd: &Path) -> String {
    let name = cwd
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cwd.display().to_string());
    format!("Lazygit: {name}")
}
