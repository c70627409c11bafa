//! Routing of surface events to sessions.

use lazypane_common::SurfaceId;
use lazypane_config::validation::MAX_TERMINAL_DIMENSION;
use lazypane_webview::{SurfaceMessage, WebViewEvent};

use super::{DisposeReason, PanelController};

impl PanelController {
    /// Handle one event from the surface layer.
    pub fn handle_event(&mut self, event: WebViewEvent) {
        match event {
            WebViewEvent::IpcMessage { surface, body } => match SurfaceMessage::from_json(&body) {
                Some(msg) => self.handle_message(&surface, msg),
                None => {
                    tracing::warn!(surface = %surface, body = %body, "Ignoring unrecognized message");
                }
            },
            WebViewEvent::Closed { surface } => self.surface_closed(&surface),
            WebViewEvent::PageLoad { surface, state, url } => {
                tracing::debug!(surface = %surface, state = ?state, url = %url, "Surface page load");
            }
            WebViewEvent::NavigationRequested { surface, url } => {
                tracing::debug!(surface = %surface, url = %url, "Surface navigation");
            }
        }
    }

    /// Apply a parsed surface message to its session.
    pub fn handle_message(&mut self, id: &SurfaceId, msg: SurfaceMessage) {
        if !self.registry.contains(id) {
            tracing::debug!(surface = %id, msg = ?msg, "Message for unknown surface");
            return;
        }

        match msg {
            SurfaceMessage::Ready => {
                let result = match self.registry.get_mut(id) {
                    Some(session) => session.mark_ready(),
                    None => Ok(()),
                };
                if let Err(e) = result {
                    self.bridge_failed(id, &e);
                }
            }
            SurfaceMessage::Data { data } => {
                self.registry.set_active(id);
                let result = match self.registry.get_mut(id) {
                    Some(session) => session.write_input(&data),
                    None => Ok(()),
                };
                if let Err(e) = result {
                    self.bridge_failed(id, &e);
                }
            }
            SurfaceMessage::Resize { cols, rows } => {
                let Some((cols, rows)) = validated_size(cols, rows) else {
                    tracing::debug!(surface = %id, ?cols, ?rows, "Ignoring invalid resize");
                    return;
                };
                let result = match self.registry.get_mut(id) {
                    Some(session) => session.resize(cols, rows),
                    None => Ok(()),
                };
                if let Err(e) = result {
                    self.bridge_failed(id, &e);
                }
            }
            SurfaceMessage::SetState { state } => match state.working_directory() {
                Ok(_) => self.store.save(id, state),
                Err(_) => tracing::debug!(surface = %id, "Ignoring state without a directory"),
            },
            SurfaceMessage::Refresh => {
                self.activate(id);
                self.refresh(id);
            }
            SurfaceMessage::Close => {
                self.dispose(id, DisposeReason::SurfaceClosed);
            }
        }
    }
}

/// Validate terminal dimensions reported by a surface.
///
/// Both must be present, finite, and within `1..=MAX_TERMINAL_DIMENSION`.
/// Fractional values are truncated.
pub fn validated_size(cols: Option<f64>, rows: Option<f64>) -> Option<(u16, u16)> {
    let dim = |v: f64| {
        let max = f64::from(MAX_TERMINAL_DIMENSION);
        if v.is_finite() && (1.0..=max).contains(&v.trunc()) {
            Some(v.trunc() as u16)
        } else {
            None
        }
    };
    Some((dim(cols?)?, dim(rows?)?))
}
