use std::sync::{Arc, Mutex};

use lazypane_common::SurfaceId;
use wry::WebView;

use crate::events::WebViewEvent;
use crate::ipc::{js_dispatch_message, HostMessage};

/// Handle to one surface's WebView.
pub struct WebViewHandle {
    /// The underlying wry WebView.
    pub(super) webview: WebView,
    /// The surface this WebView renders.
    pub(super) surface: SurfaceId,
    /// Set once the host has hidden and released the surface.
    pub(super) closed: bool,
    /// Shared event sink; receives `Closed` when this surface closes.
    pub(super) events: Arc<Mutex<Vec<WebViewEvent>>>,
}

impl WebViewHandle {
    pub fn surface(&self) -> &SurfaceId {
        &self.surface
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Post a message into the panel.
    pub fn send_message(&self, msg: &HostMessage) -> Result<(), wry::Error> {
        self.webview.evaluate_script(&js_dispatch_message(msg))
    }

    /// Set the WebView bounds (position + size) within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    /// Give the WebView keyboard focus.
    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }

    /// Hide the surface and stop it from receiving further messages.
    ///
    /// Returns `false` if it was already closed. The native view is released
    /// when the handle is dropped.
    pub fn close(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;
        if let Err(e) = self.webview.set_visible(false) {
            tracing::debug!(surface = %self.surface, error = %e, "failed to hide surface");
        }
        if let Err(e) = self.webview.load_url("about:blank") {
            tracing::debug!(surface = %self.surface, error = %e, "failed to blank surface");
        }
        if let Ok(mut evts) = self.events.lock() {
            evts.push(WebViewEvent::Closed {
                surface: self.surface.clone(),
            });
        }
        true
    }
}
