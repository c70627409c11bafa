//! `Surface` implementation for wry-backed panels.

use lazypane_common::{LazypaneError, Rect};
use lazypane_webview::{HostMessage, WebViewHandle};

use crate::app_state::controller::Surface;

use super::bounds::rect_to_wry;

impl Surface for WebViewHandle {
    fn post(&mut self, msg: &HostMessage) -> Result<(), LazypaneError> {
        if self.is_closed() {
            return Err(LazypaneError::WebView(format!(
                "surface {} is closed",
                self.surface()
            )));
        }
        self.send_message(msg)
            .map_err(|e| LazypaneError::WebView(e.to_string()))
    }

    fn set_bounds(&mut self, bounds: Rect) {
        if let Err(e) = WebViewHandle::set_bounds(self, rect_to_wry(&bounds)) {
            tracing::warn!(surface = %self.surface(), error = %e, "Failed to set surface bounds");
        }
    }

    fn focus(&mut self) {
        if let Err(e) = WebViewHandle::focus(self) {
            tracing::debug!(surface = %self.surface(), error = %e, "Failed to focus surface");
        }
    }

    fn close(&mut self) {
        WebViewHandle::close(self);
    }
}
