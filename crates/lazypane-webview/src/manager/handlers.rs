use std::sync::{Arc, Mutex};

use lazypane_common::SurfaceId;
use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, WebViewEvent};

use super::WebViewManager;

// =============================================================================
// NAVIGATION ALLOWLIST
// =============================================================================

/// Allowed URL prefixes for surface navigation. Everything else is blocked.
/// - `lazypane://`: bundled panel assets
/// - `about:blank`: closed surfaces
/// - jsDelivr: xterm.js and its fit addon
pub const ALLOWED_NAV_PREFIXES: &[&str] = &[
    "lazypane://",
    // WebView2 rewrites lazypane://localhost/… → http://lazypane.localhost/…
    "http://lazypane.localhost/",
    "about:blank",
    "https://cdn.jsdelivr.net/",
];

/// Check whether a URL is allowed by the navigation allowlist.
pub fn is_navigation_allowed(url: &str) -> bool {
    ALLOWED_NAV_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

impl WebViewManager {
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        surface: SurfaceId,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();

            if serde_json::from_str::<serde_json::Value>(&body).is_err() {
                warn!(
                    surface = %surface,
                    body_len = body.len(),
                    "IPC message rejected: invalid JSON"
                );
                return;
            }

            if let Ok(mut evts) = events.lock() {
                evts.push(WebViewEvent::IpcMessage {
                    surface: surface.clone(),
                    body,
                });
            }
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        surface: SurfaceId,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            if let Ok(mut evts) = events.lock() {
                evts.push(WebViewEvent::PageLoad {
                    surface: surface.clone(),
                    state,
                    url,
                });
            }
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        surface: SurfaceId,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if !is_navigation_allowed(&url) {
                warn!(surface = %surface, url = %url, "navigation blocked: URL not in allowlist");
                return false;
            }

            debug!(surface = %surface, url = %url, "navigation allowed");
            if let Ok(mut evts) = events.lock() {
                evts.push(WebViewEvent::NavigationRequested {
                    surface: surface.clone(),
                    url,
                });
            }
            true
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
