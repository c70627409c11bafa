//! WebView lifecycle management.
//!
//! `WebViewManager` creates `wry::WebView` children of the host window, one
//! per surface, and collects their events into a shared queue.

use std::sync::{Arc, Mutex};

use crate::content::ContentProvider;
use crate::events::WebViewEvent;

mod handle;
pub mod handlers;
mod lifecycle;
mod types;

pub use handle::WebViewHandle;
pub use types::WebViewConfig;

/// Creates surfaces and owns the event sink they report into.
pub struct WebViewManager {
    /// Event sink. Events are pushed here for the host loop to consume.
    pub(crate) events: Arc<Mutex<Vec<WebViewEvent>>>,
    /// Content provider for the `lazypane://` custom protocol.
    content_provider: Arc<ContentProvider>,
}

impl WebViewManager {
    /// Create a manager serving panel content from `provider`.
    pub fn new(provider: ContentProvider) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            content_provider: Arc::new(provider),
        }
    }

    /// Drain all pending events, oldest first.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Default for WebViewManager {
    fn default() -> Self {
        Self::new(ContentProvider::bundled())
    }
}
