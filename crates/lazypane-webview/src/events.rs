//! WebView event types.

use lazypane_common::SurfaceId;
use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded.
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by a surface, queued until the host loop drains them.
#[derive(Debug, Clone, PartialEq)]
pub enum WebViewEvent {
    /// Page load state changed. Carries the URL.
    PageLoad {
        surface: SurfaceId,
        state: PageLoadState,
        url: String,
    },
    /// A message was posted by the panel script. `body` is raw JSON.
    IpcMessage { surface: SurfaceId, body: String },
    /// An allowed navigation started.
    NavigationRequested { surface: SurfaceId, url: String },
    /// The surface was closed by the host.
    Closed { surface: SurfaceId },
}

impl WebViewEvent {
    /// The surface this event belongs to.
    pub fn surface(&self) -> &SurfaceId {
        match self {
            Self::PageLoad { surface, .. }
            | Self::IpcMessage { surface, .. }
            | Self::NavigationRequested { surface, .. }
            | Self::Closed { surface } => surface,
        }
    }
}
