//! Rendering surfaces for lazypane.
//!
//! Wraps the `wry` crate to provide:
//! - One child WebView per surface, hosting the xterm.js panel
//! - The JSON message protocol between the panel and the controller
//! - A `lazypane://` custom protocol serving the bundled panel
//! - Navigation allowlisting and event collection for the host loop

pub mod content;
pub mod events;
pub mod ipc;
pub mod manager;

pub use content::{ContentProvider, PANEL_URL};
pub use events::{PageLoadState, WebViewEvent};
pub use ipc::{HostMessage, SurfaceMessage};
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager};
