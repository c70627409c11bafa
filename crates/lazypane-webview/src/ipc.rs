//! Message protocol between the controller and a panel.
//!
//! Every message is a JSON object tagged by `command`:
//! - **panel -> host**: the panel script calls
//!   `window.lazypane.ipc.post({command: ...})`, which reaches the WebView's
//!   `ipc_handler` and is parsed into a [`SurfaceMessage`].
//! - **host -> panel**: a [`HostMessage`] is serialized and handed to
//!   `window.lazypane.ipc._dispatch(...)` via `evaluate_script`.

use lazypane_common::RestorationRecord;
use serde::{Deserialize, Serialize};

/// A message posted by a panel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum SurfaceMessage {
    /// The terminal widget is mounted and can display output.
    Ready,
    /// Keystrokes typed into the terminal.
    Data { data: String },
    /// The terminal was refitted. Dimensions are validated by the receiver.
    Resize {
        #[serde(default)]
        cols: Option<f64>,
        #[serde(default)]
        rows: Option<f64>,
    },
    /// The panel's persisted state, echoed back for the host to store.
    SetState {
        #[serde(default)]
        state: RestorationRecord,
    },
    /// The user asked to restart the tool.
    Refresh,
    /// The user closed the panel.
    Close,
}

impl SurfaceMessage {
    /// Parse a message from a raw JSON string (from JS postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// A message posted into a panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum HostMessage {
    /// Terminal output to display.
    Data { data: String },
    /// State the panel should remember.
    SetState { state: RestorationRecord },
    /// The process was restarted; reset the terminal.
    Refresh,
}

/// JavaScript snippet that sets up the IPC bridge on the JS side.
/// This is injected as an initialization script into every WebView.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    window.lazypane = window.lazypane || {};
    window.lazypane.ipc = {
        post: function(msg) {
            window.ipc.postMessage(JSON.stringify(msg));
        },
        _handlers: [],
        onMessage: function(callback) {
            this._handlers.push(callback);
        },
        _dispatch: function(msg) {
            for (var i = 0; i < this._handlers.length; i++) {
                this._handlers[i](msg);
            }
        }
    };
})();
"#;

/// Generate a JS snippet that dispatches a message to the panel's handlers.
pub fn js_dispatch_message(msg: &HostMessage) -> String {
    let json = serde_json::to_string(msg).unwrap_or_else(|_| "null".to_string());
    format!("window.lazypane.ipc._dispatch({json});")
}
