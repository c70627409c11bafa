//! Rendering surface settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Enable webview devtools (always on in debug builds).
    pub devtools: bool,
    /// Serve panel assets from this directory instead of the embedded copy.
    pub assets_dir: Option<String>,
    pub font_family: String,
    /// Terminal font size in px (valid range: 6-48).
    pub font_size: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            devtools: cfg!(debug_assertions),
            assets_dir: None,
            font_family: "Menlo, Consolas, \"Courier New\", monospace".into(),
            font_size: 14,
        }
    }
}
