//! Session restoration settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Reopen the panels that were open when the host last exited.
    pub restore_on_launch: bool,
    /// Panel state file. `None` means `<data dir>/lazypane/panels.json`.
    pub state_file: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            restore_on_launch: true,
            state_file: None,
        }
    }
}
