//! Terminal capabilities advertised to the spawned process.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Value of `TERM`.
    pub term: String,
    /// Value of `COLORTERM`.
    pub colorterm: String,
    /// Value of `LANG` and `LC_ALL`.
    pub locale: String,
    /// Size used until the surface reports its own (valid range: 1-500).
    pub default_cols: u16,
    pub default_rows: u16,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            term: "xterm-256color".into(),
            colorterm: "truecolor".into(),
            locale: "en_US.UTF-8".into(),
            default_cols: 80,
            default_rows: 24,
        }
    }
}
