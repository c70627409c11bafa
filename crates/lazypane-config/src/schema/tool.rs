//! The external tool launched in each panel.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which program runs inside the PTY and how to fall back when it can't be
/// started directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Program name or path. `.exe` is appended on Windows when missing.
    pub program: String,
    /// Extra arguments passed to the program.
    pub args: Vec<String>,
    /// Interactive shell used when the program can't be spawned directly.
    /// Empty string means `cmd.exe` on Windows and `bash` elsewhere.
    pub fallback_shell: String,
    /// Extra environment variables, applied after the terminal overrides.
    pub env: HashMap<String, String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: "lazygit".into(),
            args: Vec::new(),
            fallback_shell: String::new(),
            env: HashMap::new(),
        }
    }
}
