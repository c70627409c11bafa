//! Configuration schema types for lazypane.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod logging;
mod panel;
mod session;
mod terminal;
mod tool;
mod window;

pub use logging::*;
pub use panel::*;
pub use session::*;
pub use terminal::*;
pub use tool::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LazypaneConfig {
    pub tool: ToolConfig,
    pub terminal: TerminalConfig,
    pub window: WindowConfig,
    pub panel: PanelConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}
