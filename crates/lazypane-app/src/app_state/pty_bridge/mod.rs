//! PTY bridge: runs the tool behind a pseudo-terminal.
//!
//! Uses `portable-pty` for cross-platform PTY spawning. Each session gets its
//! own PTY with a background reader thread. Input flows from the panel →
//! controller → PTY writer. Output flows from the PTY reader channel →
//! controller → panel.

mod io;
mod spawn;
mod types;
mod utf8;

pub use spawn::{spawn_tool, LaunchPlan, ToolLauncher};
pub use types::{Drained, LaunchMode, Launcher, PtyHandle, PtyProcess};
pub use utf8::Utf8Stream;
