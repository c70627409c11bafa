//! PTY bridge types: the process handle and the seams the controller uses.

use std::io::Write;
use std::path::Path;
use std::sync::mpsc;

use lazypane_common::{PtyError, SessionError};
use portable_pty::{Child, MasterPty, PtySize};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Maximum bytes read from a PTY in one `read` call (8 KB).
pub const PTY_READ_CHUNK: usize = 8_192;

/// Stop draining a PTY once this many bytes were collected in one poll (64 KB).
/// Remaining chunks stay queued for the next poll.
pub const PTY_MAX_OUTPUT_PER_POLL: usize = 65_536;

// =============================================================================
// SEAMS
// =============================================================================

/// How the tool ended up running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchMode {
    /// The tool is the PTY's child process.
    Direct,
    /// An interactive shell is the child; the tool invocation was typed into it.
    ShellFallback { shell: String },
}

/// Output collected from a process in one poll.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Drained {
    /// Output chunks in arrival order.
    pub chunks: Vec<Vec<u8>>,
    /// The process side of the channel is gone and nothing is left to read.
    pub finished: bool,
}

/// A running process attached to a terminal.
///
/// Writes and resizes are fire-and-forget: they never wait on the child.
pub trait PtyProcess {
    fn write_input(&mut self, data: &[u8]) -> Result<(), PtyError>;
    fn resize(&mut self, cols: u16, rows: u16) -> Result<(), PtyError>;
    fn drain_output(&mut self) -> Drained;
    /// Kill the child. Must tolerate an already-dead child.
    fn kill(&mut self);
}

/// Starts the tool for a session.
pub trait Launcher {
    fn launch(
        &self,
        cwd: &Path,
        cols: u16,
        rows: u16,
    ) -> Result<Box<dyn PtyProcess>, SessionError>;
}

// =============================================================================
// PTY HANDLE
// =============================================================================

/// A single PTY instance bound to a session.
///
/// Owns the master side of the PTY pair: a writer for input, a reader
/// thread that sends output chunks over an `mpsc` channel, and a child
/// process handle for lifecycle management.
pub struct PtyHandle {
    /// Writer to send input bytes to the PTY.
    pub(super) writer: Box<dyn Write + Send>,
    /// Receiver for output chunks from the reader thread.
    pub(super) output_rx: mpsc::Receiver<Vec<u8>>,
    /// Child process handle (for kill).
    pub(super) child: Box<dyn Child + Send + Sync>,
    /// Master PTY handle (for resize).
    pub(super) master: Box<dyn MasterPty + Send>,
    /// Current terminal size.
    pub(super) size: PtySize,
    pub(super) launch: LaunchMode,
}

impl PtyHandle {
    pub fn size(&self) -> (u16, u16) {
        (self.size.cols, self.size.rows)
    }

    pub fn launch_mode(&self) -> &LaunchMode {
        &self.launch
    }
}
