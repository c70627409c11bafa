//! PTY I/O operations: write input, drain output, resize, kill.

use std::io::Write;
use std::sync::mpsc;

use lazypane_common::PtyError;
use portable_pty::PtySize;

use super::types::{Drained, PtyHandle, PtyProcess, PTY_MAX_OUTPUT_PER_POLL};

// =============================================================================
// INPUT (WRITE TO PTY)
// =============================================================================

impl PtyHandle {
    /// Write raw input bytes to the PTY (keystrokes from xterm.js).
    pub fn write_input(&mut self, data: &[u8]) -> Result<(), PtyError> {
        self.writer
            .write_all(data)
            .map_err(|e| PtyError::Write(e.to_string()))?;
        self.writer
            .flush()
            .map_err(|e| PtyError::Write(format!("flush: {e}")))?;
        Ok(())
    }
}

// =============================================================================
// OUTPUT (READ FROM PTY)
// =============================================================================

impl PtyHandle {
    /// Drain available output chunks from the reader thread.
    ///
    /// Stops once `PTY_MAX_OUTPUT_PER_POLL` bytes were collected; nothing is
    /// dropped, the rest waits for the next call. `finished` is set only
    /// when the channel is empty and the reader thread is gone.
    pub fn drain_output(&mut self) -> Drained {
        let mut drained = Drained::default();
        let mut total = 0;

        loop {
            match self.output_rx.try_recv() {
                Ok(chunk) => {
                    total += chunk.len();
                    drained.chunks.push(chunk);
                    if total >= PTY_MAX_OUTPUT_PER_POLL {
                        break;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    drained.finished = true;
                    break;
                }
            }
        }

        drained
    }
}

// =============================================================================
// RESIZE
// =============================================================================

impl PtyHandle {
    /// Resize the PTY to new dimensions.
    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<(), PtyError> {
        let new_size = PtySize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        };
        self.master
            .resize(new_size)
            .map_err(|e| PtyError::Resize(e.to_string()))?;
        self.size = new_size;
        Ok(())
    }
}

// =============================================================================
// KILL
// =============================================================================

impl PtyHandle {
    /// Kill the PTY child process and reap it if it already exited.
    pub fn kill(&mut self) {
        if let Err(e) = self.child.kill() {
            tracing::debug!("PTY kill error (may already be dead): {e}");
        }
        match self.child.try_wait() {
            Ok(Some(status)) => {
                tracing::debug!(code = status.exit_code(), "PTY child reaped");
            }
            Ok(None) => {}
            Err(e) => tracing::debug!("PTY wait error: {e}"),
        }
    }
}

impl PtyProcess for PtyHandle {
    fn write_input(&mut self, data: &[u8]) -> Result<(), PtyError> {
        PtyHandle::write_input(self, data)
    }

    fn resize(&mut self, cols: u16, rows: u16) -> Result<(), PtyError> {
        PtyHandle::resize(self, cols, rows)
    }

    fn drain_output(&mut self) -> Drained {
        PtyHandle::drain_output(self)
    }

    fn kill(&mut self) {
        PtyHandle::kill(self)
    }
}

// =============================================================================
// TESTS
// =============================================================================
