//! One tool process bound to one surface.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use lazypane_common::{LazypaneError, Rect, RestorationRecord, SurfaceId};
use lazypane_webview::HostMessage;

use crate::app_state::pty_bridge::{Drained, PtyProcess, Utf8Stream};

use super::surface::Surface;

/// Lifecycle of a session.
///
/// `Created -> Ready -> Disposed`, or `Created -> Disposed`. Never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Surface exists; messages are buffered until it reports ready.
    Created,
    /// Output flows straight to the surface.
    Ready,
    /// Process killed and surface closed.
    Disposed,
}

pub struct Session {
    surface_id: SurfaceId,
    cwd: PathBuf,
    state: SessionState,
    pending: VecDeque<HostMessage>,
    decoder: Utf8Stream,
    process: Option<Box<dyn PtyProcess>>,
    surface: Option<Box<dyn Surface>>,
    size: (u16, u16),
}

impl Session {
    pub fn new(
        surface_id: SurfaceId,
        cwd: PathBuf,
        process: Box<dyn PtyProcess>,
        surface: Box<dyn Surface>,
        size: (u16, u16),
    ) -> Self {
        Self {
            surface_id,
            cwd,
            state: SessionState::Created,
            pending: VecDeque::new(),
            decoder: Utf8Stream::new(),
            process: Some(process),
            surface: Some(surface),
            size,
        }
    }

    pub fn surface_id(&self) -> &SurfaceId {
        &self.surface_id
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_disposed(&self) -> bool {
        self.state == SessionState::Disposed
    }

    /// Last terminal size applied to the process.
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// Number of messages waiting for the surface to become ready.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// The last non-blank line of output still waiting for the surface,
    /// with terminal escape sequences removed.
    pub fn last_output_line(&self) -> Option<String> {
        let mut output = String::new();
        for msg in &self.pending {
            if let HostMessage::Data { data } = msg {
                output.push_str(data);
            }
        }
        strip_escapes(&output)
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .map(|line| line.chars().take(MAX_NOTICE_CHARS).collect())
    }

    pub fn record(&self) -> RestorationRecord {
        RestorationRecord::new(self.cwd.to_string_lossy())
    }

    /// Send a message to the surface. A no-op once disposed.
    pub fn post(&mut self, msg: &HostMessage) -> Result<(), LazypaneError> {
        if self.is_disposed() {
            return Ok(());
        }
        match self.surface.as_mut() {
            Some(surface) => surface.post(msg),
            None => Ok(()),
        }
    }

    /// Buffer `msg` until the surface is ready, or post it now.
    pub fn send(&mut self, msg: HostMessage) -> Result<(), LazypaneError> {
        match self.state {
            SessionState::Created => {
                self.pending.push_back(msg);
                Ok(())
            }
            SessionState::Ready => self.post(&msg),
            SessionState::Disposed => Ok(()),
        }
    }

    /// Route a chunk of process output to the surface.
    pub fn on_output(&mut self, bytes: &[u8]) -> Result<(), LazypaneError> {
        if self.is_disposed() {
            return Ok(());
        }
        let text = self.decoder.decode(bytes);
        if text.is_empty() {
            return Ok(());
        }
        self.send(HostMessage::Data { data: text })
    }

    /// The surface reported ready: flush buffered messages in order.
    ///
    /// Repeated ready reports are ignored.
    pub fn mark_ready(&mut self) -> Result<(), LazypaneError> {
        if self.state != SessionState::Created {
            tracing::debug!(surface = %self.surface_id, state = ?self.state, "Ignoring ready");
            return Ok(());
        }
        self.state = SessionState::Ready;
        while let Some(msg) = self.pending.pop_front() {
            self.post(&msg)?;
        }
        Ok(())
    }

    /// Forward keystrokes to the process.
    pub fn write_input(&mut self, data: &str) -> Result<(), LazypaneError> {
        if self.is_disposed() {
            return Ok(());
        }
        match self.process.as_mut() {
            Some(process) => Ok(process.write_input(data.as_bytes())?),
            None => Ok(()),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<(), LazypaneError> {
        if self.is_disposed() {
            return Ok(());
        }
        self.size = (cols, rows);
        match self.process.as_mut() {
            Some(process) => Ok(process.resize(cols, rows)?),
            None => Ok(()),
        }
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        if let Some(surface) = self.surface.as_mut() {
            surface.set_bounds(bounds);
        }
    }

    pub fn focus(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.focus();
        }
    }

    /// Collect output from the process. A session without a process is finished.
    pub fn drain_process(&mut self) -> Drained {
        match self.process.as_mut() {
            Some(process) => process.drain_output(),
            None => Drained {
                chunks: Vec::new(),
                finished: true,
            },
        }
    }

    /// Swap in a freshly launched process, killing the old one.
    ///
    /// Output still buffered from the old process is discarded.
    pub fn replace_process(&mut self, process: Box<dyn PtyProcess>) {
        if let Some(mut old) = self.process.replace(process) {
            old.kill();
        }
        self.pending
            .retain(|msg| !matches!(msg, HostMessage::Data { .. }));
        self.decoder.reset();
    }

    /// Kill the process and close the surface.
    ///
    /// Returns `false` if the session was already disposed.
    pub fn dispose(&mut self) -> bool {
        if self.is_disposed() {
            return false;
        }
        self.state = SessionState::Disposed;
        self.pending.clear();
        if let Some(mut process) = self.process.take() {
            process.kill();
        }
        if let Some(mut surface) = self.surface.take() {
            surface.close();
        }
        tracing::debug!(surface = %self.surface_id, "Session disposed");
        true
    }
}

const MAX_NOTICE_CHARS: usize = 200;

/// Drop CSI and OSC sequences and control characters. `\r` becomes a line break.
fn strip_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\u{1b}' => match chars.next() {
                Some('[') => {
                    for c in chars.by_ref() {
                        if ('@'..='~').contains(&c) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    while let Some(c) = chars.next() {
                        if c == '\u{7}' {
                            break;
                        }
                        if c == '\u{1b}' {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            '\r' | '\n' => out.push('\n'),
            c if c.is_control() && c != '\t' => {}
            c => out.push(c),
        }
    }
    out
}

impl Drop for Session {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("surface_id", &self.surface_id)
            .field("cwd", &self.cwd)
            .field("state", &self.state)
            .field("pending", &self.pending.len())
            .field("size", &self.size)
            .finish()
    }
}
