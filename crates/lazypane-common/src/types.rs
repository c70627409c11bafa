use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::SessionError;

/// A rectangle in logical window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Persisted panel state: the only thing a surface remembers across restarts.
///
/// `cwd` is optional on the wire so that a record written by an older or
/// broken surface still parses; [`RestorationRecord::working_directory`]
/// rejects it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestorationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

impl RestorationRecord {
    pub fn new(cwd: impl Into<String>) -> Self {
        Self {
            cwd: Some(cwd.into()),
        }
    }

    /// The directory to restore into, or `SessionError::Restoration` if the
    /// record carries none (empty strings count as none).
    pub fn working_directory(&self) -> Result<PathBuf, SessionError> {
        match self.cwd.as_deref() {
            Some(cwd) if !cwd.trim().is_empty() => Ok(PathBuf::from(cwd)),
            _ => Err(SessionError::Restoration),
        }
    }
}
