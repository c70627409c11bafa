//! Restoration records persisted across launches.
//!
//! Stored as one JSON object keyed by surface id:
//! `{"<surface-id>": {"cwd": "/path/to/repo"}}`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lazypane_common::{LazypaneError, RestorationRecord, SurfaceId};

const STATE_FILE_NAME: &str = "panels.json";

/// Restoration records for open panels, written through to disk.
#[derive(Debug, Default)]
pub struct StateStore {
    path: Option<PathBuf>,
    records: BTreeMap<SurfaceId, RestorationRecord>,
}

impl StateStore {
    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store at `path`, loading any records already there.
    ///
    /// A missing file yields an empty store. An unreadable or corrupt one is
    /// logged and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt panel state");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read panel state");
                BTreeMap::new()
            }
        };
        tracing::debug!(path = %path.display(), count = records.len(), "Panel state loaded");
        Self {
            path: Some(path),
            records,
        }
    }

    /// Platform default location: `<data_dir>/lazypane/panels.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("lazypane").join(STATE_FILE_NAME))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, id: &SurfaceId) -> Option<&RestorationRecord> {
        self.records.get(id)
    }

    /// Every stored record, ordered by surface id.
    pub fn records(&self) -> Vec<(SurfaceId, RestorationRecord)> {
        self.records
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn save(&mut self, id: &SurfaceId, record: RestorationRecord) {
        if self.records.get(id) == Some(&record) {
            return;
        }
        self.records.insert(id.clone(), record);
        self.persist();
    }

    pub fn remove(&mut self, id: &SurfaceId) {
        if self.records.remove(id).is_some() {
            self.persist();
        }
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = write_records(path, &self.records) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to save panel state");
        }
    }
}

fn write_records(
    path: &Path,
    records: &BTreeMap<SurfaceId, RestorationRecord>,
) -> Result<(), LazypaneError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(records)
        .map_err(|e| LazypaneError::Other(format!("serialize panel state: {e}")))?;
    std::fs::write(path, json)?;
    Ok(())
}
