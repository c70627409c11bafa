//! Live sessions keyed by surface id, plus the active one.

use std::collections::HashMap;

use lazypane_common::SurfaceId;

use super::session::Session;

/// Owns every live session.
///
/// Keeps creation order for layout. The active session is the one most
/// recently opened or typed into.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SurfaceId, Session>,
    order: Vec<SurfaceId>,
    active: Option<SurfaceId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session and make it active. Replaces any session with the
    /// same surface id.
    pub fn insert(&mut self, session: Session) -> Option<Session> {
        let id = session.surface_id().clone();
        let previous = self.sessions.insert(id.clone(), session);
        if previous.is_none() {
            self.order.push(id.clone());
        }
        self.active = Some(id);
        previous
    }

    pub fn remove(&mut self, id: &SurfaceId) -> Option<Session> {
        let session = self.sessions.remove(id)?;
        self.order.retain(|s| s != id);
        if self.active.as_ref() == Some(id) {
            self.active = self.order.last().cloned();
        }
        Some(session)
    }

    pub fn get(&self, id: &SurfaceId) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &SurfaceId) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    pub fn contains(&self, id: &SurfaceId) -> bool {
        self.sessions.contains_key(id)
    }

    /// Surface ids in creation order.
    pub fn ids(&self) -> Vec<SurfaceId> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn active(&self) -> Option<&SurfaceId> {
        self.active.as_ref()
    }

    /// Mark `id` active. Returns `false` for an unknown id.
    pub fn set_active(&mut self, id: &SurfaceId) -> bool {
        if !self.sessions.contains_key(id) {
            return false;
        }
        self.active = Some(id.clone());
        true
    }

    /// Remove every session, in creation order.
    pub fn drain(&mut self) -> Vec<Session> {
        self.active = None;
        let order = std::mem::take(&mut self.order);
        order
            .into_iter()
            .filter_map(|id| self.sessions.remove(&id))
            .collect()
    }
}
