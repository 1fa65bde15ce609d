//! In-memory registry of studio sessions

use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::traits::GenerativeBackend;
use crate::config::StudioConfig;
use crate::error::{AppError, Result};
use crate::studio::session::StudioSession;

/// Sessions keyed by id, all sharing one model backend
pub struct StudioRegistry {
    backend: Arc<dyn GenerativeBackend>,
    config: StudioConfig,
    sessions: DashMap<Uuid, Arc<StudioSession>>,
}

impl StudioRegistry {
    pub fn new(backend: Arc<dyn GenerativeBackend>, config: StudioConfig) -> Self {
        Self {
            backend,
            config,
            sessions: DashMap::new(),
        }
    }

    /// Open a new session
    pub fn create(&self) -> Arc<StudioSession> {
        let session = Arc::new(StudioSession::new(self.backend.clone(), &self.config));
        self.sessions.insert(session.id(), session.clone());
        session
    }

    pub fn get(&self, id: Uuid) -> Result<Arc<StudioSession>> {
        self.sessions
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::SessionNotFound(id.to_string()))
    }

    /// Close and forget a session
    pub fn remove(&self, id: Uuid) -> Result<()> {
        let (_, session) = self
            .sessions
            .remove(&id)
            .ok_or_else(|| AppError::SessionNotFound(id.to_string()))?;
        session.close();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
