//! In-memory session store.
//!
//! Sessions live for the lifetime of the process, which matches the
//! session-scoped contract: state survives page reloads within a browsing
//! session and is wiped on successful submission.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::SessionStore;

#[derive(Debug, Default)]
struct SessionEntry {
    values: HashMap<String, String>,
    updated_at: Option<DateTime<Utc>>,
}

/// Map-backed store guarded by an async lock.
#[derive(Default)]
pub struct MemoryStore {
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When the session was last written, if ever.
    pub async fn last_updated(&self, session: &str) -> Option<DateTime<Utc>> {
        let sessions = self.sessions.read().await;
        sessions.get(session).and_then(|e| e.updated_at)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, session: &str, key: &str) -> Result<Option<String>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(session)
            .and_then(|entry| entry.values.get(key).cloned()))
    }

    async fn set(&self, session: &str, key: &str, value: &str) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.entry(session.to_string()).or_default();
        entry.values.insert(key.to_string(), value.to_string());
        entry.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn clear(&self, session: &str) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session);
        Ok(())
    }
}
