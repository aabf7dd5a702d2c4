//! Session store interface and in-memory implementation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::error::SessionResult;
use super::types::{session_key, ChatSession};

/// Key-value store of chat sessions keyed by search term.
///
/// Keys are normalized with [`session_key`] by every implementation, so
/// callers may pass raw user input.
pub trait SessionStore {
    /// Load the session for `term`, if one exists.
    fn get(&self, term: &str) -> SessionResult<Option<ChatSession>>;

    /// Insert or replace a session.
    fn put(&mut self, session: &ChatSession) -> SessionResult<()>;

    /// Remove a session. Returns true if one existed.
    fn delete(&mut self, term: &str) -> SessionResult<bool>;

    /// All stored sessions, in no particular order.
    fn list(&self) -> SessionResult<Vec<ChatSession>>;

    /// Search terms of sessions whose expiry is at or before `now`.
    fn list_expired(&self, now: DateTime<Utc>) -> SessionResult<Vec<String>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|s| s.is_expired(now))
            .map(|s| s.search_term)
            .collect())
    }
}

/// Volatile store, used in tests and when persistence is disabled.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    sessions: BTreeMap<String, ChatSession>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, term: &str) -> SessionResult<Option<ChatSession>> {
        Ok(self.sessions.get(&session_key(term)).cloned())
    }

    fn put(&mut self, session: &ChatSession) -> SessionResult<()> {
        self.sessions
            .insert(session_key(&session.search_term), session.clone());
        Ok(())
    }

    fn delete(&mut self, term: &str) -> SessionResult<bool> {
        Ok(self.sessions.remove(&session_key(term)).is_some())
    }

    fn list(&self) -> SessionResult<Vec<ChatSession>> {
        Ok(self.sessions.values().cloned().collect())
    }
}
