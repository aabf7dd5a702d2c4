//! Lifecycle owner for chat session history.
//!
//! `SessionHistory` is the only component that mutates stored sessions. It
//! stamps updates, extends expiry on use, and evicts expired sessions.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use super::error::{SessionError, SessionResult};
use super::store::SessionStore;
use super::types::{ChatSession, Role};

/// Owns a [`SessionStore`] and applies the time-to-live policy.
pub struct SessionHistory<S: SessionStore> {
    store: S,
    ttl: Duration,
}

impl<S: SessionStore> SessionHistory<S> {
    /// Sessions expire `ttl_days` after their last update.
    pub fn new(store: S, ttl_days: u32) -> Self {
        Self {
            store,
            ttl: Duration::days(i64::from(ttl_days)),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Live session for `term`, if any. Expired sessions are treated as absent.
    pub fn get(&self, term: &str, now: DateTime<Utc>) -> SessionResult<Option<ChatSession>> {
        Ok(self.store.get(term)?.filter(|s| !s.is_expired(now)))
    }

    /// Live session for `term`, or a fresh one (not yet saved).
    pub fn open(&self, term: &str, now: DateTime<Utc>) -> SessionResult<ChatSession> {
        Ok(self
            .get(term, now)?
            .unwrap_or_else(|| ChatSession::new(term, now, self.ttl)))
    }

    /// Append a message to the active branch of `term`'s session.
    pub fn record_message(
        &mut self,
        term: &str,
        role: Role,
        content: &str,
        now: DateTime<Utc>,
    ) -> SessionResult<ChatSession> {
        self.update(term, now, |session| {
            session.push_message(role, content, now)
        })
    }

    /// Remember which playlist entry the user was on.
    pub fn set_last_active_index(
        &mut self,
        term: &str,
        index: usize,
        now: DateTime<Utc>,
    ) -> SessionResult<ChatSession> {
        self.update(term, now, |session| session.last_active_index = index)
    }

    /// Fork the active branch, keeping its first `keep` messages.
    pub fn fork_branch(
        &mut self,
        term: &str,
        keep: usize,
        now: DateTime<Utc>,
    ) -> SessionResult<ChatSession> {
        self.update(term, now, |session| {
            session.fork_branch(keep, now);
        })
    }

    /// Make another branch active. Errors if the session does not exist.
    pub fn switch_branch(
        &mut self,
        term: &str,
        branch: usize,
        now: DateTime<Utc>,
    ) -> SessionResult<bool> {
        let mut session = self
            .get(term, now)?
            .ok_or_else(|| SessionError::NotFound(term.to_string()))?;
        if !session.switch_branch(branch) {
            return Ok(false);
        }
        session.touch(now, self.ttl);
        self.store.put(&session)?;
        Ok(true)
    }

    pub fn delete(&mut self, term: &str) -> SessionResult<bool> {
        self.store.delete(term)
    }

    /// Live sessions, most recently updated first.
    pub fn sessions(&self, now: DateTime<Utc>) -> SessionResult<Vec<ChatSession>> {
        let mut sessions: Vec<ChatSession> = self
            .store
            .list()?
            .into_iter()
            .filter(|s| !s.is_expired(now))
            .collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }

    /// Delete every expired session. Returns the evicted search terms.
    pub fn prune(&mut self, now: DateTime<Utc>) -> SessionResult<Vec<String>> {
        let mut expired = self.store.list_expired(now)?;
        expired.sort();
        for term in &expired {
            self.store.delete(term)?;
            debug!(term = %term, "evicted expired session");
        }
        if !expired.is_empty() {
            info!(count = expired.len(), "pruned expired sessions");
        }
        Ok(expired)
    }

    fn update(
        &mut self,
        term: &str,
        now: DateTime<Utc>,
        f: impl FnOnce(&mut ChatSession),
    ) -> SessionResult<ChatSession> {
        let mut session = self.open(term, now)?;
        f(&mut session);
        session.touch(now, self.ttl);
        self.store.put(&session)?;
        Ok(session)
    }
}
