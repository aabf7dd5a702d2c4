//! Chat session data model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// One line of conversation. Editing an earlier message forks a new branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationBranch {
    pub id: usize,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
}

/// All chat history for one search term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Normalized search term (see [`session_key`])
    pub search_term: String,
    pub branches: Vec<ConversationBranch>,
    /// Index into `branches` of the branch being shown
    pub active_branch: usize,
    /// Playlist index the user was on when they last left this term
    pub last_active_index: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// After this instant the session is eligible for eviction
    pub expires_at: DateTime<Utc>,
}

/// Normalize a search term into a session key.
///
/// Keys are trimmed and lowercased so "Run " and "run" share history.
pub fn session_key(term: &str) -> String {
    term.trim().to_lowercase()
}

impl ChatSession {
    /// Start an empty session with a single empty branch.
    pub fn new(term: &str, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            search_term: session_key(term),
            branches: vec![ConversationBranch {
                id: 0,
                messages: Vec::new(),
                created_at: now,
            }],
            active_branch: 0,
            last_active_index: 0,
            created_at: now,
            updated_at: now,
            expires_at: now + ttl,
        }
    }

    /// Mark the session as used, pushing out its expiry.
    pub fn touch(&mut self, now: DateTime<Utc>, ttl: Duration) {
        self.updated_at = now;
        self.expires_at = now + ttl;
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Messages of the active branch.
    pub fn active_messages(&self) -> &[ChatMessage] {
        self.branches
            .get(self.active_branch)
            .map(|b| b.messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn message_count(&self) -> usize {
        self.branches.iter().map(|b| b.messages.len()).sum()
    }

    /// Append a message to the active branch.
    pub fn push_message(&mut self, role: Role, content: impl Into<String>, now: DateTime<Utc>) {
        if self.branches.is_empty() {
            self.branches.push(ConversationBranch {
                id: 0,
                messages: Vec::new(),
                created_at: now,
            });
            self.active_branch = 0;
        }
        let index = self.active_branch.min(self.branches.len() - 1);
        self.active_branch = index;
        self.branches[index].messages.push(ChatMessage {
            role,
            content: content.into(),
            timestamp: now,
        });
    }

    /// Fork the active branch, keeping its first `keep` messages.
    ///
    /// The new branch becomes active. Returns its index.
    pub fn fork_branch(&mut self, keep: usize, now: DateTime<Utc>) -> usize {
        let messages: Vec<ChatMessage> = self.active_messages().iter().take(keep).cloned().collect();
        let id = self.branches.iter().map(|b| b.id + 1).max().unwrap_or(0);
        self.branches.push(ConversationBranch {
            id,
            messages,
            created_at: now,
        });
        self.active_branch = self.branches.len() - 1;
        self.active_branch
    }

    /// Show a different branch. Returns false if `index` is out of range.
    pub fn switch_branch(&mut self, index: usize) -> bool {
        if index < self.branches.len() {
            self.active_branch = index;
            true
        } else {
            false
        }
    }
}
