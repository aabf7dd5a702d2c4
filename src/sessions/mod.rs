//! Client-side chat history, one session per search term.
//!
//! - [`SessionStore`]: `get/put/delete/list/list_expired` interface
//! - [`FileSessionStore`]: JSON files on disk
//! - [`MemorySessionStore`]: volatile store for tests
//! - [`SessionHistory`]: owns a store, applies the time-to-live, evicts
//!   expired sessions

mod error;
mod file_store;
pub mod filename;
mod history;
mod store;
mod types;

pub use error::{SessionError, SessionResult};
pub use file_store::FileSessionStore;
pub use history::SessionHistory;
pub use store::{MemorySessionStore, SessionStore};
pub use types::{session_key, ChatMessage, ChatSession, ConversationBranch, Role};
