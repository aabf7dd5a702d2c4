//! Session storage errors.

use std::path::PathBuf;

/// Errors that can occur while reading or writing chat sessions.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file {path} is not valid: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode session '{term}': {source}")]
    Encode {
        term: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No session for '{0}'")]
    NotFound(String),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
