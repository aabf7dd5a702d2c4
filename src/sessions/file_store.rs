//! On-disk session store: one pretty-printed JSON file per search term.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::error::{SessionError, SessionResult};
use super::filename::{session_filename, SESSION_EXTENSION};
use super::store::SessionStore;
use super::types::{session_key, ChatSession};

/// Stores sessions as JSON files in a directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Use `dir` for session files. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding `term`.
    pub fn path_for(&self, term: &str) -> PathBuf {
        self.dir.join(session_filename(&session_key(term)))
    }

    fn read(path: &Path) -> SessionResult<Option<ChatSession>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SessionError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| SessionError::Corrupt {
                path: path.to_path_buf(),
                source,
            })
    }

    fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SessionError + '_ {
        move |source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, term: &str) -> SessionResult<Option<ChatSession>> {
        let key = session_key(term);
        let path = self.path_for(&key);
        // Guard against a hash collision returning someone else's session
        Ok(Self::read(&path)?.filter(|s| s.search_term == key))
    }

    fn put(&mut self, session: &ChatSession) -> SessionResult<()> {
        let dir = &self.dir;
        fs::create_dir_all(dir).map_err(Self::io_error(dir))?;

        let path = self.path_for(&session.search_term);
        let json = serde_json::to_string_pretty(session).map_err(|source| {
            SessionError::Encode {
                term: session.search_term.clone(),
                source,
            }
        })?;

        // Write to a sibling temp file and rename so readers never see a
        // half-written session
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(Self::io_error(&tmp))?;
        fs::rename(&tmp, &path).map_err(Self::io_error(&path))?;

        debug!(term = %session.search_term, path = %path.display(), "session saved");
        Ok(())
    }

    fn delete(&mut self, term: &str) -> SessionResult<bool> {
        let path = self.path_for(term);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(SessionError::Io { path, source }),
        }
    }

    fn list(&self) -> SessionResult<Vec<ChatSession>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(SessionError::Io {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut sessions = Vec::new();
        for entry in entries {
            let path = entry.map_err(Self::io_error(&self.dir))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SESSION_EXTENSION) {
                continue;
            }
            // One bad file should not hide the rest of the history
            match Self::read(&path) {
                Ok(Some(session)) => sessions.push(session),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "skipping unreadable session file"),
            }
        }
        Ok(sessions)
    }
}
