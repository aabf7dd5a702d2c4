//! Subcommand handlers.

pub mod completions;
pub mod config;
pub mod search;
pub mod sessions;
pub mod transcript;
pub mod translate;
pub mod watch;

use anyhow::{Context, Result};
use verbalingo::api::ApiClient;
use verbalingo::sessions::{FileSessionStore, SessionHistory};
use verbalingo::Config;

/// Backend client built from configuration.
pub fn api_client(config: &Config) -> Result<ApiClient> {
    ApiClient::new(&config.api.base_url, config.api.timeout())
        .with_context(|| format!("Invalid backend URL {}", config.api.base_url))
}

/// Session history over the configured directory.
pub fn session_history(config: &Config) -> Result<SessionHistory<FileSessionStore>> {
    let dir = config.sessions_dir()?;
    Ok(SessionHistory::new(
        FileSessionStore::new(dir),
        config.sessions.ttl_days,
    ))
}

/// Wrap an API error with its user-facing message on top.
pub fn api_failure(err: verbalingo::api::ApiError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}
