//! `sessions` subcommands.

use anyhow::{bail, Result};
use chrono::{Local, Utc};
use verbalingo::sessions::Role;
use verbalingo::theme::current_theme;
use verbalingo::tui::format::truncate_to_width;
use verbalingo::Config;

use super::session_history;

/// Width used for message previews.
const PREVIEW_WIDTH: usize = 60;

/// List live sessions, newest first.
#[cfg(not(tarpaulin_include))]
pub fn handle_list() -> Result<()> {
    let config = Config::load()?;
    let history = session_history(&config)?;
    let sessions = history.sessions(Utc::now())?;
    let theme = current_theme();

    if sessions.is_empty() {
        println!("{}", theme.secondary_text("No chat sessions."));
        return Ok(());
    }

    for session in &sessions {
        let updated = session.updated_at.with_timezone(&Local);
        println!(
            "{}  {}  {}",
            theme.accent_text(&session.search_term),
            theme.primary_text(&format!(
                "{} message(s), {} branch(es)",
                session.message_count(),
                session.branches.len()
            )),
            theme.secondary_text(&format!("updated {}", updated.format("%Y-%m-%d %H:%M")))
        );
    }
    Ok(())
}

/// Show the active branch of a session.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(term: &str) -> Result<()> {
    let config = Config::load()?;
    let history = session_history(&config)?;
    let Some(session) = history.get(term, Utc::now())? else {
        bail!("No session for '{}'", term);
    };
    let theme = current_theme();

    println!(
        "{} {}",
        theme.accent_text(&session.search_term),
        theme.secondary_text(&format!(
            "(branch {}/{}, clip {})",
            session.active_branch + 1,
            session.branches.len(),
            session.last_active_index + 1
        ))
    );
    for message in session.active_messages() {
        let who = match message.role {
            Role::User => theme.primary_text("you"),
            Role::Assistant => theme.success_text("ai "),
        };
        println!(
            "{}  {}",
            who,
            truncate_to_width(&message.content, PREVIEW_WIDTH)
        );
    }
    Ok(())
}

/// Append a message to a session.
pub fn handle_record(term: &str, message: &str, role: Role) -> Result<()> {
    let config = Config::load()?;
    let mut history = session_history(&config)?;
    let session = history.record_message(term, role, message, Utc::now())?;
    let theme = current_theme();
    println!(
        "{}",
        theme.success_text(&format!(
            "Recorded {} message in '{}' ({} total)",
            role,
            session.search_term,
            session.active_messages().len()
        ))
    );
    Ok(())
}

/// Delete one session.
pub fn handle_delete(term: &str) -> Result<()> {
    let config = Config::load()?;
    let mut history = session_history(&config)?;
    let theme = current_theme();
    if history.delete(term)? {
        println!(
            "{}",
            theme.success_text(&format!("Deleted session '{}'", term))
        );
    } else {
        println!(
            "{}",
            theme.secondary_text(&format!("No session for '{}'", term))
        );
    }
    Ok(())
}

/// Evict expired sessions.
pub fn handle_prune() -> Result<()> {
    let config = Config::load()?;
    let mut history = session_history(&config)?;
    let evicted = history.prune(Utc::now())?;
    let theme = current_theme();
    println!(
        "{}",
        theme.primary_text(&format!("Removed {} expired session(s)", evicted.len()))
    );
    Ok(())
}
