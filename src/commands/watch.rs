//! `watch` subcommand.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use verbalingo::api::Backend;
use verbalingo::cli::SearchArgs;
use verbalingo::player::PlaylistItem;
use verbalingo::theme::current_theme;
use verbalingo::tui::{run_watch, WatchApp};
use verbalingo::Config;

use super::{api_client, api_failure, session_history};

/// Search, then play the results in the watch view.
///
/// Resumes at the clip the user was on the last time they watched this
/// term, and remembers the clip they leave on.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &SearchArgs) -> Result<()> {
    let config = Config::load()?;
    let client = api_client(&config)?;
    let filters = args.to_filters(&config.api.language);

    let response = client.search(&filters).map_err(api_failure)?;
    if response.clips.is_empty() {
        let theme = current_theme();
        println!(
            "{}",
            theme.secondary_text(&format!("No clips for '{}'.", filters.query))
        );
        return Ok(());
    }
    let items: Vec<PlaylistItem> = response.clips.iter().map(PlaylistItem::from).collect();

    let mut history = session_history(&config)?;
    let resume = history
        .get(&filters.query, Utc::now())?
        .map(|s| s.last_active_index)
        .unwrap_or(0);

    let backend: Arc<dyn Backend> = Arc::new(client);
    let mut app = WatchApp::new(backend, &config, filters.query.clone(), items);
    if resume > 0 {
        app.resume_at(resume);
    }

    run_watch(&mut app)?;

    history.set_last_active_index(&filters.query, app.sync().current_index(), Utc::now())?;
    Ok(())
}
