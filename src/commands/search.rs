//! `search` subcommand.

use anyhow::Result;
use verbalingo::api::Backend;
use verbalingo::cli::SearchArgs;
use verbalingo::player::embed_start_seconds;
use verbalingo::theme::current_theme;
use verbalingo::tui::format::{format_duration, truncate_to_width};
use verbalingo::Config;

use super::{api_client, api_failure};

/// Width used for clip text in list output.
const TEXT_WIDTH: usize = 70;

#[cfg(not(tarpaulin_include))]
pub fn handle(args: &SearchArgs, json: bool) -> Result<()> {
    let config = Config::load()?;
    let client = api_client(&config)?;
    let filters = args.to_filters(&config.api.language);

    let response = client.search(&filters).map_err(api_failure)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let theme = current_theme();
    if response.clips.is_empty() {
        println!(
            "{}",
            theme.secondary_text(&format!("No clips for '{}'.", filters.query))
        );
        return Ok(());
    }

    for (i, clip) in response.clips.iter().enumerate() {
        let start = embed_start_seconds(clip.start_time);
        let label = clip.title.as_deref().unwrap_or(clip.video_id.as_str());
        println!(
            "{} {} {}",
            theme.accent_text(&format!("{:>3}.", i + 1)),
            theme.primary_text(label),
            theme.secondary_text(&format!("@ {}", format_duration(start as f64)))
        );
        if let Some(text) = &clip.text {
            println!("     {}", truncate_to_width(text, TEXT_WIDTH));
        }
    }
    println!(
        "{}",
        theme.secondary_text(&format!(
            "{} of {} clips",
            response.clips.len(),
            response.total.max(response.clips.len())
        ))
    );
    Ok(())
}
