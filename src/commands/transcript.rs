//! `transcript` subcommand.

use anyhow::Result;
use verbalingo::api::{Backend, TranscriptRequest};
use verbalingo::theme::current_theme;
use verbalingo::transcript::resolve_active_segment;
use verbalingo::tui::format::segment_line;
use verbalingo::Config;

use super::{api_client, api_failure};

#[cfg(not(tarpaulin_include))]
pub fn handle(
    video_id: &str,
    language: Option<String>,
    center: Option<f64>,
    at: Option<f64>,
    json: bool,
) -> Result<()> {
    let config = Config::load()?;
    let client = api_client(&config)?;
    let request = TranscriptRequest {
        video_id: video_id.to_string(),
        language: language.unwrap_or_else(|| config.api.language.clone()),
        center_position: center,
    };

    let transcript = client.transcript(&request).map_err(api_failure)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
        return Ok(());
    }

    let theme = current_theme();
    if transcript.is_empty() {
        println!("{}", theme.secondary_text("Transcript is empty."));
        return Ok(());
    }

    let active = at.and_then(|time| {
        resolve_active_segment(&transcript, time, config.player.lookahead_offset_secs)
    });
    for (i, segment) in transcript.sentences.iter().enumerate() {
        let is_active = active == Some(i);
        let line = segment_line(segment, is_active);
        if is_active {
            println!("{}", theme.accent_text(&line));
        } else {
            println!("{}", theme.primary_text(&line));
        }
    }
    if at.is_some() && active.is_none() {
        println!(
            "{}",
            theme.secondary_text("No segment is active at that time.")
        );
    }
    Ok(())
}
