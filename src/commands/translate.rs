//! `translate` subcommand.

use anyhow::Result;
use verbalingo::api::Backend;
use verbalingo::theme::current_theme;
use verbalingo::Config;

use super::{api_client, api_failure};

#[cfg(not(tarpaulin_include))]
pub fn handle(text: &str, source: &str, target: &str) -> Result<()> {
    let config = Config::load()?;
    let client = api_client(&config)?;
    let response = client.translate(text, source, target).map_err(api_failure)?;

    let theme = current_theme();
    println!(
        "{} {}",
        theme.secondary_text(&format!("[{}]", response.source)),
        theme.primary_text(&response.original)
    );
    println!(
        "{} {}",
        theme.secondary_text(&format!("[{}]", response.target)),
        theme.accent_text(&response.translated)
    );
    Ok(())
}
