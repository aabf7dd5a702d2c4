//! Terminal user interface
//!
//! The watch view drives the sync controller from a simulated playback
//! clock and renders the transcript with ratatui/crossterm.

pub mod format;
mod watch_app;

use anyhow::Result;

pub use watch_app::WatchApp;

/// Result of processing an input event.
///
/// Returned by key handlers to signal control flow decisions to the
/// main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Keep running
    Continue,
    /// Exit the view
    Quit,
}

/// Take over the terminal, run the app, and restore the terminal even if
/// the app fails.
#[cfg(not(tarpaulin_include))]
pub fn run_watch(app: &mut WatchApp) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
