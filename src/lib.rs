//! VerbaLingo - learn words from video clips with a synchronized transcript
//!
//! The crate is organized around the playback/transcript sync state machine
//! in [`player`], fed by the backend client in [`api`] and the background
//! [`loader`]. Chat history per search term lives in [`sessions`].

pub mod api;
pub mod cli;
pub mod config;
pub mod loader;
pub mod player;
pub mod sessions;
pub mod theme;
pub mod transcript;
pub mod tui;

pub use config::Config;
