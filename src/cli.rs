//! Command-line interface definition.
//!
//! Lives in the library so shell completions can be generated from it.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::api::SearchFilters;
use crate::sessions::Role;

#[derive(Parser, Debug)]
#[command(
    name = "verbalingo",
    version,
    about = "Learn words from video clips with a synchronized transcript"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search clips that use a word
    Search {
        #[command(flatten)]
        filters: SearchArgs,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the transcript of a video
    Transcript {
        video_id: String,
        /// Transcript language (defaults to config)
        #[arg(short, long)]
        language: Option<String>,
        /// Clip position to center the transcript on
        #[arg(long)]
        center: Option<f64>,
        /// Mark the segment active at this playback time (seconds)
        #[arg(long)]
        at: Option<f64>,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Translate a word or sentence
    Translate {
        text: String,
        #[arg(short, long)]
        source: String,
        #[arg(short, long)]
        target: String,
    },

    /// Search and play the clips with a live transcript
    Watch {
        #[command(flatten)]
        filters: SearchArgs,
    },

    /// Manage chat history
    #[command(subcommand)]
    Sessions(SessionsCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Search term and filters shared by `search` and `watch`.
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Word or phrase to search for
    pub query: String,
    /// Language code (defaults to config)
    #[arg(short, long)]
    pub language: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub sub_category: Option<String>,
}

impl SearchArgs {
    /// Build filters, using `default_language` when none was given.
    pub fn to_filters(&self, default_language: &str) -> SearchFilters {
        SearchFilters {
            query: self.query.clone(),
            language: self
                .language
                .clone()
                .unwrap_or_else(|| default_language.to_string()),
            category: self.category.clone(),
            sub_category: self.sub_category.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum SessionsCommand {
    /// List live sessions, newest first
    List,
    /// Show the active conversation of a session
    Show { term: String },
    /// Append a message to a session
    Record {
        term: String,
        message: String,
        #[arg(long, value_enum, default_value_t = RoleArg::User)]
        role: RoleArg,
    },
    /// Delete a session
    Delete { term: String },
    /// Delete all expired sessions
    Prune,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleArg {
    User,
    Assistant,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::User => Role::User,
            RoleArg::Assistant => Role::Assistant,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Open configuration in $EDITOR
    Edit,
    /// Add missing fields to the config file
    Migrate {
        /// Apply without asking
        #[arg(short, long)]
        yes: bool,
    },
}
