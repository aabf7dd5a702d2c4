//! VerbaLingo command-line entry point.

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use verbalingo::cli::{Cli, Commands, ConfigCommand, SessionsCommand};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "VERBALINGO_LOG";

/// Install the tracing subscriber.
///
/// Logs go to stderr. The watch view owns the terminal, so it only logs
/// when a filter is set explicitly.
fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Watch { .. } => "off",
        _ => "warn",
    };
    init_logging(default_filter);

    match cli.command {
        Commands::Search { filters, json } => commands::search::handle(&filters, json),
        Commands::Transcript {
            video_id,
            language,
            center,
            at,
            json,
        } => commands::transcript::handle(&video_id, language, center, at, json),
        Commands::Translate {
            text,
            source,
            target,
        } => commands::translate::handle(&text, &source, &target),
        Commands::Watch { filters } => commands::watch::handle(&filters),
        Commands::Sessions(cmd) => match cmd {
            SessionsCommand::List => commands::sessions::handle_list(),
            SessionsCommand::Show { term } => commands::sessions::handle_show(&term),
            SessionsCommand::Record {
                term,
                message,
                role,
            } => commands::sessions::handle_record(&term, &message, role.into()),
            SessionsCommand::Delete { term } => commands::sessions::handle_delete(&term),
            SessionsCommand::Prune => commands::sessions::handle_prune(),
        },
        Commands::Config(cmd) => match cmd {
            ConfigCommand::Show => commands::config::handle_show(),
            ConfigCommand::Edit => commands::config::handle_edit(),
            ConfigCommand::Migrate { yes } => commands::config::handle_migrate(yes),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
