//! `completions` subcommand.

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use verbalingo::cli::Cli;

pub fn handle(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
