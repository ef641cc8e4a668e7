//! Loginwatch entry point
//!
//! Parses arguments, resolves configuration, installs logging and hands the
//! selected command to its handler.

use anyhow::{Context, Result};
use clap::Parser;
use loginwatch_terminal::logging::init_tracing;
use loginwatch_terminal::{handle_command, Cli, Commands, TerminalConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = TerminalConfig::resolve(cli.config.as_deref())
        .context("Failed to resolve configuration")?
        .with_overrides(cli.data_file, cli.verbose);

    init_tracing(&config.log_level)?;
    tracing::debug!(data_file = %config.data_file.display(), "Starting loginwatch");

    let command = cli.command.unwrap_or(Commands::Shell);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    handle_command(&command, &config, stdin.lock(), stdout.lock())?;
    Ok(())
}
