// Entrypoint for the CLI application.
// Parses arguments, installs logging, builds the API client and runs the
// submit flow. Every error ends up here and becomes exit code 1.

use clap::Parser;
use crossterm::style::Stylize;
use leaderboard_cli::api::ApiClient;
use leaderboard_cli::cli::{Cli, Command};
use leaderboard_cli::ui::{run_submit, TerminalPrompter};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("\n{}", format!("Error: {e:#}").red());
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Submit { filepath } => {
            // Base URL comes from `LEADERBOARD_API_URL` or the built-in
            // default. See `api::ApiClient::from_env`.
            let api = ApiClient::from_env()?;
            // A rejected submission is reported inside the flow and still
            // exits 0.
            run_submit(&api, &mut TerminalPrompter, &filepath)?;
        }
    }
    Ok(())
}

/// Log to stderr. `-v` flags win over `RUST_LOG`; without either only
/// warnings are shown.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
