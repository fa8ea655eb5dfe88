// Command-line surface. One subcommand today: `submit <FILEPATH>`.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Submit solutions to a leaderboard service
#[derive(Parser, Debug)]
#[command(name = "leaderboard-cli", version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity on stderr (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit a solution file to a leaderboard
    Submit {
        /// Path to the solution file to submit
        filepath: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_submit_with_path() {
        let cli = Cli::try_parse_from(["leaderboard-cli", "submit", "kernels/matmul.py"]).unwrap();
        assert_eq!(cli.verbose, 0);
        let Command::Submit { filepath } = cli.command;
        assert_eq!(filepath, PathBuf::from("kernels/matmul.py"));
    }

    #[test]
    fn submit_requires_a_path() {
        assert!(Cli::try_parse_from(["leaderboard-cli", "submit"]).is_err());
        assert!(Cli::try_parse_from(["leaderboard-cli"]).is_err());
    }

    #[test]
    fn verbose_counts() {
        let cli = Cli::try_parse_from(["leaderboard-cli", "submit", "a.py", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
