// Error taxonomy for the submission flow.
// Only the cases the flow reports by name live here; transport, JSON and
// file I/O failures travel as plain `anyhow::Error` with context.

use reqwest::StatusCode;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("File '{}' not found", .0.display())]
    FileNotFound(PathBuf),

    /// A listing endpoint answered with something other than 200.
    #[error("Failed to fetch {what} (HTTP {status})")]
    Fetch {
        what: &'static str,
        status: StatusCode,
    },

    #[error("No {0} available")]
    EmptyListing(&'static str),

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}
