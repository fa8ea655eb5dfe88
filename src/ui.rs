// UI layer: the interactive submit flow. It prints numbered menus, asks
// for a number with `dialoguer`, shows an `indicatif` spinner while a
// request is in flight and hands the actual HTTP work to `api`.
//
// Prompting goes through the `Prompter` trait so the whole flow can be
// driven by a script in tests.

use crate::api::{ApiClient, Runner, Submission, SubmissionRequest};
use crate::error::CliError;
use anyhow::{anyhow, Result};
use crossterm::style::Stylize;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::StatusCode;
use std::fmt::Display;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Source of menu choices.
pub trait Prompter {
    /// Ask for a 1-based choice among `len` items. Implementations only
    /// return values in `1..=len`.
    fn choose(&mut self, prompt: &str, len: usize) -> Result<usize>;
}

/// Reads choices from the terminal. `Input::interact_text` keeps asking
/// until the text parses as a number and passes the range check.
#[derive(Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn choose(&mut self, prompt: &str, len: usize) -> Result<usize> {
        println!();
        let choice: usize = Input::new()
            .with_prompt(prompt)
            .validate_with(move |n: &usize| check_choice(*n, len))
            .interact_text()?;
        Ok(choice)
    }
}

/// How the flow ended when it did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Submitted(serde_json::Value),
    /// The server refused the submission. Reported, but not an error.
    Rejected(StatusCode),
}

/// Range check used by the prompt.
pub fn check_choice(choice: usize, len: usize) -> Result<(), String> {
    if (1..=len).contains(&choice) {
        Ok(())
    } else {
        Err(format!("Please enter a number between 1 and {len}"))
    }
}

/// Map a 1-based menu choice to its item.
pub fn pick<T>(items: &[T], choice: usize) -> Option<&T> {
    choice.checked_sub(1).and_then(|i| items.get(i))
}

pub fn print_menu<T: Display>(title: &str, items: &[T]) {
    println!("\n{}", format!("{title}:").bold().blue());
    for (idx, item) in items.iter().enumerate() {
        println!("{}. {}", idx + 1, item);
    }
}

/// Show `title` as a numbered menu and return the chosen item.
fn select<'a, T: Display>(
    prompter: &mut impl Prompter,
    title: &str,
    prompt: &str,
    items: &'a [T],
) -> Result<&'a T> {
    print_menu(title, items);
    let choice = prompter.choose(prompt, items.len())?;
    pick(items, choice).ok_or_else(|| anyhow!("Selection {choice} is out of range"))
}

/// Run `f` behind a transient spinner. The spinner is cleared on both
/// success and failure.
pub fn with_spinner<T>(message: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = f();
    spinner.finish_and_clear();
    result
}

/// Pretty-print a submission result with 2-space indentation.
pub fn render_result(value: &serde_json::Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// The whole submit command: validate the file, pick a leaderboard, a
/// runner and a GPU, upload, and print what the server says.
pub fn run_submit(
    api: &ApiClient,
    prompter: &mut impl Prompter,
    filepath: &Path,
) -> Result<Outcome> {
    if !filepath.exists() {
        return Err(CliError::FileNotFound(filepath.to_path_buf()).into());
    }

    let leaderboards = with_spinner("Fetching available leaderboards...", || {
        api.fetch_leaderboards()
    })?;
    let names: Vec<String> = leaderboards.into_iter().map(|b| b.name).collect();
    if names.is_empty() {
        return Err(CliError::EmptyListing("leaderboards").into());
    }
    let leaderboard = select(
        prompter,
        "Available Leaderboards",
        "Select leaderboard number",
        &names,
    )?;

    let runner = *select(
        prompter,
        "Available Runners",
        "Select runner number",
        &Runner::ALL,
    )?;

    let gpus = with_spinner("Fetching available GPUs...", || {
        api.fetch_gpus(leaderboard, runner.as_str())
    })?;
    if gpus.is_empty() {
        return Err(CliError::EmptyListing("GPUs").into());
    }
    let gpu = select(prompter, "Available GPUs", "Select GPU number", &gpus)?;

    let request = SubmissionRequest {
        leaderboard: leaderboard.clone(),
        runner: runner.to_string(),
        gpu: gpu.clone(),
        file: filepath.to_path_buf(),
    }
    .normalized();
    info!(
        leaderboard = %request.leaderboard,
        runner = %request.runner,
        gpu = %request.gpu,
        "submitting"
    );

    let submission = with_spinner("Submitting solution...", || {
        api.submit_solution(&request)
    })?;

    match submission {
        Submission::Rejected { status, .. } => {
            println!("{}", "Failed to submit solution".red());
            Ok(Outcome::Rejected(status))
        }
        Submission::Accepted(value) => {
            println!("\n{}", "Result:".bold().blue());
            println!("{}", render_result(&value)?);
            println!("{}", "Solution submitted successfully!".green());
            Ok(Outcome::Submitted(value))
        }
    }
}
