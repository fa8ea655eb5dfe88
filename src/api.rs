// API client module: a small blocking HTTP client for the leaderboard
// service. It knows the three endpoints the submit flow needs (list
// leaderboards, list GPUs for a leaderboard/runner pair, submit a file)
// and nothing about prompts or console output.

use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::CliError;

/// Base URL used when `LEADERBOARD_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable that overrides [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "LEADERBOARD_API_URL";

/// Ceiling for the whole submission request (connect + upload + response).
/// Evaluation runs server-side before the response is sent, hence the size.
pub const SUBMIT_TIMEOUT: Duration = Duration::from_secs(600);

/// One entry of `GET /leaderboards`. The server sends more fields than the
/// name; serde ignores the rest.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    pub name: String,
}

/// Execution backend a submission runs on. The set is fixed client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Runner {
    Modal,
    Github,
}

impl Runner {
    /// Menu order.
    pub const ALL: [Runner; 2] = [Runner::Modal, Runner::Github];

    pub fn as_str(self) -> &'static str {
        match self {
            Runner::Modal => "modal",
            Runner::Github => "github",
        }
    }
}

impl fmt::Display for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to build the submission call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub leaderboard: String,
    pub runner: String,
    pub gpu: String,
    pub file: PathBuf,
}

impl SubmissionRequest {
    /// Lower-case the three path identifiers. The server routes
    /// submissions on lower-case names only.
    pub fn normalized(self) -> Self {
        SubmissionRequest {
            leaderboard: self.leaderboard.to_lowercase(),
            runner: self.runner.to_lowercase(),
            gpu: self.gpu.to_lowercase(),
            file: self.file,
        }
    }
}

/// Result of the submission call. A non-200 answer is not an error here:
/// the caller reports it and carries on.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Accepted(serde_json::Value),
    Rejected { status: StatusCode, body: String },
}

/// Blocking API client holding a reqwest client and the service base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for `base_url`. Listing calls use reqwest's default
    /// timeouts; the submission call sets its own.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|_| CliError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(CliError::InvalidBaseUrl(base_url.to_string()).into());
        }
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient { client, base_url })
    }

    /// Create a client configured from `LEADERBOARD_API_URL`, falling back
    /// to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(&base_url)
    }

    /// Append `segments` to the base URL, each encoded as exactly one path
    /// segment.
    pub fn endpoint<I>(&self, segments: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `GET /leaderboards`.
    pub fn fetch_leaderboards(&self) -> Result<Vec<Leaderboard>> {
        let url = self.endpoint(["leaderboards"]);
        debug!(%url, "fetching leaderboards");
        let res = self
            .client
            .get(url)
            .send()
            .context("Failed to send leaderboards request")?;
        if res.status() != StatusCode::OK {
            warn!(status = %res.status(), "leaderboard listing failed");
            return Err(CliError::Fetch {
                what: "leaderboards",
                status: res.status(),
            }
            .into());
        }
        let leaderboards: Vec<Leaderboard> =
            res.json().context("Parsing leaderboards response json")?;
        debug!(count = leaderboards.len(), "leaderboards fetched");
        Ok(leaderboards)
    }

    /// `GET /{leaderboard}/{runner}/gpus`. The leaderboard name is used
    /// exactly as the server listed it.
    pub fn fetch_gpus(&self, leaderboard: &str, runner: &str) -> Result<Vec<String>> {
        let url = self.endpoint([leaderboard, runner, "gpus"]);
        debug!(%url, "fetching gpus");
        let res = self
            .client
            .get(url)
            .send()
            .context("Failed to send GPU listing request")?;
        if res.status() != StatusCode::OK {
            warn!(status = %res.status(), leaderboard, runner, "gpu listing failed");
            return Err(CliError::Fetch {
                what: "GPUs",
                status: res.status(),
            }
            .into());
        }
        let gpus: Vec<String> = res.json().context("Parsing GPU response json")?;
        debug!(count = gpus.len(), "gpus fetched");
        Ok(gpus)
    }

    /// `POST /{leaderboard}/{runner}/{gpu}` with the file as multipart field
    /// `file`. Identifiers are used as given; callers normalize first.
    pub fn submit_solution(&self, req: &SubmissionRequest) -> Result<Submission> {
        let content = std::fs::read_to_string(&req.file)
            .with_context(|| format!("Failed to read {}", req.file.display()))?;
        let file_name = req
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let part = multipart::Part::text(content).file_name(file_name);
        let form = multipart::Form::new().part("file", part);

        let url = self.endpoint([&req.leaderboard, &req.runner, &req.gpu]);
        debug!(%url, file = %req.file.display(), "submitting solution");
        let res = self
            .client
            .post(url)
            .multipart(form)
            .timeout(SUBMIT_TIMEOUT)
            .send()
            .context("Failed to send submission request")?;

        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().unwrap_or_default();
            warn!(%status, %body, "submission rejected");
            return Ok(Submission::Rejected { status, body });
        }
        let value = res.json().context("Parsing submission response json")?;
        Ok(Submission::Accepted(value))
    }
}
