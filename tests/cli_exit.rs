// Runs the built binary and checks the exit status and stderr for the
// failure paths that stop before any prompt is shown.

use httpmock::prelude::*;
use std::process::{Command, Output, Stdio};

fn run_cli(base_url: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_leaderboard-cli"))
        .args(args)
        .env("LEADERBOARD_API_URL", base_url)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .unwrap()
}

#[test]
fn leaderboard_fetch_failure_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solution.py");
    std::fs::write(&path, "x = 1\n").unwrap();

    let server = MockServer::start();
    let boards = server.mock(|when, then| {
        when.method(GET).path("/leaderboards");
        then.status(500);
    });
    let gpus = server.mock(|when, then| {
        when.method(GET).path_contains("/gpus");
        then.status(200).body("[]");
    });

    let out = run_cli(&server.base_url(), &["submit", path.to_str().unwrap()]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Failed to fetch leaderboards"), "{stderr}");
    boards.assert();
    gpus.assert_hits(0);
}

#[test]
fn missing_file_exits_nonzero_without_requests() {
    let server = MockServer::start();
    let any = server.mock(|_when, then| {
        then.status(200);
    });

    let out = run_cli(&server.base_url(), &["submit", "/no/such/solution.py"]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("File '/no/such/solution.py' not found"),
        "{stderr}"
    );
    any.assert_hits(0);
}

#[test]
fn missing_argument_is_a_usage_error() {
    let out = run_cli("http://127.0.0.1:9", &["submit"]);
    assert!(!out.status.success());
}
