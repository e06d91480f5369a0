//! Integration tests for the pokedex binary
//!
//! Runs the built executable with arguments and piped stdin. None of these
//! tests reach the network: they only use commands that do not fetch.

use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Helper to run the CLI with given args and stdin, capturing output
fn run_cli(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pokedex"))
        .args(args)
        .env_remove("POKEDEX_BASE_URL")
        .env_remove("POKEDEX_CACHE_INTERVAL")
        .env_remove("POKEDEX_TIMEOUT")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute pokedex");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for pokedex")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"], "");
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pokedex"), "Help should mention pokedex");
    assert!(stdout.contains("--cache-interval-secs"));
    assert!(stdout.contains("--timeout-secs"));
}

#[test]
fn test_zero_interval_prints_error_and_exits() {
    let output = run_cli(&["--cache-interval-secs", "0"], "");
    assert!(!output.status.success(), "Expected zero interval to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("cache-interval-secs"),
        "Should name the bad option: {}",
        stderr
    );
}

#[test]
fn test_invalid_base_url_prints_error_and_exits() {
    let output = run_cli(&["--base-url", "pokeapi.co"], "");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid base URL"), "stderr: {}", stderr);
}

#[test]
fn test_repl_help_then_exit() {
    let output = run_cli(&[], "help\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Pokedex > "));
    assert!(stdout.contains("Welcome to the Pokedex!"));
    assert!(stdout.contains("catch: "));
    assert!(stdout.contains("Goodbye!"));
}

#[test]
fn test_repl_reports_unknown_and_failed_commands_then_continues() {
    let output = run_cli(&[], "fly\ninspect\npokedex\n");
    assert!(output.status.success(), "End of input should exit cleanly");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Unknown command"));
    assert!(stdout.contains("Error: inspect needs a name"));
    assert!(stdout.contains("Pokedex is empty!"));
}
